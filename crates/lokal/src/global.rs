//! Process-wide current locale.
//!
//! This is what [`CurrentLocale`](crate::CurrentLocale) reports, and so the
//! default used by `localize` and the lazy leaves of `localize_all` when no
//! locale is given. Reads happen on every access, so changing it is visible
//! to projections built earlier.

use std::sync::{LazyLock, PoisonError, RwLock};

use lokal_semantics::FALLBACK_LOCALE;

static CURRENT_LOCALE: LazyLock<RwLock<String>> =
    LazyLock::new(|| RwLock::new(FALLBACK_LOCALE.to_string()));

/// Provides read access to the current locale.
pub fn with_current_locale<T>(f: impl FnOnce(&str) -> T) -> T {
    let guard = CURRENT_LOCALE
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Sets the current locale.
pub fn set_current_locale(locale: impl Into<String>) {
    let mut guard = CURRENT_LOCALE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = locale.into();
}

/// Returns the current locale (`"en"` until set).
pub fn current_locale() -> String {
    with_current_locale(str::to_owned)
}
