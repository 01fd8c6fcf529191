//! Default-locale sources and locale resolution for a unit.

use std::env;

use icu_locale_core::LanguageIdentifier;
use lokal_semantics::FALLBACK_LOCALE;

use crate::global::current_locale;
use crate::localizer::error::{
    FailureHandler, LocalizationError, LocalizationFailure, UnitRef, report,
};
use crate::types::LocalizedUnit;

/// Where the default locale comes from when the caller does not name one.
///
/// Implemented for [`CurrentLocale`] (the default), [`FixedLocale`],
/// [`SystemLocale`] and any `Fn() -> Option<String>`, so tests can inject a
/// deterministic source.
pub trait LocaleSource: Send + Sync {
    /// The preferred locale, or `None` if this source has no opinion.
    fn preferred_locale(&self) -> Option<String>;
}

/// The process-wide current locale (see [`set_current_locale`]).
///
/// [`set_current_locale`]: crate::set_current_locale
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentLocale;

impl LocaleSource for CurrentLocale {
    fn preferred_locale(&self) -> Option<String> {
        Some(current_locale())
    }
}

/// Always the same locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocale(pub String);

impl FixedLocale {
    pub fn new(locale: impl Into<String>) -> Self {
        Self(locale.into())
    }
}

impl LocaleSource for FixedLocale {
    fn preferred_locale(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// The language of the process environment (`LC_ALL`, `LC_MESSAGES`, `LANG`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocale;

impl SystemLocale {
    const VARIABLES: [&'static str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

    /// Extract the language subtag from a POSIX locale value.
    ///
    /// `"ja_JP.UTF-8"` becomes `"ja"`. `"C"`, `"POSIX"`, empty and
    /// unparseable values yield `None`.
    pub fn language_of(raw: &str) -> Option<String> {
        let tag = raw.split(['.', '@']).next().unwrap_or_default();
        if tag.is_empty() || tag == "C" || tag == "POSIX" {
            return None;
        }
        let identifier = LanguageIdentifier::try_from_str(&tag.replace('_', "-")).ok()?;
        let language = identifier.language.as_str();
        (language != "und").then(|| language.to_string())
    }
}

impl LocaleSource for SystemLocale {
    fn preferred_locale(&self) -> Option<String> {
        Self::VARIABLES
            .iter()
            .filter_map(|name| env::var(name).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| Self::language_of(&value))
    }
}

impl<F> LocaleSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn preferred_locale(&self) -> Option<String> {
        self()
    }
}

/// Pick the locale to use for `unit` when the caller did not name one.
///
/// The source's locale (or `"en"`) is used if `unit` is `None`, empty, or
/// has a value for it. Otherwise the unit's first locale is used and a
/// [`LocalizationError::LocaleFallback`] is reported.
///
/// # Example
///
/// ```
/// use lokal::{FixedLocale, LocalizedUnit, resolve_locale};
///
/// let unit = LocalizedUnit::from([("en", "Hello"), ("ja", "こんにちは")]);
/// assert_eq!(resolve_locale(Some(&unit), &FixedLocale::new("ja"), None), "ja");
/// assert_eq!(resolve_locale(None, &FixedLocale::new("fr"), None), "fr");
/// ```
pub fn resolve_locale(
    unit: Option<&LocalizedUnit>,
    source: &dyn LocaleSource,
    on_failure: Option<&FailureHandler>,
) -> String {
    let preferred = source
        .preferred_locale()
        .filter(|locale| !locale.is_empty())
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string());

    let Some(unit) = unit else {
        return preferred;
    };
    if unit.contains_locale(&preferred) {
        return preferred;
    }
    let Some(first) = unit.first_locale() else {
        return preferred;
    };

    report(
        &LocalizationFailure {
            locale: &preferred,
            unit: UnitRef::Text(unit),
            error: LocalizationError::LocaleFallback {
                requested: preferred.clone(),
                fallback: first.to_string(),
            },
        },
        on_failure,
    );
    first.to_string()
}
