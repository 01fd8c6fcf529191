//! Localization failures and the failure sink.

use std::sync::Arc;

use thiserror::Error;

use crate::types::{FunctionUnit, LocalizedUnit};

/// Text returned by [`localize`](crate::localize) when a unit has no value
/// for the resolved locale.
pub const VALUE_NOT_FOUND: &str = "[error: localized value not found]";

/// What went wrong while localizing a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalizationError {
    /// The unit has no value for the resolved locale.
    #[error("localized value not found")]
    ValueNotFound,

    /// A placeholder had no corresponding (non-null) parameter.
    #[error("interpolation parameter not found: '{name}'")]
    ParameterNotFound { name: String },

    /// The preferred locale is not in the unit; its first locale was used.
    #[error("locale '{requested}' not available, falling back to '{fallback}'")]
    LocaleFallback { requested: String, fallback: String },
}

/// The unit a failure refers to.
#[derive(Debug, Clone, Copy)]
pub enum UnitRef<'a> {
    Text(&'a LocalizedUnit),
    Function(&'a FunctionUnit),
}

/// A resolution or interpolation miss.
///
/// Failures are transient: one is built per miss and handed to the
/// caller's [`FailureHandler`], or logged when there is none.
#[derive(Debug, Clone)]
pub struct LocalizationFailure<'a> {
    /// The locale being localized into.
    pub locale: &'a str,
    /// The unit being localized.
    pub unit: UnitRef<'a>,
    /// What went wrong.
    pub error: LocalizationError,
}

/// Caller-supplied callback receiving every localization failure.
pub type FailureHandler = Arc<dyn Fn(&LocalizationFailure<'_>) + Send + Sync>;

/// Route a failure to `handler`, or to [`log_failure`] without one.
pub(crate) fn report(failure: &LocalizationFailure<'_>, handler: Option<&FailureHandler>) {
    match handler {
        Some(handler) => handler(failure),
        None => log_failure(failure),
    }
}

/// The default failure sink: write a diagnostic and carry on.
///
/// Locale fallbacks are logged at `warn`, missing values and parameters at
/// `error`.
pub fn log_failure(failure: &LocalizationFailure<'_>) {
    match &failure.error {
        LocalizationError::LocaleFallback { .. } => {
            tracing::warn!(locale = failure.locale, error = %failure.error, "localization fallback");
        }
        LocalizationError::ValueNotFound | LocalizationError::ParameterNotFound { .. } => {
            tracing::error!(
                locale = failure.locale,
                unit = ?failure.unit,
                error = %failure.error,
                "localization failure"
            );
        }
    }
}
