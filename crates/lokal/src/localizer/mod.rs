//! Single-value localization.
//!
//! Escaping, placeholder interpolation, default-locale resolution and the
//! `localize` entry point that ties them together. Misses never panic: they
//! are reported to a [`FailureHandler`] (or logged) and a fallback value is
//! returned.

mod error;
mod escape;
mod interpolate;
mod locale;
mod localize;

pub use error::{
    FailureHandler, LocalizationError, LocalizationFailure, UnitRef, VALUE_NOT_FOUND, log_failure,
};
pub(crate) use error::report;
pub use escape::escape_html;
pub use interpolate::interpolate;
pub use locale::{CurrentLocale, FixedLocale, LocaleSource, SystemLocale, resolve_locale};
pub use localize::{LocalizationOptions, localize};
