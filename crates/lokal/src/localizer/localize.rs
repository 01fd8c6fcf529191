use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::Builder;

use crate::localizer::error::{
    FailureHandler, LocalizationError, LocalizationFailure, UnitRef, VALUE_NOT_FOUND, report,
};
use crate::localizer::interpolate::interpolate;
use crate::localizer::locale::{CurrentLocale, LocaleSource, resolve_locale};
use crate::types::{LocalizedUnit, Params};

/// Settings for one [`localize`] call, or a batch of them.
///
/// # Example
///
/// ```
/// use lokal::{LocalizationOptions, LocalizedUnit, localize, params};
///
/// let greeting = LocalizedUnit::from([("en", "Hello {{name}}"), ("fr", "Bonjour {{name}}")]);
/// let options = LocalizationOptions::builder()
///     .locale("fr")
///     .parameters(params! { "name" => "Alice" })
///     .build();
///
/// assert_eq!(localize(&greeting, &options), "Bonjour Alice");
/// ```
#[derive(Clone, Builder)]
pub struct LocalizationOptions {
    /// Explicit locale. Resolved from `locale_source` when absent.
    #[builder(into)]
    pub(crate) locale: Option<String>,

    /// Values interpolated into `{{ name }}` placeholders.
    #[builder(default)]
    pub(crate) parameters: Params,

    /// Return the localized text as-is, placeholders included.
    #[builder(default)]
    pub(crate) skip_interpolation: bool,

    /// HTML-escape parameter values before substituting them. Keep this on
    /// for user-supplied or otherwise untrusted parameters.
    #[builder(default = true)]
    pub(crate) escape_parameters: bool,

    /// Receives failures instead of the default log sink.
    pub(crate) failure_handler: Option<FailureHandler>,

    /// Default-locale source. [`CurrentLocale`] when absent.
    pub(crate) locale_source: Option<Arc<dyn LocaleSource>>,
}

impl Default for LocalizationOptions {
    fn default() -> Self {
        LocalizationOptions::builder().build()
    }
}

impl LocalizationOptions {
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn parameters(&self) -> &Params {
        &self.parameters
    }

    pub fn skip_interpolation(&self) -> bool {
        self.skip_interpolation
    }

    pub fn escape_parameters(&self) -> bool {
        self.escape_parameters
    }

    pub fn failure_handler(&self) -> Option<&FailureHandler> {
        self.failure_handler.as_ref()
    }

    /// The configured locale source, or [`CurrentLocale`].
    pub fn locale_source(&self) -> &dyn LocaleSource {
        self.locale_source.as_deref().unwrap_or(&CurrentLocale)
    }
}

impl Debug for LocalizationOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LocalizationOptions")
            .field("locale", &self.locale)
            .field("parameters", &self.parameters)
            .field("skip_interpolation", &self.skip_interpolation)
            .field("escape_parameters", &self.escape_parameters)
            .field("failure_handler", &self.failure_handler.is_some())
            .field("locale_source", &self.locale_source.is_some())
            .finish()
    }
}

/// Localize one unit.
///
/// Uses the explicit locale from `options`, or resolves one with
/// [`resolve_locale`]. A unit without a value for that locale reports
/// [`LocalizationError::ValueNotFound`] and yields [`VALUE_NOT_FOUND`].
/// Otherwise the value is interpolated with the options' parameters, unless
/// `skip_interpolation` is set.
pub fn localize(unit: &LocalizedUnit, options: &LocalizationOptions) -> String {
    let handler = options.failure_handler();
    let locale = match options.locale() {
        Some(locale) => locale.to_string(),
        None => resolve_locale(Some(unit), options.locale_source(), handler),
    };

    let Some(value) = unit.get(&locale) else {
        report(
            &LocalizationFailure {
                locale: &locale,
                unit: UnitRef::Text(unit),
                error: LocalizationError::ValueNotFound,
            },
            handler,
        );
        return VALUE_NOT_FOUND.to_string();
    };

    if options.skip_interpolation {
        return value.to_string();
    }

    interpolate(
        Some(value),
        unit,
        &locale,
        Some(&options.parameters),
        options.escape_parameters,
        handler,
    )
}
