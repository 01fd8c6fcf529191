use lokal_semantics::{Segment, parse_template};

use crate::localizer::error::{
    FailureHandler, LocalizationError, LocalizationFailure, UnitRef, report,
};
use crate::localizer::escape_html;
use crate::types::{LocalizedUnit, Params};

/// Substitute `{{ name }}` placeholders in `template` with `parameters`.
///
/// A `None` template is treated as empty. Each placeholder is resolved on
/// its own: a present, non-null parameter is written in its string form
/// (HTML-escaped when `escape_parameters` is set), anything else becomes an
/// empty string and reports one [`LocalizationError::ParameterNotFound`]
/// for `unit`/`locale` to `on_failure`, or logs it. Substituted text is
/// never rescanned for placeholders.
///
/// # Example
///
/// ```
/// use lokal::{LocalizedUnit, interpolate, params};
///
/// let unit = LocalizedUnit::from([("en", "Hello {{name}}")]);
/// let params = params! { "name" => "Alice" };
/// let text = interpolate(Some("Hello {{name}}"), &unit, "en", Some(&params), true, None);
/// assert_eq!(text, "Hello Alice");
/// ```
pub fn interpolate(
    template: Option<&str>,
    unit: &LocalizedUnit,
    locale: &str,
    parameters: Option<&Params>,
    escape_parameters: bool,
    on_failure: Option<&FailureHandler>,
) -> String {
    let template = template.unwrap_or_default();
    let mut result = String::with_capacity(template.len());

    for segment in parse_template(template) {
        match segment {
            Segment::Literal { text, .. } => result.push_str(text),
            Segment::Placeholder { name, .. } => {
                let value = parameters
                    .and_then(|params| params.get(name))
                    .filter(|value| !value.is_null());
                match value {
                    Some(value) => {
                        let text = value.to_string();
                        if escape_parameters {
                            result.push_str(&escape_html(&text));
                        } else {
                            result.push_str(&text);
                        }
                    }
                    None => report(
                        &LocalizationFailure {
                            locale,
                            unit: UnitRef::Text(unit),
                            error: LocalizationError::ParameterNotFound {
                                name: name.to_string(),
                            },
                        },
                        on_failure,
                    ),
                }
            }
        }
    }

    result
}
