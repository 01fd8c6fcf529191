use std::sync::{Arc, Mutex};

use lokal::{
    FailureHandler, FixedLocale, LocaleSource, LocalizationError, LocalizationFailure,
    LocalizationOptions, LocalizedUnit, VALUE_NOT_FOUND, localize, params,
};

type Failures = Arc<Mutex<Vec<LocalizationError>>>;

fn collecting_handler() -> (FailureHandler, Failures) {
    let failures: Failures = Arc::default();
    let sink = Arc::clone(&failures);
    let handler: FailureHandler = Arc::new(move |failure: &LocalizationFailure<'_>| {
        sink.lock().unwrap().push(failure.error.clone());
    });
    (handler, failures)
}

fn fixed(locale: &str) -> Arc<dyn LocaleSource> {
    Arc::new(FixedLocale::new(locale))
}

fn greeting() -> LocalizedUnit {
    LocalizedUnit::from([("en", "Hello {{name}}"), ("ja", "こんにちは {{name}}")])
}

// =========================================================================
// Locale selection
// =========================================================================

#[test]
fn explicit_locale_is_used() {
    let options = LocalizationOptions::builder()
        .locale("ja")
        .parameters(params! { "name" => "太郎" })
        .build();
    assert_eq!(localize(&greeting(), &options), "こんにちは 太郎");
}

#[test]
fn locale_comes_from_source_when_not_given() {
    let options = LocalizationOptions::builder()
        .locale_source(fixed("ja"))
        .parameters(params! { "name" => "太郎" })
        .build();
    assert_eq!(localize(&greeting(), &options), "こんにちは 太郎");
}

#[test]
fn unknown_source_locale_falls_back_to_first_locale() {
    let (handler, failures) = collecting_handler();
    let options = LocalizationOptions::builder()
        .locale_source(fixed("fr"))
        .parameters(params! { "name" => "Alice" })
        .failure_handler(handler)
        .build();

    assert_eq!(localize(&greeting(), &options), "Hello Alice");
    assert_eq!(
        *failures.lock().unwrap(),
        vec![LocalizationError::LocaleFallback {
            requested: "fr".to_string(),
            fallback: "en".to_string(),
        }]
    );
}

#[test]
fn closure_locale_source() {
    let source: Arc<dyn LocaleSource> = Arc::new(|| Some("ja".to_string()));
    let options = LocalizationOptions::builder()
        .locale_source(source)
        .skip_interpolation(true)
        .build();
    assert_eq!(localize(&greeting(), &options), "こんにちは {{name}}");
}

// =========================================================================
// Missing values
// =========================================================================

#[test]
fn explicit_locale_missing_from_unit_yields_sentinel() {
    let (handler, failures) = collecting_handler();
    let options = LocalizationOptions::builder()
        .locale("de")
        .failure_handler(handler)
        .build();

    assert_eq!(localize(&greeting(), &options), VALUE_NOT_FOUND);
    assert_eq!(VALUE_NOT_FOUND, "[error: localized value not found]");
    assert_eq!(
        *failures.lock().unwrap(),
        vec![LocalizationError::ValueNotFound]
    );
}

#[test]
fn empty_unit_yields_sentinel() {
    let (handler, failures) = collecting_handler();
    let options = LocalizationOptions::builder()
        .locale_source(fixed("en"))
        .failure_handler(handler)
        .build();

    assert_eq!(localize(&LocalizedUnit::new(), &options), VALUE_NOT_FOUND);
    assert_eq!(
        *failures.lock().unwrap(),
        vec![LocalizationError::ValueNotFound]
    );
}

// =========================================================================
// Interpolation settings
// =========================================================================

#[test]
fn skip_interpolation_returns_raw_value() {
    let options = LocalizationOptions::builder()
        .locale("en")
        .parameters(params! { "name" => "Alice" })
        .skip_interpolation(true)
        .build();
    assert_eq!(localize(&greeting(), &options), "Hello {{name}}");
}

#[test]
fn parameters_are_escaped_unless_disabled() {
    let unit = LocalizedUnit::from([("en", "{{m}}")]);
    let p = params! { "m" => "<b>x</b>" };

    let escaped = LocalizationOptions::builder()
        .locale("en")
        .parameters(p.clone())
        .build();
    assert_eq!(localize(&unit, &escaped), "&lt;b&gt;x&lt;/b&gt;");

    let raw = LocalizationOptions::builder()
        .locale("en")
        .parameters(p)
        .escape_parameters(false)
        .build();
    assert_eq!(localize(&unit, &raw), "<b>x</b>");
}

#[test]
fn missing_parameter_is_reported() {
    let (handler, failures) = collecting_handler();
    let options = LocalizationOptions::builder()
        .locale("en")
        .failure_handler(handler)
        .build();

    assert_eq!(localize(&greeting(), &options), "Hello ");
    assert_eq!(
        *failures.lock().unwrap(),
        vec![LocalizationError::ParameterNotFound {
            name: "name".to_string()
        }]
    );
}

// =========================================================================
// Options
// =========================================================================

#[test]
fn default_options() {
    let options = LocalizationOptions::default();
    assert_eq!(options.locale(), None);
    assert!(options.parameters().is_empty());
    assert!(!options.skip_interpolation());
    assert!(options.escape_parameters());
    assert!(options.failure_handler().is_none());
}

#[test]
fn metadata_is_not_a_locale() {
    let unit = LocalizedUnit::from([("en", "Save"), ("_metadata", "button label")]);
    assert_eq!(unit.len(), 1);
    assert!(!unit.contains_locale("_metadata"));

    let options = LocalizationOptions::builder().locale("_metadata").build();
    assert_eq!(localize(&unit, &options), VALUE_NOT_FOUND);
}
