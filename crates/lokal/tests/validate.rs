use lokal::{
    FunctionUnit, LocaleSet, Localization, LocalizedUnit, Value, Violation, is_localization,
    is_localization_with_locales, validate_localization,
};
use pretty_assertions::assert_eq;
use serde_json::{Value as JsonValue, json};

fn fruits() -> JsonValue {
    json!({
        "apple": { "en": "apple", "ja": "りんご" },
        "pomegranate": { "en": "pomegranate", "ja": "ザクロ" },
    })
}

fn vegetables() -> JsonValue {
    json!({
        "carrot": { "en": "carrot", "ja": "人参" },
        "cucumber": { "en": "cucumber", "ja": "キュウリ" },
    })
}

fn breads() -> JsonValue {
    json!({
        "rye": { "en": "rye", "de": "Weizen" },
        "pretzel": { "en": "pretzel", "de": "Pretzel" },
    })
}

fn invalid_breads() -> JsonValue {
    json!({
        "rye": { "en": "rye", "ja": "Weizen" },
        "pretzel": { "en": "pretzel", "de": "Pretzel" },
    })
}

// =========================================================================
// Shape
// =========================================================================

#[test]
fn valid_trees() {
    assert!(is_localization(&json!({ "foo": { "en": "Hello" } }), None));
    assert!(is_localization(&fruits(), None));
    assert!(is_localization(&vegetables(), None));
    assert!(is_localization(&breads(), None));
}

#[test]
fn non_objects_are_rejected() {
    assert!(!is_localization(&json!("Hello"), None));
    assert!(!is_localization(&json!(null), None));
    assert!(!is_localization(&json!(["en"]), None));
    assert_eq!(
        validate_localization(&json!(42), None),
        Err(Violation::NotAnObject { found: "a number" })
    );
}

#[test]
fn inconsistent_locale_sets_are_rejected() {
    assert!(!is_localization(&invalid_breads(), None));
    assert_eq!(
        validate_localization(&invalid_breads(), None),
        Err(Violation::LocaleSetMismatch {
            path: "pretzel".to_string(),
            expected: LocaleSet::new(["en", "ja"]),
            found: LocaleSet::new(["en", "de"]),
        })
    );
}

#[test]
fn nested_inconsistent_locale_sets_are_rejected() {
    let tree = json!({
        "button": {
            "delete": { "en": "Delete", "ja": "削除" },
            "save": { "en": "Save", "fr": "Sauvegarder" },
        },
    });
    let violation = validate_localization(&tree, None).unwrap_err();
    assert_eq!(
        violation.to_string(),
        "'button.save' has locales {en, fr}, expected {en, ja}"
    );
}

#[test]
fn non_string_unit_value_is_rejected() {
    let tree = json!({
        "button": { "delete": { "en": 123, "ja": "削除" } },
    });
    assert!(!is_localization(&tree, None));
    assert_eq!(
        validate_localization(&tree, None),
        Err(Violation::InvalidEntry {
            path: "button.delete.en".to_string()
        })
    );
}

#[test]
fn scalar_and_array_entries_are_rejected() {
    for entry in [json!(1), json!("text"), json!(true), json!(null), json!(["en"])] {
        let tree = json!({ "ok": { "en": "fine" }, "bad": entry });
        assert_eq!(
            validate_localization(&tree, None),
            Err(Violation::InvalidEntry {
                path: "bad".to_string()
            })
        );
    }
}

#[test]
fn metadata_is_ignored_at_every_level() {
    let tree = json!({
        "button": {
            "delete": {
                "en": "Delete",
                "ja": "削除",
                "_metadata": { "timestamp": "2025-01-31" },
            },
        },
        "_metadata": { "version": "1.0.0" },
    });
    assert!(is_localization(&tree, None));
    assert_eq!(
        validate_localization(&tree, None),
        Ok(Some(LocaleSet::new(["ja", "en"])))
    );
}

#[test]
fn empty_objects_are_vacuously_valid() {
    assert_eq!(validate_localization(&json!({}), None), Ok(None));
    assert!(is_localization(&json!({ "a": {}, "b": { "_metadata": 1 } }), None));
}

#[test]
fn validation_stops_at_first_failure() {
    let tree = json!({
        "first": { "en": 1 },
        "second": { "en": "x", "de": "y" },
        "third": { "fr": "z" },
    });
    assert_eq!(
        validate_localization(&tree, None),
        Err(Violation::InvalidEntry {
            path: "first.en".to_string()
        })
    );
}

// =========================================================================
// Matching a reference tree
// =========================================================================

#[test]
fn matching_reference_tree() {
    assert!(is_localization(&fruits(), Some(&vegetables())));
    assert!(is_localization(&vegetables(), Some(&fruits())));
    assert!(!is_localization(&breads(), Some(&fruits())));
    assert!(!is_localization(&fruits(), Some(&breads())));
}

#[test]
fn reference_without_units_is_rejected() {
    assert!(!is_localization(&fruits(), Some(&json!({}))));
    assert!(matches!(
        validate_localization(&fruits(), Some(&json!({}))),
        Err(Violation::InvalidReference { .. })
    ));
}

#[test]
fn invalid_reference_tree_is_rejected() {
    assert!(!is_localization(&fruits(), Some(&invalid_breads())));
}

#[test]
fn reference_of_other_type_is_rejected() {
    assert!(!is_localization(&fruits(), Some(&json!("en"))));
    assert!(!is_localization(&fruits(), Some(&json!(null))));
}

#[test]
fn reference_locales_come_from_its_first_unit_depth_first() {
    let reference = json!({
        "group": { "inner": { "en": "a", "ja": "b" } },
        "later": { "en": "c", "ja": "d" },
    });
    assert_eq!(
        validate_localization(&fruits(), Some(&reference)),
        Ok(Some(LocaleSet::new(["en", "ja"])))
    );
}

// =========================================================================
// Matching a locale list
// =========================================================================

#[test]
fn matching_locale_list() {
    assert!(is_localization(&fruits(), Some(&json!(["en", "ja"]))));
    assert!(is_localization(&vegetables(), Some(&json!(["ja", "en"]))));
    assert!(is_localization(&breads(), Some(&json!(["en", "de"]))));

    assert!(!is_localization(&fruits(), Some(&json!(["en", "de"]))));
    assert!(!is_localization(&breads(), Some(&json!(["en", "ja"]))));
    assert!(!is_localization(&fruits(), Some(&json!(["en"]))));
    assert!(!is_localization(&fruits(), Some(&json!(["en", "ja", "de"]))));
}

#[test]
fn locale_list_with_non_string_is_rejected() {
    assert!(!is_localization(&fruits(), Some(&json!(["not", 123]))));
}

#[test]
fn typed_locale_list() {
    assert!(is_localization_with_locales(&fruits(), &["en", "ja"]));
    assert!(!is_localization_with_locales(&fruits(), &["en"]));
    assert!(!is_localization_with_locales(&json!("x"), &["en"]));
}

#[test]
fn locale_list_applies_to_first_unit_too() {
    let tree = json!({ "only": { "en": "x", "ja": "y" } });
    assert_eq!(
        validate_localization(&tree, Some(&json!(["en", "de"]))),
        Err(Violation::LocaleSetMismatch {
            path: "only".to_string(),
            expected: LocaleSet::new(["en", "de"]),
            found: LocaleSet::new(["en", "ja"]),
        })
    );
}

// =========================================================================
// LocaleSet
// =========================================================================

#[test]
fn locale_set_equality_ignores_order_and_duplicates() {
    assert_eq!(LocaleSet::new(["en", "ja"]), LocaleSet::new(["ja", "en", "ja"]));
    assert_ne!(LocaleSet::new(["en"]), LocaleSet::new(["en", "ja"]));
    assert_eq!(LocaleSet::new(["ja", "en", "ja"]).to_string(), "{ja, en}");
}

// =========================================================================
// Typed trees
// =========================================================================

#[test]
fn typed_tree_check_locales() {
    let tree = Localization::new()
        .with("apple", LocalizedUnit::from([("en", "apple"), ("ja", "りんご")]))
        .with(
            "count",
            FunctionUnit::new()
                .with("ja", |args: &[Value]| format!("{}個", args[0]))
                .with("en", |args: &[Value]| format!("{} items", args[0])),
        );
    assert_eq!(tree.check_locales(), Ok(Some(LocaleSet::new(["en", "ja"]))));

    let broken = tree.with(
        "nested",
        Localization::new().with("pear", LocalizedUnit::from([("en", "pear")])),
    );
    assert_eq!(
        broken.check_locales(),
        Err(Violation::LocaleSetMismatch {
            path: "nested.pear".to_string(),
            expected: LocaleSet::new(["en", "ja"]),
            found: LocaleSet::new(["en"]),
        })
    );
}

#[test]
fn empty_typed_tree_has_no_locale_set() {
    assert_eq!(Localization::new().check_locales(), Ok(None));
}
