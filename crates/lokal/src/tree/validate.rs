//! Structural validation of untyped translation trees.

use std::fmt::{Display, Formatter, Result as FmtResult};

use lokal_semantics::METADATA_KEY;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::tree::join_key_path;
use crate::types::{Localization, Node};

/// The set of locales a unit is translated into.
///
/// Iteration follows first insertion; equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct LocaleSet(Vec<String>);

impl LocaleSet {
    pub fn new<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        locales.into_iter().collect()
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.0.iter().any(|l| l == locale)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LocaleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut locales: Vec<String> = Vec::new();
        for locale in iter {
            let locale = locale.into();
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        LocaleSet(locales)
    }
}

impl PartialEq for LocaleSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|locale| other.contains(locale))
    }
}

impl Eq for LocaleSet {}

impl Display for LocaleSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{{}}}", self.0.join(", "))
    }
}

/// The first structural problem found in an untyped translation tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// The value being validated is not an object.
    #[error("expected an object, found {found}")]
    NotAnObject { found: &'static str },

    /// An entry is neither a unit nor a nested object.
    #[error("'{path}' is neither a localized unit nor a nested object")]
    InvalidEntry { path: String },

    /// A unit's locales differ from the canonical set.
    #[error("'{path}' has locales {found}, expected {expected}")]
    LocaleSetMismatch {
        path: String,
        expected: LocaleSet,
        found: LocaleSet,
    },

    /// The reference locales or reference tree are unusable.
    #[error("invalid reference: {reason}")]
    InvalidReference { reason: String },
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Non-metadata locales of `object` if it is shaped like a unit: at least
/// one such key, and every such value a string.
pub(super) fn unit_locales(object: &Map<String, JsonValue>) -> Option<LocaleSet> {
    let mut locales = object.iter().filter(|(key, _)| *key != METADATA_KEY).peekable();
    locales.peek()?;
    locales
        .map(|(locale, value)| value.is_string().then_some(locale.as_str()))
        .collect()
}

/// Depth-first walk threading the canonical locale set.
struct Validator {
    canonical: Option<LocaleSet>,
}

impl Validator {
    fn check_unit(&mut self, path: &str, found: LocaleSet) -> Result<(), Violation> {
        match &self.canonical {
            None => {
                self.canonical = Some(found);
                Ok(())
            }
            Some(expected) if *expected == found => Ok(()),
            Some(expected) => Err(Violation::LocaleSetMismatch {
                path: path.to_string(),
                expected: expected.clone(),
                found,
            }),
        }
    }

    fn validate_node(
        &mut self,
        prefix: &str,
        node: &Map<String, JsonValue>,
    ) -> Result<(), Violation> {
        for (key, value) in node {
            if key == METADATA_KEY {
                continue;
            }
            let path = join_key_path(prefix, key);
            let JsonValue::Object(child) = value else {
                return Err(Violation::InvalidEntry { path });
            };
            match unit_locales(child) {
                Some(found) => self.check_unit(&path, found)?,
                None => self.validate_node(&path, child)?,
            }
        }
        Ok(())
    }
}

/// The locale set of the first unit under `node`, depth-first in insertion
/// order.
fn first_unit_locales(node: &Map<String, JsonValue>) -> Option<LocaleSet> {
    node.iter()
        .filter(|(key, _)| *key != METADATA_KEY)
        .find_map(|(_, value)| {
            let child = value.as_object()?;
            unit_locales(child).or_else(|| first_unit_locales(child))
        })
}

fn reference_locales(matching: &JsonValue) -> Result<LocaleSet, Violation> {
    match matching {
        JsonValue::Array(locales) => locales
            .iter()
            .map(JsonValue::as_str)
            .collect::<Option<LocaleSet>>()
            .ok_or_else(|| Violation::InvalidReference {
                reason: "locale list contains a non-string".to_string(),
            }),
        JsonValue::Object(_) => {
            validate_localization(matching, None).map_err(|violation| Violation::InvalidReference {
                reason: format!("reference tree is invalid: {violation}"),
            })?;
            matching
                .as_object()
                .and_then(first_unit_locales)
                .ok_or_else(|| Violation::InvalidReference {
                    reason: "reference tree contains no localized units".to_string(),
                })
        }
        other => Err(Violation::InvalidReference {
            reason: format!("expected a locale list or a tree, found {}", type_name(other)),
        }),
    }
}

/// Check that `value` has the shape of a translation tree.
///
/// Every non-`_metadata` entry must be a unit (an object whose
/// non-`_metadata` values are all strings) or a nested object that is
/// itself valid. All units must share one locale set: the first unit found
/// depth-first fixes it, unless `matching` supplies it up front as an array
/// of locale strings or as a reference tree.
///
/// Returns the canonical locale set, or `None` when `value` holds no units
/// and no reference was given.
pub fn validate_localization(
    value: &JsonValue,
    matching: Option<&JsonValue>,
) -> Result<Option<LocaleSet>, Violation> {
    let JsonValue::Object(root) = value else {
        return Err(Violation::NotAnObject {
            found: type_name(value),
        });
    };
    let canonical = matching.map(reference_locales).transpose()?;
    let mut validator = Validator { canonical };
    validator.validate_node("", root)?;
    Ok(validator.canonical)
}

/// Whether `value` is a well-formed translation tree, optionally matching
/// the locales of `matching` (an array of locale strings or another tree).
///
/// # Example
///
/// ```
/// use lokal::is_localization;
/// use serde_json::json;
///
/// let fruits = json!({ "apple": { "en": "apple", "ja": "りんご" } });
/// assert!(is_localization(&fruits, None));
/// assert!(is_localization(&fruits, Some(&json!(["ja", "en"]))));
/// assert!(!is_localization(&fruits, Some(&json!(["en", "de"]))));
/// assert!(!is_localization(&json!("Hello"), None));
/// ```
pub fn is_localization(value: &JsonValue, matching: Option<&JsonValue>) -> bool {
    validate_localization(value, matching).is_ok()
}

/// [`is_localization`] against a fixed list of locales.
pub fn is_localization_with_locales(value: &JsonValue, locales: &[&str]) -> bool {
    let JsonValue::Object(root) = value else {
        return false;
    };
    let mut validator = Validator {
        canonical: Some(LocaleSet::new(locales.iter().copied())),
    };
    validator.validate_node("", root).is_ok()
}

impl Localization {
    /// Check that every unit in the tree has the same locale set.
    ///
    /// Function units count as units. Returns that set, or `None` for a
    /// tree without units.
    pub fn check_locales(&self) -> Result<Option<LocaleSet>, Violation> {
        let mut validator = Validator { canonical: None };
        validator.check_tree("", self)?;
        Ok(validator.canonical)
    }
}

impl Validator {
    fn check_tree(&mut self, prefix: &str, tree: &Localization) -> Result<(), Violation> {
        for (key, node) in tree.iter() {
            let path = join_key_path(prefix, key);
            match node {
                Node::Unit(unit) => self.check_unit(&path, unit.locales().collect())?,
                Node::Function(unit) => self.check_unit(&path, unit.locales().collect())?,
                Node::Branch(child) => self.check_tree(&path, child)?,
            }
        }
        Ok(())
    }
}
