//! Building typed trees from untyped JSON.

use lokal_semantics::METADATA_KEY;
use serde::de::{Deserialize, Deserializer, Error as _};
use serde_json::{Map, Value as JsonValue};

use crate::tree::validate::{Violation, unit_locales, validate_localization};
use crate::types::{Localization, LocalizedUnit};

fn build_unit(object: Map<String, JsonValue>) -> LocalizedUnit {
    let mut unit = LocalizedUnit::new();
    for (key, value) in object {
        match value {
            _ if key == METADATA_KEY => unit = unit.with_metadata(value),
            JsonValue::String(text) => {
                unit.insert(key, text);
            }
            _ => {}
        }
    }
    unit
}

fn build_tree(object: Map<String, JsonValue>) -> Localization {
    let mut tree = Localization::new();
    for (key, value) in object {
        if key == METADATA_KEY {
            tree = tree.with_metadata(value);
            continue;
        }
        let JsonValue::Object(child) = value else {
            continue;
        };
        if unit_locales(&child).is_some() {
            tree.insert(key, build_unit(child));
        } else {
            tree.insert(key, build_tree(child));
        }
    }
    tree
}

/// Validates the value, then converts it. Key order is preserved.
///
/// # Example
///
/// ```
/// use lokal::Localization;
/// use serde_json::json;
///
/// let tree = Localization::try_from(json!({
///     "button": { "delete": { "en": "Delete", "ja": "削除" } },
/// }))
/// .unwrap();
/// assert_eq!(tree.len(), 1);
///
/// assert!(Localization::try_from(json!({ "a": { "en": 1 } })).is_err());
/// ```
impl TryFrom<JsonValue> for Localization {
    type Error = Violation;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        validate_localization(&value, None)?;
        match value {
            JsonValue::Object(root) => Ok(build_tree(root)),
            _ => Ok(Localization::new()),
        }
    }
}

impl<'de> Deserialize<'de> for Localization {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Localization::try_from(value).map_err(D::Error::custom)
    }
}
