use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::mem;
use std::sync::Arc;

use lokal_semantics::METADATA_KEY;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;

use super::Value;

/// One piece of text translated into several locales.
///
/// A unit maps each locale to a literal string. Locales keep insertion
/// order, which matters when the resolver falls back to the first locale.
/// The reserved `_metadata` key is never a locale: it is stored separately
/// and is opaque to this library.
///
/// # Example
///
/// ```
/// use lokal::LocalizedUnit;
///
/// let unit = LocalizedUnit::new()
///     .with("en", "Delete")
///     .with("ja", "削除");
///
/// assert_eq!(unit.get("ja"), Some("削除"));
/// assert_eq!(unit.first_locale(), Some("en"));
/// assert_eq!(unit.locales().collect::<Vec<_>>(), ["en", "ja"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalizedUnit {
    values: Vec<(String, String)>,
    metadata: Option<JsonValue>,
}

impl LocalizedUnit {
    /// Create an empty unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the text for `locale`, returning the unit.
    ///
    /// Passing `_metadata` as the locale stores the text as metadata instead.
    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(locale, text);
        self
    }

    /// Attach caller-defined metadata.
    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add or replace the text for `locale`.
    ///
    /// A replaced locale keeps its original position. Returns the previous
    /// text, if any.
    pub fn insert(&mut self, locale: impl Into<String>, text: impl Into<String>) -> Option<String> {
        let locale = locale.into();
        let text = text.into();
        if locale == METADATA_KEY {
            self.metadata = Some(JsonValue::String(text));
            return None;
        }
        match self.values.iter_mut().find(|(l, _)| *l == locale) {
            Some((_, existing)) => Some(mem::replace(existing, text)),
            None => {
                self.values.push((locale, text));
                None
            }
        }
    }

    /// The text for `locale`, if present.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(l, _)| l == locale)
            .map(|(_, text)| text.as_str())
    }

    /// Whether `locale` has a value in this unit.
    pub fn contains_locale(&self, locale: &str) -> bool {
        self.values.iter().any(|(l, _)| l == locale)
    }

    /// Locales in insertion order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(l, _)| l.as_str())
    }

    /// The first locale in insertion order.
    pub fn first_locale(&self) -> Option<&str> {
        self.values.first().map(|(l, _)| l.as_str())
    }

    /// `(locale, text)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }

    /// Number of locales.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the unit has no locales.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Caller-defined metadata, if any.
    pub fn metadata(&self) -> Option<&JsonValue> {
        self.metadata.as_ref()
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for LocalizedUnit {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut unit = LocalizedUnit::new();
        for (locale, text) in iter {
            unit.insert(locale, text);
        }
        unit
    }
}

impl<const N: usize> From<[(&str, &str); N]> for LocalizedUnit {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for LocalizedUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.metadata.is_some());
        let mut map = serializer.serialize_map(Some(self.values.len() + extra))?;
        for (locale, text) in &self.values {
            map.serialize_entry(locale, text)?;
        }
        if let Some(metadata) = &self.metadata {
            map.serialize_entry(METADATA_KEY, metadata)?;
        }
        map.end()
    }
}

/// A per-locale function producing localized text from arguments.
pub type LocaleFn = Arc<dyn Fn(&[Value]) -> String + Send + Sync>;

/// A unit whose per-locale values are functions rather than strings.
///
/// Used for messages whose wording depends on arguments in ways a template
/// cannot express, e.g. word order or agreement.
///
/// # Example
///
/// ```
/// use lokal::{FunctionUnit, Value};
///
/// let delete = FunctionUnit::new()
///     .with("en", |args: &[Value]| format!("Delete {}", args[0]))
///     .with("ja", |args: &[Value]| format!("{}を削除", args[0]));
///
/// let ja = delete.get("ja").unwrap();
/// assert_eq!(ja(&[Value::from("ドキュメント")]), "ドキュメントを削除");
/// ```
#[derive(Clone, Default)]
pub struct FunctionUnit {
    functions: Vec<(String, LocaleFn)>,
    metadata: Option<JsonValue>,
}

impl FunctionUnit {
    /// Create an empty function unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the function for `locale`, returning the unit.
    ///
    /// `_metadata` is not accepted as a locale and is ignored here.
    pub fn with(
        mut self,
        locale: impl Into<String>,
        function: impl Fn(&[Value]) -> String + Send + Sync + 'static,
    ) -> Self {
        let locale = locale.into();
        if locale == METADATA_KEY {
            return self;
        }
        let function: LocaleFn = Arc::new(function);
        match self.functions.iter_mut().find(|(l, _)| *l == locale) {
            Some((_, existing)) => *existing = function,
            None => self.functions.push((locale, function)),
        }
        self
    }

    /// Attach caller-defined metadata.
    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The function for `locale`, if present.
    pub fn get(&self, locale: &str) -> Option<&LocaleFn> {
        self.functions
            .iter()
            .find(|(l, _)| l == locale)
            .map(|(_, f)| f)
    }

    /// Locales in insertion order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|(l, _)| l.as_str())
    }

    /// Number of locales.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// True when the unit has no locales.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Caller-defined metadata, if any.
    pub fn metadata(&self) -> Option<&JsonValue> {
        self.metadata.as_ref()
    }
}

impl Debug for FunctionUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("FunctionUnit")
            .field("locales", &self.locales().collect::<Vec<_>>())
            .field("metadata", &self.metadata)
            .finish()
    }
}
