use std::mem;

use lokal_semantics::METADATA_KEY;
use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;

use super::{FunctionUnit, LocalizedUnit};

/// One entry of a [`Localization`].
#[derive(Debug, Clone)]
pub enum Node {
    /// A leaf translated into every locale as literal text.
    Unit(LocalizedUnit),

    /// A leaf translated into every locale as a function of arguments.
    Function(FunctionUnit),

    /// A nested group of entries.
    Branch(Localization),
}

impl Node {
    pub fn as_unit(&self) -> Option<&LocalizedUnit> {
        match self {
            Node::Unit(unit) => Some(unit),
            Node::Function(_) | Node::Branch(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionUnit> {
        match self {
            Node::Function(unit) => Some(unit),
            Node::Unit(_) | Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Localization> {
        match self {
            Node::Branch(tree) => Some(tree),
            Node::Unit(_) | Node::Function(_) => None,
        }
    }

    /// True for units and function units.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Node::Branch(_))
    }
}

impl From<LocalizedUnit> for Node {
    fn from(unit: LocalizedUnit) -> Self {
        Node::Unit(unit)
    }
}

impl From<FunctionUnit> for Node {
    fn from(unit: FunctionUnit) -> Self {
        Node::Function(unit)
    }
}

impl From<Localization> for Node {
    fn from(tree: Localization) -> Self {
        Node::Branch(tree)
    }
}

/// A translation tree: named units and nested groups of units.
///
/// Keys keep insertion order. Every unit in a well-formed tree has the same
/// set of locales; [`localization!`](crate::localization) guarantees that at
/// compile time and [`check_locales`](Localization::check_locales) checks it
/// at runtime.
///
/// # Example
///
/// ```
/// use lokal::{Localization, LocalizedUnit};
///
/// let tree = Localization::new()
///     .with(
///         "button",
///         Localization::new().with("delete", LocalizedUnit::from([("en", "Delete"), ("ja", "削除")])),
///     )
///     .with("greeting", LocalizedUnit::from([("en", "Hello"), ("ja", "こんにちは")]));
///
/// assert_eq!(tree.keys().collect::<Vec<_>>(), ["button", "greeting"]);
/// assert!(tree.get("button").is_some_and(|node| !node.is_leaf()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Localization {
    entries: Vec<(String, Node)>,
    metadata: Option<JsonValue>,
}

impl Localization {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry at `key`, returning the tree.
    pub fn with(mut self, key: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(key, node);
        self
    }

    /// Attach caller-defined metadata.
    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add or replace the entry at `key`.
    ///
    /// `_metadata` is reserved and never becomes an entry: the node is
    /// handed back unchanged. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        let key = key.into();
        let node = node.into();
        if key == METADATA_KEY {
            return Some(node);
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(mem::replace(existing, node)),
            None => {
                self.entries.push((key, node));
                None
            }
        }
    }

    /// The entry at `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    /// `(key, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Caller-defined metadata, if any.
    pub fn metadata(&self) -> Option<&JsonValue> {
        self.metadata.as_ref()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Unit(unit) => unit.serialize(serializer),
            Node::Branch(tree) => tree.serialize(serializer),
            Node::Function(_) => Err(S::Error::custom("function units cannot be serialized")),
        }
    }
}

impl Serialize for Localization {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.metadata.is_some());
        let mut map = serializer.serialize_map(Some(self.entries.len() + extra))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        if let Some(metadata) = &self.metadata {
            map.serialize_entry(METADATA_KEY, metadata)?;
        }
        map.end()
    }
}
