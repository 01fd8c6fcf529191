//! Dotted key-path lookup over any tree-shaped value.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use lokal_semantics::METADATA_KEY;
use serde_json::Value as JsonValue;
use strsim::levenshtein;
use thiserror::Error;

use crate::tree::keys::{KeyNode, KeyTree};
use crate::tree::project::{LocalizedNode, LocalizedTree};
use crate::types::{FunctionUnit, LocaleFn, Localization, LocalizedUnit, Node};

/// Errors from [`value_at_key_path`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyPathError {
    #[error("key path cannot be empty")]
    Empty,

    /// A segment before the last one names nothing.
    #[error(
        "invalid key path '{key_path}': no entry '{segment}'{}",
        format_suggestions(suggestions)
    )]
    MissingIntermediate {
        key_path: String,
        segment: String,
        suggestions: Vec<String>,
    },

    /// The path continues below a leaf.
    #[error("invalid key path '{key_path}': '{at}' has no entries")]
    NotAContainer { key_path: String, at: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Keys from `available` within a small edit distance of `key`, closest
/// first, at most three.
///
/// Keys of up to 3 characters allow distance 1, longer keys distance 2.
/// Exact matches are not suggestions.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &String)> = available
        .iter()
        .filter_map(|candidate| {
            let distance = levenshtein(key, candidate);
            (distance > 0 && distance <= max_distance).then_some((distance, candidate))
        })
        .collect();

    suggestions.sort_by_key(|(distance, _)| *distance);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

/// The outcome of looking up one key in a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    /// The node contains the key.
    Found(T),
    /// The node has entries, but not this one.
    Missing,
    /// The node is a leaf and has no entries at all.
    Leaf,
}

impl<T> Step<T> {
    fn from_option(child: Option<T>) -> Self {
        child.map_or(Step::Missing, Step::Found)
    }
}

/// A tree that [`value_at_key_path`] can walk.
pub trait Descend: Sized {
    /// What one step down yields.
    type Child: Descend<Child = Self::Child>;

    /// Look up one key.
    fn step(&self, key: &str) -> Step<Self::Child>;

    /// Keys of this node, for suggestions when a lookup misses.
    fn child_keys(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<'a> Descend for &'a JsonValue {
    type Child = &'a JsonValue;

    fn step(&self, key: &str) -> Step<&'a JsonValue> {
        match *self {
            JsonValue::Object(map) => Step::from_option(map.get(key)),
            // Arrays are indexed by decimal segments; anything else misses.
            JsonValue::Array(items) => {
                Step::from_option(key.parse::<usize>().ok().and_then(|i| items.get(i)))
            }
            JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_) => {
                Step::Leaf
            }
        }
    }

    fn child_keys(&self) -> Vec<String> {
        match *self {
            JsonValue::Object(map) => map.keys().cloned().collect(),
            JsonValue::Array(items) => (0..items.len()).map(|i| format!("{i}")).collect(),
            JsonValue::Null
            | JsonValue::Bool(_)
            | JsonValue::Number(_)
            | JsonValue::String(_) => Vec::new(),
        }
    }
}

/// A position inside a typed [`Localization`].
#[derive(Clone, Copy)]
pub enum Entry<'a> {
    Tree(&'a Localization),
    Unit(&'a LocalizedUnit),
    Function(&'a FunctionUnit),
    /// The text of one locale of a unit.
    Text(&'a str),
    /// The function of one locale of a function unit.
    LocaleFn(&'a LocaleFn),
    /// Caller-defined metadata of a tree or unit.
    Metadata(&'a JsonValue),
}

impl<'a> Entry<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Entry::Text(text) => Some(text),
            Entry::Tree(_)
            | Entry::Unit(_)
            | Entry::Function(_)
            | Entry::LocaleFn(_)
            | Entry::Metadata(_) => None,
        }
    }

    pub fn as_unit(&self) -> Option<&'a LocalizedUnit> {
        match *self {
            Entry::Unit(unit) => Some(unit),
            Entry::Tree(_)
            | Entry::Function(_)
            | Entry::Text(_)
            | Entry::LocaleFn(_)
            | Entry::Metadata(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&'a Localization> {
        match *self {
            Entry::Tree(tree) => Some(tree),
            Entry::Unit(_)
            | Entry::Function(_)
            | Entry::Text(_)
            | Entry::LocaleFn(_)
            | Entry::Metadata(_) => None,
        }
    }
}

impl<'a> From<&'a Node> for Entry<'a> {
    fn from(node: &'a Node) -> Self {
        match node {
            Node::Unit(unit) => Entry::Unit(unit),
            Node::Function(unit) => Entry::Function(unit),
            Node::Branch(tree) => Entry::Tree(tree),
        }
    }
}

impl Debug for Entry<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Entry::Tree(tree) => f.debug_tuple("Tree").field(tree).finish(),
            Entry::Unit(unit) => f.debug_tuple("Unit").field(unit).finish(),
            Entry::Function(unit) => f.debug_tuple("Function").field(unit).finish(),
            Entry::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Entry::LocaleFn(_) => f.write_str("LocaleFn(..)"),
            Entry::Metadata(metadata) => f.debug_tuple("Metadata").field(metadata).finish(),
        }
    }
}

fn metadata_step<'a>(metadata: Option<&'a JsonValue>) -> Step<Entry<'a>> {
    Step::from_option(metadata.map(Entry::Metadata))
}

impl<'a> Descend for Entry<'a> {
    type Child = Entry<'a>;

    fn step(&self, key: &str) -> Step<Entry<'a>> {
        match *self {
            Entry::Tree(tree) => tree.step(key),
            Entry::Unit(unit) if key == METADATA_KEY => metadata_step(unit.metadata()),
            Entry::Unit(unit) => Step::from_option(unit.get(key).map(Entry::Text)),
            Entry::Function(unit) if key == METADATA_KEY => metadata_step(unit.metadata()),
            Entry::Function(unit) => Step::from_option(unit.get(key).map(Entry::LocaleFn)),
            Entry::Metadata(metadata) => match metadata.step(key) {
                Step::Found(child) => Step::Found(Entry::Metadata(child)),
                Step::Missing => Step::Missing,
                Step::Leaf => Step::Leaf,
            },
            Entry::Text(_) | Entry::LocaleFn(_) => Step::Leaf,
        }
    }

    fn child_keys(&self) -> Vec<String> {
        match *self {
            Entry::Tree(tree) => tree.child_keys(),
            Entry::Unit(unit) => unit.locales().map(str::to_owned).collect(),
            Entry::Function(unit) => unit.locales().map(str::to_owned).collect(),
            Entry::Metadata(metadata) => metadata.child_keys(),
            Entry::Text(_) | Entry::LocaleFn(_) => Vec::new(),
        }
    }
}

impl<'a> Descend for &'a Localization {
    type Child = Entry<'a>;

    fn step(&self, key: &str) -> Step<Entry<'a>> {
        let tree = *self;
        if key == METADATA_KEY {
            return metadata_step(tree.metadata());
        }
        Step::from_option(tree.get(key).map(Entry::from))
    }

    fn child_keys(&self) -> Vec<String> {
        self.keys().map(str::to_owned).collect()
    }
}

impl<'t, 'a> Descend for &'t LocalizedNode<'a> {
    type Child = &'t LocalizedNode<'a>;

    fn step(&self, key: &str) -> Step<&'t LocalizedNode<'a>> {
        match *self {
            LocalizedNode::Tree(tree) => tree.step(key),
            LocalizedNode::Text(_) | LocalizedNode::Function(_) => Step::Leaf,
        }
    }

    fn child_keys(&self) -> Vec<String> {
        match *self {
            LocalizedNode::Tree(tree) => tree.child_keys(),
            LocalizedNode::Text(_) | LocalizedNode::Function(_) => Vec::new(),
        }
    }
}

impl<'t, 'a> Descend for &'t LocalizedTree<'a> {
    type Child = &'t LocalizedNode<'a>;

    fn step(&self, key: &str) -> Step<&'t LocalizedNode<'a>> {
        let tree = *self;
        Step::from_option(tree.get(key))
    }

    fn child_keys(&self) -> Vec<String> {
        self.keys().map(str::to_owned).collect()
    }
}

impl<'a> Descend for &'a KeyNode {
    type Child = &'a KeyNode;

    fn step(&self, key: &str) -> Step<&'a KeyNode> {
        match *self {
            KeyNode::Tree(tree) => tree.step(key),
            KeyNode::Path(_) => Step::Leaf,
        }
    }

    fn child_keys(&self) -> Vec<String> {
        match *self {
            KeyNode::Tree(tree) => tree.child_keys(),
            KeyNode::Path(_) => Vec::new(),
        }
    }
}

impl<'a> Descend for &'a KeyTree {
    type Child = &'a KeyNode;

    fn step(&self, key: &str) -> Step<&'a KeyNode> {
        let tree = *self;
        Step::from_option(tree.get(key))
    }

    fn child_keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }
}

fn descend<T: Descend>(
    node: &T,
    key_path: &str,
    segments: &[&str],
    index: usize,
) -> Result<Option<T::Child>, KeyPathError> {
    let segment = segments[index];
    match node.step(segment) {
        Step::Found(child) => Ok(Some(child)),
        Step::Missing if index + 1 == segments.len() => Ok(None),
        Step::Missing => Err(KeyPathError::MissingIntermediate {
            key_path: key_path.to_string(),
            segment: segment.to_string(),
            suggestions: compute_suggestions(segment, &node.child_keys()),
        }),
        Step::Leaf => {
            let at = segments[..index].join(".");
            Err(KeyPathError::NotAContainer {
                key_path: key_path.to_string(),
                at: if at.is_empty() { "(root)".to_string() } else { at },
            })
        }
    }
}

/// Look up a dotted key path such as `"button.delete.en"`.
///
/// Returns `Ok(None)` when only the last segment is absent. An empty path,
/// an absent intermediate segment, or a path that continues below a leaf is
/// an error.
///
/// Works on JSON values, typed trees, projections and key trees. JSON
/// arrays are indexed by position (`"items.0"`).
///
/// # Example
///
/// ```
/// use lokal::{KeyPathError, value_at_key_path};
/// use serde_json::json;
///
/// let tree = json!({ "button": { "delete": { "en": "Delete", "ja": "削除" } } });
///
/// let ja = value_at_key_path(&tree, "button.delete.ja").unwrap();
/// assert_eq!(ja.and_then(|v| v.as_str()), Some("削除"));
/// assert_eq!(value_at_key_path(&tree, "button.delete.fr"), Ok(None));
/// assert_eq!(value_at_key_path(&tree, ""), Err(KeyPathError::Empty));
/// assert!(value_at_key_path(&tree, "button.delete.en.tooFar").is_err());
/// ```
pub fn value_at_key_path<T: Descend>(
    root: T,
    key_path: &str,
) -> Result<Option<T::Child>, KeyPathError> {
    if key_path.is_empty() {
        return Err(KeyPathError::Empty);
    }
    let segments: Vec<&str> = key_path.split('.').collect();

    let Some(mut current) = descend(&root, key_path, &segments, 0)? else {
        return Ok(None);
    };
    for index in 1..segments.len() {
        match descend(&current, key_path, &segments, index)? {
            Some(child) => current = child,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}
