//! Key-path trees mirroring a translation tree.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Index;
use std::sync::Arc;

use crate::tree::join_key_path;
use crate::types::{Localization, Node};

/// A leaf of a [`KeyTree`]: the dotted path of one unit.
///
/// The path is joined when read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    prefix: Arc<str>,
    key: String,
}

impl KeyPath {
    /// The full dotted path, e.g. `"button.delete"`.
    pub fn path(&self) -> String {
        join_key_path(&self.prefix, &self.key)
    }

    /// The last segment of the path.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.prefix.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}.{}", self.prefix, self.key)
        }
    }
}

impl PartialEq<&str> for KeyPath {
    fn eq(&self, other: &&str) -> bool {
        self.path() == *other
    }
}

/// One entry of a [`KeyTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyNode {
    Path(KeyPath),
    Tree(KeyTree),
}

impl KeyNode {
    pub fn as_path(&self) -> Option<&KeyPath> {
        match self {
            KeyNode::Path(path) => Some(path),
            KeyNode::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&KeyTree> {
        match self {
            KeyNode::Tree(tree) => Some(tree),
            KeyNode::Path(_) => None,
        }
    }
}

impl PartialEq<&str> for KeyNode {
    fn eq(&self, other: &&str) -> bool {
        self.as_path().is_some_and(|path| path == other)
    }
}

impl Index<&str> for KeyNode {
    type Output = KeyNode;

    fn index(&self, key: &str) -> &KeyNode {
        match self {
            KeyNode::Tree(tree) => &tree[key],
            KeyNode::Path(path) => panic!("'{path}' is a key path, not a tree"),
        }
    }
}

/// A tree with the same shape as a [`Localization`] whose leaves are the
/// dotted key paths of its units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTree {
    entries: Vec<(String, KeyNode)>,
}

impl KeyTree {
    pub fn get(&self, key: &str) -> Option<&KeyNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyNode)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every leaf path, depth-first in insertion order.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths(&mut paths);
        paths
    }

    fn collect_paths(&self, paths: &mut Vec<String>) {
        for (_, node) in &self.entries {
            match node {
                KeyNode::Path(path) => paths.push(path.path()),
                KeyNode::Tree(tree) => tree.collect_paths(paths),
            }
        }
    }
}

impl Index<&str> for KeyTree {
    type Output = KeyNode;

    fn index(&self, key: &str) -> &KeyNode {
        match self.get(key) {
            Some(node) => node,
            None => panic!("no key '{key}' in key tree"),
        }
    }
}

/// Derive the key-path tree of `tree`.
///
/// Each unit (string or function) becomes the dotted path to it, prefixed
/// by `starting_path` when that is non-empty. Leaf contents are never read.
///
/// # Example
///
/// ```
/// use lokal::{Localization, LocalizedUnit, keys};
///
/// let tree = Localization::new()
///     .with("button", Localization::new().with("delete", LocalizedUnit::from([("en", "Delete")])))
///     .with("greeting", LocalizedUnit::from([("en", "Hello")]));
///
/// let paths = keys(&tree, "");
/// assert_eq!(paths["button"]["delete"], "button.delete");
/// assert_eq!(paths["greeting"], "greeting");
/// assert_eq!(keys(&tree, "app")["greeting"], "app.greeting");
/// ```
pub fn keys(tree: &Localization, starting_path: &str) -> KeyTree {
    let prefix: Arc<str> = Arc::from(starting_path);
    let entries = tree
        .iter()
        .map(|(key, node)| {
            let derived = match node {
                Node::Unit(_) | Node::Function(_) => KeyNode::Path(KeyPath {
                    prefix: Arc::clone(&prefix),
                    key: key.to_string(),
                }),
                Node::Branch(child) => KeyNode::Tree(keys(child, &join_key_path(starting_path, key))),
            };
            (key.to_string(), derived)
        })
        .collect();
    KeyTree { entries }
}
