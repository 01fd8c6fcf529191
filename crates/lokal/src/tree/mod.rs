//! Whole-tree operations: validation, conversion from JSON, key-path
//! derivation, per-locale projection and key-path lookup.

mod convert;
mod keys;
mod path;
mod project;
mod validate;

pub use keys::{KeyNode, KeyPath, KeyTree, keys};
pub use path::{Descend, Entry, KeyPathError, Step, compute_suggestions, value_at_key_path};
pub use project::{LocalizedFn, LocalizedNode, LocalizedText, LocalizedTree, ProjectionOptions, localize_all};
pub use validate::{
    LocaleSet, Violation, is_localization, is_localization_with_locales, validate_localization,
};

/// Join a key onto a dotted prefix. An empty prefix yields the key itself.
pub(crate) fn join_key_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
