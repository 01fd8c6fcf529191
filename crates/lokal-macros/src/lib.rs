//! Procedural macro for compile-checked translation trees.
//!
//! `localization!` accepts nested blocks of translation units and expands
//! to a `::lokal::Localization` expression. Trees whose units disagree on
//! their locale set, or whose locales disagree on placeholder names, are
//! rejected with a spanned compile error.

use proc_macro::TokenStream;

mod codegen;
mod input;
mod parse;
mod validate;

/// Builds a `Localization` from literal source.
///
/// ```
/// use lokal::{localization, Node};
///
/// let strings = localization! {
///     locales: [en, ja];
///     button: {
///         delete: { en: "Delete", ja: "削除" },
///     },
///     count: {
///         en: |args| format!("{} items", args[0]),
///         ja: |args| format!("{}個", args[0]),
///     },
///     _metadata: "ui strings",
/// };
///
/// assert_eq!(strings.keys().collect::<Vec<_>>(), ["button", "count"]);
/// assert!(strings.get("count").and_then(Node::as_function).is_some());
/// ```
///
/// An optional `locales: [..];` header fixes the locale set; without it the
/// first unit decides. Locales that are not identifiers may be written as
/// string literals (`"en-US": "Color"`).
#[proc_macro]
pub fn localization(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as input::MacroInput);
    match validate::validate(&input) {
        Ok(tree) => codegen::codegen(&tree).into(),
        Err(e) => e.to_compile_error().into(),
    }
}
