//! AST types for `localization!` macro input.
//!
//! These types represent the parsed structure of a translation tree before
//! it is checked and lowered to builder calls.

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Expr, ExprClosure, Ident, LitStr};

/// Root of the macro input: an optional locale header and the top-level
/// entries.
pub struct MacroInput {
    pub locales: Option<LocaleList>,
    pub entries: Vec<Entry>,
}

/// The `locales: [en, ja];` header.
pub struct LocaleList {
    pub locales: Vec<SpannedIdent>,
    pub span: Span,
}

/// A `key: value` pair inside a block.
pub struct Entry {
    pub key: SpannedIdent,
    pub value: EntryValue,
}

/// Right-hand side of an entry, before it is classified as unit or branch.
pub enum EntryValue {
    /// `{ ... }`: a unit or a nested branch.
    Block(Block),
    /// A localized string.
    Text(LitStr),
    /// A per-locale closure.
    Function(ExprClosure),
    /// The value of a `_metadata` entry.
    Metadata(Expr),
    /// Anything else; rejected during validation.
    Invalid(Expr),
}

/// A braced block of entries.
pub struct Block {
    pub entries: Vec<Entry>,
    pub span: Span,
}

/// An identifier (or string key) with its source span for error reporting.
#[derive(Clone)]
pub struct SpannedIdent {
    pub name: String,
    pub span: Span,
}

impl SpannedIdent {
    /// Create from a syn::Ident, dropping any `r#` prefix.
    pub fn new(ident: &Ident) -> Self {
        Self {
            name: ident.unraw().to_string(),
            span: ident.span(),
        }
    }

    /// Create from a string key and span.
    pub fn from_str(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl EntryValue {
    /// Span used when an error points at the value itself.
    pub fn span(&self) -> Span {
        match self {
            EntryValue::Block(block) => block.span,
            EntryValue::Text(lit) => lit.span(),
            EntryValue::Function(closure) => closure.span(),
            EntryValue::Metadata(expr) | EntryValue::Invalid(expr) => expr.span(),
        }
    }
}
