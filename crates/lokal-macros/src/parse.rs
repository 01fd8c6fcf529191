//! Parse implementations for converting TokenStream to macro AST.
//!
//! Implements syn::parse::Parse for all AST types defined in input.rs.

use lokal_semantics::METADATA_KEY;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Expr, Ident, LitStr, Token, braced, bracketed};

use crate::input::{Block, Entry, EntryValue, LocaleList, MacroInput, SpannedIdent};

mod kw {
    syn::custom_keyword!(locales);
}

impl Parse for MacroInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        // `locales: [..];` is a header only when followed by brackets; a
        // tree may still contain an entry named `locales`.
        let locales = if input.peek(kw::locales)
            && input.peek2(Token![:])
            && input.peek3(syn::token::Bracket)
        {
            Some(input.parse()?)
        } else {
            None
        };
        let entries = parse_entries(input)?;
        Ok(MacroInput { locales, entries })
    }
}

impl Parse for LocaleList {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let keyword: kw::locales = input.parse()?;
        input.parse::<Token![:]>()?;

        let content;
        bracketed!(content in input);
        let locales: Punctuated<SpannedIdent, Token![,]> =
            Punctuated::parse_terminated_with(&content, parse_key)?;

        input.parse::<Token![;]>()?;

        Ok(LocaleList {
            locales: locales.into_iter().collect(),
            span: keyword.span,
        })
    }
}

impl Parse for Entry {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key = parse_key(input)?;
        input.parse::<Token![:]>()?;

        let value = if key.name == METADATA_KEY {
            EntryValue::Metadata(input.parse()?)
        } else if input.peek(syn::token::Brace) {
            EntryValue::Block(input.parse()?)
        } else if input.peek(LitStr) {
            EntryValue::Text(input.parse()?)
        } else {
            match input.parse::<Expr>()? {
                Expr::Closure(closure) => EntryValue::Function(closure),
                other => EntryValue::Invalid(other),
            }
        };

        Ok(Entry { key, value })
    }
}

impl Parse for Block {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let content;
        let brace = braced!(content in input);
        let entries = parse_entries(&content)?;
        Ok(Block {
            entries,
            span: brace.span.join(),
        })
    }
}

/// Parse comma-separated entries until the stream is exhausted.
fn parse_entries(input: ParseStream) -> syn::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    while !input.is_empty() {
        entries.push(input.parse()?);
        if input.is_empty() {
            break;
        }
        input.parse::<Token![,]>()?;
    }
    Ok(entries)
}

/// Keys and locales are identifiers (keywords allowed) or string literals.
fn parse_key(input: ParseStream) -> syn::Result<SpannedIdent> {
    if input.peek(LitStr) {
        let lit: LitStr = input.parse()?;
        Ok(SpannedIdent::from_str(lit.value(), lit.span()))
    } else {
        let ident = Ident::parse_any(input)?;
        Ok(SpannedIdent::new(&ident))
    }
}
