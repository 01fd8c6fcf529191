//! Compile-time validation for the `localization!` macro.
//!
//! Checks performed while classifying every block as a unit or a branch:
//! 1. Entries are string literals, closures, nested blocks or `_metadata`
//! 2. A block never mixes nested blocks with localized values
//! 3. A unit never mixes string and closure values
//! 4. Keys are unique within a block
//! 5. Every unit carries exactly the canonical locale set (the declared
//!    `locales: [..]` list, or the first unit's locales)
//! 6. All locales of a text unit use the same placeholder names
//!
//! Also provides typo suggestions for misspelled locales using Levenshtein
//! distance.

use std::collections::HashSet;

use lokal_semantics::{METADATA_KEY, placeholder_names};
use proc_macro2::Span;
use strsim::levenshtein;
use syn::spanned::Spanned;
use syn::{Expr, ExprClosure, LitStr};

use crate::input::{Entry, EntryValue, LocaleList, MacroInput, SpannedIdent};

/// A validated tree node, ready for code generation.
pub enum Checked<'a> {
    Branch(CheckedBranch<'a>),
    Text(CheckedUnit<'a, &'a LitStr>),
    Function(CheckedUnit<'a, &'a ExprClosure>),
}

/// A validated branch: ordered child nodes plus optional metadata.
pub struct CheckedBranch<'a> {
    pub entries: Vec<(&'a str, Checked<'a>)>,
    pub metadata: Option<&'a Expr>,
}

/// A validated unit: ordered per-locale values plus optional metadata.
pub struct CheckedUnit<'a, T> {
    pub values: Vec<(&'a str, T)>,
    pub metadata: Option<&'a Expr>,
}

/// How a block's non-metadata entries classify it.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Branch,
    Text,
    Function,
}

/// The locale set every unit must match and where it came from.
struct Canonical {
    locales: Vec<String>,
    origin: String,
}

/// Main validation entry point.
///
/// On success returns the classified tree. On failure returns an error with
/// span information pointing to the problematic location in the source.
pub fn validate(input: &MacroInput) -> syn::Result<CheckedBranch<'_>> {
    let mut validator = Validator {
        canonical: input.locales.as_ref().map(check_locale_list).transpose()?,
    };

    if let Some(Kind::Text | Kind::Function) = classify(&input.entries, "")? {
        let first = input
            .entries
            .iter()
            .find(|entry| !is_metadata(entry))
            .map_or_else(Span::call_site, |entry| entry.key.span);
        return Err(syn::Error::new(
            first,
            "top-level entries must be units or nested blocks\n\
             help: wrap localized values in a keyed block, e.g. `greeting: { en: \"Hello\" }`",
        ));
    }

    validator.branch(&input.entries, "")
}

/// Check the `locales: [..]` header.
fn check_locale_list(list: &LocaleList) -> syn::Result<Canonical> {
    if list.locales.is_empty() {
        return Err(syn::Error::new(list.span, "locale list cannot be empty"));
    }

    let mut seen = HashSet::new();
    for locale in &list.locales {
        if locale.name == METADATA_KEY {
            return Err(syn::Error::new(
                locale.span,
                format!("'{METADATA_KEY}' is reserved for metadata and cannot be a locale"),
            ));
        }
        if !seen.insert(locale.name.as_str()) {
            return Err(syn::Error::new(
                locale.span,
                format!("duplicate locale '{}'", locale.name),
            ));
        }
    }

    Ok(Canonical {
        locales: list.locales.iter().map(|l| l.name.clone()).collect(),
        origin: "the declared locale list".to_string(),
    })
}

struct Validator {
    canonical: Option<Canonical>,
}

impl Validator {
    /// Validate a block whose entries are all nested blocks.
    fn branch<'a>(&mut self, entries: &'a [Entry], path: &str) -> syn::Result<CheckedBranch<'a>> {
        let mut checked = Vec::new();
        for entry in entries {
            if let EntryValue::Block(block) = &entry.value {
                let child_path = join(path, &entry.key.name);
                let node = match classify(&block.entries, &child_path)? {
                    None | Some(Kind::Branch) => {
                        Checked::Branch(self.branch(&block.entries, &child_path)?)
                    }
                    Some(Kind::Text) => {
                        self.check_locales(&block.entries, block.span, &child_path)?;
                        let unit = text_unit(&block.entries);
                        check_placeholders(&unit, &child_path)?;
                        Checked::Text(unit)
                    }
                    Some(Kind::Function) => {
                        self.check_locales(&block.entries, block.span, &child_path)?;
                        Checked::Function(function_unit(&block.entries))
                    }
                };
                checked.push((entry.key.name.as_str(), node));
            }
        }

        Ok(CheckedBranch {
            entries: checked,
            metadata: metadata_of(entries),
        })
    }

    /// Compare a unit's locales against the canonical set, adopting the
    /// unit's set when none has been fixed yet.
    fn check_locales(&mut self, entries: &[Entry], span: Span, path: &str) -> syn::Result<()> {
        let found: Vec<&SpannedIdent> = entries
            .iter()
            .filter(|entry| !is_metadata(entry))
            .map(|entry| &entry.key)
            .collect();

        let Some(canonical) = &self.canonical else {
            self.canonical = Some(Canonical {
                locales: found.iter().map(|key| key.name.clone()).collect(),
                origin: format!("'{path}'"),
            });
            return Ok(());
        };

        for key in &found {
            if !canonical.locales.contains(&key.name) {
                let suggestions = compute_suggestions(&key.name, &canonical.locales);
                let mut msg = format!("unit '{path}' has unexpected locale '{}'", key.name);
                match suggestions.first() {
                    Some(suggestion) => {
                        msg.push_str(&format!("\nhelp: did you mean '{suggestion}'?"));
                    }
                    None => msg.push_str(&format!(
                        "\nnote: expected locales [{}] from {}",
                        canonical.locales.join(", "),
                        canonical.origin
                    )),
                }
                return Err(syn::Error::new(key.span, msg));
            }
        }

        for locale in &canonical.locales {
            if !found.iter().any(|key| key.name == *locale) {
                return Err(syn::Error::new(
                    span,
                    format!(
                        "unit '{path}' is missing locale '{locale}'\n\
                         note: expected locales [{}] from {}",
                        canonical.locales.join(", "),
                        canonical.origin
                    ),
                ));
            }
        }

        Ok(())
    }
}

/// Classify a block from its entries, checking keys for duplicates.
///
/// Returns `None` for a block with no entries besides `_metadata`.
fn classify(entries: &[Entry], path: &str) -> syn::Result<Option<Kind>> {
    let mut seen = HashSet::new();
    let mut kind = None;

    for entry in entries {
        let entry_path = join(path, &entry.key.name);
        if !seen.insert(entry.key.name.as_str()) {
            return Err(syn::Error::new(
                entry.key.span,
                format!("duplicate key '{entry_path}'"),
            ));
        }

        let entry_kind = match &entry.value {
            EntryValue::Metadata(_) => continue,
            EntryValue::Block(_) => Kind::Branch,
            EntryValue::Text(_) => Kind::Text,
            EntryValue::Function(_) => Kind::Function,
            EntryValue::Invalid(expr) => {
                return Err(syn::Error::new(
                    expr.span(),
                    format!(
                        "'{entry_path}' must be a string literal, a closure or a nested block"
                    ),
                ));
            }
        };

        match kind {
            None => kind = Some(entry_kind),
            Some(existing) if existing == entry_kind => {}
            Some(Kind::Text | Kind::Function) if entry_kind != Kind::Branch => {
                return Err(syn::Error::new(
                    entry.value.span(),
                    format!(
                        "unit '{path}' mixes string and closure values\n\
                         help: use closures for every locale or for none"
                    ),
                ));
            }
            Some(_) => {
                return Err(syn::Error::new(
                    entry.key.span,
                    format!("'{path}' mixes nested blocks with localized values"),
                ));
            }
        }
    }

    Ok(kind)
}

fn check_placeholders(unit: &CheckedUnit<'_, &LitStr>, path: &str) -> syn::Result<()> {
    let sets: Vec<Vec<String>> = unit
        .values
        .iter()
        .map(|(_, lit)| placeholder_set(&lit.value()))
        .collect();

    let (Some((first_locale, _)), Some(expected)) = (unit.values.first(), sets.first()) else {
        return Ok(());
    };

    for ((locale, lit), names) in unit.values.iter().zip(&sets).skip(1) {
        if names != expected {
            return Err(syn::Error::new(
                lit.span(),
                format!(
                    "placeholders of '{path}.{locale}' {} differ from '{path}.{first_locale}' {}",
                    render_names(names),
                    render_names(expected)
                ),
            ));
        }
    }

    Ok(())
}

/// Sorted, deduplicated placeholder names of a template.
fn placeholder_set(template: &str) -> Vec<String> {
    let mut names: Vec<String> = placeholder_names(template)
        .into_iter()
        .map(str::to_string)
        .collect();
    names.sort();
    names.dedup();
    names
}

fn render_names(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        format!("{{{}}}", names.join(", "))
    }
}

fn text_unit(entries: &[Entry]) -> CheckedUnit<'_, &LitStr> {
    CheckedUnit {
        values: entries
            .iter()
            .filter_map(|entry| match &entry.value {
                EntryValue::Text(lit) => Some((entry.key.name.as_str(), lit)),
                _ => None,
            })
            .collect(),
        metadata: metadata_of(entries),
    }
}

fn function_unit(entries: &[Entry]) -> CheckedUnit<'_, &ExprClosure> {
    CheckedUnit {
        values: entries
            .iter()
            .filter_map(|entry| match &entry.value {
                EntryValue::Function(closure) => Some((entry.key.name.as_str(), closure)),
                _ => None,
            })
            .collect(),
        metadata: metadata_of(entries),
    }
}

fn metadata_of(entries: &[Entry]) -> Option<&Expr> {
    entries.iter().find_map(|entry| match &entry.value {
        EntryValue::Metadata(expr) => Some(expr),
        _ => None,
    })
}

fn is_metadata(entry: &Entry) -> bool {
    matches!(entry.value, EntryValue::Metadata(_))
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Compute typo suggestions for a misspelled name.
///
/// Returns up to 3 suggestions within edit distance 1 (for names of up to
/// 3 characters) or 2 (for longer names), closest first.
pub fn compute_suggestions(name: &str, available: &[String]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.clone()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    /// Helper to parse a localization! macro input from tokens.
    fn parse_input(tokens: proc_macro2::TokenStream) -> MacroInput {
        syn::parse2(tokens).expect("should parse")
    }

    fn error_of(tokens: proc_macro2::TokenStream) -> String {
        let input = parse_input(tokens);
        match validate(&input) {
            Ok(_) => panic!("expected a validation error"),
            Err(e) => e.to_string(),
        }
    }

    // =========================================================================
    // Accepted input
    // =========================================================================

    #[test]
    fn test_validate_nested_tree() {
        let input = parse_input(quote! {
            button: {
                delete: { en: "Delete", ja: "削除" },
                save: { en: "Save", ja: "保存", _metadata: "toolbar" },
            },
            greeting: { en: "Hello {{ name }}", ja: "こんにちは {{name}}" },
        });
        let tree = validate(&input).expect("should validate");
        let keys: Vec<&str> = tree.entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, ["button", "greeting"]);
        assert!(matches!(tree.entries[0].1, Checked::Branch(_)));
        assert!(matches!(tree.entries[1].1, Checked::Text(_)));
    }

    #[test]
    fn test_validate_function_unit() {
        let input = parse_input(quote! {
            count: { en: |args| format!("{} items", args[0]), ja: |args| format!("{}個", args[0]) },
        });
        let tree = validate(&input).expect("should validate");
        assert!(matches!(tree.entries[0].1, Checked::Function(_)));
    }

    #[test]
    fn test_validate_declared_locales_and_metadata() {
        let input = parse_input(quote! {
            locales: [en, "en-GB"];
            colour: { en: "Color", "en-GB": "Colour" },
            _metadata: "version 1",
        });
        let tree = validate(&input).expect("should validate");
        assert!(tree.metadata.is_some());
        match &tree.entries[0].1 {
            Checked::Text(unit) => {
                let locales: Vec<&str> = unit.values.iter().map(|(l, _)| *l).collect();
                assert_eq!(locales, ["en", "en-GB"]);
            }
            _ => panic!("expected a text unit"),
        }
    }

    #[test]
    fn test_entry_named_locales_is_not_a_header() {
        let input = parse_input(quote! {
            locales: { en: "Languages", ja: "言語" },
        });
        assert!(input.locales.is_none());
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn test_empty_blocks_are_branches() {
        let input = parse_input(quote! { empty: {}, });
        let tree = validate(&input).expect("should validate");
        assert!(matches!(tree.entries[0].1, Checked::Branch(_)));
    }

    // =========================================================================
    // Locale sets
    // =========================================================================

    #[test]
    fn test_missing_locale() {
        let err = error_of(quote! {
            apple: { en: "Apple", ja: "リンゴ" },
            banana: { en: "Banana" },
        });
        assert!(err.contains("unit 'banana' is missing locale 'ja'"));
        assert!(err.contains("from 'apple'"));
    }

    #[test]
    fn test_extra_locale_with_suggestion() {
        let err = error_of(quote! {
            locales: [en, ja];
            apple: { en: "Apple", jp: "リンゴ" },
        });
        assert!(err.contains("unit 'apple' has unexpected locale 'jp'"));
        assert!(err.contains("did you mean 'ja'?"));
    }

    #[test]
    fn test_extra_locale_without_suggestion() {
        let err = error_of(quote! {
            apple: { en: "Apple", ja: "リンゴ" },
            food: { carrot: { en: "Carrot", ja: "人参", fr: "Carotte" } },
        });
        assert!(err.contains("unit 'food.carrot' has unexpected locale 'fr'"));
        assert!(err.contains("expected locales [en, ja]"));
    }

    #[test]
    fn test_metadata_cannot_be_declared_locale() {
        let err = error_of(quote! {
            locales: [en, _metadata];
            apple: { en: "Apple" },
        });
        assert!(err.contains("'_metadata' is reserved"));
    }

    #[test]
    fn test_empty_and_duplicate_locale_lists() {
        assert!(error_of(quote! { locales: []; }).contains("locale list cannot be empty"));
        assert!(error_of(quote! { locales: [en, en]; }).contains("duplicate locale 'en'"));
    }

    // =========================================================================
    // Shape errors
    // =========================================================================

    #[test]
    fn test_mixed_text_and_closure() {
        let err = error_of(quote! {
            count: { en: "items", ja: |args| format!("{}個", args[0]) },
        });
        assert!(err.contains("unit 'count' mixes string and closure values"));
    }

    #[test]
    fn test_mixed_block_and_values() {
        let err = error_of(quote! {
            button: { en: "Button", delete: { en: "Delete" } },
        });
        assert!(err.contains("'button' mixes nested blocks with localized values"));
    }

    #[test]
    fn test_duplicate_keys() {
        let err = error_of(quote! {
            button: { save: { en: "Save" }, save: { en: "Keep" } },
        });
        assert!(err.contains("duplicate key 'button.save'"));
    }

    #[test]
    fn test_invalid_entry() {
        let err = error_of(quote! {
            count: { en: 42 },
        });
        assert!(err.contains("'count.en' must be a string literal, a closure or a nested block"));
    }

    #[test]
    fn test_top_level_values_rejected() {
        let err = error_of(quote! { en: "Hello", });
        assert!(err.contains("top-level entries must be units or nested blocks"));
    }

    // =========================================================================
    // Placeholders
    // =========================================================================

    #[test]
    fn test_placeholder_mismatch() {
        let err = error_of(quote! {
            greeting: { en: "Hello {{ name }}", ja: "こんにちは {{user}}" },
        });
        assert!(err.contains(
            "placeholders of 'greeting.ja' {user} differ from 'greeting.en' {name}"
        ));
    }

    #[test]
    fn test_placeholder_order_and_repeats_ignored() {
        let input = parse_input(quote! {
            pair: { en: "{{a}} and {{b}}", ja: "{{b}}と{{a}}と{{a}}" },
        });
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn test_missing_placeholder_reported_as_none() {
        let err = error_of(quote! {
            greeting: { en: "Hello {{name}}", ja: "こんにちは" },
        });
        assert!(err.contains("(none)"));
    }

    // =========================================================================
    // compute_suggestions tests
    // =========================================================================

    #[test]
    fn test_suggestions_exact_match_excluded() {
        let available = vec!["en".to_string()];
        assert!(compute_suggestions("en", &available).is_empty());
    }

    #[test]
    fn test_suggestions_one_char_off_short() {
        let available = vec!["ja".to_string(), "en".to_string()];
        assert_eq!(compute_suggestions("jp", &available), vec!["ja"]);
    }

    #[test]
    fn test_suggestions_two_chars_off_long() {
        let available = vec!["en-GB".to_string()];
        assert_eq!(compute_suggestions("en-UK", &available), vec!["en-GB"]);
    }

    #[test]
    fn test_suggestions_limited_to_three() {
        let available: Vec<String> = ["ab", "ac", "ad", "ae"].map(String::from).to_vec();
        assert_eq!(compute_suggestions("aa", &available).len(), 3);
    }
}
