//! Code generation for the `localization!` macro.
//!
//! Lowers a validated tree into a single builder expression of type
//! `::lokal::Localization`, preserving source order.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Expr;

use crate::validate::{Checked, CheckedBranch};

/// Main code generation entry point.
pub fn codegen(tree: &CheckedBranch<'_>) -> TokenStream {
    generate_branch(tree)
}

/// `::lokal::Localization::new().with(key, node)...`
fn generate_branch(branch: &CheckedBranch<'_>) -> TokenStream {
    let entries = branch.entries.iter().map(|(key, node)| {
        let node = generate_node(node);
        quote! { .with(#key, #node) }
    });
    let metadata = generate_metadata(branch.metadata);

    quote! {
        ::lokal::Localization::new() #(#entries)* #metadata
    }
}

fn generate_node(node: &Checked<'_>) -> TokenStream {
    match node {
        Checked::Branch(branch) => generate_branch(branch),
        Checked::Text(unit) => {
            let values = unit
                .values
                .iter()
                .map(|(locale, text)| quote! { .with(#locale, #text) });
            let metadata = generate_metadata(unit.metadata);
            quote! {
                ::lokal::LocalizedUnit::new() #(#values)* #metadata
            }
        }
        Checked::Function(unit) => {
            // Closures are emitted verbatim; `FunctionUnit::with` supplies
            // the `&[Value]` argument type.
            let values = unit
                .values
                .iter()
                .map(|(locale, closure)| quote! { .with(#locale, #closure) });
            let metadata = generate_metadata(unit.metadata);
            quote! {
                ::lokal::FunctionUnit::new() #(#values)* #metadata
            }
        }
    }
}

fn generate_metadata(metadata: Option<&Expr>) -> TokenStream {
    match metadata {
        Some(expr) => quote! { .with_metadata(::core::convert::Into::into(#expr)) },
        None => TokenStream::new(),
    }
}
