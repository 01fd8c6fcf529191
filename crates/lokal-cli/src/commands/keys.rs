//! Implementation of the `lokal keys` command.

use std::path::PathBuf;

use lokal::{Localization, LocalizedUnit, Node, keys};
use miette::IntoDiagnostic;

use super::load_tree;
use crate::output::table::{KeyRow, format_keys_table};

/// Arguments for the keys command.
#[derive(Debug, clap::Args)]
pub struct KeysArgs {
    /// Translation tree (.json)
    pub file: PathBuf,

    /// Prefix prepended to every key path
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Output the key paths as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Run the keys command.
pub fn run_keys(args: KeysArgs) -> miette::Result<i32> {
    let tree = load_tree(&args.file)?;

    if args.json {
        let paths = keys(&tree, &args.prefix).paths();
        println!("{}", serde_json::to_string_pretty(&paths).into_diagnostic()?);
        return Ok(exitcode::OK);
    }

    let locales: Vec<String> = tree
        .check_locales()
        .into_diagnostic()?
        .map(|set| set.iter().map(str::to_string).collect())
        .unwrap_or_default();

    let rows = key_rows(&tree, &args.prefix, &locales);
    println!("{}", format_keys_table(&locales, &rows));
    Ok(exitcode::OK)
}

/// One row per text unit, in tree order, with a cell per locale.
fn key_rows(tree: &Localization, prefix: &str, locales: &[String]) -> Vec<KeyRow> {
    let mut units = Vec::new();
    collect_units(tree, prefix, &mut units);
    units
        .into_iter()
        .map(|(path, unit)| KeyRow {
            path,
            values: locales
                .iter()
                .map(|locale| unit.get(locale).unwrap_or_default().to_string())
                .collect(),
        })
        .collect()
}

/// Walk the tree directly so keys containing `.` keep their own units.
fn collect_units<'a>(
    tree: &'a Localization,
    prefix: &str,
    units: &mut Vec<(String, &'a LocalizedUnit)>,
) {
    for (key, node) in tree.iter() {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        match node {
            Node::Unit(unit) => units.push((path, unit)),
            Node::Branch(child) => collect_units(child, &path, units),
            Node::Function(_) => {}
        }
    }
}
