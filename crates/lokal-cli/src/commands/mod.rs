//! CLI command implementations.

mod check;
mod eval;
mod keys;

use std::fs::read_to_string;
use std::path::Path;

use lokal::Localization;
use miette::miette;
use serde_json::Value as JsonValue;

use crate::output::{SyntaxDiagnostic, TreeDiagnostic};

pub use check::{CheckArgs, run_check};
pub use eval::{EvalArgs, run_eval};
pub use keys::{KeysArgs, run_keys};

/// Read and parse a JSON file, reporting syntax errors with source context.
fn read_json(path: &Path) -> miette::Result<JsonValue> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read file {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| SyntaxDiagnostic::from_json_error(path, &content, &e).into())
}

/// Read a JSON file as a validated translation tree.
fn load_tree(path: &Path) -> miette::Result<Localization> {
    let value = read_json(path)?;
    Localization::try_from(value).map_err(|violation| TreeDiagnostic::new(path, violation).into())
}
