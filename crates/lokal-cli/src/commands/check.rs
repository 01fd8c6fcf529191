//! Implementation of the `lokal check` command.

use std::path::{Path, PathBuf};

use lokal::{LocaleSet, validate_localization};
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use super::read_json;
use crate::output::TreeDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Locales every unit must have (comma-separated)
    #[arg(long, value_delimiter = ',', conflicts_with = "reference")]
    pub locales: Vec<String>,

    /// Tree whose locale set every file must match
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct CheckJson {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    locales: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let matching = match &args.reference {
        Some(reference) => Some(read_json(reference)?),
        None if !args.locales.is_empty() => Some(JsonValue::from(args.locales.clone())),
        None => None,
    };

    let mut reports = Vec::new();
    let mut failed = 0;
    for file in &args.files {
        debug!(file = %file.display(), "checking");
        let result = check_file(file, matching.as_ref());
        if result.is_err() {
            failed += 1;
        }

        if args.json {
            reports.push(match result {
                Ok(locales) => CheckJson {
                    file: file.display().to_string(),
                    valid: true,
                    locales: locales.map(|set| set.iter().map(str::to_string).collect()),
                    error: None,
                },
                Err(report) => CheckJson {
                    file: file.display().to_string(),
                    valid: false,
                    locales: None,
                    error: Some(report.to_string()),
                },
            });
        } else {
            match result {
                Ok(Some(locales)) => {
                    println!("{} {} {}", "✓".green(), file.display(), locales.dimmed());
                }
                Ok(None) => println!("{} {} {}", "✓".green(), file.display(), "(no units)".dimmed()),
                Err(report) => eprintln!("{} {report:?}", "✗".red()),
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports).into_diagnostic()?);
    } else {
        let total = args.files.len();
        println!("{} of {total} files valid", total - failed);
    }

    Ok(if failed == 0 { exitcode::OK } else { exitcode::DATAERR })
}

/// Validate one file, returning its locale set.
fn check_file(path: &Path, matching: Option<&JsonValue>) -> miette::Result<Option<LocaleSet>> {
    let value = read_json(path)?;
    validate_localization(&value, matching)
        .map_err(|violation| TreeDiagnostic::new(path, violation).into())
}
