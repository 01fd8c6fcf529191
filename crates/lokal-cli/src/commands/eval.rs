//! Implementation of the `lokal eval` command.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use lokal::{
    FailureHandler, LocaleSource, LocalizationError, LocalizationFailure, LocalizationOptions,
    Params, SystemLocale, Value, localize, log_failure, value_at_key_path,
};
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::load_tree;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Translation tree (.json)
    pub file: PathBuf,

    /// Key path of the unit to localize (e.g., button.delete)
    #[arg(short, long)]
    pub key: String,

    /// Locale to localize into. Defaults to the system locale
    #[arg(long, env = "LOKAL_LOCALE")]
    pub locale: Option<String>,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Substitute parameters without HTML escaping
    #[arg(long)]
    pub no_escape: bool,

    /// Print the localized value without interpolating parameters
    #[arg(long)]
    pub raw: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub key: String,
    pub result: String,
    pub failures: Vec<String>,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))?;
    Ok((name.to_string(), value.to_string()))
}

/// Integers become numbers; everything else stays a string.
fn parse_value(raw: String) -> Value {
    match raw.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(raw),
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let tree = load_tree(&args.file)?;

    let entry = match value_at_key_path(&tree, &args.key) {
        Ok(Some(entry)) => entry,
        Ok(None) => return report_error(args.json, &format!("no entry at '{}'", args.key)),
        Err(e) => return report_error(args.json, &e.to_string()),
    };
    let Some(unit) = entry.as_unit() else {
        return report_error(args.json, &format!("'{}' is not a localized unit", args.key));
    };

    let params: Params = args
        .params
        .into_iter()
        .map(|(k, v)| (k, parse_value(v)))
        .collect();

    // Failures are still logged; the copies decide the exit code.
    let failures: Arc<Mutex<Vec<LocalizationError>>> = Arc::default();
    let sink = Arc::clone(&failures);
    let handler: FailureHandler = Arc::new(move |failure: &LocalizationFailure<'_>| {
        log_failure(failure);
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(failure.error.clone());
    });
    let source: Arc<dyn LocaleSource> = Arc::new(SystemLocale);

    let options = LocalizationOptions::builder()
        .maybe_locale(args.locale)
        .parameters(params)
        .skip_interpolation(args.raw)
        .escape_parameters(!args.no_escape)
        .failure_handler(handler)
        .locale_source(source)
        .build();
    let result = localize(unit, &options);

    let failures = failures
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    if args.json {
        let output = EvalResult {
            key: args.key,
            result,
            failures: failures.iter().map(ToString::to_string).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{result}");
    }

    let missing = failures
        .iter()
        .any(|error| !matches!(error, LocalizationError::LocaleFallback { .. }));
    Ok(if missing { exitcode::DATAERR } else { exitcode::OK })
}

/// Print a lookup error and return the matching exit code.
fn report_error(json: bool, message: &str) -> miette::Result<i32> {
    if json {
        let output = serde_json::json!({ "error": message });
        eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        eprintln!("{} {message}", "error:".red());
    }
    Ok(exitcode::DATAERR)
}
