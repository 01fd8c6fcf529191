//! Miette diagnostics for malformed translation files.

use std::path::Path;

use lokal::Violation;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A JSON syntax error with source context.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(lokal::syntax))]
pub struct SyntaxDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,
}

impl SyntaxDiagnostic {
    /// Create a diagnostic from a serde_json error with source context.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        // Sum of (line_length + 1) for lines before the error line, plus column.
        let offset = content
            .lines()
            .take(err.line().saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + err.column().saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        SyntaxDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: err.to_string(),
        }
    }
}

/// A well-formed JSON file that is not a valid translation tree.
#[derive(Debug, Error, Diagnostic)]
#[error("{file}: {violation}")]
#[diagnostic(code(lokal::tree))]
pub struct TreeDiagnostic {
    file: String,

    violation: Violation,

    #[help]
    help: Option<String>,
}

impl TreeDiagnostic {
    pub fn new(path: &Path, violation: Violation) -> Self {
        let help = match &violation {
            Violation::NotAnObject { .. } => {
                Some("a translation tree is a JSON object of units and nested objects".to_string())
            }
            Violation::InvalidEntry { .. } => Some(
                "units map locale codes to strings, e.g. { \"en\": \"Save\", \"ja\": \"保存\" }"
                    .to_string(),
            ),
            Violation::LocaleSetMismatch { expected, .. } => {
                Some(format!("every unit must have exactly the locales {expected}"))
            }
            Violation::InvalidReference { .. } => None,
        };

        TreeDiagnostic {
            file: path.display().to_string(),
            violation,
            help,
        }
    }
}
