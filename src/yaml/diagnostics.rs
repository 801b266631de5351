//! YAML error diagnostics for drawing files

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// YAML syntax or schema error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("invalid drawing file: {message}")]
#[diagnostic(code(dimcheck::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: Option<SourceSpan>,

    #[help]
    help: Option<String>,

    /// The underlying error message
    message: String,
}

impl YamlSyntaxError {
    /// Create a syntax error from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        // Type errors found after parsing carry no location
        let span = err.location().map(|loc| {
            let offset = line_col_to_offset(source, loc.line(), loc.column());
            SourceSpan::from(offset..offset.saturating_add(1))
        });
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span,
            help,
            message,
        }
    }
}

/// Errors reading a YAML file
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert a 1-based line/column to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let col_offset = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            return line_start + col_offset;
        }
        line_start += text.len();
    }
    source.len().saturating_sub(1)
}

/// Suggest a fix based on the parser message
fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("unknown variant") && msg_lower.contains("dimension") {
        return Some(
            "Entity `type` must be one of: dimension, mtext, line, circle, table".to_string(),
        );
    }

    if msg_lower.contains("missing field `handle`") {
        return Some(
            "Every entity and layer needs a handle such as DIM-01HQ3K4N5M6P7R8S9T0VWXYZAB"
                .to_string(),
        );
    }

    if msg_lower.contains("invalid handle prefix") || msg_lower.contains("missing '-' delimiter") {
        return Some("Handles look like PREFIX-ULID, with PREFIX one of LYR, DIM, TEXT, LINE, CIRC, TBL".to_string());
    }

    if msg_lower.contains("missing field `measurement`") {
        return Some("Dimensions need a numeric `measurement` (the nominal length)".to_string());
    }

    if msg_lower.contains("tab") {
        return Some(
            "YAML requires spaces for indentation, not tabs. Replace tabs with spaces.".to_string(),
        );
    }

    if msg_lower.contains("duplicate key") {
        return Some("Each key can only appear once. Remove or rename the duplicate key.".to_string());
    }

    if msg_lower.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    None
}
