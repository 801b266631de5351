//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::identity::Handle;

/// Format a handle for display, truncating if too long
///
/// Handles longer than 16 characters are shortened to 13 chars plus "...".
pub fn format_short_handle(handle: &Handle) -> String {
    let s = handle.to_string();
    if s.len() > 16 {
        format!("{}...", &s[..13])
    } else {
        s
    }
}

/// Parse a comma or whitespace separated list of handles
pub fn parse_handle_list(values: &[String]) -> Result<Vec<Handle>> {
    values
        .iter()
        .flat_map(|v| v.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Handle>()
                .map_err(|e| miette::miette!("invalid handle '{}': {}", s, e))
        })
        .collect()
}

/// Write rendered output to a file, or stdout when no path is given
pub fn write_output(content: &str, output_path: Option<&Path>, quiet: bool) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            if !quiet {
                eprintln!("Report written to: {}", path.display());
            }
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
