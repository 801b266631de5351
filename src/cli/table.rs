//! Table formatting for CLI listings
//!
//! Commands build a [`Listing`] of plain string cells once and render it in
//! whichever text format was requested. JSON and YAML are produced by the
//! commands themselves from typed records.

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;

/// Rows of string cells under a fixed header
#[derive(Debug, Clone)]
pub struct Listing {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    noun: &'static str,
}

impl Listing {
    /// `noun` names one row in the summary line, e.g. "layer"
    pub fn new(headers: Vec<&str>, noun: &'static str) -> Self {
        Self::with_headers(headers.into_iter().map(String::from).collect(), noun)
    }

    pub fn with_headers(headers: Vec<String>, noun: &'static str) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            noun,
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Render in a text format; `summary` adds a trailing count line to TSV
    pub fn render(&self, format: OutputFormat, summary: bool) -> Result<String> {
        let mut out = String::new();
        match format {
            OutputFormat::Csv => {
                let mut writer = csv::WriterBuilder::new()
                    .flexible(true)
                    .from_writer(Vec::new());
                writer.write_record(&self.headers).into_diagnostic()?;
                for row in &self.rows {
                    writer.write_record(row).into_diagnostic()?;
                }
                let bytes = writer
                    .into_inner()
                    .map_err(|e| miette::miette!("failed to write CSV: {}", e.error()))?;
                out.push_str(&String::from_utf8(bytes).into_diagnostic()?);
            }
            OutputFormat::Md => {
                let mut builder = Builder::default();
                builder.push_record(self.headers.iter().map(String::as_str));
                for row in &self.rows {
                    builder.push_record(row.iter().map(String::as_str));
                }
                out.push_str(&builder.build().with(Style::markdown()).to_string());
                out.push('\n');
            }
            OutputFormat::Id => {
                for row in &self.rows {
                    if let Some(first) = row.first() {
                        out.push_str(first);
                        out.push('\n');
                    }
                }
            }
            _ => {
                out.push_str(&self.headers.join("\t"));
                out.push('\n');
                for row in &self.rows {
                    out.push_str(&row.join("\t"));
                    out.push('\n');
                }
                if summary {
                    out.push_str(&format!(
                        "\n{} {}(s) found.\n",
                        style(self.rows.len()).cyan(),
                        self.noun
                    ));
                }
            }
        }
        Ok(out)
    }
}
