//! `dimcheck report` - print the report table of the annotation layer

use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::write_output;
use crate::cli::table::Listing;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader::load_drawing;
use crate::core::{Config, DrawingDatabase};
use crate::entities::Table;

/// Column names used when the table has no header row
const REPORT_COLUMNS: [&str; 4] = ["BALLOON", "NOMINAL", "MAX", "MIN"];

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Drawing file (*.dwg.yaml)
    pub drawing: PathBuf,

    /// Annotation layer holding the report table
    #[arg(long, short = 'l')]
    pub layer: Option<String>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let layer = match args.layer {
        Some(layer) => layer,
        None => Config::load().annotate_options().layer_name,
    };

    let drawing = load_drawing(&args.drawing)?;
    let handle = drawing
        .table_on_layer(&layer)
        .ok_or_else(|| miette::miette!("No report table on layer '{}'", layer))?;
    let table = drawing
        .table(&handle)
        .ok_or_else(|| miette::miette!("{} is not a table", handle))?;

    let content = match global.format.resolve(OutputFormat::Tsv) {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(table).into_diagnostic()?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yml::to_string(table).into_diagnostic()?,
        format => report_listing(table).render(format, false)?,
    };

    write_output(&content, args.output.as_deref(), global.quiet)
}

/// Split a table into header and body rows
///
/// A first row whose leading cell is not a balloon number is taken as the
/// header; otherwise generic column names are used.
fn report_listing(table: &Table) -> Listing {
    let mut rows = table.rows.iter().map(|r| r.cells.clone()).peekable();

    let is_header = rows
        .peek()
        .and_then(|cells| cells.first())
        .is_some_and(|first| first.trim().parse::<u32>().is_err());

    let mut listing = if is_header {
        Listing::with_headers(rows.next().unwrap_or_default(), "row")
    } else {
        let headers = (0..table.column_count().max(REPORT_COLUMNS.len()))
            .map(|i| {
                REPORT_COLUMNS
                    .get(i)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("C{}", i + 1))
            })
            .collect();
        Listing::with_headers(headers, "row")
    };

    for cells in rows {
        listing.push(cells);
    }
    listing
}
