//! `dimcheck layers` - list layer records

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::table::Listing;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader::load_drawing;
use crate::core::DrawingDatabase;

#[derive(clap::Args, Debug)]
pub struct LayersArgs {
    /// Drawing file (*.dwg.yaml)
    pub drawing: PathBuf,
}

#[derive(Serialize)]
struct LayerRecordView {
    name: String,
    handle: String,
    color: u8,
    plot: bool,
    entities: usize,
    report_table: Option<String>,
}

pub fn run(args: LayersArgs, global: &GlobalOpts) -> Result<()> {
    let drawing = load_drawing(&args.drawing)?;

    let records: Vec<LayerRecordView> = drawing
        .layers()
        .iter()
        .map(|layer| LayerRecordView {
            name: layer.name.clone(),
            handle: layer.handle.to_string(),
            color: layer.color,
            plot: layer.plot,
            entities: drawing.count_on_layer(&layer.name),
            report_table: drawing.table_on_layer(&layer.name).map(|h| h.to_string()),
        })
        .collect();

    match global.format.resolve(OutputFormat::Tsv) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&records).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for r in &records {
                println!("{}", r.handle);
            }
        }
        format => {
            let mut listing = Listing::new(vec!["NAME", "HANDLE", "ENTITIES", "TABLE"], "layer");
            for r in &records {
                listing.push(vec![
                    r.name.clone(),
                    r.handle.clone(),
                    r.entities.to_string(),
                    r.report_table.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
            print!("{}", listing.render(format, !global.quiet)?);
        }
    }

    Ok(())
}
