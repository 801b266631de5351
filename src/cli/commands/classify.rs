//! `dimcheck classify` and `dimcheck bands` - general tolerance lookups

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::table::Listing;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{classify, ToleranceClass};
use crate::pipeline::report::ReportRow;

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    /// Nominal lengths to look up
    #[arg(required = true, allow_negative_numbers = true)]
    pub lengths: Vec<f64>,

    /// Only this tolerance class (default: every class)
    #[arg(long, short = 'c')]
    pub class: Option<ToleranceClass>,
}

#[derive(clap::Args, Debug)]
pub struct BandsArgs {
    /// Only this tolerance class (default: every class)
    #[arg(long, short = 'c')]
    pub class: Option<ToleranceClass>,
}

#[derive(Serialize)]
struct ClassifyRecord {
    length: f64,
    class: ToleranceClass,
    band: Option<String>,
    tolerance: Option<f64>,
    upper: Option<f64>,
    lower: Option<f64>,
}

#[derive(Serialize)]
struct BandRecord {
    class: ToleranceClass,
    range: String,
    low: f64,
    low_inclusive: bool,
    high: f64,
    tolerance: f64,
}

fn selected_classes(class: Option<ToleranceClass>) -> Vec<ToleranceClass> {
    match class {
        Some(c) => vec![c],
        None => ToleranceClass::all().to_vec(),
    }
}

pub fn run(args: ClassifyArgs, global: &GlobalOpts) -> Result<()> {
    let classes = selected_classes(args.class);

    let mut records = Vec::new();
    for &length in &args.lengths {
        for &class in &classes {
            let tolerance = classify(length, class);
            let known = !tolerance.is_nan();
            records.push(ClassifyRecord {
                length,
                class,
                band: class.band(length).map(|b| b.to_string()),
                tolerance: known.then_some(tolerance),
                upper: known.then_some(length + tolerance),
                lower: known.then_some(length - tolerance),
            });
        }
    }

    match global.format.resolve(OutputFormat::Tsv) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&records).into_diagnostic()?);
        }
        format => {
            let mut listing = Listing::new(
                vec!["LENGTH", "CLASS", "BAND", "TOLERANCE", "MAX", "MIN"],
                "lookup",
            );
            for r in &records {
                let cells = ReportRow::new(0, r.length, r.class).cells();
                listing.push(vec![
                    r.length.to_string(),
                    r.class.to_string(),
                    r.band.clone().unwrap_or_else(|| "-".to_string()),
                    r.tolerance
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "NaN".to_string()),
                    cells[2].clone(),
                    cells[3].clone(),
                ]);
            }
            print!("{}", listing.render(format, false)?);
        }
    }

    Ok(())
}

pub fn run_bands(args: BandsArgs, global: &GlobalOpts) -> Result<()> {
    let records: Vec<BandRecord> = selected_classes(args.class)
        .into_iter()
        .flat_map(|class| {
            class.bands().iter().map(move |band| BandRecord {
                class,
                range: band.to_string(),
                low: band.low,
                low_inclusive: band.low_inclusive,
                high: band.high,
                tolerance: band.tolerance,
            })
        })
        .collect();

    match global.format.resolve(OutputFormat::Tsv) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&records).into_diagnostic()?);
        }
        format => {
            let mut listing = Listing::new(vec!["CLASS", "RANGE", "TOLERANCE"], "band");
            for r in &records {
                listing.push(vec![
                    r.class.to_string(),
                    r.range.clone(),
                    format!("±{}", r.tolerance),
                ]);
            }
            print!("{}", listing.render(format, !global.quiet)?);
        }
    }

    Ok(())
}
