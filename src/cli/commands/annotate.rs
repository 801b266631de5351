//! `dimcheck annotate` - balloon dimensions and fill the report table

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, MultiSelect};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::{format_short_handle, parse_handle_list};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader::{load_drawing, save_drawing};
use crate::core::{
    AllDimensions, Config, DrawingDatabase, FixedSelection, Selection, SelectionSource,
    ToleranceClass,
};
use crate::pipeline::report::{format_value, AppendOutcome};
use crate::pipeline::{annotate, RunOutcome, RunSummary};

#[derive(clap::Args, Debug)]
pub struct AnnotateArgs {
    /// Drawing file (*.dwg.yaml)
    pub drawing: PathBuf,

    /// Entity handles to process, in order (comma separated or repeated)
    #[arg(long, short = 's', value_name = "HANDLES", conflicts_with = "all")]
    pub select: Vec<String>,

    /// Process every dimension in model space
    #[arg(long)]
    pub all: bool,

    /// Tolerance class for report rows (fine, medium, coarse, very-coarse)
    #[arg(long, short = 'c')]
    pub class: Option<ToleranceClass>,

    /// Annotation layer name
    #[arg(long, short = 'l')]
    pub layer: Option<String>,

    /// Show what would be added without saving the drawing
    #[arg(long)]
    pub dry_run: bool,
}

/// Selection sources the CLI can hand to the pipeline
enum CliSelection {
    Fixed(FixedSelection),
    All(AllDimensions),
    Interactive(InteractivePicker),
}

impl SelectionSource for CliSelection {
    fn select<D: DrawingDatabase + ?Sized>(&mut self, db: &D, prompt: &str) -> Selection {
        match self {
            CliSelection::Fixed(s) => s.select(db, prompt),
            CliSelection::All(s) => s.select(db, prompt),
            CliSelection::Interactive(s) => s.select(db, prompt),
        }
    }
}

/// Terminal multi-select over model space entities
struct InteractivePicker;

impl SelectionSource for InteractivePicker {
    fn select<D: DrawingDatabase + ?Sized>(&mut self, db: &D, prompt: &str) -> Selection {
        let handles = db.handles();
        if handles.is_empty() {
            return Selection::Nothing;
        }
        let items: Vec<String> = handles
            .iter()
            .map(|h| match db.entity(h) {
                Some(e) => format!("{:<16} {:<10} {}", format_short_handle(h), e.type_name(), e.summary()),
                None => h.to_string(),
            })
            .collect();

        let picked = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&items)
            .interact_opt();

        match picked {
            Ok(Some(indices)) => {
                Selection::from_handles(indices.into_iter().map(|i| handles[i].clone()).collect())
            }
            Ok(None) | Err(_) => Selection::Cancelled,
        }
    }
}

/// Machine-readable view of one balloon
#[derive(Serialize)]
struct BalloonView {
    balloon: u32,
    source: String,
    clone: String,
    label: String,
    nominal: f64,
    tolerance: Option<f64>,
    row: Option<usize>,
}

#[derive(Serialize)]
struct SummaryView {
    drawing: String,
    layer: String,
    layer_created: bool,
    tolerance_class: ToleranceClass,
    dry_run: bool,
    balloons: Vec<BalloonView>,
    skipped: Vec<String>,
}

pub fn run(args: AnnotateArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut options = config.annotate_options();
    if let Some(class) = args.class {
        options.tolerance_class = class;
    }
    if let Some(layer) = &args.layer {
        options.layer_name = layer.clone();
    }

    let mut drawing = load_drawing(&args.drawing)?;

    let mut source = if args.all {
        CliSelection::All(AllDimensions)
    } else if !args.select.is_empty() {
        CliSelection::Fixed(FixedSelection::handles(parse_handle_list(&args.select)?))
    } else if Term::stdout().is_term() {
        CliSelection::Interactive(InteractivePicker)
    } else {
        CliSelection::Fixed(FixedSelection(Selection::Nothing))
    };

    let outcome = annotate(&mut drawing, &mut source, &options)?;

    let summary = match outcome {
        RunOutcome::NothingSelected => {
            if !global.quiet {
                eprintln!("{} No dimensions selected, drawing unchanged", style("!").yellow());
            }
            return Ok(());
        }
        RunOutcome::Completed(summary) => summary,
    };

    if !args.dry_run {
        save_drawing(&args.drawing, &drawing)?;
    }

    match global.format.resolve(OutputFormat::Auto) {
        OutputFormat::Json => {
            let view = summary_view(&args, &options.layer_name, &summary);
            println!("{}", serde_json::to_string_pretty(&view).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            let view = summary_view(&args, &options.layer_name, &summary);
            print!("{}", serde_yml::to_string(&view).into_diagnostic()?);
        }
        OutputFormat::Id => {
            for b in &summary.balloons {
                println!("{}", b.annotation.label);
            }
        }
        _ => print_human(&args, &options.layer_name, &summary, global),
    }

    Ok(())
}

fn summary_view(args: &AnnotateArgs, layer_name: &str, summary: &RunSummary) -> SummaryView {
    SummaryView {
        drawing: args.drawing.display().to_string(),
        layer: layer_name.to_string(),
        layer_created: summary.layer_created,
        tolerance_class: summary.tolerance_class,
        dry_run: args.dry_run,
        balloons: summary
            .balloons
            .iter()
            .map(|b| BalloonView {
                balloon: b.number,
                source: b.source.to_string(),
                clone: b.annotation.clone.to_string(),
                label: b.annotation.label.to_string(),
                nominal: b.nominal,
                tolerance: (!b.tolerance.is_nan()).then_some(b.tolerance),
                row: match &b.row {
                    AppendOutcome::Appended { row, .. } => Some(*row),
                    AppendOutcome::NoTargetTable => None,
                },
            })
            .collect(),
        skipped: summary.skipped.iter().map(|h| h.to_string()).collect(),
    }
}

fn print_human(args: &AnnotateArgs, layer_name: &str, summary: &RunSummary, global: &GlobalOpts) {
    if global.verbose {
        for b in &summary.balloons {
            let tol = if b.tolerance.is_nan() {
                style("unclassified".to_string()).yellow()
            } else {
                style(format!("±{}", b.tolerance)).dim()
            };
            println!(
                "   {} {} nominal {} {}",
                style(format!("#{}", b.number)).cyan(),
                style(format_short_handle(&b.source)).dim(),
                format_value(b.nominal),
                tol
            );
        }
        for h in &summary.skipped {
            println!("   {} {} (not a dimension)", style("skip").dim(), format_short_handle(h));
        }
    }

    if summary.missing_table() {
        eprintln!(
            "{} No report table on layer '{}', balloons added without report rows",
            style("!").yellow(),
            layer_name
        );
    }

    if global.quiet {
        return;
    }

    if summary.layer_created {
        println!("{} Created layer {}", style("✓").green(), style(layer_name).cyan());
    }
    println!(
        "{} Ballooned {} dimension(s) on {} ({} report row(s), class {})",
        style("✓").green(),
        style(summary.balloons.len()).cyan(),
        style(layer_name).cyan(),
        summary.rows_appended(),
        summary.tolerance_class
    );
    if !summary.skipped.is_empty() {
        println!(
            "   {} non-dimension entit(ies) skipped",
            style(summary.skipped.len()).yellow()
        );
    }
    if args.dry_run {
        println!("   {}", style("Dry run, drawing not saved").dim());
    } else {
        println!("   {}", style(args.drawing.display()).dim());
    }
}
