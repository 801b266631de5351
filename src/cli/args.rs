//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    annotate::AnnotateArgs,
    classify::{BandsArgs, ClassifyArgs},
    completions::CompletionsArgs,
    entities::EntitiesArgs,
    layers::LayersArgs,
    report::ReportArgs,
};

#[derive(Parser)]
#[command(name = "dimcheck")]
#[command(author, version, about = "Dimension check table toolkit")]
#[command(long_about = "Balloon the dimensions of a drawing, copy them onto an annotation layer and \
fill the layer's report table with nominal and general-tolerance limits.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Balloon selected dimensions and append report rows
    #[command(visible_alias = "dimension-check-table")]
    Annotate(AnnotateArgs),

    /// Look up the general tolerance for nominal lengths
    Classify(ClassifyArgs),

    /// Print the tolerance band tables
    Bands(BandsArgs),

    /// List the layers of a drawing
    Layers(LayersArgs),

    /// List model space entities of a drawing
    Entities(EntitiesArgs),

    /// Print the report table on the annotation layer
    Report(ReportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for single records, tsv for lists)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just handles, one per line
    Id,
}

impl OutputFormat {
    /// Resolve `Auto` to a concrete format
    pub fn resolve(self, auto: OutputFormat) -> OutputFormat {
        match self {
            OutputFormat::Auto => auto,
            f => f,
        }
    }
}
