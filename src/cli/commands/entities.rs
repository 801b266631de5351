//! `dimcheck entities` - list model space entities

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::table::Listing;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::loader::load_drawing;
use crate::entities::DrawingEntity;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityType {
    Dimension,
    Mtext,
    Line,
    Circle,
    Table,
}

impl EntityType {
    fn matches(self, entity: &DrawingEntity) -> bool {
        matches!(
            (self, entity),
            (EntityType::Dimension, DrawingEntity::Dimension(_))
                | (EntityType::Mtext, DrawingEntity::Mtext(_))
                | (EntityType::Line, DrawingEntity::Line(_))
                | (EntityType::Circle, DrawingEntity::Circle(_))
                | (EntityType::Table, DrawingEntity::Table(_))
        )
    }
}

#[derive(clap::Args, Debug)]
pub struct EntitiesArgs {
    /// Drawing file (*.dwg.yaml)
    pub drawing: PathBuf,

    /// Only entities on this layer
    #[arg(long, short = 'l')]
    pub layer: Option<String>,

    /// Only entities of this type
    #[arg(long, short = 't', value_enum)]
    pub r#type: Option<EntityType>,
}

pub fn run(args: EntitiesArgs, global: &GlobalOpts) -> Result<()> {
    let drawing = load_drawing(&args.drawing)?;

    let entities: Vec<&DrawingEntity> = drawing
        .entities()
        .iter()
        .filter(|e| args.layer.as_deref().map_or(true, |l| e.layer() == l))
        .filter(|e| args.r#type.map_or(true, |t| t.matches(e)))
        .collect();

    match global.format.resolve(OutputFormat::Tsv) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entities).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&entities).into_diagnostic()?);
        }
        format => {
            let mut listing = Listing::new(vec!["HANDLE", "TYPE", "LAYER", "DETAILS"], "entity");
            for e in &entities {
                listing.push(vec![
                    e.handle().to_string(),
                    e.type_name().to_string(),
                    e.layer().to_string(),
                    e.summary(),
                ]);
            }
            print!("{}", listing.render(format, !global.quiet)?);
        }
    }

    Ok(())
}
