//! Drawing file loading and saving
//!
//! Drawings are stored as a single YAML document. Loading parses the file
//! (with source-annotated syntax errors) and then checks handle and layer
//! integrity before the drawing is handed to a command.

use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::Path;

use crate::core::drawing::{Drawing, DrawingFile};

/// Load and validate a drawing file
pub fn load_drawing(path: &Path) -> Result<Drawing> {
    if !path.exists() {
        return Err(miette::miette!("Drawing not found: {}", path.display()));
    }
    let file: DrawingFile = crate::yaml::parse_yaml_file(path)?;
    Drawing::from_file(file).map_err(|e| miette::miette!("{}: {}", path.display(), e))
}

/// Write a drawing back to disk
pub fn save_drawing(path: &Path, drawing: &Drawing) -> Result<()> {
    let yaml = serde_yml::to_string(drawing.file()).into_diagnostic()?;
    fs::write(path, yaml).into_diagnostic()?;
    Ok(())
}
