//! Dimension entity - A measured length annotated on the drawing

use serde::{Deserialize, Serialize};

use crate::core::entity::{default_layer, DrawingObject};
use crate::core::identity::{Handle, HandlePrefix};
use crate::entities::geometry::Point3;

/// Dimension type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    #[default]
    Rotated,
    Aligned,
    Angular,
    Radial,
    Diametric,
    Ordinate,
}

impl std::fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DimensionKind::Rotated => write!(f, "rotated"),
            DimensionKind::Aligned => write!(f, "aligned"),
            DimensionKind::Angular => write!(f, "angular"),
            DimensionKind::Radial => write!(f, "radial"),
            DimensionKind::Diametric => write!(f, "diametric"),
            DimensionKind::Ordinate => write!(f, "ordinate"),
        }
    }
}

/// Dimension entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Unique handle (DIM-...)
    pub handle: Handle,

    /// Layer name
    #[serde(default = "default_layer")]
    pub layer: String,

    /// Dimension type
    #[serde(default)]
    pub kind: DimensionKind,

    /// Measured value (the nominal length)
    pub measurement: f64,

    /// Where the dimension text is placed
    pub text_position: Point3,

    /// Definition points (extension line origins, dimension line point)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub definition_points: Vec<Point3>,

    /// Text shown instead of the measured value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_override: Option<String>,

    /// Dimension style name
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_style() -> String {
    "Standard".to_string()
}

impl DrawingObject for Dimension {
    const PREFIX: HandlePrefix = HandlePrefix::Dim;

    fn handle(&self) -> &Handle {
        &self.handle
    }

    fn layer(&self) -> &str {
        &self.layer
    }
}

impl Dimension {
    /// Create a new dimension on the default layer
    pub fn new(kind: DimensionKind, measurement: f64, text_position: Point3) -> Self {
        Self {
            handle: Handle::new(HandlePrefix::Dim),
            layer: default_layer(),
            kind,
            measurement,
            text_position,
            definition_points: Vec::new(),
            text_override: None,
            style: default_style(),
        }
    }

    /// Copy this dimension onto another layer under a fresh handle
    pub fn clone_onto(&self, layer: &str) -> Self {
        Self {
            handle: Handle::new(HandlePrefix::Dim),
            layer: layer.to_string(),
            ..self.clone()
        }
    }

    /// Text as it appears on the drawing
    pub fn display_text(&self) -> String {
        match self.text_override {
            Some(ref text) if !text.is_empty() => text.clone(),
            _ => format!("{}", self.measurement),
        }
    }
}
