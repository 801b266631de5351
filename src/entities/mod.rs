//! Drawing entity definitions
//!
//! A drawing's model space holds the following entity types:
//!
//! - [`Dimension`] - Measured lengths; the only entities the annotation pipeline acts on
//! - [`MText`] - Multiline text, used for balloon labels
//! - [`Table`] - Text grids, one of which may serve as the dimension check report
//! - [`Line`] and [`Circle`] - Ordinary geometry
//!
//! Layers are not entities; they live in the layer table as [`LayerRecord`]s.

pub mod curve;
pub mod dimension;
pub mod geometry;
pub mod layer;
pub mod table;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::core::identity::Handle;

pub use curve::{Circle, Line};
pub use dimension::{Dimension, DimensionKind};
pub use geometry::{Point3, Vector3};
pub use layer::LayerRecord;
pub use table::{Table, TableRow};
pub use text::MText;

/// Any entity stored in model space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawingEntity {
    Dimension(Dimension),
    Mtext(MText),
    Line(Line),
    Circle(Circle),
    Table(Table),
}

impl DrawingEntity {
    pub fn handle(&self) -> &Handle {
        match self {
            DrawingEntity::Dimension(e) => &e.handle,
            DrawingEntity::Mtext(e) => &e.handle,
            DrawingEntity::Line(e) => &e.handle,
            DrawingEntity::Circle(e) => &e.handle,
            DrawingEntity::Table(e) => &e.handle,
        }
    }

    pub fn layer(&self) -> &str {
        match self {
            DrawingEntity::Dimension(e) => &e.layer,
            DrawingEntity::Mtext(e) => &e.layer,
            DrawingEntity::Line(e) => &e.layer,
            DrawingEntity::Circle(e) => &e.layer,
            DrawingEntity::Table(e) => &e.layer,
        }
    }

    /// Lowercase type name as written in drawing files
    pub fn type_name(&self) -> &'static str {
        match self {
            DrawingEntity::Dimension(_) => "dimension",
            DrawingEntity::Mtext(_) => "mtext",
            DrawingEntity::Line(_) => "line",
            DrawingEntity::Circle(_) => "circle",
            DrawingEntity::Table(_) => "table",
        }
    }

    pub fn as_dimension(&self) -> Option<&Dimension> {
        match self {
            DrawingEntity::Dimension(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            DrawingEntity::Table(t) => Some(t),
            _ => None,
        }
    }

    /// One-line description for listings
    pub fn summary(&self) -> String {
        match self {
            DrawingEntity::Dimension(d) => format!("{} {}", d.kind, d.display_text()),
            DrawingEntity::Mtext(t) => format!("\"{}\" at {}", t.contents, t.location),
            DrawingEntity::Line(l) => format!("{} -> {}", l.start, l.end),
            DrawingEntity::Circle(c) => format!("r={} at {}", c.radius, c.center),
            DrawingEntity::Table(t) => format!("{} row(s) x {} col(s)", t.row_count(), t.column_count()),
        }
    }
}

impl From<Dimension> for DrawingEntity {
    fn from(d: Dimension) -> Self {
        DrawingEntity::Dimension(d)
    }
}

impl From<MText> for DrawingEntity {
    fn from(t: MText) -> Self {
        DrawingEntity::Mtext(t)
    }
}

impl From<Line> for DrawingEntity {
    fn from(l: Line) -> Self {
        DrawingEntity::Line(l)
    }
}

impl From<Circle> for DrawingEntity {
    fn from(c: Circle) -> Self {
        DrawingEntity::Circle(c)
    }
}

impl From<Table> for DrawingEntity {
    fn from(t: Table) -> Self {
        DrawingEntity::Table(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_tagged_by_type() {
        let entity: DrawingEntity = Dimension::new(DimensionKind::Rotated, 25.0, Point3::default()).into();
        let yaml = serde_yml::to_string(&entity).unwrap();
        assert!(yaml.contains("type: dimension"));

        let parsed: DrawingEntity = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed, entity);
        assert_eq!(parsed.type_name(), "dimension");
    }

    #[test]
    fn test_as_dimension_only_matches_dimensions() {
        let line: DrawingEntity = Line::new(Point3::default(), Point3::new(1.0, 0.0, 0.0)).into();
        assert!(line.as_dimension().is_none());
        assert!(line.as_table().is_none());
        assert_eq!(line.layer(), "0");
    }
}
