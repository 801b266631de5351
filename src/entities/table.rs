//! Table entity - A grid of text cells placed on the drawing
//!
//! The dimension check report is an ordinary table whose layer matches the
//! annotation layer. Rows are only ever appended by the annotation pipeline.

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::entity::{default_layer, DrawingObject};
use crate::core::identity::{Handle, HandlePrefix};
use crate::entities::geometry::Point3;

/// Row height used when a table has no rows to copy a height from
pub const DEFAULT_ROW_HEIGHT: f64 = 8.0;

/// A single table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row height in drawing units
    #[serde(default = "default_row_height")]
    pub height: f64,

    /// Cell text, left to right
    #[serde(default, deserialize_with = "deserialize_cells")]
    pub cells: Vec<String>,
}

/// Any scalar a YAML writer may leave unquoted (`NaN`, `12`, `true`, `~`)
#[derive(Deserialize)]
#[serde(untagged)]
enum CellScalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Empty(Option<()>),
}

impl From<CellScalar> for String {
    fn from(cell: CellScalar) -> Self {
        match cell {
            CellScalar::Text(s) => s,
            CellScalar::Integer(i) => i.to_string(),
            CellScalar::Float(f) if f.is_nan() => "NaN".to_string(),
            CellScalar::Float(f) => format!("{:?}", f),
            CellScalar::Flag(b) => b.to_string(),
            CellScalar::Empty(_) => String::new(),
        }
    }
}

fn deserialize_cells<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let cells = Vec::<CellScalar>::deserialize(deserializer)?;
    Ok(cells.into_iter().map(String::from).collect())
}

fn default_row_height() -> f64 {
    DEFAULT_ROW_HEIGHT
}

/// Table entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Unique handle (TBL-...)
    pub handle: Handle,

    /// Layer name
    #[serde(default = "default_layer")]
    pub layer: String,

    /// Insertion point (top-left corner)
    pub position: Point3,

    /// Column widths, left to right
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_widths: Vec<f64>,

    /// Rows, top to bottom (the first row is usually a header)
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl DrawingObject for Table {
    const PREFIX: HandlePrefix = HandlePrefix::Tbl;

    fn handle(&self) -> &Handle {
        &self.handle
    }

    fn layer(&self) -> &str {
        &self.layer
    }
}

impl Table {
    pub fn new(position: Point3, layer: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(HandlePrefix::Tbl),
            layer: layer.into(),
            position,
            column_widths: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Number of rows, header included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Height of the first row, if any
    pub fn first_row_height(&self) -> Option<f64> {
        self.rows.first().map(|r| r.height)
    }

    /// Append a row and return its index
    pub fn insert_row(&mut self, height: f64, cells: Vec<String>) -> usize {
        self.rows.push(TableRow { height, cells });
        self.rows.len() - 1
    }

    /// Number of columns (widest of the declared widths and the rows)
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.len())
            .max()
            .unwrap_or(0)
            .max(self.column_widths.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_row_returns_index() {
        let mut table = Table::new(Point3::default(), "Report");
        assert_eq!(table.first_row_height(), None);

        let header = table.insert_row(10.0, vec!["No.".into(), "Nominal".into()]);
        let row = table.insert_row(6.0, vec!["1".into(), "10.0".into()]);

        assert_eq!(header, 0);
        assert_eq!(row, 1);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.first_row_height(), Some(10.0));
    }

    #[test]
    fn test_column_count() {
        let mut table = Table::new(Point3::default(), "0");
        table.column_widths = vec![10.0, 20.0];
        assert_eq!(table.column_count(), 2);
        table.insert_row(5.0, vec!["a".into(), "b".into(), "c".into(), "d".into()]);
        assert_eq!(table.column_count(), 4);
    }

    #[test]
    fn test_unquoted_scalar_cells_load_as_text() {
        let row: TableRow =
            serde_yml::from_str("height: 8.0\ncells: [\"1\", 12, 5000.0, NaN, .nan, ~]\n").unwrap();
        assert_eq!(row.cells, vec!["1", "12", "5000.0", "NaN", "NaN", ""]);
    }
}
