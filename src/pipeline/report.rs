//! Report table rows
//!
//! Each balloon gets one row in the report table registered for the
//! annotation layer: balloon number, nominal, upper bound, lower bound.
//! Values are rounded to one decimal. An unclassifiable nominal leaves the
//! bounds as `NaN` instead of failing the run.

use crate::core::database::{DrawingDatabase, DrawingError};
use crate::core::identity::Handle;
use crate::core::tolerance::{classify, ToleranceClass};
use crate::entities::table::DEFAULT_ROW_HEIGHT;

/// One computed report row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow {
    pub balloon: u32,
    pub nominal: f64,
    /// Permissible deviation, `NaN` when unclassifiable
    pub tolerance: f64,
}

impl ReportRow {
    pub fn new(balloon: u32, nominal: f64, class: ToleranceClass) -> Self {
        Self {
            balloon,
            nominal,
            tolerance: classify(nominal, class),
        }
    }

    pub fn upper_bound(&self) -> f64 {
        self.nominal + self.tolerance
    }

    pub fn lower_bound(&self) -> f64 {
        self.nominal - self.tolerance
    }

    /// Cell text in column order
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.balloon.to_string(),
            format_value(self.nominal),
            format_value(self.upper_bound()),
            format_value(self.lower_bound()),
        ]
    }
}

/// Round to one decimal (ties to even) and print with exactly one decimal
///
/// `NaN` prints as `NaN`.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let rounded = (value * 10.0).round_ties_even() / 10.0;
    // Avoid printing "-0.0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.1}", rounded)
}

/// What happened when a row was offered to the report table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Row written at `row` in `table`
    Appended { table: Handle, row: usize },
    /// No table is registered for the layer; nothing was written
    NoTargetTable,
}

/// Append a row for `balloon` to the report table on `layer`
///
/// The new row copies the height of the table's first row.
pub fn append_row<D: DrawingDatabase + ?Sized>(
    db: &mut D,
    layer: &str,
    balloon: u32,
    nominal: f64,
    class: ToleranceClass,
) -> Result<AppendOutcome, DrawingError> {
    let Some(table) = db.table_on_layer(layer) else {
        return Ok(AppendOutcome::NoTargetTable);
    };

    let height = db
        .table(&table)
        .ok_or_else(|| DrawingError::NotATable(table.clone()))?
        .first_row_height()
        .unwrap_or(DEFAULT_ROW_HEIGHT);

    let cells = ReportRow::new(balloon, nominal, class).cells();
    let row = db.append_table_row(&table, height, cells)?;
    Ok(AppendOutcome::Appended { table, row })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::drawing::Drawing;
    use crate::entities::{LayerRecord, Point3, Table};

    fn drawing_with_table(layer: &str) -> (Drawing, Handle) {
        let mut drawing = Drawing::new("");
        drawing.add_layer(LayerRecord::new(layer)).unwrap();
        let mut table = Table::new(Point3::default(), layer);
        table.insert_row(
            9.0,
            vec!["No.".into(), "Nominal".into(), "Max".into(), "Min".into()],
        );
        let handle = drawing.append_entity(table.into()).unwrap();
        (drawing, handle)
    }

    #[test]
    fn test_medium_row_for_ten() {
        let row = ReportRow::new(1, 10.0, ToleranceClass::Medium);
        assert_eq!(row.cells(), vec!["1", "10.0", "10.2", "9.8"]);
    }

    #[test]
    fn test_unclassifiable_bounds_are_nan() {
        let row = ReportRow::new(3, 5000.0, ToleranceClass::Medium);
        assert_eq!(row.cells(), vec!["3", "5000.0", "NaN", "NaN"]);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(10.0), "10.0");
        assert_eq!(format_value(9.8), "9.8");
        assert_eq!(format_value(12.345), "12.3");
        assert_eq!(format_value(0.25), "0.2");
        assert_eq!(format_value(0.75), "0.8");
        assert_eq!(format_value(-0.04), "0.0");
        assert_eq!(format_value(f64::NAN), "NaN");
    }

    #[test]
    fn test_append_uses_first_row_height() {
        let (mut drawing, table) = drawing_with_table("Balloons");
        let outcome = append_row(&mut drawing, "Balloons", 1, 45.0, ToleranceClass::Medium).unwrap();
        assert_eq!(
            outcome,
            AppendOutcome::Appended {
                table: table.clone(),
                row: 1
            }
        );

        let t = drawing.table(&table).unwrap();
        assert_eq!(t.rows[1].height, 9.0);
        assert_eq!(t.rows[1].cells, vec!["1", "45.0", "45.3", "44.7"]);
    }

    #[test]
    fn test_append_to_empty_table_uses_default_height() {
        let mut drawing = Drawing::new("");
        drawing.add_layer(LayerRecord::new("Balloons")).unwrap();
        let table = drawing
            .append_entity(Table::new(Point3::default(), "Balloons").into())
            .unwrap();

        append_row(&mut drawing, "Balloons", 1, 2.0, ToleranceClass::Medium).unwrap();
        let t = drawing.table(&table).unwrap();
        assert_eq!(t.rows[0].height, DEFAULT_ROW_HEIGHT);
        assert_eq!(t.rows[0].cells, vec!["1", "2.0", "2.1", "1.9"]);
    }

    #[test]
    fn test_no_table_writes_nothing() {
        let (mut drawing, table) = drawing_with_table("Other");
        let outcome = append_row(&mut drawing, "Balloons", 1, 10.0, ToleranceClass::Medium).unwrap();
        assert_eq!(outcome, AppendOutcome::NoTargetTable);
        assert_eq!(drawing.table(&table).unwrap().row_count(), 1);
    }
}
