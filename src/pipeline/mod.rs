//! Dimension check pipeline
//!
//! Balloons a user selection of dimensions and records them in the report
//! table of the annotation layer. A run moves through
//! `Idle -> SelectionPending -> Processing -> Done`:
//!
//! 1. Ask the [`SelectionSource`] for handles. An empty or cancelled
//!    selection ends the run with [`RunOutcome::NothingSelected`] and leaves
//!    the drawing untouched.
//! 2. Inside one transaction, ensure the annotation layer exists, then for
//!    every selected dimension (in selection order): take the next balloon
//!    number, copy the dimension onto the layer, add its label, and append
//!    a report row if the layer has a report table.
//! 3. Commit. Any drawing error rolls the whole batch back.
//!
//! Selected entities that are not dimensions are skipped and consume no
//! balloon number.

pub mod balloons;
pub mod layers;
pub mod report;

use miette::Diagnostic;
use std::collections::HashSet;
use thiserror::Error;

use crate::core::database::{run_in_transaction, DrawingDatabase, DrawingError, Transactional};
use crate::core::identity::Handle;
use crate::core::selection::SelectionSource;
use crate::core::tolerance::{classify, ToleranceClass};
use crate::entities::Vector3;

pub use balloons::{synthesize, Annotation, BalloonSequencer};
pub use layers::ensure_layer;
pub use report::{append_row, format_value, AppendOutcome, ReportRow};

/// Default name of the annotation layer
pub const DEFAULT_LAYER_NAME: &str = "DimensionsWithBalloons";

/// Prompt shown by interactive selection sources
pub const SELECTION_PROMPT: &str = "Select dimensions:";

/// Settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotateOptions {
    /// Layer receiving copies, labels and the report table
    pub layer_name: String,
    /// Class used for report row bounds
    pub tolerance_class: ToleranceClass,
    /// Label position relative to the dimension text
    pub balloon_offset: Vector3,
    /// Label text height
    pub text_height: f64,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            layer_name: DEFAULT_LAYER_NAME.to_string(),
            tolerance_class: ToleranceClass::Medium,
            balloon_offset: Vector3::new(5.0, 5.0, 0.0),
            text_height: 2.5,
        }
    }
}

/// Everything done for one balloon
#[derive(Debug, Clone, PartialEq)]
pub struct BalloonRecord {
    pub number: u32,
    /// The selected dimension
    pub source: Handle,
    pub annotation: Annotation,
    pub nominal: f64,
    /// Deviation for the run's class, `NaN` when unclassifiable
    pub tolerance: f64,
    pub row: AppendOutcome,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub layer: Handle,
    /// Whether the annotation layer was created by this run
    pub layer_created: bool,
    pub tolerance_class: ToleranceClass,
    pub balloons: Vec<BalloonRecord>,
    /// Selected handles that were not dimensions or did not resolve
    pub skipped: Vec<Handle>,
}

impl RunSummary {
    /// Number of report rows written
    pub fn rows_appended(&self) -> usize {
        self.balloons
            .iter()
            .filter(|b| matches!(b.row, AppendOutcome::Appended { .. }))
            .count()
    }

    /// Whether any balloon found no report table
    pub fn missing_table(&self) -> bool {
        self.balloons
            .iter()
            .any(|b| b.row == AppendOutcome::NoTargetTable)
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Selection was empty or cancelled; nothing changed
    NothingSelected,
    /// All edits were committed
    Completed(RunSummary),
}

/// A run aborted and rolled back
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error("annotation aborted, no changes were kept: {0}")]
    #[diagnostic(code(dimcheck::pipeline::aborted))]
    Drawing(#[from] DrawingError),
}

/// Run the dimension check pipeline against a drawing
pub fn annotate<D, S>(
    db: &mut D,
    source: &mut S,
    options: &AnnotateOptions,
) -> Result<RunOutcome, PipelineError>
where
    D: DrawingDatabase + Transactional,
    S: SelectionSource,
{
    let selection = source.select(&*db, SELECTION_PROMPT);
    let Some(picked) = selection.handles() else {
        return Ok(RunOutcome::NothingSelected);
    };

    // A handle picked twice is ballooned once, at its first position
    let mut seen = HashSet::new();
    let handles: Vec<Handle> = picked
        .iter()
        .filter(|h| seen.insert(*h))
        .cloned()
        .collect();

    let summary = run_in_transaction(db, |db| process(db, &handles, options))?;
    Ok(RunOutcome::Completed(summary))
}

fn process<D: DrawingDatabase + ?Sized>(
    db: &mut D,
    handles: &[Handle],
    options: &AnnotateOptions,
) -> Result<RunSummary, PipelineError> {
    let layer_name = options.layer_name.as_str();
    let (layer, layer_created) = ensure_layer(db, layer_name)?;

    let mut sequencer = BalloonSequencer::new();
    let mut balloons = Vec::new();
    let mut skipped = Vec::new();

    for handle in handles {
        let Some(dimension) = db.entity(handle).and_then(|e| e.as_dimension()).cloned() else {
            skipped.push(handle.clone());
            continue;
        };

        let number = sequencer.next_number();
        let annotation = synthesize(
            db,
            &dimension,
            number,
            layer_name,
            options.balloon_offset,
            options.text_height,
        )?;
        let row = append_row(
            db,
            layer_name,
            number,
            dimension.measurement,
            options.tolerance_class,
        )?;

        balloons.push(BalloonRecord {
            number,
            source: handle.clone(),
            annotation,
            nominal: dimension.measurement,
            tolerance: classify(dimension.measurement, options.tolerance_class),
            row,
        });
    }

    Ok(RunSummary {
        layer,
        layer_created,
        tolerance_class: options.tolerance_class,
        balloons,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::drawing::Drawing;
    use crate::core::selection::{AllDimensions, FixedSelection, Selection};
    use crate::entities::{
        Circle, Dimension, DimensionKind, DrawingEntity, LayerRecord, Line, Point3, Table,
    };

    fn add_dim(drawing: &mut Drawing, measurement: f64) -> Handle {
        drawing
            .append_entity(
                Dimension::new(DimensionKind::Rotated, measurement, Point3::new(measurement, 0.0, 0.0))
                    .into(),
            )
            .unwrap()
    }

    fn add_report_table(drawing: &mut Drawing) -> Handle {
        drawing.add_layer(LayerRecord::new(DEFAULT_LAYER_NAME)).unwrap();
        let mut table = Table::new(Point3::new(200.0, 0.0, 0.0), DEFAULT_LAYER_NAME);
        table.insert_row(
            7.0,
            vec!["No.".into(), "Nominal".into(), "Upper".into(), "Lower".into()],
        );
        drawing.append_entity(table.into()).unwrap()
    }

    fn labels(drawing: &Drawing) -> Vec<String> {
        drawing
            .entities()
            .iter()
            .filter_map(|e| match e {
                DrawingEntity::Mtext(t) if t.layer == DEFAULT_LAYER_NAME => Some(t.contents.clone()),
                _ => None,
            })
            .collect()
    }

    fn completed(outcome: RunOutcome) -> RunSummary {
        match outcome {
            RunOutcome::Completed(summary) => summary,
            RunOutcome::NothingSelected => panic!("expected a completed run"),
        }
    }

    #[test]
    fn test_empty_selection_changes_nothing() {
        let mut drawing = Drawing::new("");
        add_dim(&mut drawing, 10.0);
        let before = drawing.file().clone();

        for selection in [Selection::Nothing, Selection::Cancelled, Selection::Picked(vec![])] {
            let outcome = annotate(
                &mut drawing,
                &mut FixedSelection(selection),
                &AnnotateOptions::default(),
            )
            .unwrap();
            assert_eq!(outcome, RunOutcome::NothingSelected);
        }
        assert_eq!(drawing.file(), &before);
        assert!(drawing.find_layer(DEFAULT_LAYER_NAME).is_none());
    }

    #[test]
    fn test_balloons_follow_selection_order_and_skip_non_dimensions() {
        let mut drawing = Drawing::new("");
        let a = add_dim(&mut drawing, 10.0);
        let line = drawing
            .append_entity(Line::new(Point3::default(), Point3::new(5.0, 0.0, 0.0)).into())
            .unwrap();
        let b = add_dim(&mut drawing, 20.0);
        let circle = drawing
            .append_entity(Circle::new(Point3::default(), 3.0).into())
            .unwrap();
        let c = add_dim(&mut drawing, 30.0);

        // Picked out of drawing order
        let selection = vec![c.clone(), line.clone(), a.clone(), circle.clone(), b.clone()];
        let summary = completed(
            annotate(
                &mut drawing,
                &mut FixedSelection::handles(selection),
                &AnnotateOptions::default(),
            )
            .unwrap(),
        );

        let numbers: Vec<u32> = summary.balloons.iter().map(|b| b.number).collect();
        let sources: Vec<Handle> = summary.balloons.iter().map(|b| b.source.clone()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(sources, vec![c, a, b]);
        assert_eq!(summary.skipped, vec![line, circle]);
        assert_eq!(labels(&drawing), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_repeated_pick_is_ballooned_once() {
        let mut drawing = Drawing::new("");
        let table = add_report_table(&mut drawing);
        let a = add_dim(&mut drawing, 10.0);
        let b = add_dim(&mut drawing, 20.0);

        let selection = vec![a.clone(), b.clone(), a.clone()];
        let summary = completed(
            annotate(
                &mut drawing,
                &mut FixedSelection::handles(selection),
                &AnnotateOptions::default(),
            )
            .unwrap(),
        );

        let sources: Vec<Handle> = summary.balloons.iter().map(|b| b.source.clone()).collect();
        assert_eq!(sources, vec![a, b]);
        assert_eq!(labels(&drawing), vec!["1", "2"]);
        assert_eq!(drawing.table(&table).unwrap().row_count(), 3);
    }

    #[test]
    fn test_no_table_yields_clones_and_labels_only() {
        let mut drawing = Drawing::new("");
        for m in [5.0, 50.0, 500.0] {
            add_dim(&mut drawing, m);
        }

        let summary = completed(
            annotate(&mut drawing, &mut AllDimensions, &AnnotateOptions::default()).unwrap(),
        );

        assert_eq!(summary.balloons.len(), 3);
        assert_eq!(summary.rows_appended(), 0);
        assert!(summary.missing_table());
        // 3 clones + 3 labels on the annotation layer
        assert_eq!(drawing.count_on_layer(DEFAULT_LAYER_NAME), 6);
        assert_eq!(drawing.dimensions().count(), 6);
        assert!(drawing
            .entities()
            .iter()
            .all(|e| e.as_table().is_none()));
    }

    #[test]
    fn test_report_rows_match_balloons() {
        let mut drawing = Drawing::new("");
        let table = add_report_table(&mut drawing);
        let ten = add_dim(&mut drawing, 10.0);
        add_dim(&mut drawing, 4500.0);

        let summary = completed(
            annotate(&mut drawing, &mut AllDimensions, &AnnotateOptions::default()).unwrap(),
        );
        assert!(!summary.layer_created);
        assert_eq!(summary.rows_appended(), 2);
        assert_eq!(summary.balloons[0].source, ten);
        assert!(summary.balloons[1].tolerance.is_nan());

        let t = drawing.table(&table).unwrap();
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.rows[1].cells, vec!["1", "10.0", "10.2", "9.8"]);
        assert_eq!(t.rows[2].cells, vec!["2", "4500.0", "NaN", "NaN"]);
        assert!(t.rows.iter().skip(1).all(|r| r.height == 7.0));
    }

    #[test]
    fn test_configured_class_drives_bounds() {
        let mut drawing = Drawing::new("");
        let table = add_report_table(&mut drawing);
        add_dim(&mut drawing, 10.0);

        let options = AnnotateOptions {
            tolerance_class: ToleranceClass::Coarse,
            ..AnnotateOptions::default()
        };
        annotate(&mut drawing, &mut AllDimensions, &options).unwrap();

        let t = drawing.table(&table).unwrap();
        assert_eq!(t.rows[1].cells, vec!["1", "10.0", "10.5", "9.5"]);
    }

    #[test]
    fn test_second_run_reuses_layer_and_restarts_numbering() {
        let mut drawing = Drawing::new("");
        let a = add_dim(&mut drawing, 12.0);

        let first = completed(
            annotate(
                &mut drawing,
                &mut FixedSelection::handles(vec![a.clone()]),
                &AnnotateOptions::default(),
            )
            .unwrap(),
        );
        let second = completed(
            annotate(
                &mut drawing,
                &mut FixedSelection::handles(vec![a]),
                &AnnotateOptions::default(),
            )
            .unwrap(),
        );

        assert!(first.layer_created);
        assert!(!second.layer_created);
        assert_eq!(first.layer, second.layer);
        let count = drawing
            .layers()
            .iter()
            .filter(|l| l.name == DEFAULT_LAYER_NAME)
            .count();
        assert_eq!(count, 1);
        assert_eq!(second.balloons[0].number, 1);
        assert_eq!(labels(&drawing), vec!["1", "1"]);
    }

    #[test]
    fn test_originals_are_untouched() {
        let mut drawing = Drawing::new("");
        let a = add_dim(&mut drawing, 75.0);
        let original = drawing.entity(&a).unwrap().clone();

        annotate(&mut drawing, &mut AllDimensions, &AnnotateOptions::default()).unwrap();
        assert_eq!(drawing.entity(&a), Some(&original));
    }

    /// Delegates to a Drawing but rejects the Nth entity append
    struct FaultyDrawing {
        inner: Drawing,
        fail_on_append: usize,
        appends: usize,
    }

    impl DrawingDatabase for FaultyDrawing {
        fn find_layer(&self, name: &str) -> Option<Handle> {
            self.inner.find_layer(name)
        }

        fn add_layer(&mut self, layer: LayerRecord) -> Result<Handle, DrawingError> {
            self.inner.add_layer(layer)
        }

        fn handles(&self) -> Vec<Handle> {
            self.inner.handles()
        }

        fn entity(&self, handle: &Handle) -> Option<&DrawingEntity> {
            self.inner.entity(handle)
        }

        fn append_entity(&mut self, entity: DrawingEntity) -> Result<Handle, DrawingError> {
            self.appends += 1;
            if self.appends == self.fail_on_append {
                return Err(DrawingError::Rejected("simulated fault".to_string()));
            }
            self.inner.append_entity(entity)
        }

        fn table_on_layer(&self, layer: &str) -> Option<Handle> {
            self.inner.table_on_layer(layer)
        }

        fn append_table_row(
            &mut self,
            table: &Handle,
            height: f64,
            cells: Vec<String>,
        ) -> Result<usize, DrawingError> {
            self.inner.append_table_row(table, height, cells)
        }
    }

    impl Transactional for FaultyDrawing {
        fn begin(&mut self) -> Result<(), DrawingError> {
            self.inner.begin()
        }

        fn commit(&mut self) -> Result<(), DrawingError> {
            self.inner.commit()
        }

        fn rollback(&mut self) {
            self.inner.rollback()
        }
    }

    #[test]
    fn test_fault_midway_rolls_back_everything() {
        let mut drawing = Drawing::new("");
        for m in [1.0, 2.0, 3.0, 4.0, 5.0] {
            add_dim(&mut drawing, m);
        }
        let before = drawing.file().clone();

        // Two entities per balloon: fail on the clone of the third measurement
        let mut faulty = FaultyDrawing {
            inner: drawing,
            fail_on_append: 5,
            appends: 0,
        };
        let err = annotate(&mut faulty, &mut AllDimensions, &AnnotateOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Drawing(DrawingError::Rejected(_))));

        let drawing = faulty.inner;
        assert_eq!(drawing.file(), &before);
        assert_eq!(drawing.entities().len(), 5);
        assert!(drawing.find_layer(DEFAULT_LAYER_NAME).is_none());
        assert!(!drawing.in_transaction());
    }
}
