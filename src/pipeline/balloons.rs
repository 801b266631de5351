//! Balloon numbering and annotation synthesis

use crate::core::database::{DrawingDatabase, DrawingError};
use crate::core::identity::Handle;
use crate::entities::{Dimension, MText, Vector3};

/// Hands out balloon numbers 1, 2, 3, ... for one run
///
/// Numbering always restarts at 1; balloons left by an earlier run on the
/// same drawing are not taken into account.
#[derive(Debug, Clone)]
pub struct BalloonSequencer {
    next: u32,
}

impl Default for BalloonSequencer {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl BalloonSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next number
    pub fn next_number(&mut self) -> u32 {
        let number = self.next;
        self.next += 1;
        number
    }
}

/// Handles of the entities created for one balloon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Copy of the source dimension on the annotation layer
    pub clone: Handle,
    /// Numbered label next to the copy
    pub label: Handle,
}

/// Copy `source` onto `layer` and place a numbered label beside the copy
pub fn synthesize<D: DrawingDatabase + ?Sized>(
    db: &mut D,
    source: &Dimension,
    number: u32,
    layer: &str,
    offset: Vector3,
    text_height: f64,
) -> Result<Annotation, DrawingError> {
    let copy = source.clone_onto(layer);
    let location = copy.text_position + offset;
    let clone = db.append_entity(copy.into())?;

    let balloon = MText::new(number.to_string(), location, text_height, layer);
    let label = db.append_entity(balloon.into())?;

    Ok(Annotation { clone, label })
}
