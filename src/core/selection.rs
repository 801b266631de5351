//! Entity selection collaborators
//!
//! A [`SelectionSource`] stands in for the host's interactive picking: it
//! yields an ordered list of handles, or reports that the user picked
//! nothing or cancelled. Sources never fail; a failed prompt is reported as
//! [`Selection::Cancelled`].

use crate::core::database::DrawingDatabase;
use crate::core::identity::Handle;

/// Result of asking the user to pick entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Handles in the order they were picked
    Picked(Vec<Handle>),
    /// The prompt completed without a pick
    Nothing,
    /// The user aborted the prompt
    Cancelled,
}

impl Selection {
    /// Normalize an empty pick list to [`Selection::Nothing`]
    pub fn from_handles(handles: Vec<Handle>) -> Self {
        if handles.is_empty() {
            Selection::Nothing
        } else {
            Selection::Picked(handles)
        }
    }

    /// The picked handles, if there are any
    pub fn handles(&self) -> Option<&[Handle]> {
        match self {
            Selection::Picked(handles) if !handles.is_empty() => Some(handles),
            _ => None,
        }
    }
}

/// Something that can ask for an ordered set of entities
pub trait SelectionSource {
    fn select<D: DrawingDatabase + ?Sized>(&mut self, db: &D, prompt: &str) -> Selection;
}

/// A selection fixed up front, e.g. handles given on the command line
#[derive(Debug, Clone)]
pub struct FixedSelection(pub Selection);

impl FixedSelection {
    pub fn handles(handles: Vec<Handle>) -> Self {
        Self(Selection::from_handles(handles))
    }
}

impl SelectionSource for FixedSelection {
    fn select<D: DrawingDatabase + ?Sized>(&mut self, _db: &D, _prompt: &str) -> Selection {
        self.0.clone()
    }
}

/// Selects every dimension in model space, in drawing order
#[derive(Debug, Clone, Copy, Default)]
pub struct AllDimensions;

impl SelectionSource for AllDimensions {
    fn select<D: DrawingDatabase + ?Sized>(&mut self, db: &D, _prompt: &str) -> Selection {
        let handles = db
            .handles()
            .into_iter()
            .filter(|h| db.entity(h).and_then(|e| e.as_dimension()).is_some())
            .collect();
        Selection::from_handles(handles)
    }
}
