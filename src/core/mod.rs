//! Core module - fundamental types and utilities

pub mod config;
pub mod database;
pub mod drawing;
pub mod entity;
pub mod identity;
pub mod loader;
pub mod selection;
pub mod tolerance;

pub use config::Config;
pub use database::{run_in_transaction, DrawingDatabase, DrawingError, Transactional};
pub use drawing::{Drawing, DrawingFile, DrawingHeader};
pub use entity::DrawingObject;
pub use identity::{Handle, HandleParseError, HandlePrefix};
pub use selection::{AllDimensions, FixedSelection, Selection, SelectionSource};
pub use tolerance::{classify, ToleranceBand, ToleranceClass};
