//! dimcheck: dimension check tables for engineering drawings
//!
//! Copies selected dimensions onto an annotation layer, numbers them with
//! balloons, and records each one's general tolerance limits in a report
//! table. Drawings are plain-text YAML files.

pub mod cli;
pub mod core;
pub mod entities;
pub mod pipeline;
pub mod yaml;
