//! CLI command implementations

pub mod annotate;
pub mod classify;
pub mod completions;
pub mod entities;
pub mod layers;
pub mod report;
