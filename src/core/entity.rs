//! DrawingObject trait - common interface for all records in a drawing

use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::{Handle, HandlePrefix};

/// Name of the layer every drawing starts with
pub const DEFAULT_LAYER: &str = "0";

/// Common trait for all drawing records (entities and table records)
pub trait DrawingObject: Serialize + DeserializeOwned {
    /// The handle prefix for this record type (e.g., DIM, TEXT)
    const PREFIX: HandlePrefix;

    /// Get the record's handle
    fn handle(&self) -> &Handle;

    /// Get the name of the layer the record lives on
    fn layer(&self) -> &str;
}

pub(crate) fn default_layer() -> String {
    DEFAULT_LAYER.to_string()
}
