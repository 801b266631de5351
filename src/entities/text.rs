//! MText entity - Multiline text, used for balloon labels

use serde::{Deserialize, Serialize};

use crate::core::entity::{default_layer, DrawingObject};
use crate::core::identity::{Handle, HandlePrefix};
use crate::entities::geometry::Point3;

/// Multiline text entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MText {
    /// Unique handle (TEXT-...)
    pub handle: Handle,

    /// Layer name
    #[serde(default = "default_layer")]
    pub layer: String,

    /// Text contents
    pub contents: String,

    /// Insertion point
    pub location: Point3,

    /// Character height in drawing units
    #[serde(default = "default_text_height")]
    pub text_height: f64,
}

fn default_text_height() -> f64 {
    2.5
}

impl DrawingObject for MText {
    const PREFIX: HandlePrefix = HandlePrefix::Text;

    fn handle(&self) -> &Handle {
        &self.handle
    }

    fn layer(&self) -> &str {
        &self.layer
    }
}

impl MText {
    pub fn new(contents: impl Into<String>, location: Point3, text_height: f64, layer: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(HandlePrefix::Text),
            layer: layer.into(),
            contents: contents.into(),
            location,
            text_height,
        }
    }
}
