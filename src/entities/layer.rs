//! Layer table record

use serde::{Deserialize, Serialize};

use crate::core::entity::DrawingObject;
use crate::core::identity::{Handle, HandlePrefix};

/// A named layer in the drawing's layer table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    /// Unique handle (LYR-...)
    pub handle: Handle,

    /// Layer name, unique within a drawing
    pub name: String,

    /// Color index (7 = white/black)
    #[serde(default = "default_color")]
    pub color: u8,

    /// Whether entities on this layer are plotted
    #[serde(default = "default_plot")]
    pub plot: bool,
}

fn default_color() -> u8 {
    7
}

fn default_plot() -> bool {
    true
}

impl DrawingObject for LayerRecord {
    const PREFIX: HandlePrefix = HandlePrefix::Lyr;

    fn handle(&self) -> &Handle {
        &self.handle
    }

    // A layer record lives in the layer table, which is named after itself
    fn layer(&self) -> &str {
        &self.name
    }
}

impl LayerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: Handle::new(HandlePrefix::Lyr),
            name: name.into(),
            color: default_color(),
            plot: default_plot(),
        }
    }
}
