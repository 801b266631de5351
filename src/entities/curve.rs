//! Line and circle entities
//!
//! The annotation pipeline never acts on these; they exist so drawings can
//! carry ordinary geometry alongside dimensions.

use serde::{Deserialize, Serialize};

use crate::core::entity::{default_layer, DrawingObject};
use crate::core::identity::{Handle, HandlePrefix};
use crate::entities::geometry::Point3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub handle: Handle,
    #[serde(default = "default_layer")]
    pub layer: String,
    pub start: Point3,
    pub end: Point3,
}

impl DrawingObject for Line {
    const PREFIX: HandlePrefix = HandlePrefix::Line;

    fn handle(&self) -> &Handle {
        &self.handle
    }

    fn layer(&self) -> &str {
        &self.layer
    }
}

impl Line {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self {
            handle: Handle::new(HandlePrefix::Line),
            layer: default_layer(),
            start,
            end,
        }
    }

    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let dz = self.end.z - self.start.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub handle: Handle,
    #[serde(default = "default_layer")]
    pub layer: String,
    pub center: Point3,
    pub radius: f64,
}

impl DrawingObject for Circle {
    const PREFIX: HandlePrefix = HandlePrefix::Circ;

    fn handle(&self) -> &Handle {
        &self.handle
    }

    fn layer(&self) -> &str {
        &self.layer
    }
}

impl Circle {
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            handle: Handle::new(HandlePrefix::Circ),
            layer: default_layer(),
            center,
            radius,
        }
    }
}
