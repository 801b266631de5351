//! Plain 3D points and offsets used by drawing entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A position in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A displacement between two points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Vector3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_plus_vector() {
        let p = Point3::new(10.0, 20.0, 0.0) + Vector3::new(5.0, 5.0, 0.0);
        assert_eq!(p, Point3::new(15.0, 25.0, 0.0));
    }

    #[test]
    fn test_z_defaults_to_zero() {
        let p: Point3 = serde_yml::from_str("{x: 1.5, y: 2}").unwrap();
        assert_eq!(p, Point3::new(1.5, 2.0, 0.0));
    }
}
