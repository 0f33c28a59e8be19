//! Spatial and screen-space types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// A screen rectangle in normalized coordinates.
///
/// The origin is the bottom-left corner of the window and every component
/// lies in `[0, 1]`, so `(0, 0.5, 1, 0.5)` is the top half of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    /// The whole screen
    pub const FULL: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for ViewRect {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for ViewRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_ops() {
        let offset = Vec3::new(1000.0, 0.0, 0.0) * 2.0;
        assert_eq!(offset, Vec3::new(2000.0, 0.0, 0.0));
        assert_eq!(offset + Vec3::new(0.0, 1.0, 0.0), Vec3::new(2000.0, 1.0, 0.0));
        assert_eq!(Vec3::from_array([30.0, 600.0, 30.0]), Vec3::new(30.0, 600.0, 30.0));
    }

    #[test]
    fn test_view_rect_display() {
        assert_eq!(ViewRect::new(0.0, 0.5, 0.5, 0.5).to_string(), "(0, 0.5, 0.5, 0.5)");
        assert_eq!(ViewRect::default(), ViewRect::FULL);
    }
}
