//! Geometric primitives for diagram shapes.
//!
//! The legacy file format stores whole-pixel coordinates, so both types use
//! `i32` throughout.
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use skein_core::geometry::Point;
/// let p = Point::new(10, 20);
/// assert_eq!(p.x(), 10);
/// assert_eq!(p.y(), 20);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a diagram shape in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    /// Creates a new size with the specified dimensions
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> i32 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> i32 {
        self.height
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_accessors() {
        let p = Point::new(-3, 7);
        assert_eq!(p.x(), -3);
        assert_eq!(p.y(), 7);
    }

    #[test]
    fn size_display() {
        assert_eq!(Size::new(100, 60).to_string(), "100x60");
    }
}
