//! 2D points and mirror orientation.

use super::{Angle, Length, PositiveLength};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Mirror axis selection
///
/// `Horizontal` flips the X coordinate (mirror about a vertical line),
/// `Vertical` flips the Y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Mirror left/right
    Horizontal,
    /// Mirror top/bottom
    Vertical,
}

/// A point in document coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: Length,
    /// Y coordinate
    pub y: Length,
}

impl Point {
    /// The origin
    pub const ORIGIN: Point = Point {
        x: Length::ZERO,
        y: Length::ZERO,
    };

    /// Create a point from two lengths
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Create a point from nanometer coordinates
    pub const fn from_nm(x: i64, y: i64) -> Self {
        Self::new(Length::new(x), Length::new(y))
    }

    /// Create a point from millimeter coordinates
    pub fn from_mm(x: f64, y: f64) -> Self {
        Self::new(Length::from_mm(x), Length::from_mm(y))
    }

    /// Whether both coordinates are zero
    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }

    /// Euclidean distance from the origin
    pub fn length(&self) -> Length {
        let x = self.x.to_nm() as f64;
        let y = self.y.to_nm() as f64;
        Length::new(x.hypot(y).round() as i64)
    }

    /// Squared distance to `other` in nm², as float
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x).to_nm() as f64;
        let dy = (self.y - other.y).to_nm() as f64;
        dx * dx + dy * dy
    }

    /// Snap both coordinates to `grid`
    pub fn mapped_to_grid(&self, grid: PositiveLength) -> Point {
        Point::new(self.x.mapped_to_grid(grid), self.y.mapped_to_grid(grid))
    }

    /// Whether both coordinates are multiples of `grid`
    pub fn is_on_grid(&self, grid: PositiveLength) -> bool {
        self.x.is_on_grid(grid) && self.y.is_on_grid(grid)
    }

    /// Rotate counter-clockwise by `angle` around `center`
    ///
    /// Multiples of 90° are computed exactly in integer space.
    pub fn rotated(&self, angle: Angle, center: Point) -> Point {
        let d = *self - center;
        let angle = angle.mapped_to_0_360deg();
        let rotated = if angle == Angle::DEG_0 {
            d
        } else if angle == Angle::DEG_90 {
            Point::new(-d.y, d.x)
        } else if angle == Angle::DEG_180 {
            Point::new(-d.x, -d.y)
        } else if angle == Angle::DEG_270 {
            Point::new(d.y, -d.x)
        } else {
            let (sin, cos) = angle.to_rad().sin_cos();
            let x = d.x.to_nm() as f64;
            let y = d.y.to_nm() as f64;
            Point::from_nm(
                (x * cos - y * sin).round() as i64,
                (x * sin + y * cos).round() as i64,
            )
        };
        rotated + center
    }

    /// Mirror about the axis through `center`
    pub fn mirrored(&self, orientation: Orientation, center: Point) -> Point {
        match orientation {
            Orientation::Horizontal => Point::new(center.x * 2 - self.x, self.y),
            Orientation::Vertical => Point::new(self.x, center.y * 2 - self.y),
        }
    }

    /// Component-wise minimum
    pub fn min(&self, other: &Point) -> Point {
        Point::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum
    pub fn max(&self, other: &Point) -> Point {
        Point::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Coordinates in nanometers as floats, for geometric queries
    pub fn to_f64(&self) -> (f64, f64) {
        (self.x.to_nm() as f64, self.y.to_nm() as f64)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x.to_mm(), self.y.to_mm())
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        *self = *self + rhs;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        *self = *self - rhs;
    }
}

/// Angle of the arc from `p1` to `p2` around `center`, counter-clockwise
/// positive, in `[0°, 360°[`
pub fn arc_angle(p1: Point, p2: Point, center: Point) -> Angle {
    let (x1, y1) = (p1 - center).to_f64();
    let (x2, y2) = (p2 - center).to_f64();
    let angle = y2.atan2(x2) - y1.atan2(x1);
    Angle::from_rad(angle).mapped_to_0_360deg()
}
