//! Axis-aligned rectangles.

use super::{Length, Point};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, normalized so that `min <= max`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Lower-left corner
    pub min: Point,
    /// Upper-right corner
    pub max: Point,
}

impl Rect {
    /// Build the rectangle spanned by two arbitrary corners
    pub fn from_points(p1: Point, p2: Point) -> Self {
        Self {
            min: p1.min(&p2),
            max: p1.max(&p2),
        }
    }

    /// Smallest rectangle containing all `points`, `None` if empty
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_points(first, first), |rect, p| Self {
            min: rect.min.min(&p),
            max: rect.max.max(&p),
        }))
    }

    /// Width
    pub fn width(&self) -> Length {
        self.max.x - self.min.x
    }

    /// Height
    pub fn height(&self) -> Length {
        self.max.y - self.min.y
    }

    /// Center point
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2,
            (self.min.y + self.max.y) / 2,
        )
    }

    /// Whether `p` lies inside or on the border
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Whether two rectangles overlap or touch
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Grow by `margin` in every direction
    pub fn expanded(&self, margin: Length) -> Self {
        let m = Point::new(margin, margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Smallest rectangle containing both
    pub fn united(&self, other: &Rect) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// The four corners, counter-clockwise from `min`
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }
}
