//! Geometry value types
//!
//! Pure value types used by the editor commands: lengths in nanometers,
//! angles in micro-degrees, points, vertex paths, rectangles and text
//! alignment. All transforms (translate, rotate about a point, mirror about
//! an axis through a point, map to grid) return new values or mutate in place
//! without side effects.

mod alignment;
mod angle;
mod length;
mod path;
mod point;
mod rect;

pub use alignment::{Alignment, HAlign, VAlign};
pub use angle::Angle;
pub use length::{Length, PositiveLength, UnsignedLength};
pub use path::{arc_center, Path, Vertex};
pub use point::{arc_angle, Orientation, Point};
pub use rect::Rect;
