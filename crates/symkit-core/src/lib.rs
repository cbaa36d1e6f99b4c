//! # symkit Core
//!
//! Core types and utilities shared by the symkit crates.
//! Provides the geometry value types the editor commands operate on,
//! length units for display, the error taxonomy and the shared-ownership
//! aliases used for single-threaded editor state.

pub mod error;
pub mod geometry;
pub mod layer;
pub mod types;
pub mod units;

pub use error::{Error, LogicError, Result, ValidationError};

pub use geometry::{
    arc_angle, Alignment, Angle, HAlign, Length, Orientation, Path, Point, PositiveLength, Rect,
    UnsignedLength, VAlign, Vertex,
};

pub use layer::Layer;

pub use types::{shared, Shared};

pub use units::LengthUnit;

pub use uuid::Uuid;
