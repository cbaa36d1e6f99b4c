//! View-side mirror of a symbol.
//!
//! [`SymbolGraphicsItem`] keeps one graphics item per document element and
//! applies the change events of the element lists to them. Rendering itself
//! lives outside of this crate; the items carry the derived geometry needed
//! for hit testing and selection.

mod items;
mod scene;
mod shape;

pub use items::{
    text_quad, CircleGraphicsItem, PinGraphicsItem, PolygonGraphicsItem, TextGraphicsItem,
};
pub use scene::{ItemKind, ItemRef, SymbolGraphicsItem};
pub use shape::{distance_to_segment, GrabArea};
