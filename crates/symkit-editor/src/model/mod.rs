//! Document model of the symbol editor.
//!
//! Entities (pins, circles, polygons and texts) are plain values owned by an
//! [`ElementList`](crate::element_list::ElementList) inside a [`Symbol`].
//! Commands and graphics items refer to them by UUID only.

use smallvec::SmallVec;
use std::fmt;
use symkit_core::{Angle, Orientation, Point, PositiveLength, Result};
use uuid::Uuid;

use crate::element_list::ElementList;

/// Change events produced by a single assignment
pub type EventList<E> = SmallVec<[E; 4]>;

/// Copy every differing field from `$src` into `$dst`, collecting one event
/// per changed field.
macro_rules! assign_fields {
    ($dst:ident, $src:ident, $($field:ident => $event:expr),+ $(,)?) => {{
        let mut events = $crate::model::EventList::new();
        $(
            if $dst.$field != $src.$field {
                $dst.$field = $src.$field.clone();
                events.push($event);
            }
        )+
        events
    }};
}
pub(crate) use assign_fields;

mod circle;
mod pin;
mod polygon;
mod symbol;
mod text;

pub use circle::{Circle, CircleEvent};
pub use pin::{validate_pin_name, Pin, PinEvent};
pub use polygon::{Polygon, PolygonEvent};
pub use symbol::{Symbol, SymbolEvents};
pub use text::{Text, TextEvent};

/// An element with stable identity whose property changes are observable
pub trait Entity: Clone + fmt::Debug + PartialEq {
    /// Typed property-change event
    type Event: Copy + fmt::Debug + PartialEq + Eq;

    /// Human readable kind name used in messages and errors
    const KIND: &'static str;

    /// Stable identity
    fn uuid(&self) -> Uuid;

    /// Copy all properties except the UUID from `other`
    ///
    /// Returns one event per property that actually changed, so assigning
    /// an equal value is silent.
    fn assign(&mut self, other: &Self) -> EventList<Self::Event>;
}

/// Geometric transforms shared by all symbol elements
pub trait Transform {
    /// Reference position used for drag centers and hit priorities
    fn position(&self) -> Point;

    /// Move by `offset`
    fn translate(&mut self, offset: Point);

    /// Rotate counter-clockwise around `center`
    fn rotate(&mut self, angle: Angle, center: Point);

    /// Mirror about the axis through `center`
    fn mirror(&mut self, orientation: Orientation, center: Point);

    /// Snap the element's positions to `grid`
    fn snap_to_grid(&mut self, grid: PositiveLength);

    /// Whether all positions of the element are on `grid`
    fn is_on_grid(&self, grid: PositiveLength) -> bool;
}

/// A document owning an ordered list of `T`
///
/// Implemented once per element kind so that list commands can stay generic.
pub trait HasElementList<T: Entity> {
    /// The list of `T`
    fn element_list(&self) -> &ElementList<T>;

    /// Mutable access to the list of `T`
    fn element_list_mut(&mut self) -> &mut ElementList<T>;

    /// Check whether `element` may be inserted into (or replace its previous
    /// version in) the list. The default accepts everything.
    fn validate_element(&self, _element: &T) -> Result<()> {
        Ok(())
    }
}
