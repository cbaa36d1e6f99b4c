//! Circles.

use super::{assign_fields, Entity, EventList, Transform};
use serde::{Deserialize, Serialize};
use symkit_core::{Angle, Layer, Orientation, Point, PositiveLength, UnsignedLength};
use uuid::Uuid;

/// Property of a [`Circle`] that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircleEvent {
    LayerChanged,
    LineWidthChanged,
    IsFilledChanged,
    IsGrabAreaChanged,
    CenterChanged,
    DiameterChanged,
}

/// A circle outline or disc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    uuid: Uuid,
    layer: Layer,
    line_width: UnsignedLength,
    filled: bool,
    grab_area: bool,
    center: Point,
    diameter: PositiveLength,
}

impl Circle {
    pub fn new(
        uuid: Uuid,
        layer: Layer,
        line_width: UnsignedLength,
        filled: bool,
        grab_area: bool,
        center: Point,
        diameter: PositiveLength,
    ) -> Self {
        Self {
            uuid,
            layer,
            line_width,
            filled,
            grab_area,
            center,
            diameter,
        }
    }

    /// Copy of this circle with another UUID
    pub fn with_uuid(&self, uuid: Uuid) -> Self {
        Self {
            uuid,
            ..self.clone()
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn line_width(&self) -> UnsignedLength {
        self.line_width
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn is_grab_area(&self) -> bool {
        self.grab_area
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn diameter(&self) -> PositiveLength {
        self.diameter
    }

    pub fn set_layer(&mut self, layer: Layer) -> bool {
        std::mem::replace(&mut self.layer, layer) != layer
    }

    pub fn set_line_width(&mut self, width: UnsignedLength) -> bool {
        std::mem::replace(&mut self.line_width, width) != width
    }

    pub fn set_filled(&mut self, filled: bool) -> bool {
        std::mem::replace(&mut self.filled, filled) != filled
    }

    pub fn set_grab_area(&mut self, grab_area: bool) -> bool {
        std::mem::replace(&mut self.grab_area, grab_area) != grab_area
    }

    pub fn set_center(&mut self, center: Point) -> bool {
        std::mem::replace(&mut self.center, center) != center
    }

    pub fn set_diameter(&mut self, diameter: PositiveLength) -> bool {
        std::mem::replace(&mut self.diameter, diameter) != diameter
    }
}

impl Entity for Circle {
    type Event = CircleEvent;
    const KIND: &'static str = "circle";

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn assign(&mut self, other: &Self) -> EventList<CircleEvent> {
        assign_fields!(self, other,
            layer => CircleEvent::LayerChanged,
            line_width => CircleEvent::LineWidthChanged,
            filled => CircleEvent::IsFilledChanged,
            grab_area => CircleEvent::IsGrabAreaChanged,
            center => CircleEvent::CenterChanged,
            diameter => CircleEvent::DiameterChanged,
        )
    }
}

impl Transform for Circle {
    fn position(&self) -> Point {
        self.center
    }

    fn translate(&mut self, offset: Point) {
        self.center += offset;
    }

    fn rotate(&mut self, angle: Angle, center: Point) {
        self.center = self.center.rotated(angle, center);
    }

    fn mirror(&mut self, orientation: Orientation, center: Point) {
        self.center = self.center.mirrored(orientation, center);
    }

    fn snap_to_grid(&mut self, grid: PositiveLength) {
        self.center = self.center.mapped_to_grid(grid);
    }

    fn is_on_grid(&self, grid: PositiveLength) -> bool {
        self.center.is_on_grid(grid)
    }
}
