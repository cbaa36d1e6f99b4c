//! Polygons and polylines.

use super::{assign_fields, Entity, EventList, Transform};
use serde::{Deserialize, Serialize};
use symkit_core::{Angle, Layer, Orientation, Path, Point, PositiveLength, UnsignedLength};
use uuid::Uuid;

/// Property of a [`Polygon`] that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonEvent {
    LayerChanged,
    LineWidthChanged,
    IsFilledChanged,
    IsGrabAreaChanged,
    PathChanged,
}

/// A polyline or closed polygon, optionally with arc segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    uuid: Uuid,
    layer: Layer,
    line_width: UnsignedLength,
    filled: bool,
    grab_area: bool,
    path: Path,
}

impl Polygon {
    pub fn new(
        uuid: Uuid,
        layer: Layer,
        line_width: UnsignedLength,
        filled: bool,
        grab_area: bool,
        path: Path,
    ) -> Self {
        Self {
            uuid,
            layer,
            line_width,
            filled,
            grab_area,
            path,
        }
    }

    /// Copy of this polygon with another UUID
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

    pub fn path(&self) -> &Path {
        &self.path
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

    pub fn set_path(&mut self, path: Path) -> bool {
        if self.path == path {
            return false;
        }
        self.path = path;
        true
    }
}

impl Entity for Polygon {
    type Event = PolygonEvent;
    const KIND: &'static str = "polygon";

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn assign(&mut self, other: &Self) -> EventList<PolygonEvent> {
        assign_fields!(self, other,
            layer => PolygonEvent::LayerChanged,
            line_width => PolygonEvent::LineWidthChanged,
            filled => PolygonEvent::IsFilledChanged,
            grab_area => PolygonEvent::IsGrabAreaChanged,
            path => PolygonEvent::PathChanged,
        )
    }
}

impl Transform for Polygon {
    fn position(&self) -> Point {
        self.path
            .vertices()
            .first()
            .map(|v| v.pos)
            .unwrap_or(Point::ORIGIN)
    }

    fn translate(&mut self, offset: Point) {
        self.path.translate(offset);
    }

    fn rotate(&mut self, angle: Angle, center: Point) {
        self.path.rotate(angle, center);
    }

    fn mirror(&mut self, orientation: Orientation, center: Point) {
        self.path.mirror(orientation, center);
    }

    fn snap_to_grid(&mut self, grid: PositiveLength) {
        self.path.map_to_grid(grid);
    }

    fn is_on_grid(&self, grid: PositiveLength) -> bool {
        self.path.is_on_grid(grid)
    }
}
