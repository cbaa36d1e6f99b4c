//! Per-element graphics items.
//!
//! Each item mirrors one entity: it derives its grab area and display data
//! from the entity on creation and re-derives only the affected part on
//! every change event. After any sequence of events an item equals a fresh
//! rebuild from the same entity (apart from its selection flag).

use super::GrabArea;
use crate::model::{Circle, CircleEvent, Entity, Pin, PinEvent, Polygon, PolygonEvent, Text, TextEvent};
use symkit_core::{Alignment, Angle, HAlign, Length, Path, Point, PositiveLength, VAlign};
use uuid::Uuid;

/// Half width of the pin line grab area
const PIN_HALF_WIDTH: f64 = 158_750.0 / 2.0;

/// Minimum half width of thin outlines, keeps zero-width lines grabbable
const MIN_HALF_WIDTH: f64 = 50_000.0;

/// Estimated glyph width relative to the text height
const GLYPH_WIDTH_FACTOR: f64 = 0.6;

/// Z value of pins, above all layers
const PIN_Z_VALUE: i32 = 10;

/// Bounds of a text label as rotated quad
pub fn text_quad(
    text: &str,
    position: Point,
    rotation: Angle,
    height: PositiveLength,
    align: Alignment,
) -> [Point; 4] {
    let h = height.get().to_nm() as f64;
    let chars = text.chars().count().max(1) as f64;
    let w = h * GLYPH_WIDTH_FACTOR * chars;
    let x0 = match align.h {
        HAlign::Left => 0.0,
        HAlign::Center => -w / 2.0,
        HAlign::Right => -w,
    };
    let y0 = match align.v {
        VAlign::Bottom => 0.0,
        VAlign::Center => -h / 2.0,
        VAlign::Top => -h,
    };
    let corner = |dx: f64, dy: f64| {
        let local = position + Point::from_nm(dx.round() as i64, dy.round() as i64);
        local.rotated(rotation, position)
    };
    [
        corner(x0, y0),
        corner(x0 + w, y0),
        corner(x0 + w, y0 + h),
        corner(x0, y0 + h),
    ]
}

fn half_width(width: Length) -> f64 {
    (width.to_nm() as f64 / 2.0).max(MIN_HALF_WIDTH)
}

/// Graphics item of a pin
#[derive(Debug, Clone, PartialEq)]
pub struct PinGraphicsItem {
    uuid: Uuid,
    grab_area: GrabArea,
    name: String,
    name_area: [Point; 4],
    selected: bool,
}

impl PinGraphicsItem {
    pub fn new(pin: &Pin) -> Self {
        Self {
            uuid: pin.uuid(),
            grab_area: Self::line_area(pin),
            name: pin.name().to_string(),
            name_area: Self::label_area(pin),
            selected: false,
        }
    }

    pub fn on_edited(&mut self, pin: &Pin, event: PinEvent) {
        match event {
            PinEvent::PositionChanged | PinEvent::RotationChanged => {
                self.grab_area = Self::line_area(pin);
                self.name_area = Self::label_area(pin);
            }
            PinEvent::LengthChanged => {
                self.grab_area = Self::line_area(pin);
            }
            PinEvent::NameChanged => {
                self.name = pin.name().to_string();
                self.name_area = Self::label_area(pin);
            }
            PinEvent::NamePositionChanged
            | PinEvent::NameHeightChanged
            | PinEvent::NameRotationChanged
            | PinEvent::NameAlignmentChanged => {
                self.name_area = Self::label_area(pin);
            }
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn grab_area(&self) -> &GrabArea {
        &self.grab_area
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bounds of the name label in document coordinates
    pub fn name_area(&self) -> &[Point; 4] {
        &self.name_area
    }

    pub fn z_value(&self) -> i32 {
        PIN_Z_VALUE
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn line_area(pin: &Pin) -> GrabArea {
        GrabArea::Polyline {
            points: vec![pin.position(), pin.end_point()],
            half_width: PIN_HALF_WIDTH,
            filled: false,
        }
    }

    // The label offset is relative to the pin and rotates with it
    fn label_area(pin: &Pin) -> [Point; 4] {
        let anchor = (pin.position() + pin.name_position()).rotated(pin.rotation(), pin.position());
        text_quad(
            pin.name(),
            anchor,
            pin.rotation() + pin.name_rotation(),
            pin.name_height(),
            pin.name_alignment(),
        )
    }
}

/// Graphics item of a circle
#[derive(Debug, Clone, PartialEq)]
pub struct CircleGraphicsItem {
    uuid: Uuid,
    grab_area: GrabArea,
    z_value: i32,
    selected: bool,
}

impl CircleGraphicsItem {
    pub fn new(circle: &Circle) -> Self {
        Self {
            uuid: circle.uuid(),
            grab_area: Self::area(circle),
            z_value: circle.layer().z_value(),
            selected: false,
        }
    }

    pub fn on_edited(&mut self, circle: &Circle, event: CircleEvent) {
        match event {
            CircleEvent::LayerChanged => self.z_value = circle.layer().z_value(),
            CircleEvent::LineWidthChanged
            | CircleEvent::IsFilledChanged
            | CircleEvent::IsGrabAreaChanged
            | CircleEvent::CenterChanged
            | CircleEvent::DiameterChanged => self.grab_area = Self::area(circle),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn grab_area(&self) -> &GrabArea {
        &self.grab_area
    }

    pub fn z_value(&self) -> i32 {
        self.z_value
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn area(circle: &Circle) -> GrabArea {
        let radius = circle.diameter().get().to_nm() as f64 / 2.0;
        let hw = half_width(circle.line_width().get());
        let inner = if circle.is_filled() || circle.is_grab_area() {
            0.0
        } else {
            (radius - hw).max(0.0)
        };
        GrabArea::Circle {
            center: circle.center(),
            outer_radius: radius + hw,
            inner_radius: inner,
        }
    }
}

/// Graphics item of a polygon, with editable vertex handles
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonGraphicsItem {
    uuid: Uuid,
    path: Path,
    grab_area: GrabArea,
    z_value: i32,
    selected: bool,
}

impl PolygonGraphicsItem {
    pub fn new(polygon: &Polygon) -> Self {
        Self {
            uuid: polygon.uuid(),
            path: polygon.path().clone(),
            grab_area: Self::area(polygon),
            z_value: polygon.layer().z_value(),
            selected: false,
        }
    }

    pub fn on_edited(&mut self, polygon: &Polygon, event: PolygonEvent) {
        match event {
            PolygonEvent::LayerChanged => self.z_value = polygon.layer().z_value(),
            PolygonEvent::PathChanged => {
                self.path = polygon.path().clone();
                self.grab_area = Self::area(polygon);
            }
            PolygonEvent::LineWidthChanged
            | PolygonEvent::IsFilledChanged
            | PolygonEvent::IsGrabAreaChanged => self.grab_area = Self::area(polygon),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn grab_area(&self) -> &GrabArea {
        &self.grab_area
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn z_value(&self) -> i32 {
        self.z_value
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Indices of all vertices within `tolerance` of `pos`
    ///
    /// Coincident vertices (e.g. start and end of a closed path) are all
    /// returned so that they can be dragged together.
    pub fn vertex_indices_at(&self, pos: Point, tolerance: Length) -> Vec<usize> {
        let tol = tolerance.to_nm() as f64;
        self.path
            .vertices()
            .iter()
            .enumerate()
            .filter(|(_, v)| v.pos.distance_squared(&pos).sqrt() <= tol)
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of the segment within `tolerance` of `pos`, if any
    ///
    /// Segment `i` runs from vertex `i` to vertex `i + 1`.
    pub fn line_index_at(&self, pos: Point, tolerance: Length) -> Option<usize> {
        let tol = tolerance.to_nm() as f64;
        let vertices = self.path.vertices();
        (0..vertices.len().saturating_sub(1))
            .map(|i| {
                let d = super::distance_to_segment(pos, vertices[i].pos, vertices[i + 1].pos);
                (i, d)
            })
            .filter(|(_, d)| *d <= tol)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    fn area(polygon: &Polygon) -> GrabArea {
        let path = polygon.path();
        GrabArea::Polyline {
            points: path.flattened(),
            half_width: half_width(polygon.line_width().get()),
            filled: (polygon.is_filled() || polygon.is_grab_area()) && path.is_closed(),
        }
    }
}

/// Graphics item of a text
#[derive(Debug, Clone, PartialEq)]
pub struct TextGraphicsItem {
    uuid: Uuid,
    text: String,
    grab_area: GrabArea,
    z_value: i32,
    selected: bool,
}

impl TextGraphicsItem {
    pub fn new(text: &Text) -> Self {
        Self {
            uuid: text.uuid(),
            text: text.text().to_string(),
            grab_area: Self::area(text),
            z_value: text.layer().z_value(),
            selected: false,
        }
    }

    pub fn on_edited(&mut self, text: &Text, event: TextEvent) {
        match event {
            TextEvent::LayerChanged => self.z_value = text.layer().z_value(),
            TextEvent::TextChanged => {
                self.text = text.text().to_string();
                self.grab_area = Self::area(text);
            }
            TextEvent::PositionChanged
            | TextEvent::RotationChanged
            | TextEvent::HeightChanged
            | TextEvent::AlignChanged => self.grab_area = Self::area(text),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn grab_area(&self) -> &GrabArea {
        &self.grab_area
    }

    /// Displayed text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn z_value(&self) -> i32 {
        self.z_value
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn area(text: &Text) -> GrabArea {
        GrabArea::Quad {
            corners: text_quad(
                text.text(),
                text.position(),
                text.rotation(),
                text.height(),
                text.align(),
            ),
        }
    }
}
