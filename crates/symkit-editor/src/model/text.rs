//! Text labels.

use super::{assign_fields, Entity, EventList, Transform};
use serde::{Deserialize, Serialize};
use symkit_core::{Alignment, Angle, Layer, Orientation, Point, PositiveLength};
use uuid::Uuid;

/// Property of a [`Text`] that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEvent {
    LayerChanged,
    TextChanged,
    PositionChanged,
    RotationChanged,
    HeightChanged,
    AlignChanged,
}

/// A text label; `{{NAME}}` and `{{VALUE}}` are substituted by the component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    uuid: Uuid,
    layer: Layer,
    text: String,
    position: Point,
    rotation: Angle,
    height: PositiveLength,
    align: Alignment,
}

impl Text {
    pub fn new(
        uuid: Uuid,
        layer: Layer,
        text: impl Into<String>,
        position: Point,
        rotation: Angle,
        height: PositiveLength,
        align: Alignment,
    ) -> Self {
        Self {
            uuid,
            layer,
            text: text.into(),
            position,
            rotation,
            height,
            align,
        }
    }

    /// Copy of this text with another UUID
    pub fn with_uuid(&self, uuid: Uuid) -> Self {
        Self {
            uuid,
            ..self.clone()
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    pub fn height(&self) -> PositiveLength {
        self.height
    }

    pub fn align(&self) -> Alignment {
        self.align
    }

    pub fn set_layer(&mut self, layer: Layer) -> bool {
        std::mem::replace(&mut self.layer, layer) != layer
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        true
    }

    pub fn set_position(&mut self, position: Point) -> bool {
        std::mem::replace(&mut self.position, position) != position
    }

    pub fn set_rotation(&mut self, rotation: Angle) -> bool {
        std::mem::replace(&mut self.rotation, rotation) != rotation
    }

    pub fn set_height(&mut self, height: PositiveLength) -> bool {
        std::mem::replace(&mut self.height, height) != height
    }

    pub fn set_align(&mut self, align: Alignment) -> bool {
        std::mem::replace(&mut self.align, align) != align
    }
}

impl Entity for Text {
    type Event = TextEvent;
    const KIND: &'static str = "text";

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn assign(&mut self, other: &Self) -> EventList<TextEvent> {
        assign_fields!(self, other,
            layer => TextEvent::LayerChanged,
            text => TextEvent::TextChanged,
            position => TextEvent::PositionChanged,
            rotation => TextEvent::RotationChanged,
            height => TextEvent::HeightChanged,
            align => TextEvent::AlignChanged,
        )
    }
}

impl Transform for Text {
    fn position(&self) -> Point {
        self.position
    }

    fn translate(&mut self, offset: Point) {
        self.position += offset;
    }

    fn rotate(&mut self, angle: Angle, center: Point) {
        self.position = self.position.rotated(angle, center);
        self.rotation += angle;
    }

    fn mirror(&mut self, orientation: Orientation, center: Point) {
        self.position = self.position.mirrored(orientation, center);
        self.rotation = -self.rotation;
        self.align = self.align.mirrored(orientation);
    }

    fn snap_to_grid(&mut self, grid: PositiveLength) {
        self.position = self.position.mapped_to_grid(grid);
    }

    fn is_on_grid(&self, grid: PositiveLength) -> bool {
        self.position.is_on_grid(grid)
    }
}
