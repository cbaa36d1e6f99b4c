//! Symbol pins.

use super::{assign_fields, Entity, EventList, Transform};
use serde::{Deserialize, Serialize};
use symkit_core::{
    Alignment, Angle, HAlign, Length, Orientation, Point, PositiveLength, UnsignedLength, VAlign,
    ValidationError,
};
use uuid::Uuid;

/// Maximum length of a pin name
const MAX_PIN_NAME_LEN: usize = 32;

/// Characters allowed in pin names besides ASCII alphanumerics
const PIN_NAME_EXTRA_CHARS: &str = "-_+/!?@#$";

/// Property of a [`Pin`] that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinEvent {
    NameChanged,
    PositionChanged,
    RotationChanged,
    LengthChanged,
    NamePositionChanged,
    NameHeightChanged,
    NameRotationChanged,
    NameAlignmentChanged,
}

/// Check that `name` is a valid pin name
pub fn validate_pin_name(name: &str) -> Result<(), ValidationError> {
    let reason = if name.is_empty() {
        Some("must not be empty".to_string())
    } else if name.chars().count() > MAX_PIN_NAME_LEN {
        Some(format!("must not be longer than {} characters", MAX_PIN_NAME_LEN))
    } else if let Some(c) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !PIN_NAME_EXTRA_CHARS.contains(*c))
    {
        Some(format!("contains invalid character '{}'", c))
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ValidationError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// A symbol pin
///
/// The pin line starts at `position` and extends by `length` in the
/// direction of `rotation`. The name label is placed relative to the pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    uuid: Uuid,
    name: String,
    position: Point,
    rotation: Angle,
    length: UnsignedLength,
    name_position: Point,
    name_height: PositiveLength,
    name_rotation: Angle,
    name_alignment: Alignment,
}

impl Pin {
    /// Create a pin with default label placement
    pub fn new(
        uuid: Uuid,
        name: impl Into<String>,
        position: Point,
        rotation: Angle,
        length: UnsignedLength,
    ) -> Self {
        Self {
            uuid,
            name: name.into(),
            position,
            rotation,
            length,
            name_position: Self::default_name_position(length),
            name_height: PositiveLength::saturating(2_500_000),
            name_rotation: Angle::DEG_0,
            name_alignment: Alignment::new(HAlign::Left, VAlign::Center),
        }
    }

    /// Label position for a pin of the given length, slightly beyond its end
    pub fn default_name_position(length: UnsignedLength) -> Point {
        Point::new(length.get() + Length::new(1_270_000), Length::ZERO)
    }

    /// Copy of this pin with another UUID
    pub fn with_uuid(&self, uuid: Uuid) -> Self {
        Self {
            uuid,
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    pub fn length(&self) -> UnsignedLength {
        self.length
    }

    pub fn name_position(&self) -> Point {
        self.name_position
    }

    pub fn name_height(&self) -> PositiveLength {
        self.name_height
    }

    pub fn name_rotation(&self) -> Angle {
        self.name_rotation
    }

    pub fn name_alignment(&self) -> Alignment {
        self.name_alignment
    }

    /// End point of the pin line, where wires connect
    pub fn end_point(&self) -> Point {
        let tip = self.position + Point::new(self.length.get(), Length::ZERO);
        tip.rotated(self.rotation, self.position)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.name == name {
            return false;
        }
        self.name = name;
        true
    }

    pub fn set_position(&mut self, position: Point) -> bool {
        std::mem::replace(&mut self.position, position) != position
    }

    pub fn set_rotation(&mut self, rotation: Angle) -> bool {
        std::mem::replace(&mut self.rotation, rotation) != rotation
    }

    pub fn set_length(&mut self, length: UnsignedLength) -> bool {
        std::mem::replace(&mut self.length, length) != length
    }

    pub fn set_name_position(&mut self, position: Point) -> bool {
        std::mem::replace(&mut self.name_position, position) != position
    }

    pub fn set_name_height(&mut self, height: PositiveLength) -> bool {
        std::mem::replace(&mut self.name_height, height) != height
    }

    pub fn set_name_rotation(&mut self, rotation: Angle) -> bool {
        std::mem::replace(&mut self.name_rotation, rotation) != rotation
    }

    pub fn set_name_alignment(&mut self, alignment: Alignment) -> bool {
        std::mem::replace(&mut self.name_alignment, alignment) != alignment
    }
}

impl Entity for Pin {
    type Event = PinEvent;
    const KIND: &'static str = "pin";

    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn assign(&mut self, other: &Self) -> EventList<PinEvent> {
        assign_fields!(self, other,
            name => PinEvent::NameChanged,
            position => PinEvent::PositionChanged,
            rotation => PinEvent::RotationChanged,
            length => PinEvent::LengthChanged,
            name_position => PinEvent::NamePositionChanged,
            name_height => PinEvent::NameHeightChanged,
            name_rotation => PinEvent::NameRotationChanged,
            name_alignment => PinEvent::NameAlignmentChanged,
        )
    }
}

impl Transform for Pin {
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

    // The label is stored relative to the pin, so mirroring flips it across
    // the pin line.
    fn mirror(&mut self, orientation: Orientation, center: Point) {
        self.position = self.position.mirrored(orientation, center);
        self.rotation = match orientation {
            Orientation::Horizontal => Angle::DEG_180 - self.rotation,
            Orientation::Vertical => -self.rotation,
        };
        self.name_position = Point::new(self.name_position.x, -self.name_position.y);
        self.name_rotation = -self.name_rotation;
        self.name_alignment = self.name_alignment.mirrored(Orientation::Vertical);
    }

    fn snap_to_grid(&mut self, grid: PositiveLength) {
        self.position = self.position.mapped_to_grid(grid);
    }

    fn is_on_grid(&self, grid: PositiveLength) -> bool {
        self.position.is_on_grid(grid)
    }
}
