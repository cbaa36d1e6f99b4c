//! Input events delivered to the editor state machine.
//!
//! Positions are document coordinates; mapping from view pixels happens in
//! the host before an event reaches the editor.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use symkit_core::{Angle, HAlign, Layer, Point, PositiveLength, UnsignedLength, VAlign};

bitflags! {
    /// Modifier keys held during an input event
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

impl Modifiers {
    pub const NONE: Self = Self::empty();

    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    pub const fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }
}

/// A pointer event in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub pos: Point,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Keys the tools react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Shift,
    Control,
    Alt,
    Other(char),
}

/// A keyboard event
///
/// `modifiers` is the modifier state after the key changed, so releasing
/// Shift reports a key event without [`Modifiers::SHIFT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// A value set through a tool's command bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "snake_case")]
pub enum ToolProperty {
    Layer(Layer),
    LineWidth(UnsignedLength),
    Filled(bool),
    GrabArea(bool),
    /// Sweep angle of the next polygon segment
    Angle(Angle),
    Text(String),
    Height(PositiveLength),
    HAlign(HAlign),
    VAlign(VAlign),
    PinName(String),
    PinLength(UnsignedLength),
}
