//! Text anchor alignment.

use super::Orientation;
use serde::{Deserialize, Serialize};

/// Horizontal alignment of a text relative to its anchor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    /// Text extends to the right of the anchor
    #[default]
    Left,
    /// Text is centered on the anchor
    Center,
    /// Text extends to the left of the anchor
    Right,
}

impl HAlign {
    /// Swap left and right
    pub fn mirrored(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Center => Self::Center,
            Self::Right => Self::Left,
        }
    }
}

/// Vertical alignment of a text relative to its anchor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    /// Text hangs below the anchor
    Top,
    /// Text is centered on the anchor
    Center,
    /// Text sits on the anchor
    #[default]
    Bottom,
}

impl VAlign {
    /// Swap top and bottom
    pub fn mirrored(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Center => Self::Center,
            Self::Bottom => Self::Top,
        }
    }
}

/// Combined text alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alignment {
    /// Horizontal part
    pub h: HAlign,
    /// Vertical part
    pub v: VAlign,
}

impl Alignment {
    /// Create an alignment
    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }

    /// Mirror the component affected by `orientation`
    pub fn mirrored(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(self.h.mirrored(), self.v),
            Orientation::Vertical => Self::new(self.h, self.v.mirrored()),
        }
    }
}
