//! Symbol layers
//!
//! The fixed layer table of the symbol editor. Which layers a tool may use is
//! decided here rather than in per-tool globals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Layer of a symbol element
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Visible outlines
    SymbolOutlines,
    /// Invisible areas which can be used to grab the symbol
    SymbolHiddenGrabAreas,
    /// Component name texts
    SymbolNames,
    /// Component value texts
    SymbolValues,
    /// Pin name texts
    SymbolPinNames,
}

impl Layer {
    /// Layers allowed for circles and polygons
    pub const CIRCLE_AND_POLYGON_LAYERS: &'static [Layer] =
        &[Layer::SymbolOutlines, Layer::SymbolHiddenGrabAreas];

    /// Layers allowed for texts
    pub const TEXT_LAYERS: &'static [Layer] = &[
        Layer::SymbolOutlines,
        Layer::SymbolNames,
        Layer::SymbolValues,
        Layer::SymbolPinNames,
    ];

    /// Stacking order of elements on this layer (higher is on top)
    pub fn z_value(self) -> i32 {
        match self {
            Layer::SymbolHiddenGrabAreas => -1,
            Layer::SymbolOutlines => 0,
            Layer::SymbolNames | Layer::SymbolValues | Layer::SymbolPinNames => 1,
        }
    }

    /// Stable identifier used in files and settings
    pub fn id(self) -> &'static str {
        match self {
            Layer::SymbolOutlines => "sym_outlines",
            Layer::SymbolHiddenGrabAreas => "sym_hidden_grab_areas",
            Layer::SymbolNames => "sym_names",
            Layer::SymbolValues => "sym_values",
            Layer::SymbolPinNames => "sym_pin_names",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
