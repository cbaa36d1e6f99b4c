//! Length unit handling
//!
//! Converts internal nanometer lengths into the unit the user works in and
//! formats them for overlay and status texts.

use crate::geometry::Length;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display unit for lengths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimeters
    #[default]
    Millimeters,
    /// Micrometers
    Micrometers,
    /// Inches
    Inches,
    /// Mils (1/1000 inch)
    Mils,
}

impl LengthUnit {
    /// Convert a length into this unit
    pub fn convert_to_unit(self, length: Length) -> f64 {
        let nm = length.to_nm() as f64;
        match self {
            Self::Millimeters => nm / 1_000_000.0,
            Self::Micrometers => nm / 1_000.0,
            Self::Inches => nm / 25_400_000.0,
            Self::Mils => nm / 25_400.0,
        }
    }

    /// Convert a value in this unit into a length
    pub fn convert_from_unit(self, value: f64) -> Length {
        let nm = match self {
            Self::Millimeters => value * 1_000_000.0,
            Self::Micrometers => value * 1_000.0,
            Self::Inches => value * 25_400_000.0,
            Self::Mils => value * 25_400.0,
        };
        Length::new(nm.round() as i64)
    }

    /// Short unit label
    pub fn short_str(self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Micrometers => "μm",
            Self::Inches => "″",
            Self::Mils => "mils",
        }
    }

    /// Number of decimals that shows the full nanometer resolution
    pub fn reasonable_decimals(self) -> usize {
        match self {
            Self::Millimeters => 6,
            Self::Micrometers => 3,
            Self::Inches => 8,
            Self::Mils => 5,
        }
    }

    /// Format a length with unit label, e.g. `"2.540000 mm"`
    pub fn format(self, length: Length) -> String {
        format!(
            "{:.*} {}",
            self.reasonable_decimals(),
            self.convert_to_unit(length),
            self.short_str()
        )
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millimeters => write!(f, "millimeters"),
            Self::Micrometers => write!(f, "micrometers"),
            Self::Inches => write!(f, "inches"),
            Self::Mils => write!(f, "mils"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "millimeters" | "mm" => Ok(Self::Millimeters),
            "micrometers" | "um" | "μm" => Ok(Self::Micrometers),
            "inches" | "inch" | "in" => Ok(Self::Inches),
            "mils" | "mil" => Ok(Self::Mils),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}
