//! Integer lengths in nanometers.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A signed length in nanometers
///
/// Integer storage keeps grid snapping and equality checks exact, which the
/// undo commands rely on to detect no-op edits.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Length(i64);

impl Length {
    /// Zero length
    pub const ZERO: Length = Length(0);

    /// Create a length from nanometers
    pub const fn new(nm: i64) -> Self {
        Self(nm)
    }

    /// Create a length from millimeters, rounded to the nearest nanometer
    pub fn from_mm(mm: f64) -> Self {
        Self((mm * 1_000_000.0).round() as i64)
    }

    /// Length in nanometers
    pub const fn to_nm(self) -> i64 {
        self.0
    }

    /// Length in millimeters
    pub fn to_mm(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Absolute value
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Round to the nearest multiple of `grid`, halves away from zero
    pub fn mapped_to_grid(self, grid: PositiveLength) -> Self {
        let grid = grid.get().0;
        let half = grid / 2;
        let snapped = if self.0 >= 0 {
            (self.0 + half) / grid * grid
        } else {
            (self.0 - half) / grid * grid
        };
        Self(snapped)
    }

    /// Whether this length is an exact multiple of `grid`
    pub fn is_on_grid(self, grid: PositiveLength) -> bool {
        self.0 % grid.get().0 == 0
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.to_mm())
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<i64> for Length {
    type Output = Length;
    fn mul(self, rhs: i64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<i64> for Length {
    type Output = Length;
    fn div(self, rhs: i64) -> Length {
        Length(self.0 / rhs)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

/// A length which is guaranteed to be `>= 0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Length", into = "Length")]
pub struct UnsignedLength(Length);

impl UnsignedLength {
    /// Create a checked unsigned length
    pub fn new(length: Length) -> Result<Self, ValidationError> {
        if length < Length::ZERO {
            return Err(ValidationError::invalid_value(
                "length",
                format!("{} must not be negative", length),
            ));
        }
        Ok(Self(length))
    }

    /// Create from nanometers, clamping negative values to zero
    pub fn saturating(nm: i64) -> Self {
        Self(Length::new(nm.max(0)))
    }

    /// The wrapped length
    pub fn get(self) -> Length {
        self.0
    }
}

impl TryFrom<Length> for UnsignedLength {
    type Error = ValidationError;
    fn try_from(value: Length) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnsignedLength> for Length {
    fn from(value: UnsignedLength) -> Self {
        value.0
    }
}

/// A length which is guaranteed to be `> 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Length", into = "Length")]
pub struct PositiveLength(Length);

impl PositiveLength {
    /// Create a checked positive length
    pub fn new(length: Length) -> Result<Self, ValidationError> {
        if length <= Length::ZERO {
            return Err(ValidationError::invalid_value(
                "length",
                format!("{} must be greater than zero", length),
            ));
        }
        Ok(Self(length))
    }

    /// Create from nanometers, clamping to the minimum of one nanometer
    pub fn saturating(nm: i64) -> Self {
        Self(Length::new(nm.max(1)))
    }

    /// The wrapped length
    pub fn get(self) -> Length {
        self.0
    }
}

impl TryFrom<Length> for PositiveLength {
    type Error = ValidationError;
    fn try_from(value: Length) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PositiveLength> for Length {
    fn from(value: PositiveLength) -> Self {
        value.0
    }
}

impl From<PositiveLength> for UnsignedLength {
    fn from(value: PositiveLength) -> Self {
        UnsignedLength(value.0)
    }
}
