//! Angles in micro-degrees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Neg, Sub, SubAssign};

const FULL_CIRCLE: i32 = 360_000_000;

/// An angle stored in micro-degrees, always within `]-360°, 360°[`
///
/// Counter-clockwise is positive. Arithmetic wraps at a full circle, so
/// rotating by 90° four times yields 0° exactly.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "i32", into = "i32")]
pub struct Angle(i32);

impl Angle {
    /// 0°
    pub const DEG_0: Angle = Angle(0);
    /// 90°
    pub const DEG_90: Angle = Angle(90_000_000);
    /// 180°
    pub const DEG_180: Angle = Angle(180_000_000);
    /// 270°
    pub const DEG_270: Angle = Angle(270_000_000);

    /// Create an angle from micro-degrees
    pub const fn from_micro_deg(micro: i32) -> Self {
        Self(micro % FULL_CIRCLE)
    }

    /// Create an angle from degrees, rounded to the nearest micro-degree
    pub fn from_deg(deg: f64) -> Self {
        Self::from_micro_deg(((deg * 1_000_000.0).round() as i64 % FULL_CIRCLE as i64) as i32)
    }

    /// Create an angle from radians
    pub fn from_rad(rad: f64) -> Self {
        Self::from_deg(rad.to_degrees())
    }

    /// Value in micro-degrees
    pub const fn to_micro_deg(self) -> i32 {
        self.0
    }

    /// Value in degrees
    pub fn to_deg(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Value in radians
    pub fn to_rad(self) -> f64 {
        self.to_deg().to_radians()
    }

    /// Absolute value
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// The same direction expressed in `[0°, 360°[`
    pub fn mapped_to_0_360deg(self) -> Self {
        if self.0 < 0 {
            Self(self.0 + FULL_CIRCLE)
        } else {
            self
        }
    }

    /// The same direction expressed in `]-180°, 180°]`
    pub fn mapped_to_180deg(self) -> Self {
        let half = FULL_CIRCLE / 2;
        if self.0 <= -half {
            Self(self.0 + FULL_CIRCLE)
        } else if self.0 > half {
            Self(self.0 - FULL_CIRCLE)
        } else {
            self
        }
    }

    /// The same end direction reached by turning the other way round
    /// (e.g. 90° becomes -270°)
    pub fn inverted(self) -> Self {
        match self.0.signum() {
            1 => Self(self.0 - FULL_CIRCLE),
            -1 => Self(self.0 + FULL_CIRCLE),
            _ => self,
        }
    }

    /// Whether the angle is a multiple of 90°
    pub fn is_right_angle(self) -> bool {
        self.0 % Self::DEG_90.0 == 0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.to_deg())
    }
}

impl From<i32> for Angle {
    fn from(micro: i32) -> Self {
        Self::from_micro_deg(micro)
    }
}

impl From<Angle> for i32 {
    fn from(angle: Angle) -> Self {
        angle.0
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle::from_micro_deg((self.0 + rhs.0) % FULL_CIRCLE)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_micro_deg((self.0 - rhs.0) % FULL_CIRCLE)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl Div<i32> for Angle {
    type Output = Angle;
    fn div(self, rhs: i32) -> Angle {
        Angle(self.0 / rhs)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        *self = *self + rhs;
    }
}

impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Angle) {
        *self = *self - rhs;
    }
}
