//! Shots and how they are scored

use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::config::Rgba;

/// Empirical fit of ring value against teiler.
///
/// This is a linear approximation calibrated against printed targets; it is
/// close to, but not the same as, the official ring boundaries.
const VALUE_SLOPE: f64 = -250.482_978_6;
const VALUE_INTERCEPT: f64 = 10.971_769_89;

/// Highest score a single shot can get in tenth mode
pub const MAX_TENTH: f64 = 10.9;
/// Highest score a single shot can get in whole-ring mode
pub const MAX_WHOLE: f64 = 10.0;

/// Teiler up to which a derived shot counts as a ten
const HIGH_TEILER: f64 = 251.0;
/// Teiler up to which a derived shot counts as a nine
const MID_TEILER: f64 = 500.0;

/// Round to one decimal place.
///
/// Halves of `value * 10` round away from zero, so `9.45` gives `9.5` even
/// though the stored double sits just below 9.45.
#[inline]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whether scores are counted in whole rings or tenths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Whole,
    Tenth,
}

/// A score together with the precision it should be printed in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub value: f64,
    pub precision: Precision,
}

impl Score {
    pub fn new(value: f64, precision: Precision) -> Self {
        Self { value, precision }
    }

    pub fn zero(precision: Precision) -> Self {
        Self::new(0.0, precision)
    }

    /// Total as shown in the summary column
    pub fn rounded(self) -> Self {
        Self::new(round_tenth(self.value), self.precision)
    }
}

impl Add for Score {
    type Output = Score;

    /// Running total, kept in the precision of the left-hand side
    fn add(self, other: Score) -> Score {
        Score::new(self.value + other.value, self.precision)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, other: Score) {
        *self = *self + other;
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            Precision::Whole => write!(f, "{:.0}", self.value),
            Precision::Tenth => write!(f, "{:.1}", self.value),
        }
    }
}

/// Visual quality class of a shot, used as the marker fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    High,
    Mid,
    Low,
}

impl Tier {
    /// Tier of a shot scored by its distance from center
    pub fn from_teiler(teiler: f64) -> Self {
        if teiler <= HIGH_TEILER {
            Tier::High
        } else if teiler <= MID_TEILER {
            Tier::Mid
        } else {
            Tier::Low
        }
    }

    /// Tier of a shot whose score was measured externally
    pub fn from_value(value: f64) -> Self {
        if value >= 10.0 {
            Tier::High
        } else if value >= 9.0 {
            Tier::Mid
        } else {
            Tier::Low
        }
    }

    /// Semitransparent marker color
    pub fn color(self) -> Rgba {
        match self {
            Tier::High => Rgba::rgba(0xff, 0x00, 0x00, 0xbb),
            Tier::Mid => Rgba::rgba(0xff, 0xff, 0x00, 0xbb),
            Tier::Low => Rgba::rgba(0xff, 0xff, 0xff, 0xbb),
        }
    }
}

/// One shot on the target, coordinates in design units relative to center
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shot {
    /// Teiler and score are derived from the position
    Derived { x: f64, y: f64, teiler: f64 },
    /// Teiler and score come from an external measuring device and win
    /// over anything the position would suggest
    Explicit {
        x: f64,
        y: f64,
        teiler: f64,
        value: f64,
    },
}

impl Shot {
    /// Shot scored from its position
    pub fn at(x: f64, y: f64) -> Self {
        Shot::Derived {
            x,
            y,
            teiler: (x * x + y * y).sqrt(),
        }
    }

    /// Shot with externally measured teiler and value
    pub fn measured(x: f64, y: f64, teiler: f64, value: f64) -> Self {
        Shot::Explicit {
            x,
            y,
            teiler,
            value,
        }
    }

    pub fn x(&self) -> f64 {
        match *self {
            Shot::Derived { x, .. } | Shot::Explicit { x, .. } => x,
        }
    }

    pub fn y(&self) -> f64 {
        match *self {
            Shot::Derived { y, .. } | Shot::Explicit { y, .. } => y,
        }
    }

    /// Distance from center
    pub fn teiler(&self) -> f64 {
        match *self {
            Shot::Derived { teiler, .. } | Shot::Explicit { teiler, .. } => teiler,
        }
    }

    /// Unclamped score, one decimal
    fn raw_value(&self) -> f64 {
        match *self {
            Shot::Derived { teiler, .. } => round_tenth(teiler / VALUE_SLOPE + VALUE_INTERCEPT),
            Shot::Explicit { value, .. } => value,
        }
    }

    /// Score clamped to the valid range for the requested precision
    pub fn value(&self, precision: Precision) -> Score {
        let raw = self.raw_value();
        let value = match precision {
            Precision::Whole => raw.floor().clamp(0.0, MAX_WHOLE),
            Precision::Tenth => raw.clamp(0.0, MAX_TENTH),
        };
        // No negative zero
        let value = if value == 0.0 { 0.0 } else { value };
        Score::new(value, precision)
    }

    pub fn tier(&self) -> Tier {
        match *self {
            Shot::Derived { teiler, .. } => Tier::from_teiler(teiler),
            Shot::Explicit { value, .. } => Tier::from_value(value),
        }
    }

    /// Marker fill color
    pub fn color(&self) -> Rgba {
        self.tier().color()
    }
}

/// Shot as read from a JSON shot list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShotRecord {
    Measured {
        x: f64,
        y: f64,
        teiler: f64,
        value: f64,
    },
    Position {
        x: f64,
        y: f64,
    },
}

impl From<ShotRecord> for Shot {
    fn from(record: ShotRecord) -> Self {
        match record {
            ShotRecord::Position { x, y } => Shot::at(x, y),
            ShotRecord::Measured {
                x,
                y,
                teiler,
                value,
            } => Shot::measured(x, y, teiler, value),
        }
    }
}
