//! Documented valid ranges for bounded pedal fields

use serde::{Deserialize, Serialize};

/// Inclusive valid range for a raw scaled field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T> Range<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd + Copy> Range<T> {
    /// Check if `value` lies within the range
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into the range
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// Throttle travel (0.1 %)
pub const THROTTLE: Range<u16> = Range::new(0, 1000);
/// Brake travel (0.1 %)
pub const BRAKE: Range<u16> = Range::new(0, 1000);
/// Steering wheel angle (0.1 deg)
pub const STEERING_ANGLE: Range<i16> = Range::new(-1800, 1800);
/// Implausibility sensor raw reading (12-bit ADC)
pub const IMPLAUSIBILITY: Range<u16> = Range::new(0, 4095);

/// Brake travel at or above which a decode counts as hard braking (0.1 %)
pub const HARD_BRAKE_THRESHOLD: u16 = 800;
