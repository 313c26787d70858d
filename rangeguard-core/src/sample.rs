//! Range measurement type

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::range::{QUALITY_BAD, QUALITY_UNKNOWN};
use crate::time::Timestamp;

/// Single range measurement with capture timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeSample {
    /// Measured distance along the sensor boresight (m)
    pub rng: f32,

    /// Capture time in microseconds since boot
    pub time_us: Timestamp,

    /// Signal quality: -1 unknown, 0 bad, 1..=100 good
    pub quality: i8,
}

impl Default for RangeSample {
    fn default() -> Self {
        Self {
            rng: 0.0,
            time_us: 0,
            quality: QUALITY_UNKNOWN,
        }
    }
}

impl RangeSample {
    /// Create a sample from a driver that does not report signal quality
    pub const fn new(rng: f32, time_us: Timestamp) -> Self {
        Self { rng, time_us, quality: QUALITY_UNKNOWN }
    }

    /// Create a sample with a reported signal quality
    pub const fn with_quality(rng: f32, time_us: Timestamp, quality: i8) -> Self {
        Self { rng, time_us, quality }
    }

    /// Sensor explicitly reported no usable return
    #[inline]
    pub fn is_quality_bad(&self) -> bool {
        self.quality == QUALITY_BAD
    }
}
