//! Snapshot of the evaluator verdict
//!
//! The individual predicates are independent: a sensor can be healthy and
//! stuck at the same time, or tilted while otherwise valid. Callers combine
//! them as their fusion logic requires. [`HealthState`] is a one-word summary
//! for logging and telemetry only.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// All verdict predicates of a [`RangeFinder`](crate::RangeFinder) at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeStatus {
    /// At least one delayed sample has been received
    pub has_data: bool,
    /// A delayed sample is pending evaluation this cycle
    pub data_ready: bool,
    /// Overall verdict (continuity, external validity and quality)
    pub healthy: bool,
    /// Samples arrive close to the expected rate
    pub continuous: bool,
    /// Last validity pushed by the quality/range-limit filter
    pub externally_valid: bool,
    /// Signal quality debounce has elapsed
    pub quality_ok: bool,
    /// Sensor boresight is close enough to vertical
    pub tilt_ok: bool,
    /// Readings are frozen
    pub stuck: bool,
}

impl RangeStatus {
    /// Healthy data arrived this cycle
    pub fn is_new_healthy_data(&self) -> bool {
        self.data_ready && self.healthy
    }

    /// Most significant condition, for logging and telemetry
    pub fn state(&self) -> HealthState {
        if !self.has_data {
            HealthState::NoData
        } else if self.stuck {
            HealthState::Stuck
        } else if !self.continuous {
            HealthState::InvalidDiscontinuous
        } else if !self.externally_valid || !self.quality_ok {
            HealthState::InvalidBadQuality
        } else if !self.tilt_ok {
            HealthState::InvalidTilt
        } else {
            HealthState::Valid
        }
    }
}

/// Summary of the range finder verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HealthState {
    /// Nothing received yet
    #[default]
    NoData,
    /// Usable as a height source
    Valid,
    /// Samples stopped or arrive too slowly
    InvalidDiscontinuous,
    /// Quality filter or signal quality rejected the data
    InvalidBadQuality,
    /// Sensor boresight too far from vertical
    InvalidTilt,
    /// Readings frozen
    Stuck,
}

impl HealthState {
    /// Short label for logs
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoData => "no-data",
            Self::Valid => "valid",
            Self::InvalidDiscontinuous => "discontinuous",
            Self::InvalidBadQuality => "bad-quality",
            Self::InvalidTilt => "tilt",
            Self::Stuck => "stuck",
        }
    }
}

impl core::fmt::Display for HealthState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for HealthState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.as_str())
    }
}
