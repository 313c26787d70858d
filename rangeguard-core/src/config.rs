//! Range finder configuration
//!
//! Parameters are owned by each evaluator instance. They are set once at
//! startup (usually deserialized from the vehicle parameter file) and only
//! change on an explicit reconfiguration call; no check ever writes them.
//!
//! ```rust
//! use rangeguard_core::RangeFinderConfig;
//!
//! let config = RangeFinderConfig::default()
//!     .with_limits(0.2, 12.0)
//!     .with_stuck_threshold(0.05)
//!     .with_max_tilt_cos(0.866); // 30 degrees
//!
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::range::{
    DEFAULT_COS_MAX_TILT, DEFAULT_SAMPLE_TIMEOUT_US, DEFAULT_SIGNAL_HYSTERESIS_MS,
    DEFAULT_STUCK_CHECK_WINDOW_US, DEFAULT_STUCK_THRESHOLD_M, DEFAULT_UPDATE_PERIOD_S,
};
use crate::errors::{ConfigError, ConfigResult};

/// Longest nominal update period accepted. Beyond this the interval filter
/// weight `0.5 * period` exceeds one and the filter diverges.
const MAX_UPDATE_PERIOD_S: f32 = 2.0;

/// Configuration for a [`RangeFinder`](crate::RangeFinder)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RangeFinderConfig {
    /// Minimum distance the sensor can measure (m)
    pub min_valid_range_m: f32,

    /// Maximum distance the sensor can measure (m)
    pub max_valid_range_m: f32,

    /// Minimum variation in readings required to declare the sensor unstuck (m)
    pub stuck_threshold_m: f32,

    /// Cosine of the maximum tilt from vertical that permits use of the sensor
    pub cos_max_tilt: f32,

    /// Sensor mounting tilt about the body Y axis (rad)
    pub tilt_rad: f32,

    /// Time signal quality must stay non-zero after a bad report (ms)
    pub signal_hysteresis_ms: u64,

    /// Nominal estimator update period (s)
    pub update_period_s: f32,

    /// Gap between ready samples that arms the stuck check (µs)
    pub stuck_check_window_us: u64,

    /// Age beyond which the delayed sample is out of date (µs)
    pub sample_timeout_us: u64,
}

impl Default for RangeFinderConfig {
    fn default() -> Self {
        Self {
            // Limits are sensor specific; zero until the driver reports them
            min_valid_range_m: 0.0,
            max_valid_range_m: 0.0,
            stuck_threshold_m: DEFAULT_STUCK_THRESHOLD_M,
            cos_max_tilt: DEFAULT_COS_MAX_TILT,
            tilt_rad: 0.0,
            signal_hysteresis_ms: DEFAULT_SIGNAL_HYSTERESIS_MS,
            update_period_s: DEFAULT_UPDATE_PERIOD_S,
            stuck_check_window_us: DEFAULT_STUCK_CHECK_WINDOW_US,
            sample_timeout_us: DEFAULT_SAMPLE_TIMEOUT_US,
        }
    }
}

impl RangeFinderConfig {
    /// Set the measurable distance interval
    pub fn with_limits(mut self, min_m: f32, max_m: f32) -> Self {
        self.min_valid_range_m = min_m;
        self.max_valid_range_m = max_m;
        self
    }

    /// Set the minimum variation that clears a stuck verdict
    pub fn with_stuck_threshold(mut self, threshold_m: f32) -> Self {
        self.stuck_threshold_m = threshold_m;
        self
    }

    /// Set the cosine of the maximum usable tilt
    pub fn with_max_tilt_cos(mut self, cos_max_tilt: f32) -> Self {
        self.cos_max_tilt = cos_max_tilt;
        self
    }

    /// Set the sensor mounting tilt
    pub fn with_tilt(mut self, tilt_rad: f32) -> Self {
        self.tilt_rad = tilt_rad;
        self
    }

    /// Set the signal quality debounce time
    pub fn with_signal_hysteresis_ms(mut self, hysteresis_ms: u64) -> Self {
        self.signal_hysteresis_ms = hysteresis_ms;
        self
    }

    /// Set the nominal estimator update period
    pub fn with_update_period(mut self, period_s: f32) -> Self {
        self.update_period_s = period_s;
        self
    }

    /// Set the gap that arms the stuck check
    pub fn with_stuck_check_window_us(mut self, window_us: u64) -> Self {
        self.stuck_check_window_us = window_us;
        self
    }

    /// Set the maximum age of the delayed sample
    pub fn with_sample_timeout_us(mut self, timeout_us: u64) -> Self {
        self.sample_timeout_us = timeout_us;
        self
    }

    /// Weight of the sample interval low-pass filter
    #[inline]
    pub fn interval_filter_alpha(&self) -> f32 {
        0.5 * self.update_period_s
    }

    /// Check the configuration before handing it to an evaluator
    pub fn validate(&self) -> ConfigResult<()> {
        let (min, max) = (self.min_valid_range_m, self.max_valid_range_m);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::InvalidLimits { min, max });
        }

        if !self.stuck_threshold_m.is_finite() || self.stuck_threshold_m < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "stuck_threshold_m",
                value: self.stuck_threshold_m,
            });
        }

        if !self.tilt_rad.is_finite() {
            return Err(ConfigError::InvalidThreshold {
                name: "tilt_rad",
                value: self.tilt_rad,
            });
        }

        if !(-1.0..=1.0).contains(&self.cos_max_tilt) {
            return Err(ConfigError::InvalidTiltCosine { value: self.cos_max_tilt });
        }

        let period = self.update_period_s;
        if !(period > 0.0 && period <= MAX_UPDATE_PERIOD_S) {
            return Err(ConfigError::InvalidUpdatePeriod { value: period });
        }

        Ok(())
    }
}
