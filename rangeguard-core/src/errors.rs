//! Configuration Error Types
//!
//! The evaluator itself never fails: every check degrades to a `false`
//! verdict. The only fallible step is accepting a configuration, which is
//! checked once at startup (or on parameter reload) so that a typo in a
//! parameter file cannot silently disable a check.
//!
//! Errors are small `Copy` values carrying `&'static str` names only, so
//! they can be logged over `defmt` on bare metal.
//!
//! ```rust
//! use rangeguard_core::{ConfigError, RangeFinder, RangeFinderConfig};
//!
//! let config = RangeFinderConfig::default().with_limits(5.0, 1.0);
//!
//! match RangeFinder::with_config(config) {
//!     Ok(_) => unreachable!(),
//!     Err(ConfigError::InvalidLimits { min, max }) => {
//!         assert!(min > max);
//!     }
//!     Err(_) => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Valid range limits are not finite or not ordered
    #[error("Range limits [{min}, {max}] are not a valid interval")]
    InvalidLimits {
        /// Configured minimum distance (m)
        min: f32,
        /// Configured maximum distance (m)
        max: f32,
    },

    /// A threshold is negative or not finite
    #[error("Threshold {name} = {value} must be finite and non-negative")]
    InvalidThreshold {
        /// Name of the offending parameter
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Nominal update period would make the interval filter unstable
    #[error("Update period {value}s must be in (0, 2]")]
    InvalidUpdatePeriod {
        /// Rejected period in seconds
        value: f32,
    },

    /// Maximum tilt cosine outside [-1, 1]
    #[error("Tilt cosine {value} outside [-1, 1]")]
    InvalidTiltCosine {
        /// Rejected cosine
        value: f32,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidLimits { min, max } =>
                defmt::write!(fmt, "Range limits [{}, {}] invalid", min, max),
            Self::InvalidThreshold { name, value } =>
                defmt::write!(fmt, "Threshold {} = {} invalid", name, value),
            Self::InvalidUpdatePeriod { value } =>
                defmt::write!(fmt, "Update period {}s invalid", value),
            Self::InvalidTiltCosine { value } =>
                defmt::write!(fmt, "Tilt cosine {} invalid", value),
        }
    }
}
