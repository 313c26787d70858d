//! Constants for RangeGuard Core
//!
//! Every numeric default used by the evaluator is defined here with its unit
//! in the name.
//!
//! ## Organization
//!
//! - **Range**: range finder checks (continuity, stuck, tilt, quality)
//! - **Time**: unit conversions

/// Range finder check thresholds and defaults.
pub mod range;

/// Time unit conversions.
pub mod time;

pub use range::{
    CONTINUITY_CEILING_US, DEFAULT_COS_MAX_TILT, DEFAULT_SIGNAL_HYSTERESIS_MS,
    DEFAULT_STUCK_THRESHOLD_M, DEFAULT_UPDATE_PERIOD_S,
};

pub use time::US_PER_MS;
