//! Range finder health evaluation for real-time height estimators
//!
//! Decides, once per estimator cycle, whether the latest sample from a
//! downward-facing range sensor can be trusted as a height source.
//! Designed to run inside a hard real-time estimator task.
//!
//! Key constraints:
//! - No heap allocation
//! - Bounded work per call
//! - `no_std` capable (disable the default `std` feature)
//!
//! ```no_run
//! use rangeguard_core::{RangeFinder, RangeSample, Sensor, IDENTITY};
//!
//! let mut range_finder = RangeFinder::new();
//! range_finder.set_limits(0.1, 20.0);
//!
//! // Once per estimator cycle
//! let sample = RangeSample::new(5.0, 1_000_000);
//! range_finder.set_newest_sample(sample);
//! range_finder.set_delayed_sample(sample);
//! range_finder.set_validity(range_finder.is_data_in_range());
//! range_finder.run_checks(1_000_000, &IDENTITY);
//!
//! if range_finder.is_new_healthy_data() && !range_finder.is_stuck() {
//!     let _height = range_finder.delayed_rng() * range_finder.r_to_earth();
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod attitude;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod errors;
pub mod range_finder;
pub mod sample;
pub mod status;
pub mod time;
pub mod traits;

// Public API
pub use attitude::{RotationMatrix, IDENTITY};
pub use buffer::RangeBuffer;
pub use config::RangeFinderConfig;
pub use errors::{ConfigError, ConfigResult};
pub use range_finder::RangeFinder;
pub use sample::RangeSample;
pub use status::{HealthState, RangeStatus};
pub use time::Timestamp;
pub use traits::{HealthPolicy, PredicatePolicy, Sensor, StrictPolicy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
