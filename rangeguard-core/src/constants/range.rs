//! Range Finder Check Constants
//!
//! Thresholds for the continuity, stuck, tilt and quality checks. The
//! defaults suit small lidar and sonar rangefinders feeding an estimator
//! running at 100 Hz.

// ===== CONTINUITY =====

/// Ceiling on the filtered sample interval (microseconds).
///
/// Data is continuous while the low-pass filtered age of the delayed sample
/// stays below 2 seconds. The filter only drifts toward this value, so a
/// single late sample does not trip it but a sustained slowdown does.
pub const CONTINUITY_CEILING_US: f32 = 2_000_000.0;

/// Spike protection clamp on the filtered sample interval (microseconds).
///
/// Bounds recovery time after a long outage: from the clamp, about
/// `ln(2) / alpha` fresh cycles bring the filter back under the ceiling.
pub const INTERVAL_FILTER_CLAMP_US: f32 = 4_000_000.0;

/// Longest expected gap between two range samples (microseconds).
pub const MAX_SAMPLE_INTERVAL_US: u64 = 200_000;

/// Age beyond which the delayed sample is out of date (microseconds).
pub const DEFAULT_SAMPLE_TIMEOUT_US: u64 = 2 * MAX_SAMPLE_INTERVAL_US;

/// Nominal estimator update period (seconds).
///
/// Sets the filter weight `alpha = 0.5 * period`, which gives the interval
/// filter a 2 second time constant whatever the update rate.
pub const DEFAULT_UPDATE_PERIOD_S: f32 = 0.01;

// ===== STUCK DETECTION =====

/// Minimum variation required to declare the sensor unstuck (metres).
pub const DEFAULT_STUCK_THRESHOLD_M: f32 = 0.1;

/// Minimum gap between ready samples that arms the stuck check (microseconds).
///
/// Frozen lidar registers show up as identical readings after the sensor
/// drops out of range for a while. Short gaps are normal scheduling jitter.
pub const DEFAULT_STUCK_CHECK_WINDOW_US: u64 = 10_000_000;

/// Raw samples that must arrive during a gap before the stuck check runs.
///
/// Fewer than this means the sensor was silent, not frozen.
pub const MIN_STALE_SAMPLES: u16 = 2;

// ===== TILT =====

/// Cosine of the default maximum tilt from vertical (45 degrees).
pub const DEFAULT_COS_MAX_TILT: f32 = 0.7071;

/// Mounting tilt change below which sine and cosine are not recomputed.
pub const TILT_EPSILON_RAD: f32 = f32::EPSILON;

// ===== SIGNAL QUALITY =====

/// Time the signal quality must stay non-zero before data is trusted again (ms).
pub const DEFAULT_SIGNAL_HYSTERESIS_MS: u64 = 1000;

/// Quality value reported by drivers that cannot measure signal quality.
pub const QUALITY_UNKNOWN: i8 = -1;

/// Quality value meaning the sensor reports no usable return.
pub const QUALITY_BAD: i8 = 0;
