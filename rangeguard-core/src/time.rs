//! Time handling for the estimator loop
//!
//! All timestamps are monotonic microseconds since boot, as produced by the
//! sensor drivers and the estimator's fusion horizon. Wall clock time never
//! enters the evaluator.

use crate::constants::time::US_PER_MS;

/// Timestamp in microseconds since boot
pub type Timestamp = u64;

/// Elapsed microseconds from `earlier` to `later`
///
/// Saturates at zero when `later` precedes `earlier`. The delayed sample can
/// legitimately carry a timestamp slightly ahead of the horizon when a caller
/// forces readiness, and that must not wrap into a huge interval.
#[inline]
pub fn elapsed_us(earlier: Timestamp, later: Timestamp) -> u64 {
    later.saturating_sub(earlier)
}

/// Convert milliseconds to microseconds, saturating on overflow
#[inline]
pub fn ms_to_us(ms: u64) -> u64 {
    ms.saturating_mul(US_PER_MS)
}
