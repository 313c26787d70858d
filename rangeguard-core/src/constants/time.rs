//! Time-Related Constants

/// Microseconds per millisecond.
pub const US_PER_MS: u64 = 1000;
