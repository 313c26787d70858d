//! Fixed-Size Delay Buffer for Range Samples
//!
//! ## Overview
//!
//! The estimator fuses measurements on a delayed time horizon so that slower
//! sensors line up with the IMU prediction. Range samples are pushed here as
//! they arrive and popped once their timestamp falls behind the fusion
//! horizon. The popped sample becomes the evaluator's delayed sample.
//!
//! ### Memory Layout
//!
//! Storage is a `heapless::Deque`, so capacity is fixed at compile time and
//! nothing is allocated:
//!
//! ```text
//! RangeBuffer<4> after pushes at t = 10, 20, 30 ms:
//! ┌──────┬──────┬──────┬──────┐
//! │  10  │  20  │  30  │  --  │
//! └──────┴──────┴──────┴──────┘
//!    ↑ oldest        ↑ newest
//!
//! pop_first_older_than(25 ms) → returns t = 20, discards t = 10
//! ```
//!
//! When full, a push discards the oldest sample. Recent range data is worth
//! more to the estimator than stale data.
//!
//! ## Usage Example
//!
//! ```rust
//! use rangeguard_core::{RangeBuffer, RangeSample};
//!
//! let mut buffer: RangeBuffer<8> = RangeBuffer::new();
//! buffer.push(RangeSample::new(4.9, 10_000));
//! buffer.push(RangeSample::new(5.0, 20_000));
//!
//! let delayed = buffer.pop_first_older_than(25_000);
//! assert_eq!(delayed.map(|s| s.time_us), Some(20_000));
//! assert!(buffer.is_empty());
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe. Producer and consumer must run in the estimator task, or
//! the caller must provide a single-writer handoff.

use heapless::Deque;

use crate::sample::RangeSample;
use crate::time::Timestamp;

/// Fixed-capacity FIFO of range samples awaiting the fusion horizon
#[derive(Clone)]
pub struct RangeBuffer<const N: usize> {
    samples: Deque<RangeSample, N>,
}

impl<const N: usize> RangeBuffer<N> {
    /// Evaluated at compile time for every capacity in use
    const NONZERO_CAPACITY: () = assert!(N > 0, "RangeBuffer capacity must be non-zero");

    /// Creates an empty buffer
    ///
    /// Const, so it can live in a `static` on bare metal. A zero capacity
    /// fails to compile.
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_CAPACITY;
        Self { samples: Deque::new() }
    }

    /// Adds a sample, discarding the oldest when full
    ///
    /// Returns the discarded sample, if any.
    pub fn push(&mut self, sample: RangeSample) -> Option<RangeSample> {
        let dropped = if self.samples.is_full() {
            self.samples.pop_front()
        } else {
            None
        };

        if let Some(old) = &dropped {
            log_warn!(
                "Range buffer full, dropped sample at {} us",
                old.time_us
            );
        }

        // Capacity is non-zero and room was made above
        if self.samples.push_back(sample).is_err() {
            log_warn!("Range buffer rejected sample at {} us", sample.time_us);
        }
        dropped
    }

    /// Removes and returns the newest sample at or behind `horizon_us`
    ///
    /// Older samples that also reached the horizon are discarded: the
    /// estimator only ever fuses the most recent eligible measurement.
    pub fn pop_first_older_than(&mut self, horizon_us: Timestamp) -> Option<RangeSample> {
        let mut eligible = None;

        while let Some(front) = self.samples.front() {
            if front.time_us > horizon_us {
                break;
            }
            eligible = self.samples.pop_front();
        }

        eligible
    }

    /// Number of buffered samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    /// Drop all buffered samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl<const N: usize> Default for RangeBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
