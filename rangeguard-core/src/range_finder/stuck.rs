//! Frozen reading detection
//!
//! Some lidar modules fail by repeating the last register value forever. The
//! numbers stay in range, so only their lack of variation gives them away.
//!
//! While no ready sample arrives, every fresh raw sample widens a min/max
//! envelope. When the ready stream resumes after a gap of at least the stuck
//! window, and at least two raw samples were seen during that gap, the
//! envelope decides:
//!
//! ```text
//! max - min <  threshold  → stuck (envelope kept, keeps widening)
//! max - min >= threshold  → not stuck, envelope reseeded from the new sample
//! ```
//!
//! Once stuck, every ready sample widens the envelope until it reaches the
//! threshold. A silent sensor (no raw samples during the gap) is a continuity
//! problem, not a stuck one, and is never declared stuck here.

use crate::constants::range::MIN_STALE_SAMPLES;
use crate::sample::RangeSample;
use crate::time::{elapsed_us, Timestamp};

/// Change of the stuck verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StuckTransition {
    Declared,
    Cleared,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct StuckDetector {
    min_m: f32,
    max_m: f32,
    seeded: bool,
    stale_count: u16,
    period_start_us: Option<Timestamp>,
    last_stale_us: Option<Timestamp>,
    last_ready_us: Option<Timestamp>,
    is_stuck: bool,
}

impl StuckDetector {
    pub(crate) fn is_stuck(&self) -> bool {
        self.is_stuck
    }

    /// Spread of the readings since the last reseed (m)
    pub(crate) fn spread_m(&self) -> f32 {
        if self.seeded {
            self.max_m - self.min_m
        } else {
            0.0
        }
    }

    /// Fold a raw sample that arrived while nothing reached the horizon
    pub(crate) fn observe_stale(&mut self, sample: &RangeSample) {
        let latest = self.last_stale_us.max(self.last_ready_us);
        if Some(sample.time_us) <= latest {
            return;
        }

        self.widen(sample.rng);
        self.stale_count = self.stale_count.saturating_add(1);
        self.last_stale_us = Some(sample.time_us);
        self.period_start_us.get_or_insert(sample.time_us);
    }

    /// Evaluate a sample that reached the fusion horizon
    pub(crate) fn observe_ready(
        &mut self,
        sample: &RangeSample,
        threshold_m: f32,
        window_us: u64,
    ) -> Option<StuckTransition> {
        if Some(sample.time_us) <= self.last_ready_us {
            return None;
        }
        self.last_ready_us = Some(sample.time_us);

        if self.is_stuck {
            self.widen(sample.rng);
            if self.spread_m() >= threshold_m {
                self.is_stuck = false;
                self.reseed(sample);
                return Some(StuckTransition::Cleared);
            }
            return None;
        }

        let gap_us = self
            .period_start_us
            .map_or(0, |start| elapsed_us(start, sample.time_us));
        let armed = self.stale_count >= MIN_STALE_SAMPLES && gap_us >= window_us;

        if armed && self.spread_m() < threshold_m {
            self.is_stuck = true;
            return Some(StuckTransition::Declared);
        }

        self.reseed(sample);
        None
    }

    fn widen(&mut self, rng: f32) {
        if self.seeded {
            self.min_m = self.min_m.min(rng);
            self.max_m = self.max_m.max(rng);
        } else {
            self.min_m = rng;
            self.max_m = rng;
            self.seeded = true;
        }
    }

    fn reseed(&mut self, sample: &RangeSample) {
        self.min_m = sample.rng;
        self.max_m = sample.rng;
        self.seeded = true;
        self.stale_count = 0;
        self.period_start_us = Some(sample.time_us);
    }
}
