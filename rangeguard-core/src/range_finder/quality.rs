//! Signal quality debounce
//!
//! A rangefinder that reports zero signal quality (no usable return) stays
//! untrusted until the configured hysteresis has elapsed without another bad
//! report. Drivers that do not measure quality report `-1` and never trip it.

use crate::sample::RangeSample;
use crate::time::{elapsed_us, Timestamp};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct QualityHysteresis {
    time_bad_us: Option<Timestamp>,
}

impl QualityHysteresis {
    /// Note a bad-quality report on the sample evaluated at `now_us`
    pub(crate) fn record(&mut self, sample: &RangeSample, now_us: Timestamp) {
        if sample.is_quality_bad() {
            self.time_bad_us = Some(now_us);
        }
    }

    pub(crate) fn is_ok(&self, now_us: Timestamp, hysteresis_us: u64) -> bool {
        match self.time_bad_us {
            None => true,
            Some(time_bad) => elapsed_us(time_bad, now_us) > hysteresis_us,
        }
    }
}
