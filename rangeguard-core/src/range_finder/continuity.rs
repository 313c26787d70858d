//! Sample interval filter
//!
//! First-order IIR low-pass of the age of the delayed sample, stepped once
//! per estimator cycle:
//!
//! ```text
//! filt = filt·(1 - α) + α·(t_horizon - t_sample)     α = 0.5·dt_update
//! filt = min(filt, 4 s)
//! ```
//!
//! At 100 Hz α = 0.005, a 2 second time constant. While samples keep up the
//! input stays near zero. During a dropout the input ramps up and the filter
//! follows it with a lag, so continuity fails only after a sustained outage
//! and recovers only after enough fresh cycles pull it back down.

use crate::constants::range::{CONTINUITY_CEILING_US, INTERVAL_FILTER_CLAMP_US};
use crate::time::{elapsed_us, Timestamp};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct IntervalFilter {
    interval_filt_us: f32,
    time_last_step_us: Option<Timestamp>,
}

impl IntervalFilter {
    /// Step the filter once for the cycle at `time_delayed_us`
    ///
    /// Repeated calls for the same cycle leave the state unchanged.
    pub(crate) fn step(&mut self, time_delayed_us: Timestamp, sample_time_us: Timestamp, alpha: f32) {
        if matches!(self.time_last_step_us, Some(last) if time_delayed_us <= last) {
            return;
        }
        self.time_last_step_us = Some(time_delayed_us);

        let age_us = elapsed_us(sample_time_us, time_delayed_us) as f32;
        let filtered = self.interval_filt_us * (1.0 - alpha) + alpha * age_us;

        // Spike protection
        self.interval_filt_us = filtered.min(INTERVAL_FILTER_CLAMP_US);
    }

    pub(crate) fn filtered_us(&self) -> f32 {
        self.interval_filt_us
    }

    pub(crate) fn is_below_ceiling(&self) -> bool {
        self.interval_filt_us < CONTINUITY_CEILING_US
    }
}
