//! Range Finder Health Evaluator
//!
//! ## Overview
//!
//! Holds the newest and the time-delayed range sample, runs the continuity,
//! signal quality, stuck and tilt checks once per estimator cycle, and
//! exposes the result as independent predicates.
//!
//! ## Cycle
//!
//! ```text
//! capture:   set_newest_sample(s)         every raw arrival
//!            set_delayed_sample(s)        sample reached the fusion horizon
//!            (or pull_delayed_sample(&mut buffer, t))
//! filter:    set_validity(in_range && ..) external quality/range-limit verdict
//! estimator: run_checks(t, &R_to_earth)
//!              1. cos_tilt_to_earth from attitude
//!              2. continuity (filtered sample interval, sample age)
//!              3. signal quality hysteresis
//!              4. stuck envelope
//!              5. healthy = continuous && valid && quality_ok
//! fusion:    is_new_healthy_data(), is_stuck(), is_tilt_ok(), delayed_rng()
//! ```
//!
//! The order inside `run_checks` matters: the stuck check relies on the
//! readiness of the cycle and the verdict on the continuity just computed.
//!
//! ## Orthogonal predicates
//!
//! `is_stuck` and `is_tilt_ok` do not feed `is_healthy`. Callers can tell
//! "no data" from "frozen data" and decide themselves how to combine them.
//! Failover and reset eligibility go through the injected [`HealthPolicy`].
//!
//! ## Example
//!
//! ```rust
//! use rangeguard_core::{RangeBuffer, RangeFinder, RangeSample, Sensor, IDENTITY};
//!
//! let mut buffer: RangeBuffer<16> = RangeBuffer::new();
//! let mut range_finder = RangeFinder::new();
//! range_finder.set_limits(0.1, 20.0);
//!
//! let mut healthy_cycles = 0;
//! for i in 1..=300u64 {
//!     let now = i * 10_000;
//!     let sample = RangeSample::new(5.0 + 0.5 * (i % 2) as f32, now);
//!     buffer.push(sample);
//!     range_finder.set_newest_sample(sample);
//!
//!     range_finder.pull_delayed_sample(&mut buffer, now);
//!     range_finder.set_validity(range_finder.is_data_in_range());
//!     range_finder.run_checks(now, &IDENTITY);
//!
//!     if range_finder.is_new_healthy_data() {
//!         healthy_cycles += 1;
//!     }
//! }
//!
//! assert_eq!(healthy_cycles, 300);
//! assert!(!range_finder.is_stuck());
//! ```

mod continuity;
mod quality;
mod stuck;

use crate::attitude::{MountingTilt, RotationMatrix};
use crate::buffer::RangeBuffer;
use crate::config::RangeFinderConfig;
use crate::errors::ConfigResult;
use crate::sample::RangeSample;
use crate::status::{HealthState, RangeStatus};
use crate::time::{elapsed_us, ms_to_us, Timestamp};
use crate::traits::{HealthPolicy, Sensor, StrictPolicy};

use continuity::IntervalFilter;
use quality::QualityHysteresis;
use stuck::{StuckDetector, StuckTransition};

/// Health evaluator for one physical range finder
#[derive(Debug, Clone)]
pub struct RangeFinder<P = StrictPolicy> {
    config: RangeFinderConfig,
    policy: P,

    newest_sample: Option<RangeSample>,
    delayed_sample: RangeSample,

    /// At least one sample has reached the fusion horizon
    has_data: bool,
    /// New data fell behind the fusion horizon and awaits evaluation
    data_ready: bool,
    /// Overall verdict of the last cycle
    height_valid: bool,
    /// Verdict of the external quality/range-limit filter
    external_valid: bool,
    continuous: bool,
    quality_ok: bool,

    interval: IntervalFilter,
    quality: QualityHysteresis,
    stuck: StuckDetector,

    tilt: MountingTilt,
    /// (2,2) element of the sensor-to-earth rotation
    cos_tilt_to_earth: f32,

    last_state: HealthState,
}

impl RangeFinder<StrictPolicy> {
    /// Evaluator with default configuration and [`StrictPolicy`]
    pub fn new() -> Self {
        Self::build(RangeFinderConfig::default(), StrictPolicy)
    }

    /// Evaluator with a checked configuration and [`StrictPolicy`]
    pub fn with_config(config: RangeFinderConfig) -> ConfigResult<Self> {
        Self::with_config_and_policy(config, StrictPolicy)
    }
}

impl Default for RangeFinder<StrictPolicy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: HealthPolicy> RangeFinder<P> {
    /// Evaluator with default configuration and a deployment policy
    pub fn with_policy(policy: P) -> Self {
        Self::build(RangeFinderConfig::default(), policy)
    }

    /// Evaluator with a checked configuration and a deployment policy
    pub fn with_config_and_policy(config: RangeFinderConfig, policy: P) -> ConfigResult<Self> {
        if let Err(err) = config.validate() {
            log_warn!("Range finder configuration rejected: {}", err);
            return Err(err);
        }
        Ok(Self::build(config, policy))
    }

    fn build(config: RangeFinderConfig, policy: P) -> Self {
        Self {
            config,
            policy,
            newest_sample: None,
            delayed_sample: RangeSample::default(),
            has_data: false,
            data_ready: false,
            height_valid: false,
            external_valid: false,
            continuous: false,
            quality_ok: false,
            interval: IntervalFilter::default(),
            quality: QualityHysteresis::default(),
            stuck: StuckDetector::default(),
            tilt: MountingTilt::new(config.tilt_rad),
            cos_tilt_to_earth: 0.0,
            last_state: HealthState::NoData,
        }
    }

    /// Replace the configuration, keeping the check state
    ///
    /// On error the previous configuration stays in place.
    pub fn reconfigure(&mut self, config: RangeFinderConfig) -> ConfigResult<()> {
        if let Err(err) = config.validate() {
            log_warn!("Range finder reconfiguration rejected: {}", err);
            return Err(err);
        }
        self.tilt.set(config.tilt_rad);
        self.config = config;
        Ok(())
    }

    // ===== INGESTION =====

    /// Record the latest raw arrival
    pub fn set_newest_sample(&mut self, sample: RangeSample) {
        self.newest_sample = Some(sample);
    }

    /// Record a sample that reached the fusion horizon and mark it ready
    pub fn set_delayed_sample(&mut self, sample: RangeSample) {
        self.delayed_sample = sample;
        self.has_data = true;
        self.data_ready = true;
    }

    /// Force the ready flag
    ///
    /// Readiness persists until lowered; rate limiters and the buffer pull
    /// use this to mark cycles without new data.
    pub fn set_data_readiness(&mut self, is_ready: bool) {
        self.data_ready = is_ready;
    }

    /// Move the newest sample at or behind `time_delayed_us` out of `buffer`
    ///
    /// Sets readiness to whether a sample was found.
    pub fn pull_delayed_sample<const N: usize>(
        &mut self,
        buffer: &mut RangeBuffer<N>,
        time_delayed_us: Timestamp,
    ) -> bool {
        match buffer.pop_first_older_than(time_delayed_us) {
            Some(sample) => {
                self.set_delayed_sample(sample);
                true
            }
            None => {
                self.set_data_readiness(false);
                false
            }
        }
    }

    /// Correct the delayed range in place (e.g. after clamping)
    pub fn update_delayed_range(&mut self, rng: f32) {
        self.delayed_sample.rng = rng;
    }

    /// Push the external quality/range-limit verdict for this cycle
    pub fn set_validity(&mut self, is_valid: bool) {
        self.external_valid = is_valid;
    }

    // ===== CONFIGURATION =====

    /// Set the measurable distance interval (m)
    pub fn set_limits(&mut self, min_distance: f32, max_distance: f32) {
        self.config.min_valid_range_m = min_distance;
        self.config.max_valid_range_m = max_distance;
    }

    /// Set the mounting tilt (rad) and the cosine of the maximum usable tilt
    pub fn set_tilt(&mut self, new_tilt: f32, range_cos_max_tilt: f32) {
        if self.tilt.set(new_tilt) {
            self.config.tilt_rad = self.tilt.tilt_rad();
            log_debug!("Range finder mounting tilt set to {} rad", self.config.tilt_rad);
        }
        self.config.cos_max_tilt = range_cos_max_tilt;
    }

    // ===== CHECKS =====

    /// Run all checks for the estimator cycle at `time_delayed_us`
    ///
    /// Never fails: implausible input lowers the verdict instead.
    pub fn run_checks(&mut self, time_delayed_us: Timestamp, r_to_earth: &RotationMatrix) {
        self.cos_tilt_to_earth = self.tilt.cos_to_earth(r_to_earth);

        self.update_continuity(time_delayed_us);
        self.update_signal_quality(time_delayed_us);
        self.update_stuck();

        self.height_valid = self.continuous && self.external_valid && self.quality_ok;

        self.log_state_change();
    }

    fn update_continuity(&mut self, time_delayed_us: Timestamp) {
        if !self.has_data {
            self.continuous = false;
            return;
        }

        let sample_time_us = self.delayed_sample.time_us;
        self.interval.step(time_delayed_us, sample_time_us, self.config.interval_filter_alpha());

        let out_of_date = elapsed_us(sample_time_us, time_delayed_us) > self.config.sample_timeout_us;
        self.continuous = self.interval.is_below_ceiling() && !out_of_date;
    }

    fn update_signal_quality(&mut self, time_delayed_us: Timestamp) {
        if self.has_data && self.data_ready {
            self.quality.record(&self.delayed_sample, time_delayed_us);
        }

        let hysteresis_us = ms_to_us(self.config.signal_hysteresis_ms);
        self.quality_ok = self.quality.is_ok(time_delayed_us, hysteresis_us);
    }

    fn update_stuck(&mut self) {
        if !(self.has_data && self.data_ready) {
            if let Some(sample) = &self.newest_sample {
                self.stuck.observe_stale(sample);
            }
            return;
        }

        let transition = self.stuck.observe_ready(
            &self.delayed_sample,
            self.config.stuck_threshold_m,
            self.config.stuck_check_window_us,
        );

        match transition {
            Some(StuckTransition::Declared) => {
                log_warn!(
                    "Range finder stuck at {} m (spread {} m)",
                    self.delayed_sample.rng,
                    self.stuck.spread_m()
                );
            }
            Some(StuckTransition::Cleared) => {
                log_debug!("Range finder unstuck at {} m", self.delayed_sample.rng);
            }
            None => {}
        }
    }

    fn log_state_change(&mut self) {
        let state = self.status().state();
        if state == self.last_state {
            return;
        }

        if self.last_state == HealthState::Valid {
            log_warn!("Range finder {} -> {}", self.last_state, state);
        } else {
            log_debug!("Range finder {} -> {}", self.last_state, state);
        }
        self.last_state = state;
    }

    // ===== QUERIES =====

    /// Readings are frozen
    pub fn is_stuck(&self) -> bool {
        self.stuck.is_stuck()
    }

    /// Sensor boresight is close enough to vertical
    pub fn is_tilt_ok(&self) -> bool {
        self.cos_tilt_to_earth > self.config.cos_max_tilt
    }

    /// Samples arrived close to the expected rate at the last check
    pub fn is_data_continuous(&self) -> bool {
        self.continuous
    }

    /// Signal quality debounce had elapsed at the last check
    pub fn is_quality_ok(&self) -> bool {
        self.quality_ok
    }

    /// A delayed sample awaits evaluation this cycle
    pub fn is_data_ready(&self) -> bool {
        self.data_ready
    }

    /// Delayed range lies within the configured limits
    pub fn is_data_in_range(&self) -> bool {
        let rng = self.delayed_sample.rng;
        rng >= self.config.min_valid_range_m && rng <= self.config.max_valid_range_m
    }

    /// Delayed range (m)
    pub fn delayed_rng(&self) -> f32 {
        self.delayed_sample.rng
    }

    /// Sample currently at the fusion horizon
    pub fn delayed_sample(&self) -> &RangeSample {
        &self.delayed_sample
    }

    /// Latest raw arrival
    pub fn newest_sample(&self) -> Option<&RangeSample> {
        self.newest_sample.as_ref()
    }

    /// Cosine of the angle between sensor boresight and earth vertical
    pub fn r_to_earth(&self) -> f32 {
        self.cos_tilt_to_earth
    }

    /// Minimum distance the sensor can measure (m)
    pub fn valid_min_val(&self) -> f32 {
        self.config.min_valid_range_m
    }

    /// Maximum distance the sensor can measure (m)
    pub fn valid_max_val(&self) -> f32 {
        self.config.max_valid_range_m
    }

    /// Filtered age of the delayed sample (µs)
    pub fn filtered_interval_us(&self) -> f32 {
        self.interval.filtered_us()
    }

    /// Current configuration
    pub fn config(&self) -> &RangeFinderConfig {
        &self.config
    }

    /// Snapshot of every predicate
    pub fn status(&self) -> RangeStatus {
        RangeStatus {
            has_data: self.has_data,
            data_ready: self.data_ready,
            healthy: self.height_valid,
            continuous: self.continuous,
            externally_valid: self.external_valid,
            quality_ok: self.quality_ok,
            tilt_ok: self.is_tilt_ok(),
            stuck: self.is_stuck(),
        }
    }
}

impl<P: HealthPolicy> Sensor for RangeFinder<P> {
    fn is_healthy(&self) -> bool {
        self.height_valid
    }

    fn is_new_healthy_data(&self) -> bool {
        self.data_ready && self.height_valid
    }

    fn is_delayed_healthy_data(&self) -> bool {
        self.data_ready && self.height_valid
    }

    fn can_be_used_as_failover(&self) -> bool {
        self.policy.can_be_used_as_failover(&self.status())
    }

    fn can_reset_on_sensor(&self) -> bool {
        self.policy.can_reset_on_sensor(&self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attitude::{pitch_rotation, IDENTITY};
    use crate::traits::PredicatePolicy;

    const PERIOD_US: u64 = 10_000;

    fn configured() -> RangeFinder {
        let mut range_finder = RangeFinder::new();
        range_finder.set_limits(0.1, 20.0);
        range_finder
    }

    /// One 100 Hz cycle with a fresh sample at the horizon
    fn fresh_cycle(range_finder: &mut RangeFinder, now: u64, rng: f32, valid: bool) {
        let sample = RangeSample::new(rng, now);
        range_finder.set_newest_sample(sample);
        range_finder.set_delayed_sample(sample);
        range_finder.set_validity(valid);
        range_finder.run_checks(now, &IDENTITY);
    }

    #[test]
    fn starts_with_no_data() {
        let range_finder = RangeFinder::new();
        let status = range_finder.status();

        assert_eq!(status, RangeStatus::default());
        assert_eq!(status.state(), HealthState::NoData);
        assert!(!range_finder.is_healthy());
        assert!(!range_finder.is_new_healthy_data());
        assert!(!range_finder.is_stuck());
        assert!(!range_finder.is_tilt_ok());
        assert!(!range_finder.can_be_used_as_failover());
        assert!(range_finder.newest_sample().is_none());
    }

    #[test]
    fn checks_without_data_stay_invalid() {
        let mut range_finder = configured();
        range_finder.set_validity(true);
        range_finder.run_checks(5_000_000, &IDENTITY);

        assert!(!range_finder.is_data_continuous());
        assert!(!range_finder.is_healthy());
        assert_eq!(range_finder.filtered_interval_us(), 0.0);
        assert_eq!(range_finder.status().state(), HealthState::NoData);
    }

    #[test]
    fn fresh_valid_sample_is_healthy() {
        let mut range_finder = configured();
        fresh_cycle(&mut range_finder, 1_000_000, 5.0, true);

        assert!(range_finder.is_healthy());
        assert!(range_finder.is_new_healthy_data());
        assert!(range_finder.is_delayed_healthy_data());
        assert!(range_finder.is_tilt_ok());
        assert_eq!(range_finder.status().state(), HealthState::Valid);
        assert!(range_finder.can_be_used_as_failover());
        assert!(range_finder.can_reset_on_sensor());
    }

    #[test]
    fn readiness_can_be_forced() {
        let mut range_finder = configured();
        range_finder.set_delayed_sample(RangeSample::new(5.0, 0));
        assert!(range_finder.is_data_ready());

        range_finder.set_data_readiness(false);
        assert!(!range_finder.is_data_ready());

        range_finder.set_validity(true);
        range_finder.run_checks(0, &IDENTITY);
        assert!(range_finder.is_healthy());
        assert!(!range_finder.is_new_healthy_data());
    }

    #[test]
    fn external_validity_gates_verdict() {
        let mut range_finder = configured();
        fresh_cycle(&mut range_finder, 1_000_000, 5.0, false);

        assert!(range_finder.is_data_continuous());
        assert!(!range_finder.is_healthy());
        assert_eq!(range_finder.status().state(), HealthState::InvalidBadQuality);
    }

    #[test]
    fn delayed_range_corrected_in_place() {
        let mut range_finder = configured();
        range_finder.set_delayed_sample(RangeSample::new(25.0, 1_000));
        assert!(!range_finder.is_data_in_range());

        range_finder.update_delayed_range(20.0);
        assert_eq!(range_finder.delayed_rng(), 20.0);
        assert_eq!(range_finder.delayed_sample().time_us, 1_000);
        assert!(range_finder.is_data_in_range());
    }

    #[test]
    fn limits_are_reported() {
        let range_finder = configured();
        assert_eq!(range_finder.valid_min_val(), 0.1);
        assert_eq!(range_finder.valid_max_val(), 20.0);
    }

    #[test]
    fn tilt_check_uses_attitude() {
        let mut range_finder = configured();
        range_finder.set_delayed_sample(RangeSample::new(5.0, 0));

        range_finder.run_checks(0, &pitch_rotation(0.5));
        assert!(range_finder.is_tilt_ok());

        range_finder.run_checks(0, &pitch_rotation(1.0));
        assert!(!range_finder.is_tilt_ok());
        assert!((range_finder.r_to_earth() - libm::cosf(1.0)).abs() < 1e-5);
    }

    #[test]
    fn mounting_tilt_compensates_body_pitch() {
        let mut range_finder = configured();
        range_finder.set_tilt(0.6, 0.9);
        assert_eq!(range_finder.config().tilt_rad, 0.6);
        assert_eq!(range_finder.config().cos_max_tilt, 0.9);

        range_finder.run_checks(0, &pitch_rotation(-0.6));
        assert!((range_finder.r_to_earth() - 1.0).abs() < 1e-5);
        assert!(range_finder.is_tilt_ok());

        range_finder.run_checks(0, &IDENTITY);
        assert!(!range_finder.is_tilt_ok());
    }

    #[test]
    fn tilt_does_not_gate_health() {
        let mut range_finder = configured();
        range_finder.set_tilt(0.0, 0.99);
        let sample = RangeSample::new(5.0, 1_000_000);
        range_finder.set_delayed_sample(sample);
        range_finder.set_validity(true);
        range_finder.run_checks(1_000_000, &pitch_rotation(0.5));

        assert!(range_finder.is_healthy());
        assert!(!range_finder.is_tilt_ok());
        assert_eq!(range_finder.status().state(), HealthState::InvalidTilt);
        assert!(!range_finder.can_be_used_as_failover());
    }

    #[test]
    fn bad_signal_quality_is_debounced() {
        let mut range_finder = configured();
        let mut now = 1_000_000;

        range_finder.set_delayed_sample(RangeSample::with_quality(5.0, now, 0));
        range_finder.set_validity(true);
        range_finder.run_checks(now, &IDENTITY);
        assert!(!range_finder.is_quality_ok());
        assert!(!range_finder.is_healthy());

        // Good quality for just under the 1 s hysteresis
        for _ in 0..100 {
            now += PERIOD_US;
            range_finder.set_delayed_sample(RangeSample::with_quality(5.0, now, 90));
            range_finder.run_checks(now, &IDENTITY);
        }
        assert!(!range_finder.is_healthy());

        now += PERIOD_US;
        range_finder.set_delayed_sample(RangeSample::with_quality(5.0, now, 90));
        range_finder.run_checks(now, &IDENTITY);
        assert!(range_finder.is_quality_ok());
        assert!(range_finder.is_healthy());
    }

    #[test]
    fn stale_sample_breaks_continuity() {
        let mut range_finder = configured();
        fresh_cycle(&mut range_finder, 1_000_000, 5.0, true);
        assert!(range_finder.is_healthy());

        range_finder.set_data_readiness(false);
        range_finder.run_checks(1_400_000, &IDENTITY);
        assert!(range_finder.is_healthy());

        range_finder.run_checks(1_400_001, &IDENTITY);
        assert!(!range_finder.is_data_continuous());
        assert!(!range_finder.is_healthy());
        assert_eq!(range_finder.status().state(), HealthState::InvalidDiscontinuous);
    }

    #[test]
    fn buffer_pull_sets_readiness() {
        let mut range_finder = configured();
        let mut buffer: RangeBuffer<4> = RangeBuffer::new();
        buffer.push(RangeSample::new(3.0, 100));

        assert!(!range_finder.pull_delayed_sample(&mut buffer, 50));
        assert!(!range_finder.is_data_ready());

        assert!(range_finder.pull_delayed_sample(&mut buffer, 100));
        assert!(range_finder.is_data_ready());
        assert_eq!(range_finder.delayed_rng(), 3.0);

        assert!(!range_finder.pull_delayed_sample(&mut buffer, 200));
        assert!(!range_finder.is_data_ready());
        assert_eq!(range_finder.delayed_rng(), 3.0);
    }

    #[test]
    fn repeated_checks_are_idempotent() {
        let mut range_finder = configured();
        for i in 1..=50u64 {
            fresh_cycle(&mut range_finder, i * PERIOD_US, 5.0 + (i % 3) as f32 * 0.2, true);
        }

        let now = 50 * PERIOD_US;
        let first = range_finder.status();
        let interval = range_finder.filtered_interval_us();
        range_finder.run_checks(now, &IDENTITY);
        assert_eq!(range_finder.status(), first);
        assert_eq!(range_finder.filtered_interval_us(), interval);
    }

    #[test]
    fn reconfigure_validates() {
        let mut range_finder = configured();
        let bad = RangeFinderConfig::default().with_limits(3.0, 1.0);
        assert!(range_finder.reconfigure(bad).is_err());
        assert_eq!(range_finder.valid_max_val(), 20.0);

        let good = RangeFinderConfig::default().with_limits(0.3, 8.0).with_tilt(0.2);
        assert!(range_finder.reconfigure(good).is_ok());
        assert_eq!(range_finder.valid_max_val(), 8.0);

        range_finder.run_checks(0, &pitch_rotation(-0.2));
        assert!((range_finder.r_to_earth() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn with_config_rejects_invalid() {
        let config = RangeFinderConfig::default().with_max_tilt_cos(-2.0);
        assert!(RangeFinder::with_config(config).is_err());

        let config = RangeFinderConfig::default().with_limits(0.1, 20.0);
        let range_finder = RangeFinder::with_config(config).unwrap();
        assert_eq!(range_finder.valid_min_val(), 0.1);
    }

    #[test]
    fn injected_policy_decides_failover() {
        let policy = PredicatePolicy::new(|s| s.healthy, |_| false);
        let mut range_finder = RangeFinder::with_policy(policy);
        range_finder.set_limits(0.1, 20.0);
        range_finder.set_tilt(0.0, 0.99);

        let sample = RangeSample::new(5.0, 1_000_000);
        range_finder.set_delayed_sample(sample);
        range_finder.set_validity(true);
        range_finder.run_checks(1_000_000, &pitch_rotation(0.5));

        // Tilted, but this deployment accepts it
        assert!(range_finder.can_be_used_as_failover());
        assert!(!range_finder.can_reset_on_sensor());
    }
}
