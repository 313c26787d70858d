//! Common test utilities for range finder integration tests
//!
//! Provides a 100 Hz estimator loop driver that feeds a [`RangeFinder`]
//! the way the capture layer and the estimator do on the vehicle, plus a
//! small deterministic noise source.

#![allow(dead_code)]

use rangeguard_core::{RangeFinder, RangeSample, RotationMatrix, Sensor, IDENTITY};

/// Estimator update period at 100 Hz (µs)
pub const PERIOD_US: u64 = 10_000;

/// Drives one evaluator through estimator cycles
pub struct CycleHarness {
    pub range_finder: RangeFinder,
    pub now_us: u64,
    pub attitude: RotationMatrix,
    pub healthy_cycles: u32,
}

impl CycleHarness {
    /// Evaluator with 0.1..20 m limits and a level vehicle, clock at 1 s
    pub fn new() -> Self {
        let mut range_finder = RangeFinder::new();
        range_finder.set_limits(0.1, 20.0);
        range_finder.set_tilt(0.0, 0.7071);

        Self {
            range_finder,
            now_us: 1_000_000,
            attitude: IDENTITY,
            healthy_cycles: 0,
        }
    }

    /// One cycle where a fresh sample reaches the fusion horizon
    pub fn fresh_cycle(&mut self, rng: f32) {
        self.now_us += PERIOD_US;
        let sample = RangeSample::new(rng, self.now_us);
        self.range_finder.set_newest_sample(sample);
        self.range_finder.set_delayed_sample(sample);
        self.finish_cycle();
    }

    /// One cycle where the sensor still reports but nothing is ready
    pub fn stale_cycle(&mut self, rng: f32) {
        self.now_us += PERIOD_US;
        self.range_finder
            .set_newest_sample(RangeSample::new(rng, self.now_us));
        self.range_finder.set_data_readiness(false);
        self.finish_cycle();
    }

    /// One cycle where the sensor is silent
    pub fn silent_cycle(&mut self) {
        self.now_us += PERIOD_US;
        self.range_finder.set_data_readiness(false);
        self.finish_cycle();
    }

    /// Run `seconds` of fresh cycles with the range produced by `rng_at`
    pub fn run_fresh(&mut self, seconds: f32, mut rng_at: impl FnMut(u32) -> f32) {
        for i in 0..cycles(seconds) {
            self.fresh_cycle(rng_at(i));
        }
    }

    fn finish_cycle(&mut self) {
        // External range-limit filter pushes its verdict every cycle
        self.range_finder.set_validity(true);
        self.range_finder.run_checks(self.now_us, &self.attitude);

        if self.range_finder.is_healthy() {
            self.healthy_cycles += 1;
        }
    }
}

/// Number of 100 Hz cycles in `seconds`
pub fn cycles(seconds: f32) -> u32 {
    (seconds * 100.0).round() as u32
}

/// Range oscillating 5.0 ± 0.5 m
pub fn oscillating(i: u32) -> f32 {
    if i % 2 == 0 { 4.5 } else { 5.5 }
}

/// Deterministic xorshift noise for repeatable tests
pub struct TestRng(u32);

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    /// Uniform value in [low, high)
    pub fn gen_range(&mut self, low: f32, high: f32) -> f32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        low + (high - low) * (self.0 as f32 / u32::MAX as f32)
    }
}
