//! Range Finder Health Example
//!
//! This example walks a downward lidar through a short flight and prints
//! how the evaluator judges it at each phase.
//!
//! ## What You'll Learn
//!
//! - Feeding newest and delay-buffered samples each estimator cycle
//! - Pushing the external range-limit verdict
//! - Reading the independent health, stuck and tilt predicates
//! - Using failover eligibility from the default policy
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_range_health
//! ```

use rangeguard_core::{
    attitude::pitch_rotation, RangeBuffer, RangeFinder, RangeFinderConfig, RangeSample,
    RotationMatrix, Sensor, IDENTITY,
};

const PERIOD_US: u64 = 10_000;
const DELAY_US: u64 = 30_000;

/// What the sensor does during one phase of the flight
#[derive(Clone, Copy)]
enum Sensing {
    /// Normal readings over uneven ground
    Terrain,
    /// Driver stops publishing
    Silent,
    /// Driver republishes its last register value
    Frozen {
        /// Readings pass the range-limit filter into the delay buffer
        accepted: bool,
    },
}

struct Phase {
    name: &'static str,
    seconds: u64,
    sensing: Sensing,
    attitude: RotationMatrix,
}

fn main() {
    println!("RangeGuard Range Finder Health Example");
    println!("======================================\n");

    let config = RangeFinderConfig::default()
        .with_limits(0.1, 20.0)
        .with_stuck_threshold(0.1)
        .with_max_tilt_cos(0.7071);

    let mut range_finder = match RangeFinder::with_config(config) {
        Ok(range_finder) => range_finder,
        Err(err) => {
            println!("Configuration rejected: {}", err);
            return;
        }
    };
    let mut buffer: RangeBuffer<8> = RangeBuffer::new();

    println!("Configuration:");
    println!("  Limits: {} .. {} m", range_finder.valid_min_val(), range_finder.valid_max_val());
    println!("  Stuck threshold: {} m", config.stuck_threshold_m);
    println!("  Max tilt cosine: {}", config.cos_max_tilt);
    println!();

    let phases = [
        Phase { name: "Cruise", seconds: 3, sensing: Sensing::Terrain, attitude: IDENTITY },
        Phase { name: "Steep bank", seconds: 1, sensing: Sensing::Terrain, attitude: pitch_rotation(1.0) },
        Phase { name: "Dropout", seconds: 3, sensing: Sensing::Silent, attitude: IDENTITY },
        Phase { name: "Frozen driver", seconds: 11, sensing: Sensing::Frozen { accepted: false }, attitude: IDENTITY },
        Phase { name: "Frozen, accepted", seconds: 1, sensing: Sensing::Frozen { accepted: true }, attitude: IDENTITY },
        Phase { name: "Recovery", seconds: 3, sensing: Sensing::Terrain, attitude: IDENTITY },
    ];

    let mut now: u64 = 1_000_000;
    let mut frozen_reported = false;
    let mut last_reading = 0.0;

    for phase in &phases {
        let mut new_healthy = 0;
        let cycles = phase.seconds * 100;

        for i in 0..cycles {
            now += PERIOD_US;

            let (reading, accepted) = match phase.sensing {
                Sensing::Terrain => (Some(5.0 + 0.3 * ((i % 20) as f32 / 10.0 - 1.0)), true),
                Sensing::Silent => (None, false),
                Sensing::Frozen { accepted } => (Some(last_reading), accepted),
            };

            if let Some(rng) = reading {
                last_reading = rng;
                let sample = RangeSample::new(rng, now);
                range_finder.set_newest_sample(sample);

                if accepted {
                    buffer.push(sample);
                }
            }

            let horizon = now - DELAY_US;
            range_finder.pull_delayed_sample(&mut buffer, horizon);
            range_finder.set_validity(range_finder.is_data_in_range());
            range_finder.run_checks(horizon, &phase.attitude);

            if range_finder.is_new_healthy_data() {
                new_healthy += 1;
            }
            if range_finder.is_stuck() && !frozen_reported {
                println!("  ! stuck declared at t={:.2}s", now as f64 / 1e6);
                frozen_reported = true;
            }
        }

        let status = range_finder.status();
        println!("{} ({} s):", phase.name, phase.seconds);
        println!("  State: {}", status.state());
        println!("  New healthy samples: {}/{}", new_healthy, cycles);
        println!("  Continuous: {}", status.continuous);
        println!("  Tilt ok: {} (cos to earth {:.3})", status.tilt_ok, range_finder.r_to_earth());
        println!("  Stuck: {}", status.stuck);
        println!("  Filtered interval: {:.0} us", range_finder.filtered_interval_us());
        println!("  Usable as failover: {}", range_finder.can_be_used_as_failover());
        println!();
    }

    println!("Summary:");
    println!("  Health, stuck and tilt are independent; fusion decides how to combine them.");
    println!("  Continuity recovers gradually after long dropouts.");
}
