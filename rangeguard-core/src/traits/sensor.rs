//! Sensor Capability Contract
//!
//! Every aiding sensor the estimator can fuse exposes the same five
//! questions. The vehicle-wide arbitration logic picks a primary height
//! source and a failover using only these answers.
//!
//! ## Example Implementation
//!
//! ```rust
//! use rangeguard_core::Sensor;
//!
//! struct Barometer {
//!     fresh: bool,
//!     healthy: bool,
//! }
//!
//! impl Sensor for Barometer {
//!     fn is_healthy(&self) -> bool {
//!         self.healthy
//!     }
//!
//!     fn is_new_healthy_data(&self) -> bool {
//!         self.fresh && self.healthy
//!     }
//!
//!     fn is_delayed_healthy_data(&self) -> bool {
//!         self.fresh && self.healthy
//!     }
//!
//!     fn can_be_used_as_failover(&self) -> bool {
//!         self.healthy
//!     }
//!
//!     fn can_reset_on_sensor(&self) -> bool {
//!         self.healthy
//!     }
//! }
//! ```

/// Capability contract of an estimator aiding sensor
pub trait Sensor {
    /// Latest verdict says the sensor can be trusted
    fn is_healthy(&self) -> bool;

    /// Healthy data arrived this cycle
    fn is_new_healthy_data(&self) -> bool;

    /// Healthy data reached the fusion horizon this cycle
    fn is_delayed_healthy_data(&self) -> bool;

    /// Sensor may take over when the primary source fails
    fn can_be_used_as_failover(&self) -> bool;

    /// Estimator states may be reset onto this sensor's measurement
    fn can_reset_on_sensor(&self) -> bool;
}
