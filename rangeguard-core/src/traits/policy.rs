//! Failover and Reset Eligibility
//!
//! Whether a range finder may take over as the height source, or be used to
//! reset the height state, depends on the airframe and the other sensors on
//! board. The evaluator does not decide this itself: it hands its
//! [`RangeStatus`] to a policy supplied by the integrator.
//!
//! ```rust
//! use rangeguard_core::{PredicatePolicy, RangeFinder, RangeStatus};
//!
//! // Indoor vehicle: accept tilted readings, never reset on a frozen sensor
//! fn failover(status: &RangeStatus) -> bool {
//!     status.healthy && !status.stuck
//! }
//!
//! fn reset(status: &RangeStatus) -> bool {
//!     status.is_new_healthy_data() && !status.stuck
//! }
//!
//! let range_finder = RangeFinder::with_policy(PredicatePolicy::new(failover, reset));
//! ```

use crate::status::RangeStatus;

/// Decides failover and reset eligibility from the evaluator flags
pub trait HealthPolicy {
    /// Sensor may take over as the height source
    fn can_be_used_as_failover(&self, status: &RangeStatus) -> bool;

    /// Height state may be reset onto the current measurement
    fn can_reset_on_sensor(&self, status: &RangeStatus) -> bool;
}

/// Conservative policy: every check must pass
///
/// Failover needs a healthy, unstuck, near-vertical sensor. Reset also needs
/// the measurement to be fresh this cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictPolicy;

impl HealthPolicy for StrictPolicy {
    fn can_be_used_as_failover(&self, status: &RangeStatus) -> bool {
        status.healthy && !status.stuck && status.tilt_ok
    }

    fn can_reset_on_sensor(&self, status: &RangeStatus) -> bool {
        status.is_new_healthy_data() && !status.stuck && status.tilt_ok
    }
}

/// Policy built from two plain predicates
#[derive(Clone, Copy)]
pub struct PredicatePolicy {
    failover: fn(&RangeStatus) -> bool,
    reset: fn(&RangeStatus) -> bool,
}

impl PredicatePolicy {
    /// Use `failover` and `reset` as the eligibility rules
    pub const fn new(
        failover: fn(&RangeStatus) -> bool,
        reset: fn(&RangeStatus) -> bool,
    ) -> Self {
        Self { failover, reset }
    }
}

impl core::fmt::Debug for PredicatePolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PredicatePolicy").finish_non_exhaustive()
    }
}

impl HealthPolicy for PredicatePolicy {
    fn can_be_used_as_failover(&self, status: &RangeStatus) -> bool {
        (self.failover)(status)
    }

    fn can_reset_on_sensor(&self, status: &RangeStatus) -> bool {
        (self.reset)(status)
    }
}
