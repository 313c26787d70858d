//! Core Traits
//!
//! - [`sensor`] - capability contract shared by every estimator aiding sensor
//! - [`policy`] - deployment-specific failover and reset eligibility
//!
//! Range finders, optical flow and GPS each own their validity policy; the
//! estimator only talks to them through [`Sensor`].

pub mod policy;
pub mod sensor;

pub use policy::{HealthPolicy, PredicatePolicy, StrictPolicy};
pub use sensor::Sensor;
