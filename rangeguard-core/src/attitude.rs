//! Sensor geometry relative to the earth frame
//!
//! A range finder aimed away from vertical reads a slant distance, not a
//! height. The evaluator needs the cosine of the angle between the sensor
//! boresight and the earth Z axis, which is the (2,2) element of the
//! sensor-to-earth rotation.
//!
//! ## Derivation
//!
//! The sensor is mounted with a pitch offset `θ` about the body Y axis:
//!
//! ```text
//! R_sensor_to_body = | cos θ   0   sin θ |
//!                    |   0     1     0   |
//!                    | -sin θ  0   cos θ |
//!
//! R_sensor_to_earth = R_body_to_earth · R_sensor_to_body
//!
//! R_sensor_to_earth[2][2] = R[2][0]·sin θ + R[2][2]·cos θ
//! ```
//!
//! Only the bottom row of the body attitude is needed, so the full product
//! is never formed.

use libm::{cosf, fabsf, sinf};

use crate::constants::range::TILT_EPSILON_RAD;

/// Body-to-earth rotation matrix, row major
pub type RotationMatrix = [[f32; 3]; 3];

/// Level attitude
pub const IDENTITY: RotationMatrix = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Rotation about the body Y axis by `pitch_rad`
pub fn pitch_rotation(pitch_rad: f32) -> RotationMatrix {
    let (s, c) = (sinf(pitch_rad), cosf(pitch_rad));
    [
        [c, 0.0, s],
        [0.0, 1.0, 0.0],
        [-s, 0.0, c],
    ]
}

/// Rotation about the body X axis by `roll_rad`
pub fn roll_rotation(roll_rad: f32) -> RotationMatrix {
    let (s, c) = (sinf(roll_rad), cosf(roll_rad));
    [
        [1.0, 0.0, 0.0],
        [0.0, c, -s],
        [0.0, s, c],
    ]
}

/// Cached sensor mounting tilt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountingTilt {
    tilt_rad: f32,
    sin_tilt: f32,
    cos_tilt: f32,
}

impl Default for MountingTilt {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl MountingTilt {
    /// Mounting tilt about the body Y axis
    pub fn new(tilt_rad: f32) -> Self {
        Self {
            tilt_rad,
            sin_tilt: sinf(tilt_rad),
            cos_tilt: cosf(tilt_rad),
        }
    }

    /// Update the tilt, recomputing sine and cosine only on a real change
    ///
    /// Returns true when the trigonometric cache was refreshed.
    pub fn set(&mut self, tilt_rad: f32) -> bool {
        if fabsf(self.tilt_rad - tilt_rad) > TILT_EPSILON_RAD {
            *self = Self::new(tilt_rad);
            true
        } else {
            false
        }
    }

    /// Current tilt (rad)
    pub fn tilt_rad(&self) -> f32 {
        self.tilt_rad
    }

    /// Cosine of the angle between the sensor boresight and earth vertical
    #[inline]
    pub fn cos_to_earth(&self, r_to_earth: &RotationMatrix) -> f32 {
        r_to_earth[2][0] * self.sin_tilt + r_to_earth[2][2] * self.cos_tilt
    }
}
