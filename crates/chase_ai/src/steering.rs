//! Planar steering primitives

use serde::{Deserialize, Serialize};

/// Output of a steering behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeringOutput {
    /// Linear force or acceleration
    pub linear: [f32; 3],
    /// Facing angle about Y, when the behavior has an opinion
    pub yaw: Option<f32>,
}

impl SteeringOutput {
    /// Zero output
    pub fn zero() -> Self {
        Self::default()
    }

    /// Seek `target` from `position` on the ground plane with a fixed force
    ///
    /// Returns zero when the target is closer than `epsilon`.
    pub fn seek(position: [f32; 3], target: [f32; 3], force: f32, epsilon: f32) -> Self {
        let dx = target[0] - position[0];
        let dz = target[2] - position[2];
        let distance = (dx * dx + dz * dz).sqrt();
        if distance <= epsilon {
            return Self::zero();
        }
        let dir = [dx / distance, 0.0, dz / distance];
        Self {
            linear: [dir[0] * force, 0.0, dir[2] * force],
            yaw: Some(facing_yaw(dir)),
        }
    }

    /// Get magnitude of linear component
    pub fn magnitude(&self) -> f32 {
        (self.linear[0].powi(2) + self.linear[1].powi(2) + self.linear[2].powi(2)).sqrt()
    }

    /// Scale the output
    pub fn scale(&mut self, factor: f32) {
        self.linear[0] *= factor;
        self.linear[1] *= factor;
        self.linear[2] *= factor;
    }
}

/// Yaw that points a model's +Z axis along `dir`
#[inline]
pub fn facing_yaw(dir: [f32; 3]) -> f32 {
    dir[0].atan2(dir[2])
}

/// Scale the XZ part of `velocity` down to `max_speed`, keeping direction and Y
pub fn clamp_planar_speed(velocity: [f32; 3], max_speed: f32) -> ([f32; 3], bool) {
    let speed = (velocity[0] * velocity[0] + velocity[2] * velocity[2]).sqrt();
    if speed <= max_speed || speed == 0.0 {
        return (velocity, false);
    }
    let s = max_speed / speed;
    ([velocity[0] * s, velocity[1], velocity[2] * s], true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_seek() {
        let out = SteeringOutput::seek([0.0, 1.0, 0.0], [10.0, 5.0, 0.0], 100.0, 0.01);
        assert_relative_eq!(out.linear[0], 100.0);
        assert_eq!(out.linear[1], 0.0, "seek is planar");
        assert_relative_eq!(out.yaw.unwrap(), std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_seek_within_epsilon() {
        let out = SteeringOutput::seek([0.0; 3], [0.001, 0.0, 0.0], 100.0, 0.01);
        assert_eq!(out, SteeringOutput::zero());
    }

    #[test]
    fn test_clamp_planar_speed() {
        let (v, clamped) = clamp_planar_speed([30.0, -2.0, 40.0], 10.0);
        assert!(clamped);
        assert_relative_eq!(v[0], 6.0);
        assert_relative_eq!(v[2], 8.0);
        assert_eq!(v[1], -2.0);

        let (v, clamped) = clamp_planar_speed([1.0, 0.0, 1.0], 10.0);
        assert!(!clamped);
        assert_eq!(v, [1.0, 0.0, 1.0]);
    }
}
