//! Pursuit controller: seek the target, cap speed, decay when out of range

use crate::steering::{clamp_planar_speed, SteeringOutput};
use chase_core::math::{distance, planar_distance};
use serde::{Deserialize, Serialize};

/// Tuning for pursuing enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    /// Planar speed cap
    pub max_speed: f32,
    /// Pursue only while the target is closer than this
    pub chase_range: f32,
    /// Seek force is `max_speed * force_factor`
    pub force_factor: f32,
    /// Velocity multiplier per tick while out of range
    pub decay: f32,
    /// Below this planar speed the enemy counts as stopped
    pub stop_threshold: f32,
    /// Targets closer than this are not steered toward
    pub epsilon: f32,
    /// Only re-face when farther than this
    pub face_min_distance: f32,
    /// Collision sphere of the enemy
    pub body_radius: f32,
    /// Multiplier on the sum of radii for contact detection (> 1)
    pub collision_margin: f32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            max_speed: 10.0,
            chase_range: 300.0,
            force_factor: 10.0,
            decay: 0.95,
            stop_threshold: 0.5,
            epsilon: 0.01,
            face_min_distance: 0.1,
            body_radius: 0.4,
            collision_margin: 1.5,
        }
    }
}

impl PursuitConfig {
    pub fn with_chase_range(mut self, range: f32) -> Self {
        self.chase_range = range;
        self
    }

    /// Distance under which the enemy touches a target of `target_radius`
    pub fn contact_distance(&self, target_radius: f32) -> f32 {
        (self.body_radius + target_radius) * self.collision_margin
    }
}

/// Animation-facing motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    Idle,
    Moving,
}

/// What the caller should apply to the enemy body this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PursuitCommand {
    /// Force to add before the next physics step
    pub force: Option<[f32; 3]>,
    /// Velocity override (capped or decayed)
    pub velocity: Option<[f32; 3]>,
    /// New facing yaw
    pub yaw: Option<f32>,
    pub motion: MotionState,
}

/// Per-enemy pursuit state
#[derive(Debug, Clone)]
pub struct PursuitController {
    config: PursuitConfig,
    motion: MotionState,
    yaw: f32,
    in_contact: bool,
}

impl PursuitController {
    pub fn new(config: PursuitConfig) -> Self {
        Self {
            config,
            motion: MotionState::Idle,
            yaw: 0.0,
            in_contact: false,
        }
    }

    pub fn config(&self) -> &PursuitConfig {
        &self.config
    }

    pub fn motion(&self) -> MotionState {
        self.motion
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// One tick of pursuit
    pub fn update(&mut self, position: [f32; 3], velocity: [f32; 3], target: [f32; 3]) -> PursuitCommand {
        let cfg = &self.config;
        let dist = planar_distance(position, target);
        let mut cmd = PursuitCommand::default();

        if dist < cfg.chase_range && dist > cfg.epsilon {
            let steer = SteeringOutput::seek(position, target, cfg.max_speed * cfg.force_factor, cfg.epsilon);
            cmd.force = Some(steer.linear);

            let (capped, clamped) = clamp_planar_speed(velocity, cfg.max_speed);
            if clamped {
                cmd.velocity = Some(capped);
            }

            if dist > cfg.face_min_distance {
                if let Some(yaw) = steer.yaw {
                    self.yaw = yaw;
                    cmd.yaw = Some(yaw);
                }
            }
            self.motion = MotionState::Moving;
        } else if dist >= cfg.chase_range {
            let decayed = [velocity[0] * cfg.decay, velocity[1], velocity[2] * cfg.decay];
            cmd.velocity = Some(decayed);
            let speed = (decayed[0] * decayed[0] + decayed[2] * decayed[2]).sqrt();
            if speed < cfg.stop_threshold {
                self.motion = MotionState::Idle;
            }
        }

        cmd.motion = self.motion;
        cmd
    }

    /// Whether the enemy is touching the target right now
    pub fn is_touching(&self, position: [f32; 3], target: [f32; 3], target_radius: f32) -> bool {
        distance(position, target) < self.config.contact_distance(target_radius)
    }

    /// Reports a contact once, on the tick it begins
    ///
    /// `body_contact` is a contact the physics step reported between the two
    /// bodies; it counts even when the sampled positions are apart. Stays
    /// quiet while the contact persists; separating re-arms it.
    pub fn check_collision_with_target(
        &mut self,
        position: [f32; 3],
        target: [f32; 3],
        target_radius: f32,
        body_contact: bool,
    ) -> bool {
        let touching = body_contact || self.is_touching(position, target, target_radius);
        let began = touching && !self.in_contact;
        self.in_contact = touching;
        began
    }
}

impl Default for PursuitController {
    fn default() -> Self {
        Self::new(PursuitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_chase_applies_force_toward_target() {
        let mut ctl = PursuitController::default();
        let cmd = ctl.update([0.0, 0.4, 0.0], [0.0; 3], [0.0, 0.4, 50.0]);
        let force = cmd.force.unwrap();
        assert_relative_eq!(force[2], 100.0);
        assert_relative_eq!(force[0], 0.0);
        assert_relative_eq!(cmd.yaw.unwrap(), 0.0);
        assert_eq!(cmd.motion, MotionState::Moving);
        assert!(cmd.velocity.is_none());
    }

    #[test]
    fn test_speed_is_capped() {
        let mut ctl = PursuitController::default();
        let cmd = ctl.update([0.0; 3], [12.0, 0.0, 16.0], [100.0, 0.0, 0.0]);
        let v = cmd.velocity.unwrap();
        assert_relative_eq!((v[0] * v[0] + v[2] * v[2]).sqrt(), 10.0, epsilon = 1e-4);
        // direction preserved
        assert_relative_eq!(v[0] / v[2], 0.75, epsilon = 1e-4);
    }

    #[test]
    fn test_out_of_range_decays_instead_of_stopping() {
        let mut ctl = PursuitController::new(PursuitConfig::default().with_chase_range(20.0));
        ctl.update([0.0; 3], [0.0; 3], [5.0, 0.0, 0.0]);
        assert_eq!(ctl.motion(), MotionState::Moving);

        let cmd = ctl.update([0.0; 3], [4.0, 0.0, 0.0], [50.0, 0.0, 0.0]);
        assert!(cmd.force.is_none());
        assert_relative_eq!(cmd.velocity.unwrap()[0], 3.8);
        assert_eq!(cmd.motion, MotionState::Moving, "still coasting");

        let cmd = ctl.update([0.0; 3], [0.5, 0.0, 0.0], [50.0, 0.0, 0.0]);
        assert_eq!(cmd.motion, MotionState::Idle);
    }

    #[test]
    fn test_collision_reported_once() {
        let mut ctl = PursuitController::default();
        let target = [0.0, 0.4, 0.0];
        // contact distance is (0.4 + 0.4) * 1.5 = 1.2
        assert!(!ctl.check_collision_with_target([1.3, 0.4, 0.0], target, 0.4, false));
        assert!(ctl.check_collision_with_target([1.1, 0.4, 0.0], target, 0.4, false));
        assert!(!ctl.check_collision_with_target([1.0, 0.4, 0.0], target, 0.4, false));
        assert!(!ctl.check_collision_with_target([3.0, 0.4, 0.0], target, 0.4, false));
        assert!(ctl.check_collision_with_target([0.5, 0.4, 0.0], target, 0.4, false));
    }

    #[test]
    fn test_body_contact_counts_when_apart() {
        let mut ctl = PursuitController::default();
        let target = [0.0, 0.4, 0.0];
        assert!(ctl.check_collision_with_target([5.0, 0.4, 0.0], target, 0.4, true));
        assert!(!ctl.check_collision_with_target([5.0, 0.4, 0.0], target, 0.4, true));
        assert!(!ctl.check_collision_with_target([5.0, 0.4, 0.0], target, 0.4, false));
        assert!(ctl.check_collision_with_target([5.0, 0.4, 0.0], target, 0.4, true));
    }
}
