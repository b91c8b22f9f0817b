//! Player steering

use crate::config::PlayerConfig;
use chase_ai::steering::facing_yaw;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Angle in `[-PI, PI)`
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Input for one tick, each axis in `[-1, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Positive moves along the heading
    pub forward: f32,
    /// Positive turns toward +X
    pub turn: f32,
}

impl PlayerInput {
    pub fn new(forward: f32, turn: f32) -> Self {
        Self {
            forward: forward.clamp(-1.0, 1.0),
            turn: turn.clamp(-1.0, 1.0),
        }
    }

    /// Input that steers `heading` toward `target` from `position`
    pub fn toward(position: [f32; 3], heading: f32, target: [f32; 3]) -> Self {
        let dir = [target[0] - position[0], 0.0, target[2] - position[2]];
        let desired = facing_yaw(dir);
        let diff = wrap_angle(desired - heading);
        // Slow down while facing away so the turn tightens
        let forward = if diff.abs() > FRAC_PI_2 { 0.2 } else { 1.0 };
        Self::new(forward, diff * 4.0)
    }
}

/// Heading and force for the player body
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,
    heading: f32,
}

impl PlayerController {
    pub fn new(config: PlayerConfig) -> Self {
        Self { config, heading: 0.0 }
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Turn, then return the planar force along the new heading
    pub fn apply(&mut self, input: PlayerInput, delta_time: f32) -> [f32; 3] {
        let turn = input.turn.clamp(-1.0, 1.0) * self.config.turn_rate * delta_time;
        self.heading = wrap_angle(self.heading + turn);
        let push = input.forward.clamp(-1.0, 1.0) * self.config.move_force;
        [self.heading.sin() * push, 0.0, self.heading.cos() * push]
    }

    pub fn reset(&mut self) {
        self.heading = 0.0;
    }
}
