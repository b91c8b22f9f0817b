//! Proximity trigger

use crate::volume::TriggerVolume;
use serde::{Deserialize, Serialize};

/// Trigger behavior mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerMode {
    /// Fire on every entry
    #[default]
    Repeatable,
    /// Fire once total, then disable
    OneShot,
}

/// Result of checking one tracked point against a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Nothing changed
    None,
    /// The point entered with the speed gate satisfied
    Entered,
    /// The point left the volume
    Exited,
}

/// A volume placed in the world that watches a single tracked point
#[derive(Debug, Clone)]
pub struct ProximityTrigger {
    /// Volume shape
    pub volume: TriggerVolume,
    /// World position of the volume's center
    pub center: [f32; 3],
    /// Trigger mode
    pub mode: TriggerMode,
    /// The tracked entity must move faster than this for entry to count
    pub min_speed: f32,
    /// Whether the trigger is enabled
    pub enabled: bool,
    /// Inside the volume with the gate satisfied since the last entry
    active: bool,
    has_fired: bool,
    /// Total trigger activations
    pub activation_count: u32,
}

impl ProximityTrigger {
    /// Create a new trigger
    pub fn new(volume: TriggerVolume, center: [f32; 3]) -> Self {
        Self {
            volume,
            center,
            mode: TriggerMode::Repeatable,
            min_speed: 0.0,
            enabled: true,
            active: false,
            has_fired: false,
            activation_count: 0,
        }
    }

    /// Set mode
    pub fn with_mode(mut self, mode: TriggerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Require the tracked entity to move faster than `speed`
    pub fn with_min_speed(mut self, speed: f32) -> Self {
        self.min_speed = speed;
        self
    }

    /// One-shot triggers stay spent after firing
    pub fn has_fired(&self) -> bool {
        self.has_fired
    }

    /// Check a point moving at `speed`
    pub fn check(&mut self, point: [f32; 3], speed: f32) -> Crossing {
        if !self.enabled {
            return Crossing::None;
        }

        let inside = self.volume.contains_point_at(self.center, point);
        if !inside {
            if self.active {
                self.active = false;
                return Crossing::Exited;
            }
            return Crossing::None;
        }

        if self.active || speed <= self.min_speed {
            return Crossing::None;
        }

        self.active = true;
        self.activation_count += 1;
        if self.mode == TriggerMode::OneShot {
            self.has_fired = true;
            self.enabled = false;
        }
        Crossing::Entered
    }

    /// Forget overlap state and re-enable
    pub fn reset(&mut self) {
        self.active = false;
        self.has_fired = false;
        self.enabled = true;
    }
}
