//! Trigger system - owns triggers and checks them against a tracked entity

use crate::events::TriggerEvent;
use crate::trigger::{Crossing, ProximityTrigger};
use std::collections::BTreeMap;

/// Registry of proximity triggers keyed by the entity that owns them
///
/// Iteration is in key order so that two triggers crossed in the same tick
/// always report in the same order.
#[derive(Default)]
pub struct TriggerSystem {
    triggers: BTreeMap<u64, ProximityTrigger>,
}

impl TriggerSystem {
    /// Create a new trigger system
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger, replacing any previous trigger for the entity
    pub fn register(&mut self, entity: u64, trigger: ProximityTrigger) {
        if self.triggers.insert(entity, trigger).is_some() {
            log::debug!("Replaced trigger for entity {}", entity);
        }
    }

    /// Unregister a trigger
    pub fn unregister(&mut self, entity: u64) -> Option<ProximityTrigger> {
        self.triggers.remove(&entity)
    }

    /// Get a trigger
    pub fn get(&self, entity: u64) -> Option<&ProximityTrigger> {
        self.triggers.get(&entity)
    }

    /// Get a trigger mutably
    pub fn get_mut(&mut self, entity: u64) -> Option<&mut ProximityTrigger> {
        self.triggers.get_mut(&entity)
    }

    pub fn contains(&self, entity: u64) -> bool {
        self.triggers.contains_key(&entity)
    }

    /// Number of registered triggers
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Check every trigger against the tracked entity
    pub fn update(&mut self, other: u64, position: [f32; 3], speed: f32) -> Vec<TriggerEvent> {
        let mut events = Vec::new();
        for (&id, trigger) in self.triggers.iter_mut() {
            match trigger.check(position, speed) {
                Crossing::Entered => events.push(TriggerEvent::enter(id, other, position)),
                Crossing::Exited => events.push(TriggerEvent::exit(id, other, position)),
                Crossing::None => {}
            }
        }
        events
    }

    /// Entities whose trigger contains a point, ignoring gates
    pub fn query_point(&self, point: [f32; 3]) -> Vec<u64> {
        self.triggers
            .iter()
            .filter(|(_, t)| t.volume.contains_point_at(t.center, point))
            .map(|(&id, _)| id)
            .collect()
    }

    /// Remove all triggers
    pub fn clear(&mut self) {
        self.triggers.clear();
    }
}
