//! Shared fixtures for world scenarios

#![allow(dead_code)]

use chase_core::HandleMap;
use chase_gamestate::{LevelTable, Role};
use chase_physics::{BodyDesc, BodyHandle, BodyKind, PhysicsBackend, PhysicsError};
use chase_services::BlockRecord;
use chase_world::prelude::*;
use std::collections::HashMap;

pub const DT: f32 = 1.0 / 60.0;

/// Frictionless point masses: no gravity, no collisions
///
/// Keeps scenarios exact where the rapier world would add settling noise.
#[derive(Default)]
pub struct PointMassWorld {
    bodies: HandleMap<BodyDesc>,
    motion: HashMap<BodyHandle, Motion>,
}

#[derive(Default, Clone, Copy)]
struct Motion {
    velocity: [f32; 3],
    force: [f32; 3],
}

impl PointMassWorld {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhysicsBackend for PointMassWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = self.bodies.insert(desc);
        self.motion.insert(handle, Motion::default());
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        self.motion.remove(&handle);
        self.bodies.remove(handle).is_some()
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    fn position(&self, handle: BodyHandle) -> Option<[f32; 3]> {
        self.bodies.get(handle).map(|b| b.position)
    }

    fn velocity(&self, handle: BodyHandle) -> Option<[f32; 3]> {
        self.motion.get(&handle).map(|m| m.velocity)
    }

    fn set_position(&mut self, handle: BodyHandle, position: [f32; 3]) -> chase_physics::Result<()> {
        let body = self.bodies.get_mut(handle).ok_or(PhysicsError::BodyNotFound(handle))?;
        body.position = position;
        Ok(())
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: [f32; 3]) -> chase_physics::Result<()> {
        let motion = self.motion.get_mut(&handle).ok_or(PhysicsError::BodyNotFound(handle))?;
        motion.velocity = velocity;
        Ok(())
    }

    fn set_yaw(&mut self, handle: BodyHandle, yaw: f32) -> chase_physics::Result<()> {
        let body = self.bodies.get_mut(handle).ok_or(PhysicsError::BodyNotFound(handle))?;
        body.yaw = yaw;
        Ok(())
    }

    fn apply_force(&mut self, handle: BodyHandle, force: [f32; 3]) -> chase_physics::Result<()> {
        let motion = self.motion.get_mut(&handle).ok_or(PhysicsError::BodyNotFound(handle))?;
        for axis in 0..3 {
            motion.force[axis] += force[axis];
        }
        Ok(())
    }

    fn freeze(&mut self, handle: BodyHandle) -> chase_physics::Result<()> {
        let motion = self.motion.get_mut(&handle).ok_or(PhysicsError::BodyNotFound(handle))?;
        *motion = Motion::default();
        Ok(())
    }

    fn step(&mut self, delta_time: f32) {
        let handles: Vec<BodyHandle> = self.bodies.iter().map(|(h, _)| h).collect();
        for handle in handles {
            let (Some(body), Some(motion)) = (self.bodies.get_mut(handle), self.motion.get_mut(&handle)) else {
                continue;
            };
            if body.kind != BodyKind::Dynamic {
                continue;
            }
            let mass = if body.mass > 0.0 { body.mass } else { 1.0 };
            let damping = 1.0 / (1.0 + delta_time * body.linear_damping);
            for axis in 0..3 {
                motion.velocity[axis] = (motion.velocity[axis] + motion.force[axis] / mass * delta_time) * damping;
                body.position[axis] += motion.velocity[axis] * delta_time;
            }
            motion.force = [0.0; 3];
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

pub type TestWorld = World<PointMassWorld, InMemoryScene>;

pub fn record(name: &str, x: f32, z: f32, role: Option<Role>) -> BlockRecord {
    BlockRecord {
        name: name.into(),
        x,
        y: 0.0,
        z,
        level: Some(1),
        role: role.map(|r| match r {
            Role::Ordinary => "default".to_string(),
            Role::FinalPrize => "finalPrize".to_string(),
        }),
    }
}

/// Two houses, two coins and a final prize
pub fn town_blocks() -> Vec<BlockRecord> {
    vec![
        record("house", 30.0, 30.0, None),
        record("house", -30.0, -30.0, None),
        record("coin1", 5.0, 0.0, None),
        record("coin2", -5.0, 0.0, None),
        record("prize", 0.0, 8.0, Some(Role::FinalPrize)),
    ]
}

/// Default table with level 1 cut down to `dynamic_target` and `enemies`
pub fn config(seed: u64, dynamic_target: u32, enemies: u32) -> WorldConfig {
    let mut levels = LevelTable::default();
    if let Some(level) = levels.get_mut(1) {
        level.dynamic_target = dynamic_target;
        level.enemy_count = enemies;
    }
    WorldConfig::default().with_seed(seed).with_levels(levels)
}

pub fn world(config: WorldConfig, blocks: Vec<BlockRecord>) -> TestWorld {
    let resources = ResourceSet::load(ResourceManifest::builtin(), ResourceSet::REQUIRED).unwrap();
    World::new(config, PointMassWorld::new(), InMemoryScene::new(), resources, blocks)
}

/// Tick for `seconds` of simulated time with no input
pub fn run(world: &mut TestWorld, seconds: f32) {
    let ticks = (seconds / DT).ceil() as usize;
    for _ in 0..ticks {
        world.tick(DT, PlayerInput::default());
    }
}

/// Put the player on `position`, moving, and tick once
pub fn step_onto(world: &mut TestWorld, position: [f32; 3]) {
    world.teleport_player(position, [1.0, 0.0, 0.0]).unwrap();
    world.tick(DT, PlayerInput::default());
}
