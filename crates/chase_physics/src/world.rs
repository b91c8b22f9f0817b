//! Physics world - Rapier-backed simulation container

use crate::backend::{BodyHandle, ContactPair, PhysicsBackend};
use crate::body::{BodyDesc, BodyKind};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use chase_core::HandleAllocator;
use rapier3d::na::{UnitQuaternion, Vector3};
use rapier3d::prelude as rapier;
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    config: PhysicsConfig,
    pipeline: rapier::PhysicsPipeline,
    gravity: rapier::Vector<f32>,
    integration_params: rapier::IntegrationParameters,
    islands: rapier::IslandManager,
    broad_phase: rapier::DefaultBroadPhase,
    narrow_phase: rapier::NarrowPhase,
    impulse_joints: rapier::ImpulseJointSet,
    multibody_joints: rapier::MultibodyJointSet,
    ccd_solver: rapier::CCDSolver,
    bodies: rapier::RigidBodySet,
    colliders: rapier::ColliderSet,

    /// Stable handles handed to the game, mapped onto Rapier's
    handles: HandleAllocator<BodyDesc>,
    body_map: HashMap<BodyHandle, rapier::RigidBodyHandle>,

    /// Contacts started since the last drain
    contacts: Vec<ContactPair>,

    /// Accumulated time for fixed timestep
    accumulated_time: f32,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new(config: PhysicsConfig) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("{}; falling back to default physics config", e);
            return Self::new(PhysicsConfig::default());
        }

        let gravity = rapier::Vector::new(config.gravity[0], config.gravity[1], config.gravity[2]);

        let mut integration_params = rapier::IntegrationParameters::default();
        integration_params.dt = config.timestep;
        integration_params.num_solver_iterations =
            NonZeroUsize::new(config.velocity_iterations).unwrap_or(NonZeroUsize::MIN);

        Self {
            config,
            pipeline: rapier::PhysicsPipeline::new(),
            gravity,
            integration_params,
            islands: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            impulse_joints: rapier::ImpulseJointSet::new(),
            multibody_joints: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            handles: HandleAllocator::new(),
            body_map: HashMap::new(),
            contacts: Vec::new(),
            accumulated_time: 0.0,
        }
    }

    /// Get the physics configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Get gravity
    pub fn gravity(&self) -> [f32; 3] {
        [self.gravity.x, self.gravity.y, self.gravity.z]
    }

    /// Get number of colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn raw(&self, handle: BodyHandle) -> Result<rapier::RigidBodyHandle> {
        self.body_map
            .get(&handle)
            .copied()
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    fn body(&self, handle: BodyHandle) -> Option<&rapier::RigidBody> {
        let raw = self.body_map.get(&handle)?;
        self.bodies.get(*raw)
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut rapier::RigidBody> {
        let raw = self.raw(handle)?;
        self.bodies
            .get_mut(raw)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Internal fixed timestep
    fn step_internal(&mut self) {
        let (collision_send, collision_recv) = crossbeam_channel::unbounded();
        let event_handler = ContactCollector {
            collision_events: collision_send,
        };

        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &event_handler,
        );

        while let Ok(event) = collision_recv.try_recv() {
            if let rapier::CollisionEvent::Started(h1, h2, _) = event {
                let user_data1 = self.colliders.get(h1).map(|c| c.user_data).unwrap_or(0);
                let user_data2 = self.colliders.get(h2).map(|c| c.user_data).unwrap_or(0);
                self.contacts.push(ContactPair {
                    user_data1,
                    user_data2,
                });
            }
        }
    }
}

impl PhysicsBackend for PhysicsWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let body = self
            .bodies
            .insert(desc.to_rapier_body(self.config.ccd_enabled));

        let mut collider = desc.to_rapier_collider();
        if desc.kind == BodyKind::Dynamic {
            collider = collider.active_events(rapier::ActiveEvents::COLLISION_EVENTS);
        }
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        let handle = self.handles.allocate();
        self.body_map.insert(handle, body);
        log::trace!("Added {:?} body {:?} at {:?}", desc.kind, handle, desc.position);
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        let Some(raw) = self.body_map.remove(&handle) else {
            return false;
        };
        self.handles.free(handle);
        self.bodies
            .remove(
                raw,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true, // Remove attached colliders
            )
            .is_some()
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        self.body_map.contains_key(&handle)
    }

    fn position(&self, handle: BodyHandle) -> Option<[f32; 3]> {
        self.body(handle).map(|b| {
            let pos = b.translation();
            [pos.x, pos.y, pos.z]
        })
    }

    fn velocity(&self, handle: BodyHandle) -> Option<[f32; 3]> {
        self.body(handle).map(|b| {
            let vel = b.linvel();
            [vel.x, vel.y, vel.z]
        })
    }

    fn set_position(&mut self, handle: BodyHandle, position: [f32; 3]) -> Result<()> {
        let b = self.body_mut(handle)?;
        let [x, y, z] = position;
        if b.body_type() == rapier::RigidBodyType::KinematicPositionBased {
            let rotation = *b.rotation();
            b.set_next_kinematic_position(rapier::Isometry::from_parts(
                rapier::Translation::new(x, y, z),
                rotation,
            ));
        }
        b.set_translation(rapier::Vector::new(x, y, z), true);
        Ok(())
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: [f32; 3]) -> Result<()> {
        let b = self.body_mut(handle)?;
        b.set_linvel(rapier::Vector::new(velocity[0], velocity[1], velocity[2]), true);
        Ok(())
    }

    fn set_yaw(&mut self, handle: BodyHandle, yaw: f32) -> Result<()> {
        let b = self.body_mut(handle)?;
        b.set_rotation(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw), true);
        Ok(())
    }

    fn apply_force(&mut self, handle: BodyHandle, force: [f32; 3]) -> Result<()> {
        let b = self.body_mut(handle)?;
        b.add_force(rapier::Vector::new(force[0], force[1], force[2]), true);
        Ok(())
    }

    fn freeze(&mut self, handle: BodyHandle) -> Result<()> {
        let b = self.body_mut(handle)?;
        b.reset_forces(false);
        b.set_linvel(rapier::Vector::zeros(), false);
        b.set_angvel(rapier::Vector::zeros(), false);
        Ok(())
    }

    fn step(&mut self, delta_time: f32) {
        self.accumulated_time += delta_time;

        let mut steps = 0;
        while self.accumulated_time >= self.config.timestep && steps < self.config.max_substeps {
            self.step_internal();
            self.accumulated_time -= self.config.timestep;
            steps += 1;
        }

        if steps == self.config.max_substeps && self.accumulated_time >= self.config.timestep {
            // Spiral of death guard: drop the backlog
            log::debug!("Physics fell behind by {:.3}s; dropping backlog", self.accumulated_time);
            self.accumulated_time = 0.0;
        }

        // Forces act for one frame, like an impulse spread over the step
        if steps > 0 {
            for (_, body) in self.bodies.iter_mut() {
                body.reset_forces(false);
            }
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn drain_contacts(&mut self) -> Vec<ContactPair> {
        std::mem::take(&mut self.contacts)
    }
}

/// Forwards Rapier collision events over a channel
struct ContactCollector {
    collision_events: crossbeam_channel::Sender<rapier::CollisionEvent>,
}

impl rapier::EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &rapier::RigidBodySet,
        _colliders: &rapier::ColliderSet,
        event: rapier::CollisionEvent,
        _contact_pair: Option<&rapier::ContactPair>,
    ) {
        let _ = self.collision_events.send(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &rapier::RigidBodySet,
        _colliders: &rapier::ColliderSet,
        _contact_pair: &rapier::ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::ColliderShape;

    fn floor(world: &mut PhysicsWorld) -> BodyHandle {
        world.add_body(
            BodyDesc::fixed(ColliderShape::cuboid(50.0, 0.5, 50.0)).with_position(0.0, -0.5, 0.0),
        )
    }

    #[test]
    fn test_create_world() {
        let world = PhysicsWorld::new(PhysicsConfig::default());
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);
    }

    #[test]
    fn test_add_and_remove_body() {
        let mut world = PhysicsWorld::default();
        let body = world.add_body(BodyDesc::dynamic(ColliderShape::sphere(0.4)).with_position(0.0, 1.0, 0.0));
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 1);

        assert!(world.remove_body(body));
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);

        // Stale handle
        assert!(!world.remove_body(body));
        assert!(world.position(body).is_none());
        assert!(world.apply_force(body, [1.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_gravity_fall() {
        let mut world = PhysicsWorld::default();
        let body = world.add_body(BodyDesc::dynamic(ColliderShape::sphere(1.0)).with_position(0.0, 10.0, 0.0));
        let initial_y = world.position(body).unwrap()[1];

        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }

        let final_y = world.position(body).unwrap()[1];
        assert!(final_y < initial_y, "Body should fall due to gravity");
    }

    #[test]
    fn test_force_moves_body_on_floor() {
        let mut world = PhysicsWorld::default();
        floor(&mut world);
        let ball = world.add_body(
            BodyDesc::dynamic(ColliderShape::sphere(0.4))
                .with_position(0.0, 0.4, 0.0)
                .with_mass(2.0)
                .with_locked_tilt(),
        );

        for _ in 0..30 {
            world.apply_force(ball, [40.0, 0.0, 0.0]).unwrap();
            world.step(1.0 / 60.0);
        }

        let pos = world.position(ball).unwrap();
        assert!(pos[0] > 0.5, "ball should have moved along +X, got {:?}", pos);
    }

    #[test]
    fn test_freeze_zeroes_velocity() {
        let mut world = PhysicsWorld::default();
        let ball = world.add_body(BodyDesc::dynamic(ColliderShape::sphere(0.4)).with_position(0.0, 5.0, 0.0));
        world.set_velocity(ball, [3.0, 0.0, 4.0]).unwrap();
        world.freeze(ball).unwrap();
        assert_eq!(world.velocity(ball).unwrap(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_fixed_body_stays_put() {
        let mut world = PhysicsWorld::default();
        let wall = world.add_body(BodyDesc::new(ColliderShape::cuboid(1.0, 1.0, 1.0), 0.0, [3.0, 1.0, 3.0], false));
        for _ in 0..30 {
            world.step(1.0 / 60.0);
        }
        assert_eq!(world.position(wall).unwrap(), [3.0, 1.0, 3.0]);
    }
}
