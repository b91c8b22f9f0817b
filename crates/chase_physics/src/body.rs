//! Rigid body descriptions

use crate::collider::ColliderShape;
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// How a body moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// Never moves, infinite mass
    Fixed,
    /// Fully simulated
    #[default]
    Dynamic,
    /// Moved by the game, pushes dynamic bodies, is never pushed back
    Kinematic,
}

impl From<BodyKind> for rapier::RigidBodyType {
    fn from(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Fixed => rapier::RigidBodyType::Fixed,
            BodyKind::Dynamic => rapier::RigidBodyType::Dynamic,
            BodyKind::Kinematic => rapier::RigidBodyType::KinematicPositionBased,
        }
    }
}

/// Description for creating a body together with its single collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Type of rigid body
    pub kind: BodyKind,
    /// Collision shape
    pub shape: ColliderShape,
    /// Initial position
    pub position: [f32; 3],
    /// Initial rotation about the Y axis (radians)
    pub yaw: f32,
    /// Mass; ignored for fixed and kinematic bodies
    pub mass: f32,
    /// Linear damping (air resistance)
    pub linear_damping: f32,
    /// Angular damping (rotational resistance)
    pub angular_damping: f32,
    /// Allow rotation about the Y axis only
    pub lock_tilt: bool,
    /// Surface friction
    pub friction: f32,
    /// Sensors report overlap but never collide
    pub is_sensor: bool,
    /// Entity id stored on the collider
    pub user_data: u128,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            kind: BodyKind::Dynamic,
            shape: ColliderShape::default(),
            position: [0.0, 0.0, 0.0],
            yaw: 0.0,
            mass: 1.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            lock_tilt: false,
            friction: 0.5,
            is_sensor: false,
            user_data: 0,
        }
    }
}

impl BodyDesc {
    /// Body from the minimal contract: zero mass means immovable, and an
    /// immovable body is either kinematic or fixed
    pub fn new(shape: ColliderShape, mass: f32, position: [f32; 3], kinematic: bool) -> Self {
        let kind = match (mass > 0.0, kinematic) {
            (_, true) => BodyKind::Kinematic,
            (true, false) => BodyKind::Dynamic,
            (false, false) => BodyKind::Fixed,
        };
        Self {
            kind,
            shape,
            position,
            mass: mass.max(0.0),
            ..Default::default()
        }
    }

    /// Fixed scenery
    pub fn fixed(shape: ColliderShape) -> Self {
        Self {
            kind: BodyKind::Fixed,
            shape,
            mass: 0.0,
            ..Default::default()
        }
    }

    /// Simulated body
    pub fn dynamic(shape: ColliderShape) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            shape,
            ..Default::default()
        }
    }

    /// Game-driven body
    pub fn kinematic(shape: ColliderShape) -> Self {
        Self {
            kind: BodyKind::Kinematic,
            shape,
            mass: 0.0,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Only spin about Y (characters, enemies)
    pub fn with_locked_tilt(mut self) -> Self {
        self.lock_tilt = true;
        self
    }

    pub fn with_user_data(mut self, data: u128) -> Self {
        self.user_data = data;
        self
    }

    pub(crate) fn to_rapier_body(&self, ccd: bool) -> rapier::RigidBodyBuilder {
        let mut builder = rapier::RigidBodyBuilder::new(self.kind.into())
            .translation(rapier::Vector::new(
                self.position[0],
                self.position[1],
                self.position[2],
            ))
            .rotation(rapier::Vector::new(0.0, self.yaw, 0.0))
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .ccd_enabled(ccd && self.kind == BodyKind::Dynamic)
            .user_data(self.user_data);

        if self.lock_tilt {
            builder = builder
                .locked_axes(rapier::LockedAxes::ROTATION_LOCKED_X | rapier::LockedAxes::ROTATION_LOCKED_Z);
        }

        builder
    }

    pub(crate) fn to_rapier_collider(&self) -> rapier::ColliderBuilder {
        let mut builder = rapier::ColliderBuilder::new(self.shape.to_rapier())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(0.0)
            .user_data(self.user_data);

        if self.kind == BodyKind::Dynamic {
            // Contacts are reported only for moving bodies
            builder = builder.active_events(rapier::ActiveEvents::COLLISION_EVENTS);
            if self.mass > 0.0 {
                builder = builder.mass(self.mass);
            }
        }

        builder
    }
}
