//! Collision shapes

use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Collision shape attached to a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Sphere with radius
    Sphere { radius: f32 },
    /// Box with half-extents
    Box { half_extents: [f32; 3] },
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Sphere { radius: 0.5 }
    }
}

impl ColliderShape {
    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Create a box shape from half extents
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: [hx, hy, hz],
        }
    }

    /// Create a box shape from full size
    pub fn from_size(width: f32, height: f32, depth: f32) -> Self {
        Self::cuboid(width * 0.5, height * 0.5, depth * 0.5)
    }

    /// Radius of the smallest ground-plane circle around the shape
    pub fn planar_radius(&self) -> f32 {
        match self {
            Self::Sphere { radius } => *radius,
            Self::Box { half_extents } => {
                (half_extents[0] * half_extents[0] + half_extents[2] * half_extents[2]).sqrt()
            }
        }
    }

    /// Degenerate shapes make Rapier produce NaNs; callers check this first
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Sphere { radius } => radius.is_finite() && *radius > 0.0,
            Self::Box { half_extents } => half_extents.iter().all(|h| h.is_finite() && *h > 0.0),
        }
    }

    pub(crate) fn to_rapier(&self) -> rapier::SharedShape {
        match self {
            Self::Sphere { radius } => rapier::SharedShape::ball(*radius),
            Self::Box { half_extents } => {
                rapier::SharedShape::cuboid(half_extents[0], half_extents[1], half_extents[2])
            }
        }
    }
}
