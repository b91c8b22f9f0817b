//! Trigger volume shapes

use serde::{Deserialize, Serialize};

/// Trigger volume shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerVolume {
    /// Sphere: a point is inside when its 3D distance is below the radius
    Sphere {
        /// Radius
        radius: f32,
    },
    /// Y-aligned cylinder: planar distance below radius, height within bounds
    Cylinder {
        /// Radius
        radius: f32,
        /// Half-height
        half_height: f32,
    },
}

impl TriggerVolume {
    /// Create a sphere trigger volume
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Create a cylinder trigger volume
    pub fn cylinder(radius: f32, height: f32) -> Self {
        Self::Cylinder {
            radius,
            half_height: height / 2.0,
        }
    }

    /// Check if a point is inside this volume (at origin)
    ///
    /// Boundaries are exclusive: a point exactly on the surface is outside.
    pub fn contains_point(&self, point: [f32; 3]) -> bool {
        match self {
            Self::Sphere { radius } => {
                let dist_sq = point[0] * point[0] + point[1] * point[1] + point[2] * point[2];
                dist_sq < radius * radius
            }
            Self::Cylinder { radius, half_height } => {
                let planar_sq = point[0] * point[0] + point[2] * point[2];
                planar_sq < radius * radius && point[1].abs() <= *half_height
            }
        }
    }

    /// Check if a point is inside this volume placed at `center`
    pub fn contains_point_at(&self, center: [f32; 3], point: [f32; 3]) -> bool {
        self.contains_point([
            point[0] - center[0],
            point[1] - center[1],
            point[2] - center[2],
        ])
    }

    /// Horizontal reach of the volume
    pub fn radius(&self) -> f32 {
        match self {
            Self::Sphere { radius } | Self::Cylinder { radius, .. } => *radius,
        }
    }
}
