//! Collision-free randomized placement
//!
//! One routine serves buildings, dynamic collectibles and the portal. Callers
//! differ only in the candidate distribution and the separation they ask
//! for.
//!
//! Placement always terminates: a strict pass, one relaxed pass with the
//! separation scaled down, then the last candidate is accepted as degraded.

use crate::config::PlacementConfig;
use chase_core::math::planar_distance;
use rand::Rng;
use std::f32::consts::TAU;

/// Something already occupying the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub position: [f32; 3],
    pub radius: f32,
}

impl Footprint {
    pub fn new(position: [f32; 3], radius: f32) -> Self {
        Self { position, radius }
    }

    /// Whether a footprint of `radius` at `position` keeps `separation` clear of this one
    pub fn is_clear_of(&self, position: [f32; 3], radius: f32, separation: f32) -> bool {
        planar_distance(self.position, position) >= self.radius + radius + separation
    }
}

/// Ground-plane half-diagonal of a box of `size`, after `scale`
pub fn footprint_radius(size: [f32; 3], scale: f32) -> f32 {
    let hx = size[0] * scale * 0.5;
    let hz = size[2] * scale * 0.5;
    (hx * hx + hz * hz).sqrt()
}

/// Source of candidate positions
pub trait CandidateGenerator {
    fn next_candidate(&mut self, rng: &mut dyn rand::RngCore) -> [f32; 3];
}

/// Uniform angle and uniform radius in a ring around `center`
///
/// Radius is uniform, not area-uniform, so candidates cluster toward the
/// inner edge.
#[derive(Debug, Clone, Copy)]
pub struct AnnulusSampler {
    pub center: [f32; 3],
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Height of every candidate
    pub y: f32,
}

impl AnnulusSampler {
    pub fn new(center: [f32; 3], inner_radius: f32, outer_radius: f32, y: f32) -> Self {
        Self {
            center,
            inner_radius: inner_radius.min(outer_radius),
            outer_radius: outer_radius.max(inner_radius),
            y,
        }
    }

    /// Candidates exactly `radius` away
    pub fn ring(center: [f32; 3], radius: f32, y: f32) -> Self {
        Self::new(center, radius, radius, y)
    }
}

impl CandidateGenerator for AnnulusSampler {
    fn next_candidate(&mut self, rng: &mut dyn rand::RngCore) -> [f32; 3] {
        let angle = rng.gen::<f32>() * TAU;
        let radius = if self.outer_radius > self.inner_radius {
            rng.gen_range(self.inner_radius..self.outer_radius)
        } else {
            self.inner_radius
        };
        chase_core::math::point_on_circle(self.center, radius, angle, self.y)
    }
}

/// One placement request
#[derive(Debug, Clone, Copy)]
pub struct PlacementRequest {
    pub footprint_radius: f32,
    pub min_separation: f32,
    pub max_attempts: u32,
    /// Separation multiplier for the relaxed pass; `None` uses the configured one
    pub relaxed_factor: Option<f32>,
}

impl PlacementRequest {
    pub fn new(footprint_radius: f32, min_separation: f32, max_attempts: u32) -> Self {
        Self {
            footprint_radius,
            min_separation,
            max_attempts,
            relaxed_factor: None,
        }
    }

    pub fn with_relaxed_factor(mut self, factor: f32) -> Self {
        self.relaxed_factor = Some(factor);
        self
    }
}

/// Where an object ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: [f32; 3],
    /// Accepted in the relaxed pass
    pub relaxed: bool,
    /// Accepted without meeting even the relaxed separation
    pub degraded: bool,
    /// Candidates drawn
    pub attempts: u32,
    /// Existing footprints closer than the full separation
    pub violations: u32,
}

impl Placement {
    /// Error describing a degraded placement, for logging
    pub fn exhausted(&self) -> Option<chase_core::Error> {
        self.degraded.then_some(chase_core::Error::PlacementExhausted {
            attempts: self.attempts,
            violations: self.violations,
        })
    }
}

/// Finds non-colliding positions
#[derive(Debug, Clone, Default)]
pub struct SpatialPlacer {
    config: PlacementConfig,
}

impl SpatialPlacer {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Place a footprint among `existing`
    pub fn place<G, R>(&self, request: PlacementRequest, generator: &mut G, existing: &[Footprint], rng: &mut R) -> Placement
    where
        G: CandidateGenerator + ?Sized,
        R: Rng,
    {
        let radius = request.footprint_radius;
        let strict = request.min_separation;
        let relaxed = strict * request.relaxed_factor.unwrap_or(self.config.relaxed_factor);
        let strict_budget = request.max_attempts.max(1);
        let relaxed_budget = self.config.relaxed_attempts(strict_budget);

        let mut attempts = 0;
        let mut last = generator.next_candidate(rng);

        for (separation, budget, is_relaxed) in [(strict, strict_budget, false), (relaxed, relaxed_budget, true)] {
            for _ in 0..budget {
                if attempts > 0 {
                    last = generator.next_candidate(rng);
                }
                attempts += 1;
                if existing.iter().all(|f| f.is_clear_of(last, radius, separation)) {
                    return Placement {
                        position: last,
                        relaxed: is_relaxed,
                        degraded: false,
                        attempts,
                        violations: count_violations(last, radius, strict, existing),
                    };
                }
            }
        }

        Placement {
            position: last,
            relaxed: true,
            degraded: true,
            attempts,
            violations: count_violations(last, radius, strict, existing),
        }
    }
}

fn count_violations(position: [f32; 3], radius: f32, separation: f32, existing: &[Footprint]) -> u32 {
    existing.iter().filter(|f| !f.is_clear_of(position, radius, separation)).count() as u32
}
