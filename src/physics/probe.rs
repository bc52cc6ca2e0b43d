use avian3d::prelude::*;
use bevy::prelude::*;

use super::layers::solid_surfaces;

/// A surface found by a directional probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// World-space point where the ray met the surface
    pub point: Vec3,
    /// Travel distance from the ray origin to the surface
    pub distance: f32,
}

/// Directional ray query against world geometry.
///
/// Answers "first solid surface in `direction` from `origin`, ignoring the
/// player's own collision volume." `None` means no surface within
/// `max_distance` — an expected outcome, not an error.
///
/// The trait exists so targeting logic can run against a deterministic
/// fixed-geometry implementation in tests, decoupled from the collision
/// engine.
pub trait SurfaceProbe {
    fn cast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<SurfaceHit>;
}

/// `SurfaceProbe` backed by Avian's `SpatialQuery`.
pub struct AvianSurfaceProbe<'w, 's, 'q> {
    spatial_query: &'q SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl<'w, 's, 'q> AvianSurfaceProbe<'w, 's, 'q> {
    /// Builds a probe masked to solid surfaces: the player's own volume
    /// and passable dressing are invisible to it.
    pub fn new(spatial_query: &'q SpatialQuery<'w, 's>) -> Self {
        let filter = SpatialQueryFilter::default().with_mask(solid_surfaces());
        Self {
            spatial_query,
            filter,
        }
    }
}

impl SurfaceProbe for AvianSurfaceProbe<'_, '_, '_> {
    fn cast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<SurfaceHit> {
        let hit = self
            .spatial_query
            .cast_ray(origin, direction, max_distance, true, &self.filter)?;

        Some(SurfaceHit {
            point: origin + direction.as_vec3() * hit.distance,
            distance: hit.distance,
        })
    }
}
