use bevy::prelude::*;

use super::state::AscendConfig;
use crate::physics::{SurfaceHit, SurfaceProbe};

/// Casts straight up from eye level and returns the first surface overhead,
/// however far away. Armed-mode targeting uses the raw hit to color the grid.
pub fn probe_ceiling<P: SurfaceProbe>(
    probe: &P,
    origin: Vec3,
    config: &AscendConfig,
) -> Option<SurfaceHit> {
    let eye = origin + Vec3::Y * config.eye_offset;
    probe.cast(eye, Dir3::Y, f32::MAX)
}

/// The ceiling the ability can actually reach: `probe_ceiling` limited to
/// `max_ascend_dist`. `None` means the ability cannot activate here.
pub fn find_ceiling<P: SurfaceProbe>(
    probe: &P,
    origin: Vec3,
    config: &AscendConfig,
) -> Option<SurfaceHit> {
    probe_ceiling(probe, origin, config).filter(|hit| hit.distance <= config.max_ascend_dist)
}

/// Resolves the landing surface by walking downward from far above the player.
///
/// The first downward hit from the sky is the initial candidate. While the
/// candidate sits above the eye reference, the search re-casts from just
/// below it (`resume_epsilon`, so the surface just found is skipped): a hit
/// still above the reference becomes the new candidate, a hit at or below it
/// — or no hit at all — accepts the current one. The result is the lowest
/// surface that is still above the player, so stacked thin floors land the
/// player on the nearest one rather than the topmost.
///
/// Returns `None` when the sky cast finds nothing, or when the accepted
/// candidate is not above the player; a landing point below the origin is
/// never produced. Terminates because every accepted candidate is at least
/// `resume_epsilon` lower than the previous one.
pub fn find_landing_point<P: SurfaceProbe>(
    probe: &P,
    origin: Vec3,
    config: &AscendConfig,
) -> Option<Vec3> {
    let reference_y = origin.y + config.eye_offset;
    let sky = origin + Vec3::Y * (config.eye_offset + config.sky_cast_height);

    let mut candidate = probe.cast(sky, Dir3::NEG_Y, f32::MAX)?.point;

    while candidate.y > reference_y {
        let resume = candidate - Vec3::Y * config.resume_epsilon;
        match probe.cast(resume, Dir3::NEG_Y, f32::MAX) {
            Some(next) if next.point.y > reference_y => candidate = next.point,
            _ => break,
        }
    }

    (candidate.y > reference_y).then_some(candidate)
}
