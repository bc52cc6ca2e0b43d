use bevy::prelude::*;

/// Ascend ability tuning
#[derive(Component, Clone, Copy)]
pub struct AscendConfig {
    /// Farthest ceiling (in meters) the ability can reach through
    pub max_ascend_dist: f32,
    /// Pass-through duration at zero distance
    pub ascend_min_time: f32,
    /// Pass-through duration at `dist_to_max_time` or beyond
    pub ascend_max_time: f32,
    /// Pass-through distance that maps to `ascend_max_time`
    pub dist_to_max_time: f32,
    /// Approach duration at zero distance
    pub approach_min_time: f32,
    /// Approach duration at `max_ascend_dist` or beyond
    pub approach_max_time: f32,
    /// Pause before the approach phase starts moving
    pub pre_roll: f32,
    /// Pause at the ceiling before passing through
    pub ceiling_dwell: f32,
    /// Duration of the final surface-exit slide
    pub exit_time: f32,
    /// Upward offset from the player origin used as the probe/eye reference
    pub eye_offset: f32,
    /// Height above the player the landing search casts down from
    pub sky_cast_height: f32,
    /// Offset below a hit surface the landing search resumes from,
    /// so the surface just found is skipped
    pub resume_epsilon: f32,
}

impl Default for AscendConfig {
    fn default() -> Self {
        Self {
            max_ascend_dist: 10.0,
            ascend_min_time: 0.5,
            ascend_max_time: 5.0,
            dist_to_max_time: 50.0,
            approach_min_time: 0.25,
            approach_max_time: 1.25,
            pre_roll: 0.75,
            ceiling_dwell: 1.0,
            exit_time: 0.5,
            eye_offset: 1.0,
            sky_cast_height: 10_000.0,
            resume_epsilon: 0.5,
        }
    }
}

/// Marker: the ability is armed and showing targeting feedback
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct AscendMode;

/// The points of one traversal, fixed at entry.
///
/// Construction enforces the ordering `origin.y <= ceiling.y <= target.y`;
/// anything else is rejected before a traversal exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalRequest {
    /// Player position when the traversal began
    pub origin: Vec3,
    /// First surface directly above the origin
    pub ceiling: Vec3,
    /// Resolved landing surface the player emerges on
    pub target: Vec3,
}

impl TraversalRequest {
    pub fn new(origin: Vec3, ceiling: Vec3, target: Vec3) -> Option<Self> {
        (ceiling.y >= origin.y && target.y >= ceiling.y).then_some(Self {
            origin,
            ceiling,
            target,
        })
    }
}

/// Phase of the ascend motion sequence. Exactly one is active per player;
/// `Idle` is both the initial state and where every traversal ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalPhase {
    #[default]
    Idle,
    ApproachingCeiling,
    PassingThrough,
    WaitingAtTop,
    Exiting,
    Descending,
}

/// Per-tick targeting feedback while the ability is armed.
#[derive(Resource, Default)]
pub struct TargetingFeedback(pub Option<TargetingStatus>);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetingStatus {
    /// Ceiling point the targeting grid is drawn under
    pub point: Vec3,
    /// Whether the ceiling is within `max_ascend_dist`
    pub reachable: bool,
}
