use super::state::AscendConfig;

/// Time to rise from the origin to the ceiling, from the travel distance.
///
/// Distance is clamped to `[0, max_ascend_dist]` and mapped linearly onto
/// `[approach_min_time, approach_max_time]`.
pub fn approach_duration(distance: f32, config: &AscendConfig) -> f32 {
    let dist = distance.clamp(0.0, config.max_ascend_dist);
    // Guarded so a zero reference distance degrades to the minimum time
    let t = dist / config.max_ascend_dist.max(f32::EPSILON);
    config.approach_min_time + (config.approach_max_time - config.approach_min_time) * t
}

/// Time to pass through geometry from the ceiling to the landing point.
///
/// Distance is clamped to `[0, dist_to_max_time]` and mapped linearly onto
/// `[ascend_min_time, ascend_max_time]`.
pub fn pass_through_duration(distance: f32, config: &AscendConfig) -> f32 {
    let dist = distance.clamp(0.0, config.dist_to_max_time);
    let t = dist / config.dist_to_max_time.max(f32::EPSILON);
    config.ascend_min_time + (config.ascend_max_time - config.ascend_min_time) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_hits_bounds() {
        let config = AscendConfig::default();
        assert_eq!(approach_duration(0.0, &config), config.approach_min_time);
        assert_eq!(
            approach_duration(config.max_ascend_dist, &config),
            config.approach_max_time
        );
    }

    #[test]
    fn approach_clamps_beyond_reach() {
        let config = AscendConfig::default();
        assert_eq!(
            approach_duration(config.max_ascend_dist * 3.0, &config),
            config.approach_max_time
        );
        assert_eq!(approach_duration(-1.0, &config), config.approach_min_time);
    }

    #[test]
    fn pass_through_hits_bounds() {
        let config = AscendConfig::default();
        assert_eq!(
            pass_through_duration(0.0, &config),
            config.ascend_min_time
        );
        assert_eq!(
            pass_through_duration(config.dist_to_max_time, &config),
            config.ascend_max_time
        );
        assert_eq!(
            pass_through_duration(config.dist_to_max_time + 100.0, &config),
            config.ascend_max_time
        );
    }

    #[test]
    fn zero_reference_distances_degrade_to_min_times() {
        let config = AscendConfig {
            max_ascend_dist: 0.0,
            dist_to_max_time: 0.0,
            ..Default::default()
        };
        // No NaN leaks out of a degenerate config; both maps bottom out
        let a = approach_duration(3.0, &config);
        let p = pass_through_duration(3.0, &config);
        assert_eq!(a, config.approach_min_time);
        assert_eq!(p, config.ascend_min_time);
    }

    #[test]
    fn durations_are_monotone_in_distance() {
        let config = AscendConfig::default();
        let mut last_approach = 0.0;
        let mut last_pass = 0.0;
        for i in 0..=60 {
            let d = i as f32;
            let a = approach_duration(d, &config);
            let p = pass_through_duration(d, &config);
            assert!(a >= last_approach);
            assert!(p >= last_pass);
            last_approach = a;
            last_pass = p;
        }
    }
}
