//! Obstacle speed model
//!
//! Speed climbs one unit per fixed interval of active play time. Active
//! time is pause-compensated by the caller, so a long pause never buys a
//! difficulty jump. Level changes are smoothed with an ease-out cubic so
//! traffic never visibly "pops" to the new speed.

use crate::consts::{BASE_OBSTACLE_SPEED, SPEED_INTERVAL_MS, SPEED_TRANSITION_MS};

/// `1 - (1-t)^3`, clamped to [0, 1]
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Current obstacle speed for the given active (non-paused) play time.
///
/// All live obstacles get re-stamped with this value every tick; an
/// obstacle never keeps its spawn-time speed.
pub fn obstacle_speed(active_ms: f64) -> f32 {
    if active_ms <= 0.0 {
        return BASE_OBSTACLE_SPEED;
    }

    let level = (active_ms / SPEED_INTERVAL_MS).floor();
    let target = BASE_OBSTACLE_SPEED + level as f32;
    if level < 1.0 {
        return target;
    }

    // Smooth the step at the boundary of the current level
    let since_level = active_ms - level * SPEED_INTERVAL_MS;
    if since_level < SPEED_TRANSITION_MS {
        let prev = target - 1.0;
        let t = (since_level / SPEED_TRANSITION_MS) as f32;
        prev + ease_out_cubic(t)
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_speed_before_first_interval() {
        assert_eq!(obstacle_speed(0.0), BASE_OBSTACLE_SPEED);
        assert_eq!(obstacle_speed(4999.0), BASE_OBSTACLE_SPEED);
    }

    #[test]
    fn one_unit_after_interval_and_transition() {
        // One full speed interval plus the transition window
        let speed = obstacle_speed(SPEED_INTERVAL_MS + SPEED_TRANSITION_MS);
        assert!((speed - (BASE_OBSTACLE_SPEED + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn transition_is_monotone_and_bounded() {
        let mut prev = obstacle_speed(SPEED_INTERVAL_MS);
        for step in 1..=20 {
            let t = SPEED_INTERVAL_MS + (step as f64 / 20.0) * SPEED_TRANSITION_MS;
            let speed = obstacle_speed(t);
            assert!(speed >= prev);
            assert!(speed >= BASE_OBSTACLE_SPEED);
            assert!(speed <= BASE_OBSTACLE_SPEED + 1.0);
            prev = speed;
        }
    }

    #[test]
    fn speed_is_pure_in_active_time() {
        // The same active time always yields the same speed, which is what
        // makes pause compensation work: wall-clock spent paused never
        // reaches this function.
        let before_pause = obstacle_speed(4200.0);
        let after_long_pause = obstacle_speed(4200.0);
        assert_eq!(before_pause, after_long_pause);
    }

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < 1e-6);
        // Ease-out: front-loaded progress
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
