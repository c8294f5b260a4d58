//! System-wide constants for the Panda reach workspace.
//!
//! Single source of truth for arm dimensions and the default tunables.
//! Imported by all crates.

use static_assertions::const_assert_eq;

/// Number of actuated joints on the arm.
pub const NUM_JOINTS: usize = 7;

/// Number of directives per joint (hold, increase, decrease).
pub const DIRECTIVE_RADIX: usize = 3;

/// Size of the discrete action space (3^7).
pub const ACTION_COUNT: usize = 2187;

const_assert_eq!(ACTION_COUNT, DIRECTIVE_RADIX.pow(NUM_JOINTS as u32));

/// Raw action value reserved for "keep settling, re-issue last targets".
pub const HOLD_LAST_ACTION: i64 = -1;

/// Observation length: 7 joint positions + 3 target coordinates.
pub const OBSERVATION_SIZE: usize = NUM_JOINTS + 3;

/// Default steps per episode (owned by the harness).
pub const DEFAULT_STEPS_PER_EPISODE: u32 = 300;

/// Default angular step per directive [rad].
pub const DEFAULT_DELTA_ANGLE: f64 = 0.05;

/// Default commanded joint velocity [rad/s].
pub const DEFAULT_MOTOR_VELOCITY: f64 = 2.5;

/// Velocity re-issued with the previous targets on a hold-last action [rad/s].
pub const DEFAULT_HOLD_VELOCITY: f64 = 2.5;

/// Default settling tolerance [rad].
pub const DEFAULT_SETTLE_TOLERANCE: f64 = 1e-4;

/// Default termination distance [m].
pub const DEFAULT_DONE_DISTANCE: f64 = 0.005;

/// Default reward bonus tiers as `(distance below, bonus)`, tightest first.
pub const DEFAULT_REWARD_TIERS: [(f64, f64); 3] = [(0.01, 1.5), (0.015, 1.0), (0.03, 0.5)];

/// Default number of trailing episodes averaged for the solved check.
pub const DEFAULT_SOLVED_WINDOW: usize = 100;

/// Default mean episode score that must be exceeded to count as solved.
pub const DEFAULT_SOLVED_THRESHOLD: f64 = 195.0;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/panda.toml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert_eq!(OBSERVATION_SIZE, 10);
        assert!(HOLD_LAST_ACTION < 0);
        assert!(DEFAULT_DONE_DISTANCE < DEFAULT_REWARD_TIERS[0].0);
        assert!(DEFAULT_SOLVED_WINDOW > 0);
    }

    #[test]
    fn reward_tiers_sorted_tightest_first() {
        for pair in DEFAULT_REWARD_TIERS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 > pair[1].1);
        }
    }
}
