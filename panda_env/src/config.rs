//! Environment tunables (`[env]` section).
//!
//! All fields are optional in TOML; omitted fields take the defaults from
//! `panda_common::consts`. [`EnvConfig::validate`] must pass before the
//! configuration is handed to a supervisor.

use panda_common::config::ConfigError;
use panda_common::consts::{
    DEFAULT_DELTA_ANGLE, DEFAULT_DONE_DISTANCE, DEFAULT_HOLD_VELOCITY, DEFAULT_MOTOR_VELOCITY,
    DEFAULT_REWARD_TIERS, DEFAULT_SETTLE_TOLERANCE, DEFAULT_SOLVED_THRESHOLD,
    DEFAULT_SOLVED_WINDOW, DEFAULT_STEPS_PER_EPISODE,
};
use panda_common::joint_limits::JointLimits;
use serde::{Deserialize, Serialize};

fn default_steps_per_episode() -> u32 {
    DEFAULT_STEPS_PER_EPISODE
}

fn default_delta_angle() -> f64 {
    DEFAULT_DELTA_ANGLE
}

fn default_motor_velocity() -> f64 {
    DEFAULT_MOTOR_VELOCITY
}

fn default_hold_velocity() -> f64 {
    DEFAULT_HOLD_VELOCITY
}

fn default_settle_tolerance() -> f64 {
    DEFAULT_SETTLE_TOLERANCE
}

fn default_done_distance() -> f64 {
    DEFAULT_DONE_DISTANCE
}

fn default_reward_tiers() -> Vec<RewardTier> {
    DEFAULT_REWARD_TIERS
        .iter()
        .map(|&(below, bonus)| RewardTier { below, bonus })
        .collect()
}

fn default_solved_window() -> usize {
    DEFAULT_SOLVED_WINDOW
}

fn default_solved_threshold() -> f64 {
    DEFAULT_SOLVED_THRESHOLD
}

/// Proximity bonus granted when the distance is strictly below `below`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardTier {
    /// Exclusive distance threshold [m].
    pub below: f64,
    /// Bonus added to the negative-distance base reward.
    pub bonus: f64,
}

/// Tunables of the reach environment.
///
/// # TOML Example
///
/// ```toml
/// [env]
/// delta_angle = 0.05
/// motor_velocity = 2.5
///
/// [[env.reward_tiers]]
/// below = 0.01
/// bonus = 1.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    /// Step budget per episode, enforced by the harness.
    #[serde(default = "default_steps_per_episode")]
    pub steps_per_episode: u32,

    /// Angular step per increase/decrease directive [rad].
    #[serde(default = "default_delta_angle")]
    pub delta_angle: f64,

    /// Velocity sent with the position commands of a directive action [rad/s].
    #[serde(default = "default_motor_velocity")]
    pub motor_velocity: f64,

    /// Velocity sent when a hold-last action re-issues the previous targets [rad/s].
    #[serde(default = "default_hold_velocity")]
    pub hold_velocity: f64,

    /// Every joint must be strictly closer than this to its target to count as settled [rad].
    #[serde(default = "default_settle_tolerance")]
    pub settle_tolerance: f64,

    /// Episode terminates once the distance drops below this [m].
    #[serde(default = "default_done_distance")]
    pub done_distance: f64,

    /// Bonus tiers, tightest first.
    #[serde(default = "default_reward_tiers")]
    pub reward_tiers: Vec<RewardTier>,

    /// Trailing episodes averaged for the solved check.
    #[serde(default = "default_solved_window")]
    pub solved_window: usize,

    /// Mean score that must be exceeded to count as solved.
    #[serde(default = "default_solved_threshold")]
    pub solved_threshold: f64,

    /// Joint ranges used to clamp planned targets.
    #[serde(default)]
    pub joint_limits: JointLimits,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            steps_per_episode: default_steps_per_episode(),
            delta_angle: default_delta_angle(),
            motor_velocity: default_motor_velocity(),
            hold_velocity: default_hold_velocity(),
            settle_tolerance: default_settle_tolerance(),
            done_distance: default_done_distance(),
            reward_tiers: default_reward_tiers(),
            solved_window: default_solved_window(),
            solved_threshold: default_solved_threshold(),
            joint_limits: JointLimits::default(),
        }
    }
}

impl EnvConfig {
    /// Validate the tunables.
    ///
    /// # Validation Rules
    /// 1. `steps_per_episode`, `solved_window` > 0
    /// 2. `delta_angle`, `motor_velocity`, `hold_velocity`, `settle_tolerance`,
    ///    `done_distance` finite and > 0
    /// 3. reward tier thresholds finite, > 0, strictly ascending
    /// 4. `done_distance` at or below the tightest tier threshold
    /// 5. joint limits valid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps_per_episode == 0 {
            return Err(invalid("steps_per_episode must be greater than 0"));
        }
        if self.solved_window == 0 {
            return Err(invalid("solved_window must be greater than 0"));
        }
        if !self.solved_threshold.is_finite() {
            return Err(invalid("solved_threshold must be finite"));
        }

        for (name, value) in [
            ("delta_angle", self.delta_angle),
            ("motor_velocity", self.motor_velocity),
            ("hold_velocity", self.hold_velocity),
            ("settle_tolerance", self.settle_tolerance),
            ("done_distance", self.done_distance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let mut prev = 0.0;
        for (i, tier) in self.reward_tiers.iter().enumerate() {
            if !tier.below.is_finite() || !tier.bonus.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "reward tier {i} must be finite"
                )));
            }
            if tier.below <= prev {
                return Err(ConfigError::ValidationError(format!(
                    "reward tier {i}: threshold {} must be positive and above the previous tier",
                    tier.below
                )));
            }
            prev = tier.below;
        }

        if let Some(tightest) = self.reward_tiers.first() {
            if self.done_distance > tightest.below {
                return Err(ConfigError::ValidationError(format!(
                    "done_distance {} must not exceed the tightest reward tier {}",
                    self.done_distance, tightest.below
                )));
            }
        }

        self.joint_limits.validate()
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::ValidationError(msg.to_string())
}
