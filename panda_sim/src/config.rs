//! `panda.toml` layout.
//!
//! ```toml
//! [shared]
//! service_name = "panda-reach-sim"
//!
//! [env]
//! delta_angle = 0.05
//!
//! [sim]
//! timestep_ms = 32
//! seed = 7
//! ```
//!
//! Every section is optional and falls back to its defaults.

use std::path::Path;

use panda_common::config::{ConfigError, ConfigLoader, SharedConfig};
use panda_common::consts::NUM_JOINTS;
use panda_common::joint_limits::JointLimits;
use panda_common::types::Position3D;
use panda_env::config::EnvConfig;
use serde::{Deserialize, Serialize};

fn default_timestep_ms() -> u32 {
    32
}

fn default_home() -> [f64; NUM_JOINTS] {
    [0.0, -0.785, 0.0, -2.356, 0.0, 1.571, 0.785]
}

fn default_episodes() -> u32 {
    200
}

fn default_seed() -> u64 {
    7
}

fn default_target_spread() -> f64 {
    0.8
}

/// Simulated host and run settings (`[sim]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    /// Simulation timestep [ms].
    #[serde(default = "default_timestep_ms")]
    pub timestep_ms: u32,

    /// Arm base position in the world frame.
    #[serde(default)]
    pub base_origin: Position3D,

    /// Joint angles restored at every episode reset [rad].
    #[serde(default = "default_home")]
    pub home: [f64; NUM_JOINTS],

    /// Fixed arm-frame target. When absent a reachable target is drawn per episode.
    #[serde(default)]
    pub target: Option<Position3D>,

    /// Fraction of each joint range sampled when drawing a target (0, 1].
    #[serde(default = "default_target_spread")]
    pub target_spread: f64,

    /// Episodes to run.
    #[serde(default = "default_episodes")]
    pub episodes: u32,

    /// Seed for target placement and the random policy.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            timestep_ms: default_timestep_ms(),
            base_origin: Position3D::default(),
            home: default_home(),
            target: None,
            target_spread: default_target_spread(),
            episodes: default_episodes(),
            seed: default_seed(),
        }
    }
}

impl SimConfig {
    /// Timestep in seconds.
    pub fn timestep(&self) -> f64 {
        f64::from(self.timestep_ms) / 1000.0
    }

    /// Validate the simulation settings; the home pose must lie inside `limits`.
    pub fn validate(&self, limits: &JointLimits) -> Result<(), ConfigError> {
        if self.timestep_ms == 0 {
            return Err(ConfigError::ValidationError(
                "timestep_ms must be greater than 0".to_string(),
            ));
        }
        if !(self.target_spread > 0.0 && self.target_spread <= 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "target_spread must be in (0, 1], got {}",
                self.target_spread
            )));
        }
        for (joint, (&q, limit)) in self.home.iter().zip(limits.iter()).enumerate() {
            if !(limit.min..=limit.max).contains(&q) {
                return Err(ConfigError::ValidationError(format!(
                    "home angle {q} of joint {joint} outside [{}, {}]",
                    limit.min, limit.max
                )));
            }
        }
        Ok(())
    }
}

/// Complete configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PandaConfig {
    /// Logging and service identity.
    #[serde(default)]
    pub shared: SharedConfig,
    /// Environment tunables.
    #[serde(default)]
    pub env: EnvConfig,
    /// Simulation host and run settings.
    #[serde(default)]
    pub sim: SimConfig,
}

impl PandaConfig {
    /// Load and validate `path`.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate `path`, or take the defaults when it does not exist.
    ///
    /// The flag is `true` when the defaults were used.
    pub fn load_or_default(path: &Path) -> Result<(Self, bool), ConfigError> {
        match Self::load_validated(path) {
            Ok(config) => Ok((config, false)),
            Err(ConfigError::FileNotFound) => Ok((Self::default(), true)),
            Err(e) => Err(e),
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.env.validate()?;
        self.sim.validate(&self.env.joint_limits)
    }
}
