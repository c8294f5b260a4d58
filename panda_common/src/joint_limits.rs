//! Joint limit table.
//!
//! Static per-joint `[min, max]` bounds in radians, indexed by joint id 0..6.
//! Bounds are data: the table is serializable so a config file may replace
//! the Panda defaults, and validated once at startup.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConfigError;
use crate::consts::NUM_JOINTS;

/// Radian range of a single joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimit {
    /// Lower bound [rad].
    pub min: f64,
    /// Upper bound [rad].
    pub max: f64,
}

impl JointLimit {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Restrict `value` to `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Franka Panda joint ranges (A1..A7).
pub const PANDA_JOINT_LIMITS: [JointLimit; NUM_JOINTS] = [
    JointLimit::new(-2.8972, 2.8972),
    JointLimit::new(-1.7628, 1.7628),
    JointLimit::new(-2.8972, 2.8972),
    JointLimit::new(-3.0718, -0.0698),
    JointLimit::new(-2.8972, 2.8972),
    JointLimit::new(-0.0175, 3.7525),
    JointLimit::new(-2.8972, 2.8972),
];

/// Ordered table of joint limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointLimits([JointLimit; NUM_JOINTS]);

impl Default for JointLimits {
    fn default() -> Self {
        Self(PANDA_JOINT_LIMITS)
    }
}

impl JointLimits {
    pub const fn new(limits: [JointLimit; NUM_JOINTS]) -> Self {
        Self(limits)
    }

    /// Limit of `joint_id`, or `None` for an id outside 0..6.
    #[inline]
    pub fn get(&self, joint_id: usize) -> Option<JointLimit> {
        self.0.get(joint_id).copied()
    }

    /// Clamp `value` into the range of `joint_id`.
    ///
    /// An unknown joint id leaves the value unmodified; callers inside a
    /// running step must never panic on it.
    pub fn clamp(&self, joint_id: usize, value: f64) -> f64 {
        match self.get(joint_id) {
            Some(limit) => limit.clamp(value),
            None => {
                debug!(joint_id, value, "clamp requested for unknown joint, passing through");
                value
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &JointLimit> {
        self.0.iter()
    }

    /// Lower bounds of every joint.
    pub fn lows(&self) -> [f64; NUM_JOINTS] {
        self.0.map(|l| l.min)
    }

    /// Upper bounds of every joint.
    pub fn highs(&self) -> [f64; NUM_JOINTS] {
        self.0.map(|l| l.max)
    }

    /// Check `min < max` (and finiteness) for every joint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (joint, limit) in self.0.iter().enumerate() {
            if !limit.min.is_finite() || !limit.max.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "joint {joint}: limits must be finite"
                )));
            }
            if limit.min >= limit.max {
                return Err(ConfigError::ValidationError(format!(
                    "joint {joint}: min ({}) must be below max ({})",
                    limit.min, limit.max
                )));
            }
        }
        Ok(())
    }
}
