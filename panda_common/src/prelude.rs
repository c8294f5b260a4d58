//! Prelude module for common re-exports.
//!
//! ```rust
//! use panda_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{ACTION_COUNT, HOLD_LAST_ACTION, NUM_JOINTS, OBSERVATION_SIZE};

// ─── Arm Data ───────────────────────────────────────────────────────
pub use crate::joint_limits::{JointLimit, JointLimits, PANDA_JOINT_LIMITS};
pub use crate::types::{
    Directive, DirectiveTuple, JointPositions, JointState, Observation, ObservationVector,
    Position3D,
};
