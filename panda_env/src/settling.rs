//! Settling detector.
//!
//! The arm is settled when every measured joint position is within the
//! tolerance of its last commanded target. Until then the harness only gets
//! the [`Observation::StillMoving`] marker.

use panda_common::types::{JointPositions, JointState, Observation, Position3D};

/// True iff `|current[i] - target[i]| < tolerance` for every joint.
#[inline]
pub fn is_settled(current: &JointPositions, target: &JointPositions, tolerance: f64) -> bool {
    current
        .iter()
        .zip(target.iter())
        .all(|(c, t)| (c - t).abs() < tolerance)
}

/// Observation for the current joint state and arm-frame target position.
pub fn observe(joints: &JointState, target: Position3D, tolerance: f64) -> Observation {
    if is_settled(&joints.current, &joints.target, tolerance) {
        Observation::state(&joints.current, target)
    } else {
        Observation::StillMoving
    }
}
