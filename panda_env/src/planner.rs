//! Motion planner.
//!
//! Turns a directive tuple into new per-joint position targets, clamped by
//! the joint limit table, and issues the matching velocity + position
//! command pair to the host actuators.

use panda_common::joint_limits::JointLimits;
use panda_common::types::{DirectiveTuple, JointPositions};
use tracing::trace;

use crate::host::ArmHost;

/// Clamped targets for every joint.
///
/// `increase` adds `step`, `decrease` subtracts it, `hold` keeps the current
/// position; every result then goes through [`JointLimits::clamp`].
pub fn plan(
    current: &JointPositions,
    directives: &DirectiveTuple,
    step: f64,
    limits: &JointLimits,
) -> JointPositions {
    let mut targets = *current;
    for (joint, (target, directive)) in targets.iter_mut().zip(directives).enumerate() {
        *target = limits.clamp(joint, directive.apply(*target, step));
    }
    targets
}

/// Send a velocity and a position command to every joint.
pub fn command_joints<H: ArmHost + ?Sized>(host: &mut H, targets: &JointPositions, velocity: f64) {
    for (joint, &position) in targets.iter().enumerate() {
        trace!(joint, velocity, position, "joint command");
        host.set_velocity(joint, velocity);
        host.set_position(joint, position);
    }
}
