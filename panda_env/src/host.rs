//! Host collaborator traits.
//!
//! The environment core never talks to a simulator directly. A host supplies
//! joint sensors, joint actuators, the target and end-effector positions and
//! simulated time through [`ArmHost`]; a [`FrameTransform`] converts the
//! host's world-frame positions into the arm frame.
//!
//! # Lifecycle
//!
//! 1. `reset()` - Called at episode start
//! 2. `set_velocity()` / `set_position()` - Issued for every joint on every step
//! 3. `advance()` - One simulation timestep
//! 4. `joint_positions()`, `target_position()`, `end_effector_position()` - Read back

use panda_common::types::{JointPositions, Position3D};
use thiserror::Error;

/// Error types for host operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    /// The simulator stopped and will not advance any more.
    #[error("simulation ended")]
    SimulationEnded,

    /// A sensor or actuator rejected a request.
    #[error("device error: {0}")]
    Device(String),
}

/// Sensors, actuators and clock of a 7-joint arm.
pub trait ArmHost {
    /// Current reading of every joint position sensor [rad].
    fn joint_positions(&self) -> JointPositions;

    /// Command the velocity used to reach the next position target [rad/s].
    fn set_velocity(&mut self, joint: usize, velocity: f64);

    /// Command the position target of a joint [rad].
    fn set_position(&mut self, joint: usize, position: f64);

    /// Target object position in the host's world frame.
    fn target_position(&self) -> Position3D;

    /// End-effector position in the host's world frame.
    fn end_effector_position(&self) -> Position3D;

    /// Advance simulated time by one timestep.
    ///
    /// # Errors
    /// `HostError::SimulationEnded` once the simulator has stopped.
    fn advance(&mut self) -> Result<(), HostError>;

    /// Restore the host to its episode start state.
    fn reset(&mut self) -> Result<(), HostError>;
}

/// Conversion from the host's world frame into the arm's own frame.
pub trait FrameTransform {
    fn to_arm(&self, world: Position3D) -> Position3D;
}

/// Host already reports arm-frame positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFrame;

impl FrameTransform for IdentityFrame {
    #[inline]
    fn to_arm(&self, world: Position3D) -> Position3D {
        world
    }
}

impl<F: Fn(Position3D) -> Position3D> FrameTransform for F {
    fn to_arm(&self, world: Position3D) -> Position3D {
        self(world)
    }
}
