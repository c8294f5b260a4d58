//! Shared mock host for the integration suites.

mod episode_flow;
mod step_cycle;

use panda_common::consts::NUM_JOINTS;
use panda_common::types::Position3D;
use panda_env::host::{ArmHost, HostError};

/// Simulation timestep [s].
pub const DT: f64 = 0.032;

/// Arm whose joints move toward their commanded position at the commanded
/// velocity. The end-effector is a linear function of joints 0..2:
/// `(0.1 * j0, 0.1 * j1, 0.1 * j2 + 1.0)` in world coordinates, i.e. the
/// world frame sits one metre above the arm frame.
pub struct LinearArm {
    pub positions: [f64; NUM_JOINTS],
    pub commanded: [f64; NUM_JOINTS],
    pub velocities: [f64; NUM_JOINTS],
    pub target: Position3D,
    pub steps: u32,
    /// `advance` fails once this many steps have run.
    pub step_limit: Option<u32>,
}

impl LinearArm {
    pub fn new(target_world: Position3D) -> Self {
        let mut positions = [0.0; NUM_JOINTS];
        positions[3] = -1.0;
        Self {
            positions,
            commanded: positions,
            velocities: [0.0; NUM_JOINTS],
            target: target_world,
            steps: 0,
            step_limit: None,
        }
    }
}

impl ArmHost for LinearArm {
    fn joint_positions(&self) -> [f64; NUM_JOINTS] {
        self.positions
    }

    fn set_velocity(&mut self, joint: usize, velocity: f64) {
        self.velocities[joint] = velocity;
    }

    fn set_position(&mut self, joint: usize, position: f64) {
        self.commanded[joint] = position;
    }

    fn target_position(&self) -> Position3D {
        self.target
    }

    fn end_effector_position(&self) -> Position3D {
        Position3D::new(
            0.1 * self.positions[0],
            0.1 * self.positions[1],
            0.1 * self.positions[2] + 1.0,
        )
    }

    fn advance(&mut self) -> Result<(), HostError> {
        if self.step_limit.is_some_and(|limit| self.steps >= limit) {
            return Err(HostError::SimulationEnded);
        }
        for joint in 0..NUM_JOINTS {
            let error = self.commanded[joint] - self.positions[joint];
            let max_move = self.velocities[joint] * DT;
            if error.abs() <= max_move {
                self.positions[joint] = self.commanded[joint];
            } else {
                self.positions[joint] += max_move * error.signum();
            }
        }
        self.steps += 1;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), HostError> {
        let target = self.target;
        let limit = self.step_limit;
        *self = Self::new(target);
        self.step_limit = limit;
        Ok(())
    }
}

/// World frame one metre above the arm base.
pub fn lowered(world: Position3D) -> Position3D {
    Position3D::new(world.x, world.y, world.z - 1.0)
}
