//! Simulated Panda arm.
//!
//! The `SimulatedArm` implements the `ArmHost` trait with seven
//! position-controlled joints, Panda forward kinematics for the end-effector
//! and a target point that is either fixed or drawn per episode from the
//! reachable workspace. All positions are reported in world coordinates,
//! like a scene-graph simulator would.

use panda_common::consts::NUM_JOINTS;
use panda_common::joint_limits::JointLimits;
use panda_common::types::{JointPositions, Position3D};
use panda_env::host::{ArmHost, HostError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::frame::ArmBaseFrame;
use crate::joint::JointSimulator;
use crate::kinematics::end_effector;

/// Software host driving seven simulated joints.
pub struct SimulatedArm {
    /// Joint simulators (index = joint id).
    joints: Vec<JointSimulator>,
    /// Mechanical joint ranges.
    limits: JointLimits,
    /// Pose restored on reset.
    home: JointPositions,
    /// Arm base placement in the world.
    frame: ArmBaseFrame,
    /// Timestep [s].
    dt: f64,
    /// Fixed arm-frame target, if configured.
    fixed_target: Option<Position3D>,
    /// Fraction of each joint range sampled for random targets.
    target_spread: f64,
    /// Current target in world coordinates.
    target_world: Position3D,
    /// Target placement randomness.
    rng: StdRng,
    /// Timesteps since the last reset.
    steps: u64,
}

impl SimulatedArm {
    /// Create an arm at its home pose with a first target placed.
    pub fn new(config: &SimConfig, limits: JointLimits) -> Self {
        let joints = limits
            .iter()
            .zip(config.home.iter())
            .enumerate()
            .map(|(id, (&limit, &home))| JointSimulator::new(id, limit, home))
            .collect();

        let mut arm = Self {
            joints,
            limits,
            home: config.home,
            frame: ArmBaseFrame::new(config.base_origin),
            dt: config.timestep(),
            fixed_target: config.target,
            target_spread: config.target_spread,
            target_world: Position3D::default(),
            rng: StdRng::seed_from_u64(config.seed),
            steps: 0,
        };
        arm.place_target();
        info!(
            "Simulated arm ready: dt={:.3}s, target (world) {:?}",
            arm.dt, arm.target_world
        );
        arm
    }

    /// Pick the target for the next episode.
    fn place_target(&mut self) {
        let arm_target = match self.fixed_target {
            Some(target) => target,
            None => {
                let mut q = [0.0; NUM_JOINTS];
                for (joint, limit) in self.limits.iter().enumerate() {
                    let centre = 0.5 * (limit.min + limit.max);
                    let half = 0.5 * (limit.max - limit.min) * self.target_spread;
                    q[joint] = self.rng.gen_range(centre - half..=centre + half);
                }
                end_effector(&q)
            }
        };
        self.target_world = self.frame.to_world(arm_target);
        debug!("Target placed at {:?} (arm frame)", arm_target);
    }

    /// Arm-frame end-effector position.
    pub fn end_effector_arm(&self) -> Position3D {
        end_effector(&self.joint_positions())
    }

    /// Timesteps since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl ArmHost for SimulatedArm {
    fn joint_positions(&self) -> JointPositions {
        let mut out = [0.0; NUM_JOINTS];
        for (slot, joint) in out.iter_mut().zip(&self.joints) {
            *slot = joint.position();
        }
        out
    }

    fn set_velocity(&mut self, joint: usize, velocity: f64) {
        if let Some(j) = self.joints.get_mut(joint) {
            j.set_velocity(velocity);
        }
    }

    fn set_position(&mut self, joint: usize, position: f64) {
        if let Some(j) = self.joints.get_mut(joint) {
            j.set_target(position);
        }
    }

    fn target_position(&self) -> Position3D {
        self.target_world
    }

    fn end_effector_position(&self) -> Position3D {
        self.frame.to_world(self.end_effector_arm())
    }

    fn advance(&mut self) -> Result<(), HostError> {
        for joint in &mut self.joints {
            joint.update(self.dt);
        }
        self.steps += 1;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), HostError> {
        for (joint, &q) in self.joints.iter_mut().zip(self.home.iter()) {
            joint.reset_to(q);
        }
        self.steps = 0;
        self.place_target();
        Ok(())
    }
}
