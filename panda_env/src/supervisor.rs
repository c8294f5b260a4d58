//! Panda reach supervisor.
//!
//! Owns the joint state, the reward model and the episode evaluator, and
//! implements [`Environment`] on top of an [`ArmHost`] and a
//! [`FrameTransform`].
//!
//! ## Step Protocol
//!
//! - A directive action refreshes the measured positions from the sensors,
//!   plans new clamped targets and commands every joint.
//! - The hold-last action (`-1`) refreshes the measured positions and
//!   re-issues the previous targets at `hold_velocity`, independent of
//!   `motor_velocity`; nothing is decoded.
//! - The observation compares the measured positions captured during the
//!   last action against the commanded targets, so after a move the harness
//!   sees `StillMoving` until a hold-last step observes the settled arm.

use panda_common::consts::{ACTION_COUNT, NUM_JOINTS, OBSERVATION_SIZE};
use panda_common::types::{JointState, Observation, Position3D};
use tracing::{debug, info, warn};

use crate::codec::Action;
use crate::config::EnvConfig;
use crate::environment::Environment;
use crate::episode::{EpisodeEvaluator, EpisodeState};
use crate::error::EnvError;
use crate::host::{ArmHost, FrameTransform};
use crate::planner::{command_joints, plan};
use crate::reward::RewardModel;
use crate::settling::observe;

/// Reach environment for a 7-joint arm.
pub struct PandaSupervisor<H, F> {
    host: H,
    frame: F,
    config: EnvConfig,
    joints: JointState,
    reward_model: RewardModel,
    evaluator: EpisodeEvaluator,
}

impl<H: ArmHost, F: FrameTransform> PandaSupervisor<H, F> {
    /// Create a supervisor after validating `config`.
    pub fn new(host: H, frame: F, config: EnvConfig) -> Result<Self, EnvError> {
        config.validate()?;
        info!(
            delta_angle = config.delta_angle,
            motor_velocity = config.motor_velocity,
            done_distance = config.done_distance,
            "Panda supervisor ready ({} actions)",
            ACTION_COUNT
        );
        Ok(Self {
            reward_model: RewardModel::new(config.reward_tiers.clone()),
            evaluator: EpisodeEvaluator::new(
                config.done_distance,
                config.solved_window,
                config.solved_threshold,
            ),
            joints: JointState::default(),
            host,
            frame,
            config,
        })
    }

    /// Size of the discrete action space (excluding the hold-last sentinel).
    pub const fn action_space_size(&self) -> usize {
        ACTION_COUNT
    }

    /// Lower and upper bounds of every observation entry.
    pub fn observation_bounds(&self) -> ([f64; OBSERVATION_SIZE], [f64; OBSERVATION_SIZE]) {
        let mut low = [f64::NEG_INFINITY; OBSERVATION_SIZE];
        let mut high = [f64::INFINITY; OBSERVATION_SIZE];
        low[..NUM_JOINTS].copy_from_slice(&self.config.joint_limits.lows());
        high[..NUM_JOINTS].copy_from_slice(&self.config.joint_limits.highs());
        (low, high)
    }

    /// Arm-frame target position as currently reported by the host.
    pub fn target_position(&self) -> Position3D {
        self.frame.to_arm(self.host.target_position())
    }

    /// Arm-frame end-effector position as currently reported by the host.
    pub fn end_effector_position(&self) -> Position3D {
        self.frame.to_arm(self.host.end_effector_position())
    }

    pub fn joint_state(&self) -> &JointState {
        &self.joints
    }

    /// Distance computed by the last call to [`Environment::reward`].
    pub fn distance(&self) -> f64 {
        self.reward_model.distance()
    }

    pub fn episode_state(&self) -> EpisodeState {
        self.evaluator.state()
    }

    pub fn evaluator(&self) -> &EpisodeEvaluator {
        &self.evaluator
    }

    /// Add a step reward to the current episode score.
    pub fn record_reward(&mut self, reward: f64) {
        self.evaluator.record_reward(reward);
    }

    /// Append the current episode score to the history.
    pub fn finish_episode(&mut self) -> f64 {
        self.evaluator.finish_episode()
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn apply(&mut self, action: Action) {
        self.joints.current = self.host.joint_positions();
        match action {
            Action::HoldLast => {
                command_joints(&mut self.host, &self.joints.target, self.config.hold_velocity);
            }
            Action::Directive(code) => {
                let directives = code.directives();
                let targets = plan(
                    &self.joints.current,
                    &directives,
                    self.config.delta_angle,
                    &self.config.joint_limits,
                );
                debug!(%code, ?directives, "directive action");
                command_joints(&mut self.host, &targets, self.config.motor_velocity);
                self.joints.target = targets;
            }
        }
    }
}

impl<H: ArmHost, F: FrameTransform> Environment for PandaSupervisor<H, F> {
    fn observation(&self) -> Observation {
        observe(
            &self.joints,
            self.target_position(),
            self.config.settle_tolerance,
        )
    }

    fn reward(&mut self) -> f64 {
        let target = self.target_position();
        let end_effector = self.end_effector_position();
        let reward = self.reward_model.reward(target, end_effector);
        self.evaluator.update(self.reward_model.distance());
        reward
    }

    fn apply_action(&mut self, action: i64) -> Result<(), EnvError> {
        let action = Action::try_from(action).inspect_err(|e| warn!("rejected action: {e}"))?;
        self.apply(action);
        Ok(())
    }

    fn advance(&mut self) -> Result<(), EnvError> {
        self.host.advance()?;
        Ok(())
    }

    fn is_done(&self) -> bool {
        self.evaluator.is_done(self.reward_model.distance())
    }

    fn solved(&self) -> bool {
        self.evaluator.solved()
    }

    fn default_observation(&self) -> Observation {
        Observation::zeros()
    }

    /// Reset the host and zero the joint state.
    ///
    /// The commanded targets are zeroed as well: a hold-last action before
    /// the first directive re-issues those zero targets unclamped, which lies
    /// outside the range of joint 3.
    fn reset(&mut self) -> Result<Observation, EnvError> {
        self.host.reset()?;
        self.joints = JointState::default();
        self.reward_model.reset();
        self.evaluator.restart();
        debug!("episode reset");
        Ok(self.default_observation())
    }
}
