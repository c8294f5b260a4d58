//! Harness-facing environment interface.
//!
//! A training harness drives an environment only through this trait, once
//! per simulated step. The default [`Environment::step`] follows the usual
//! order: apply the action, advance the host, then observe, reward, check
//! termination and collect info.

use panda_common::types::Observation;
use serde::Serialize;

use crate::error::EnvError;

/// Auxiliary per-step info record (always empty for the reach task).
pub type StepInfo = serde_json::Map<String, serde_json::Value>;

/// Everything a harness receives back from one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// Environment contract consumed by a harness.
pub trait Environment {
    /// Observation of the current state.
    fn observation(&self) -> Observation;

    /// Reward of the current state. Recomputes the shared distance.
    fn reward(&mut self) -> f64;

    /// Translate a raw action into actuator commands.
    ///
    /// # Errors
    /// `EnvError::InvalidAction` for anything outside `{-1} ∪ [0, 2186]`.
    fn apply_action(&mut self, action: i64) -> Result<(), EnvError>;

    /// Advance simulated time by one step.
    fn advance(&mut self) -> Result<(), EnvError>;

    /// Whether the current episode is over (based on the last reward's distance).
    fn is_done(&self) -> bool;

    /// Whether the task counts as solved over the score history.
    fn solved(&self) -> bool;

    /// Observation used at episode start.
    fn default_observation(&self) -> Observation;

    /// Auxiliary info for the current step.
    fn info(&self) -> StepInfo {
        StepInfo::new()
    }

    /// Start a new episode and return its first observation.
    fn reset(&mut self) -> Result<Observation, EnvError>;

    /// One complete step.
    fn step(&mut self, action: i64) -> Result<StepOutcome, EnvError> {
        self.apply_action(action)?;
        self.advance()?;
        let observation = self.observation();
        let reward = self.reward();
        Ok(StepOutcome {
            observation,
            reward,
            done: self.is_done(),
            info: self.info(),
        })
    }
}
