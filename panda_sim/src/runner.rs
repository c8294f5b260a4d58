//! Episode loop and run report.
//!
//! The trainer plays episodes against a [`PandaSupervisor`]: reset, then
//! step with the policy's actions until the episode terminates or the step
//! budget runs out. Only directive steps add to the episode score; hold-last
//! steps merely wait for the arm to settle. The run stops early once the
//! task is solved or the shared running flag is cleared (Ctrl+C).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use panda_common::consts::HOLD_LAST_ACTION;
use panda_env::environment::Environment;
use panda_env::error::EnvError;
use panda_env::host::{ArmHost, FrameTransform};
use panda_env::supervisor::PandaSupervisor;
use serde::Serialize;
use tracing::{debug, info};

use crate::policy::Policy;

/// Result of one episode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    /// Episode number (1-based).
    pub episode: usize,
    /// Steps taken, hold-last steps included.
    pub steps: u32,
    /// Score appended to the history.
    pub score: f64,
    /// Whether the end-effector reached the target.
    pub terminated: bool,
    /// End-effector distance after the last step [m].
    pub final_distance: f64,
}

/// Outcome of a training run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Episodes completed.
    pub episodes: usize,
    /// Episodes that reached the target.
    pub terminated_episodes: usize,
    /// Whether the solved criterion was met.
    pub solved: bool,
    /// Episode at which the run was first solved.
    pub solved_at: Option<usize>,
    /// Mean score over the trailing window.
    pub rolling_mean: Option<f64>,
    /// Stopped by the running flag before the episode budget was spent.
    pub interrupted: bool,
    /// Every finished episode score, oldest first.
    pub scores: Vec<f64>,
}

/// Drives a policy against the reach environment.
pub struct Trainer<H, F, P> {
    env: PandaSupervisor<H, F>,
    policy: P,
    running: Arc<AtomicBool>,
}

impl<H: ArmHost, F: FrameTransform, P: Policy> Trainer<H, F, P> {
    /// Trainer over `env` using `policy`.
    pub fn new(env: PandaSupervisor<H, F>, policy: P) -> Self {
        Self {
            env,
            policy,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Flag checked between steps; clearing it stops the run.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// The wrapped environment.
    pub fn env(&self) -> &PandaSupervisor<H, F> {
        &self.env
    }

    /// Play one episode and append its score to the history.
    pub fn run_episode(&mut self) -> Result<EpisodeSummary, EnvError> {
        let budget = self.env.config().steps_per_episode;
        let mut observation = self.env.reset()?;
        let mut steps = 0;
        let mut done = false;

        while steps < budget && !done && self.running.load(Ordering::SeqCst) {
            let action = self.policy.select(&observation);
            let outcome = self.env.step(action)?;
            if action != HOLD_LAST_ACTION {
                self.env.record_reward(outcome.reward);
            }
            observation = outcome.observation;
            done = outcome.done;
            steps += 1;
        }

        let score = self.env.finish_episode();
        let summary = EpisodeSummary {
            episode: self.env.evaluator().history().len(),
            steps,
            score,
            terminated: done,
            final_distance: self.env.distance(),
        };
        info!(
            episode = summary.episode,
            steps = summary.steps,
            score = summary.score,
            terminated = summary.terminated,
            "episode finished, distance {:.4} m",
            summary.final_distance
        );
        Ok(summary)
    }

    /// Play up to `episodes` episodes, stopping early once solved or interrupted.
    pub fn run(&mut self, episodes: usize) -> Result<RunReport, EnvError> {
        let mut terminated_episodes = 0;
        let mut solved_at = None;
        let mut interrupted = false;

        for _ in 0..episodes {
            if !self.running.load(Ordering::SeqCst) {
                interrupted = true;
                break;
            }
            let summary = self.run_episode()?;
            if summary.terminated {
                terminated_episodes += 1;
            }
            if self.env.solved() {
                solved_at = Some(summary.episode);
                info!(
                    "Solved after {} episodes (rolling mean {:.2})",
                    summary.episode,
                    self.env.evaluator().rolling_mean().unwrap_or_default()
                );
                break;
            }
            debug!(
                rolling_mean = ?self.env.evaluator().rolling_mean(),
                "episode {} of {}",
                summary.episode,
                episodes
            );
        }
        if !self.running.load(Ordering::SeqCst) {
            interrupted = true;
        }

        let evaluator = self.env.evaluator();
        Ok(RunReport {
            episodes: evaluator.history().len(),
            terminated_episodes,
            solved: evaluator.solved(),
            solved_at,
            rolling_mean: evaluator.rolling_mean(),
            interrupted,
            scores: evaluator.history().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::SimulatedArm;
    use crate::config::SimConfig;
    use crate::frame::ArmBaseFrame;
    use crate::policy::ScriptedPolicy;
    use panda_common::types::Position3D;
    use panda_env::config::EnvConfig;

    fn trainer(
        env_config: EnvConfig,
        policy: ScriptedPolicy,
    ) -> Trainer<SimulatedArm, ArmBaseFrame, ScriptedPolicy> {
        let sim = SimConfig {
            // Unreachable: the episode always runs to its budget.
            target: Some(Position3D::new(5.0, 0.0, 0.0)),
            ..SimConfig::default()
        };
        let arm = SimulatedArm::new(&sim, env_config.joint_limits);
        let frame = ArmBaseFrame::new(sim.base_origin);
        let env = PandaSupervisor::new(arm, frame, env_config).unwrap();
        Trainer::new(env, policy)
    }

    fn short_episodes(steps: u32) -> EnvConfig {
        EnvConfig {
            steps_per_episode: steps,
            ..EnvConfig::default()
        }
    }

    #[test]
    fn episode_runs_to_budget_on_unreachable_target() {
        let mut t = trainer(short_episodes(10), ScriptedPolicy::default());
        let summary = t.run_episode().unwrap();
        assert_eq!(summary.episode, 1);
        assert_eq!(summary.steps, 10);
        assert!(!summary.terminated);
        // Hold-all every step: ten rewards of about -4.7.
        assert!(summary.score < -40.0, "{summary:?}");
        assert_eq!(t.env().evaluator().history(), &[summary.score]);
    }

    #[test]
    fn hold_last_steps_do_not_score() {
        // Move, wait (-1), then hold-all twice: three scored steps of about -4.7.
        let mut t = trainer(short_episodes(4), ScriptedPolicy::new([1]));
        let summary = t.run_episode().unwrap();
        assert_eq!(summary.steps, 4);
        assert!(summary.score < -13.0, "{summary:?}");
        assert!(summary.score > -15.0, "{summary:?}");
    }

    #[test]
    fn cleared_flag_interrupts_run() {
        let mut t = trainer(short_episodes(5), ScriptedPolicy::default());
        t.running_flag().store(false, Ordering::SeqCst);
        let report = t.run(3).unwrap();
        assert!(report.interrupted);
        assert_eq!(report.episodes, 0);
        assert!(!report.solved);
        assert_eq!(report.rolling_mean, None);
    }

    #[test]
    fn run_reports_every_episode() {
        let mut t = trainer(short_episodes(3), ScriptedPolicy::default());
        let report = t.run(4).unwrap();
        assert_eq!(report.episodes, 4);
        assert_eq!(report.scores.len(), 4);
        assert_eq!(report.terminated_episodes, 0);
        assert!(!report.interrupted);
        assert_eq!(report.solved_at, None);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["episodes"], 4);
    }
}
