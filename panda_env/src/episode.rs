//! Episode evaluator.
//!
//! Per-episode lifecycle: Running → Terminated, fired by proximity. Across
//! episodes it keeps the append-only score history and decides whether the
//! task is solved from the mean of the trailing window.
//!
//! No step budget is enforced here; the harness owns max-steps cutoffs.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle state of the current episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EpisodeState {
    /// Steps are being taken.
    #[default]
    Running,
    /// The end-effector came within the termination distance.
    Terminated,
}

/// Termination, score accumulation and solved decision.
#[derive(Debug, Clone)]
pub struct EpisodeEvaluator {
    done_distance: f64,
    solved_window: usize,
    solved_threshold: f64,
    state: EpisodeState,
    episode_score: f64,
    history: Vec<f64>,
}

impl EpisodeEvaluator {
    pub fn new(done_distance: f64, solved_window: usize, solved_threshold: f64) -> Self {
        Self {
            done_distance,
            solved_window,
            solved_threshold,
            state: EpisodeState::Running,
            episode_score: 0.0,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    /// True iff `distance` is strictly below the termination distance.
    #[inline]
    pub fn is_done(&self, distance: f64) -> bool {
        distance < self.done_distance
    }

    /// Evaluate the last distance and move to `Terminated` when close enough.
    ///
    /// Terminated is absorbing until [`Self::finish_episode`].
    pub fn update(&mut self, distance: f64) -> EpisodeState {
        if self.state == EpisodeState::Running && self.is_done(distance) {
            debug!(distance, "episode terminated by proximity");
            self.state = EpisodeState::Terminated;
        }
        self.state
    }

    /// Add a step reward to the running episode score.
    pub fn record_reward(&mut self, reward: f64) {
        self.episode_score += reward;
    }

    /// Cumulative score of the episode in progress.
    #[inline]
    pub fn episode_score(&self) -> f64 {
        self.episode_score
    }

    /// Close the current episode: append its score and start a new one.
    ///
    /// Returns the score that was appended.
    pub fn finish_episode(&mut self) -> f64 {
        let score = self.episode_score;
        self.history.push(score);
        debug!(
            episode = self.history.len(),
            score,
            state = ?self.state,
            "episode finished"
        );
        self.episode_score = 0.0;
        self.state = EpisodeState::Running;
        score
    }

    /// Start over without recording the episode in progress.
    pub fn restart(&mut self) {
        self.episode_score = 0.0;
        self.state = EpisodeState::Running;
    }

    /// Every finished episode score, oldest first. Never truncated.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Mean of the trailing window, `None` while the history is empty.
    pub fn rolling_mean(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        let start = self.history.len().saturating_sub(self.solved_window);
        let tail = &self.history[start..];
        Some(tail.iter().sum::<f64>() / tail.len() as f64)
    }

    /// More than `solved_window` episodes and a trailing mean strictly above
    /// the threshold.
    pub fn solved(&self) -> bool {
        self.history.len() > self.solved_window
            && self
                .rolling_mean()
                .is_some_and(|mean| mean > self.solved_threshold)
    }
}
