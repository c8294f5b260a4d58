//! Distance-shaped reward model.
//!
//! Base reward is the negative Euclidean distance between target and
//! end-effector. On top of it the first matching bonus tier (tightest first)
//! is added. The model keeps the last computed distance; it is the only
//! place the distance is recomputed each step and the episode evaluator
//! reads it for termination.

use panda_common::types::Position3D;

use crate::config::RewardTier;

/// Reward computation with the shared last-distance value.
#[derive(Debug, Clone)]
pub struct RewardModel {
    tiers: Vec<RewardTier>,
    distance: f64,
}

impl RewardModel {
    /// `tiers` must be sorted tightest first (see `EnvConfig::validate`).
    pub fn new(tiers: Vec<RewardTier>) -> Self {
        Self {
            tiers,
            distance: f64::INFINITY,
        }
    }

    /// Reward for the given arm-frame positions; updates [`Self::distance`].
    pub fn reward(&mut self, target: Position3D, end_effector: Position3D) -> f64 {
        self.distance = target.distance_to(&end_effector);
        shaped_reward(self.distance, &self.tiers)
    }

    /// Last computed distance, `+inf` before the first reward of an episode.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Forget the last distance.
    pub fn reset(&mut self) {
        self.distance = f64::INFINITY;
    }
}

/// Bonus of the first tier whose threshold lies strictly above `distance`.
pub fn tier_bonus(distance: f64, tiers: &[RewardTier]) -> f64 {
    tiers
        .iter()
        .find(|tier| distance < tier.below)
        .map_or(0.0, |tier| tier.bonus)
}

/// `-distance` plus the tier bonus.
#[inline]
pub fn shaped_reward(distance: f64, tiers: &[RewardTier]) -> f64 {
    -distance + tier_bonus(distance, tiers)
}
