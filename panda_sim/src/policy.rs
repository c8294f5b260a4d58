//! Action selection for the training runner.
//!
//! Policies see the last observation and return a raw action. While the arm
//! is still moving they answer with the hold-last sentinel so the previous
//! targets are re-issued until the joints settle.

use std::collections::VecDeque;

use panda_common::consts::{ACTION_COUNT, HOLD_LAST_ACTION};
use panda_common::types::Observation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses the next raw action from the last observation.
pub trait Policy {
    /// Raw action for the next step (`-1` or a code in `[0, 2186]`).
    fn select(&mut self, observation: &Observation) -> i64;
}

/// Uniformly random directive codes.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Seeded random policy; equal seeds give equal action sequences.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select(&mut self, observation: &Observation) -> i64 {
        if observation.is_still_moving() {
            return HOLD_LAST_ACTION;
        }
        self.rng.gen_range(0..ACTION_COUNT as i64)
    }
}

/// Replays a fixed list of directive codes, one per settled observation.
///
/// Once the script is exhausted it keeps answering with hold-all (`0`).
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    script: VecDeque<i64>,
}

impl ScriptedPolicy {
    /// Policy replaying `actions` in order.
    pub fn new(actions: impl IntoIterator<Item = i64>) -> Self {
        Self {
            script: actions.into_iter().collect(),
        }
    }

    /// Actions not yet issued.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Policy for ScriptedPolicy {
    fn select(&mut self, observation: &Observation) -> i64 {
        if observation.is_still_moving() {
            return HOLD_LAST_ACTION;
        }
        self.script.pop_front().unwrap_or(0)
    }
}

impl<F: FnMut(&Observation) -> i64> Policy for F {
    fn select(&mut self, observation: &Observation) -> i64 {
        self(observation)
    }
}
