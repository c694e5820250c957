//! Learned environment models for planning.
use crate::error::{check_step_size, check_unit, Error, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::Uniform;
use std::collections::BTreeMap;

/// Learned stochastic model of the successors of a single state-action pair.
///
/// Tracks an exponentially weighted visitation frequency and the latest
/// observed reward for every successor state ever seen. Successors are
/// sampled in proportion to their frequency with probability `greediness`,
/// and uniformly otherwise. Keys are kept in a `BTreeMap`, so the walk order
/// of the weighted draw is stable across calls.
pub struct StateActionModel<S: Ord + Clone> {
    freq: BTreeMap<S, f64>,
    reward: BTreeMap<S, f64>,

    greediness: f64,
    step_size: f64,
    rng: StdRng,
}

impl<S: Ord + Clone> StateActionModel<S> {
    pub fn new(greediness: f64, step_size: f64, seed: u64) -> Result<StateActionModel<S>> {
        Ok(StateActionModel {
            freq: BTreeMap::new(),
            reward: BTreeMap::new(),

            greediness: check_unit("greediness", greediness)?,
            step_size: check_step_size("step size", step_size)?,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Record an observed transition into `next` yielding `reward`.
    ///
    /// Every known successor's frequency decays toward 0 while `next`'s moves
    /// toward 1; the reward entry is overwritten with the latest observation.
    pub fn update(&mut self, next: S, reward: f64) {
        self.freq.entry(next.clone()).or_insert(0.0);
        self.reward.entry(next.clone()).or_insert(0.0);

        for (s, f) in self.freq.iter_mut() {
            let target = if *s == next { 1.0 } else { 0.0 };

            *f += self.step_size * (target - *f);
        }

        self.reward.insert(next, reward);
    }

    /// Draw a successor state from the model.
    pub fn next_state(&mut self) -> Result<&S> {
        if self.freq.is_empty() {
            return Err(Error::EmptyModel);
        }

        if self.rng.gen::<f64>() > self.greediness {
            let i = self.rng.gen_range(0..self.freq.len());

            return self.freq.keys().nth(i).ok_or(Error::EmptyModel);
        }

        let total: f64 = self.freq.values().sum();

        if total <= 0.0 {
            let i = self.rng.gen_range(0..self.freq.len());

            return self.freq.keys().nth(i).ok_or(Error::EmptyModel);
        }

        let draw = self.rng.sample(Uniform::new(0.0, total));
        let mut acc = 0.0;

        for (s, f) in self.freq.iter() {
            acc += f;

            if acc > draw {
                return Ok(s);
            }
        }

        self.freq.keys().next_back().ok_or(Error::EmptyModel)
    }

    /// Latest observed reward for the successor `s`.
    pub fn reward_of(&self, s: &S) -> Result<f64> {
        self.reward.get(s).copied().ok_or(Error::MissingSuccessor)
    }

    pub fn frequency_of(&self, s: &S) -> f64 {
        self.freq.get(s).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize { self.freq.len() }

    pub fn is_empty(&self) -> bool { self.freq.is_empty() }
}
