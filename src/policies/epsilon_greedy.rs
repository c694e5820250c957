use super::{Greedy, Policy, Random};
use crate::error::{check_unit, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Greedy policy with probability-ε uniform exploration.
pub struct EpsilonGreedy {
    greedy: Greedy,
    random: Random,

    epsilon: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Result<EpsilonGreedy> {
        Ok(EpsilonGreedy {
            greedy: Greedy,
            random: Random::new(),

            epsilon: check_unit("epsilon", epsilon)?,
            rng: StdRng::from_entropy(),
        })
    }

    pub fn seeded(epsilon: f64, seed: u64) -> Result<EpsilonGreedy> {
        Ok(EpsilonGreedy {
            greedy: Greedy,
            random: Random::seeded(seed.wrapping_add(1)),

            epsilon: check_unit("epsilon", epsilon)?,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn epsilon(&self) -> f64 { self.epsilon }
}

impl Policy for EpsilonGreedy {
    fn sample(&mut self, qs: &[f64]) -> usize {
        if self.rng.gen::<f64>() < self.epsilon {
            self.random.sample(qs)
        } else {
            self.greedy.sample(qs)
        }
    }

    fn probabilities(&self, qs: &[f64]) -> Vec<f64> {
        let pr = self.epsilon / qs.len() as f64;

        self.greedy
            .probabilities(qs)
            .iter()
            .map(|p| pr + p * (1.0 - self.epsilon))
            .collect()
    }
}
