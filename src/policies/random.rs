use super::Policy;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniformly random policy.
pub struct Random {
    rng: StdRng,
}

impl Random {
    pub fn new() -> Random {
        Random {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Random {
        Random {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Random {
    fn default() -> Random { Random::new() }
}

impl Policy for Random {
    fn sample(&mut self, qs: &[f64]) -> usize { self.rng.gen_range(0..qs.len()) }

    fn probabilities(&self, qs: &[f64]) -> Vec<f64> {
        vec![1.0 / qs.len() as f64; qs.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::{Policy, Random};

    #[test]
    fn test_covers_actions() {
        let mut p = Random::seeded(0);
        let mut counts = [0; 3];

        for _ in 0..3000 {
            counts[p.sample(&[0.0, 0.0, 0.0])] += 1;
        }

        assert!(counts.iter().all(|&c| c > 0));
    }

    #[test]
    fn test_probabilities() {
        let p = Random::seeded(0);

        assert_eq!(p.probabilities(&[1.0, 0.0, 0.0, 0.0]), vec![0.25; 4]);
    }
}
