use super::Policy;
use crate::error::{Error, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Softmax policy sampling actions proportionally to `exp(Q / temperature)`.
///
/// The maximum is subtracted before exponentiation for numerical stability; a
/// vanishing normaliser falls back to the uniform distribution.
pub struct Boltzmann {
    temperature: f64,
    rng: StdRng,
}

impl Boltzmann {
    pub fn new(temperature: f64) -> Result<Boltzmann> {
        Boltzmann::with_rng(temperature, StdRng::from_entropy())
    }

    pub fn seeded(temperature: f64, seed: u64) -> Result<Boltzmann> {
        Boltzmann::with_rng(temperature, StdRng::seed_from_u64(seed))
    }

    fn with_rng(temperature: f64, rng: StdRng) -> Result<Boltzmann> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "temperature must be positive, got {}",
                temperature
            )));
        }

        Ok(Boltzmann { temperature, rng })
    }

    pub fn temperature(&self) -> f64 { self.temperature }
}

impl Policy for Boltzmann {
    fn sample(&mut self, qs: &[f64]) -> usize {
        let ps = self.probabilities(qs);

        let r = self.rng.gen::<f64>();
        let mut acc = 0.0;

        for (i, p) in ps.iter().enumerate() {
            acc += p;

            if acc > r {
                return i;
            }
        }

        ps.len() - 1
    }

    fn probabilities(&self, qs: &[f64]) -> Vec<f64> {
        let max = qs.iter().cloned().fold(::std::f64::MIN, f64::max);

        let ws: Vec<f64> = qs
            .iter()
            .map(|q| ((q - max) / self.temperature).exp())
            .collect();
        let z: f64 = ws.iter().sum();

        if z > 0.0 {
            ws.iter().map(|w| w / z).collect()
        } else {
            vec![1.0 / qs.len() as f64; qs.len()]
        }
    }
}
