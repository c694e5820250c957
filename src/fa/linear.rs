use super::Projection;
use crate::error::{Error, Result};
use ndarray::Array2;

/// Linear action-value function over a sparse projection.
///
/// Holds one weight column per action; the value of a state-action pair is
/// the sum of that column's weights at the projection's active indices.
#[derive(Clone, Debug)]
pub struct LinearQ<P: Projection> {
    projection: P,
    weights: Array2<f64>,
}

impl<P: Projection> LinearQ<P> {
    pub fn new(projection: P, n_actions: usize) -> Result<LinearQ<P>> {
        if n_actions < 1 {
            return Err(Error::InvalidConfig(
                "linear Q-function requires at least one action".to_string(),
            ));
        }

        let weights = Array2::zeros((projection.size(), n_actions));

        Ok(LinearQ {
            projection,
            weights,
        })
    }

    pub fn projection(&self) -> &P { &self.projection }

    pub fn n_actions(&self) -> usize { self.weights.ncols() }

    pub fn weights(&self) -> &Array2<f64> { &self.weights }

    /// Active feature indices for `state`.
    pub fn project(&self, state: &[f64]) -> Result<Vec<usize>> {
        self.projection.project(state)
    }

    /// Q(s, a) for the pre-projected features `phi`.
    pub fn evaluate(&self, phi: &[usize], action: usize) -> f64 {
        phi.iter().map(|&i| self.weights[[i, action]]).sum()
    }

    /// Q-values of every action for the pre-projected features `phi`.
    pub fn evaluate_all(&self, phi: &[usize]) -> Vec<f64> {
        (0..self.n_actions()).map(|a| self.evaluate(phi, a)).collect()
    }

    /// Q-values of every action for `state`.
    pub fn action_values(&self, state: &[f64]) -> Result<Vec<f64>> {
        self.project(state).map(|phi| self.evaluate_all(&phi))
    }

    pub(crate) fn nudge(&mut self, index: usize, action: usize, amount: f64) {
        self.weights[[index, action]] += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::LinearQ;
    use crate::fa::{Dimension, Projection, TileCoding};
    use approx::assert_abs_diff_eq;

    fn coder() -> TileCoding {
        TileCoding::aligned(vec![Dimension::new(0.0, 1.0, 10).unwrap()], 2).unwrap()
    }

    #[test]
    fn test_zero_initialisation() {
        let q = LinearQ::new(coder(), 3).unwrap();

        assert_eq!(q.n_actions(), 3);
        assert_eq!(q.action_values(&[0.5]).unwrap(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_linearity() {
        let mut q = LinearQ::new(coder(), 2).unwrap();
        let phi = q.project(&[0.25]).unwrap();

        q.nudge(phi[0], 1, 1.5);
        q.nudge(phi[1], 1, -0.25);

        let expected: f64 = phi.iter().map(|&i| q.weights()[[i, 1]]).sum();

        assert_abs_diff_eq!(q.evaluate(&phi, 1), expected);
        assert_abs_diff_eq!(q.evaluate(&phi, 1), 1.25);
        assert_abs_diff_eq!(q.evaluate(&phi, 0), 0.0);
    }

    #[test]
    fn test_invalid_actions() {
        assert!(LinearQ::new(coder(), 0).is_err());
    }
}
