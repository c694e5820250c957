use super::GradientDescent;
use crate::core::{Controller, OnlineLearner};
use crate::domains::{Observation, Transition};
use crate::error::Result;
use crate::fa::{LinearQ, Projection, Trace};
use crate::policies::Policy;
use crate::utils::argmax_first;

/// On-policy SARSA(λ) over a tile-coded linear action-value function.
///
/// The action evaluated at the successor state is the one the behaviour
/// policy will actually take next; it is cached so that the episode driver's
/// following `sample_behaviour` call agrees with the update that was just
/// applied.
///
/// # References
/// - Rummery, G. A. (1995). Problem Solving with Reinforcement Learning.
/// Ph.D thesis, Cambridge University.
/// - Singh, S. P., Sutton, R. S. (1996). Reinforcement learning with
/// replacing eligibility traces. Machine Learning 22:123–158.
pub struct SarsaLambda<P: Projection, Pi: Policy> {
    pub q_func: LinearQ<P>,
    pub policy: Pi,

    gd: GradientDescent,
    next_action: Option<(Vec<f64>, usize)>,
}

impl<P: Projection, Pi: Policy> SarsaLambda<P, Pi> {
    pub fn new(
        q_func: LinearQ<P>,
        policy: Pi,
        alpha: f64,
        gamma: f64,
        lambda: f64,
    ) -> Result<SarsaLambda<P, Pi>> {
        Ok(SarsaLambda {
            q_func,
            policy,

            gd: GradientDescent::new(alpha, gamma, lambda)?,
            next_action: None,
        })
    }

    pub fn trace(&self) -> &Trace<(usize, usize)> { self.gd.trace() }
}

impl<P: Projection, Pi: Policy> OnlineLearner<Vec<f64>, usize> for SarsaLambda<P, Pi> {
    fn handle_transition(&mut self, t: &Transition<Vec<f64>, usize>) -> Result<f64> {
        let phi = self.q_func.project(t.from.state())?;
        let qsa = self.q_func.evaluate(&phi, t.action);

        let delta = match t.to {
            Observation::Terminal(_) => t.reward - qsa,
            Observation::Full(ref ns) => {
                let nphi = self.q_func.project(ns)?;
                let nqs = self.q_func.evaluate_all(&nphi);
                let na = self.policy.sample(&nqs);

                self.next_action = Some((ns.clone(), na));

                t.reward + self.gd.gamma() * nqs[na] - qsa
            },
        };

        let delta = self.gd.step(&mut self.q_func, &phi, t.action, delta)?;

        if t.terminated() {
            self.reset();
        }

        Ok(delta)
    }

    fn reset(&mut self) {
        self.gd.reset();
        self.next_action = None;
    }
}

impl<P: Projection, Pi: Policy> Controller<Vec<f64>, usize> for SarsaLambda<P, Pi> {
    fn sample_target(&mut self, s: &Vec<f64>) -> Result<usize> {
        let qs = self.q_func.action_values(s)?;

        Ok(argmax_first(&qs).0)
    }

    fn sample_behaviour(&mut self, s: &Vec<f64>) -> Result<usize> {
        if let Some((ref cached, a)) = self.next_action {
            if cached == s {
                return Ok(a);
            }
        }

        let qs = self.q_func.action_values(s)?;

        Ok(self.policy.sample(&qs))
    }
}
