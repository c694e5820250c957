use super::GradientDescent;
use crate::core::{Controller, OnlineLearner};
use crate::domains::{Observation, Transition};
use crate::error::Result;
use crate::fa::{LinearQ, Projection, Trace};
use crate::policies::Policy;
use crate::utils::{argmax_first, argmaxima};

/// Watkins' Q(λ) over a tile-coded linear action-value function.
///
/// The temporal-difference target bootstraps from the greedy successor value
/// regardless of the behaviour policy. Whenever the action taken next is not
/// greedy, the eligibility trace is cleared at the end of the step, so no
/// credit flows back across an exploratory choice.
///
/// # References
/// - Watkins, C. J. C. H. (1989). Learning from Delayed Rewards. Ph.D.
/// thesis, Cambridge University.
/// - Watkins, C. J. C. H., Dayan, P. (1992). Q-learning. Machine Learning,
/// 8:279–292.
pub struct QLambda<P: Projection, Pi: Policy> {
    pub q_func: LinearQ<P>,
    pub policy: Pi,

    gd: GradientDescent,
    next_action: Option<(Vec<f64>, usize)>,
}

impl<P: Projection, Pi: Policy> QLambda<P, Pi> {
    pub fn new(
        q_func: LinearQ<P>,
        policy: Pi,
        alpha: f64,
        gamma: f64,
        lambda: f64,
    ) -> Result<QLambda<P, Pi>> {
        Ok(QLambda {
            q_func,
            policy,

            gd: GradientDescent::new(alpha, gamma, lambda)?,
            next_action: None,
        })
    }

    pub fn trace(&self) -> &Trace<(usize, usize)> { self.gd.trace() }
}

impl<P: Projection, Pi: Policy> OnlineLearner<Vec<f64>, usize> for QLambda<P, Pi> {
    fn handle_transition(&mut self, t: &Transition<Vec<f64>, usize>) -> Result<f64> {
        let phi = self.q_func.project(t.from.state())?;
        let qsa = self.q_func.evaluate(&phi, t.action);

        match t.to {
            Observation::Terminal(_) => {
                let delta = self.gd.step(&mut self.q_func, &phi, t.action, t.reward - qsa)?;

                self.reset();

                Ok(delta)
            },
            Observation::Full(ref ns) => {
                let nphi = self.q_func.project(ns)?;
                let nqs = self.q_func.evaluate_all(&nphi);

                let (greedy, nqs_max) = argmaxima(&nqs);
                let na = self.policy.sample(&nqs);

                self.next_action = Some((ns.clone(), na));

                let delta = self.gd.step(
                    &mut self.q_func,
                    &phi,
                    t.action,
                    t.reward + self.gd.gamma() * nqs_max - qsa,
                )?;

                // Exploratory next action truncates the eligibility trace:
                if !greedy.contains(&na) {
                    self.gd.reset();
                }

                Ok(delta)
            },
        }
    }

    fn reset(&mut self) {
        self.gd.reset();
        self.next_action = None;
    }
}

impl<P: Projection, Pi: Policy> Controller<Vec<f64>, usize> for QLambda<P, Pi> {
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

#[cfg(test)]
mod tests {
    use super::QLambda;
    use crate::core::OnlineLearner;
    use crate::domains::{Observation, Transition};
    use crate::fa::{Dimension, LinearQ, Projection, TileCoding};
    use crate::policies::Policy;
    use approx::assert_abs_diff_eq;

    /// Deterministic stand-in policy always returning the same ordinal.
    struct Fixed(usize);

    impl Policy for Fixed {
        fn sample(&mut self, _: &[f64]) -> usize { self.0 }

        fn probabilities(&self, qs: &[f64]) -> Vec<f64> {
            let mut ps = vec![0.0; qs.len()];
            ps[self.0] = 1.0;

            ps
        }
    }

    fn unit_q() -> LinearQ<TileCoding> {
        let tc = TileCoding::aligned(vec![Dimension::new(0.0, 1.0, 10).unwrap()], 1).unwrap();

        LinearQ::new(tc, 2).unwrap()
    }

    fn transition(from: f64, to: f64) -> Transition<Vec<f64>, usize> {
        Transition {
            from: Observation::Full(vec![from]),
            action: 0,
            reward: 0.0,
            to: Observation::Full(vec![to]),
        }
    }

    #[test]
    fn test_greedy_step_keeps_trace() {
        let mut agent = {
            let mut q = unit_q();

            // Make action 0 strictly greedy everywhere:
            for i in 0..q.projection().size() {
                q.nudge(i, 0, 1.0);
            }

            QLambda::new(q, Fixed(0), 0.5, 1.0, 0.9).unwrap()
        };

        agent.handle_transition(&transition(0.15, 0.55)).unwrap();
        agent.handle_transition(&transition(0.55, 0.95)).unwrap();

        assert_eq!(agent.trace().len(), 2);
    }

    #[test]
    fn test_exploratory_step_truncates_trace() {
        let mut agent = {
            let mut q = unit_q();

            for i in 0..q.projection().size() {
                q.nudge(i, 0, 1.0);
            }

            // The policy always retreats to action 1, which is never greedy:
            QLambda::new(q, Fixed(1), 0.5, 1.0, 0.9).unwrap()
        };

        agent.handle_transition(&transition(0.15, 0.55)).unwrap();

        assert!(agent.trace().is_empty());
    }

    #[test]
    fn test_bootstraps_off_greedy_value() {
        let mut agent = {
            let mut q = unit_q();
            let nphi = q.project(&[0.55]).unwrap();

            q.nudge(nphi[0], 0, 2.0);
            q.nudge(nphi[0], 1, -1.0);

            QLambda::new(q, Fixed(1), 0.5, 0.5, 0.0).unwrap()
        };

        // The target uses max Q(s', .) = 2 even though the policy picks 1:
        let delta = agent.handle_transition(&transition(0.15, 0.55)).unwrap();

        assert_abs_diff_eq!(delta, 0.5 * 2.0);
    }
}
