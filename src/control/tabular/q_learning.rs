use super::QTable;
use crate::core::{Controller, OnlineLearner};
use crate::domains::{Observation, Transition};
use crate::error::{check_step_size, check_unit, Error, Result};
use crate::fa::{Trace, TraceKind};
use crate::policies::Policy;
use crate::utils::{argmax_first, argmaxima};
use std::hash::Hash;

/// Tabular Watkins Q(λ).
///
/// Bootstraps from the greedy successor value and clears the eligibility
/// trace at the end of any step whose next action is exploratory. With
/// `lambda = 0` this reduces to one-step Q-learning.
pub struct QLearning<S: Ord + Clone, Pi: Policy> {
    pub q_func: QTable<S>,
    pub policy: Pi,

    alpha: f64,
    gamma: f64,
    lambda: f64,

    trace: Trace<(S, usize)>,
    next_action: Option<(S, usize)>,
}

impl<S: Ord + Clone + Hash, Pi: Policy> QLearning<S, Pi> {
    pub fn new(
        n_actions: usize,
        policy: Pi,
        alpha: f64,
        gamma: f64,
        lambda: f64,
    ) -> Result<QLearning<S, Pi>> {
        Ok(QLearning {
            q_func: QTable::new(n_actions)?,
            policy,

            alpha: check_step_size("alpha", alpha)?,
            gamma: check_unit("gamma", gamma)?,
            lambda: check_unit("lambda", lambda)?,

            trace: Trace::new(TraceKind::Replacing),
            next_action: None,
        })
    }

    pub fn trace(&self) -> &Trace<(S, usize)> { &self.trace }
}

impl<S, Pi> OnlineLearner<S, usize> for QLearning<S, Pi>
where
    S: Ord + Clone + Hash,
    Pi: Policy,
{
    fn handle_transition(&mut self, t: &Transition<S, usize>) -> Result<f64> {
        let s = t.from.state();
        let qsa = self.q_func.get(s, t.action);

        let (delta, exploratory) = match t.to {
            Observation::Terminal(_) => (t.reward - qsa, false),
            Observation::Full(ref ns) => {
                let nqs = self.q_func.action_values(ns);

                let (greedy, nqs_max) = argmaxima(&nqs);
                let na = self.policy.sample(&nqs);

                self.next_action = Some((ns.clone(), na));

                (
                    t.reward + self.gamma * nqs_max - qsa,
                    !greedy.contains(&na),
                )
            },
        };

        if !delta.is_finite() {
            return Err(Error::Numeric(delta));
        }

        self.trace.decay(self.gamma * self.lambda);
        self.trace.visit((s.clone(), t.action));

        for ((s, a), e) in self.trace.iter() {
            self.q_func.nudge(s.clone(), *a, self.alpha * delta * e);
        }

        if t.terminated() {
            self.reset();
        } else if exploratory {
            // No credit flows back across an exploratory action:
            self.trace.reset();
        }

        Ok(delta)
    }

    fn reset(&mut self) {
        self.trace.reset();
        self.next_action = None;
    }
}

impl<S, Pi> Controller<S, usize> for QLearning<S, Pi>
where
    S: Ord + Clone,
    Pi: Policy,
{
    fn sample_target(&mut self, s: &S) -> Result<usize> {
        Ok(argmax_first(&self.q_func.action_values(s)).0)
    }

    fn sample_behaviour(&mut self, s: &S) -> Result<usize> {
        if let Some((ref cached, a)) = self.next_action {
            if cached == s {
                return Ok(a);
            }
        }

        let qs = self.q_func.action_values(s);

        Ok(self.policy.sample(&qs))
    }
}
