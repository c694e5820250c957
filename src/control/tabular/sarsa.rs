use super::QTable;
use crate::core::{Controller, OnlineLearner};
use crate::domains::{Observation, Transition};
use crate::error::{check_step_size, check_unit, Error, Result};
use crate::fa::{Trace, TraceKind};
use crate::policies::Policy;
use crate::utils::argmax_first;
use std::hash::Hash;

/// Tabular SARSA(λ) with replacing eligibility traces.
pub struct Sarsa<S: Ord + Clone, Pi: Policy> {
    pub q_func: QTable<S>,
    pub policy: Pi,

    alpha: f64,
    gamma: f64,
    lambda: f64,

    trace: Trace<(S, usize)>,
    next_action: Option<(S, usize)>,
}

impl<S: Ord + Clone + Hash, Pi: Policy> Sarsa<S, Pi> {
    pub fn new(
        n_actions: usize,
        policy: Pi,
        alpha: f64,
        gamma: f64,
        lambda: f64,
    ) -> Result<Sarsa<S, Pi>> {
        Ok(Sarsa {
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

impl<S, Pi> OnlineLearner<S, usize> for Sarsa<S, Pi>
where
    S: Ord + Clone + Hash,
    Pi: Policy,
{
    fn handle_transition(&mut self, t: &Transition<S, usize>) -> Result<f64> {
        let s = t.from.state();
        let qsa = self.q_func.get(s, t.action);

        let delta = match t.to {
            Observation::Terminal(_) => t.reward - qsa,
            Observation::Full(ref ns) => {
                let nqs = self.q_func.action_values(ns);
                let na = self.policy.sample(&nqs);

                self.next_action = Some((ns.clone(), na));

                t.reward + self.gamma * nqs[na] - qsa
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
        }

        Ok(delta)
    }

    fn reset(&mut self) {
        self.trace.reset();
        self.next_action = None;
    }
}

impl<S, Pi> Controller<S, usize> for Sarsa<S, Pi>
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

#[cfg(test)]
mod tests {
    use super::Sarsa;
    use crate::core::{run, Controller, SerialExperiment};
    use crate::domains::Corridor;
    use crate::policies::EpsilonGreedy;

    #[test]
    fn test_corridor_convergence() {
        let policy = EpsilonGreedy::seeded(0.0, 0).unwrap();
        let mut agent = Sarsa::new(2, policy, 0.5, 1.0, 0.9).unwrap();

        let episodes = {
            let experiment =
                SerialExperiment::new(&mut agent, Box::new(|| Corridor::new(2)), 100);

            run(experiment, 3, None).unwrap()
        };

        // The greedy action from the start cell leads toward the exit:
        assert_eq!(agent.sample_target(&0).unwrap(), 0);
        assert!(agent.q_func.get(&0, 0) > agent.q_func.get(&0, 1));
        assert!(agent.q_func.get(&1, 0) > agent.q_func.get(&1, 1));

        // Under a greedy start the corridor is solved in two steps:
        assert!(episodes.iter().all(|e| e.steps == 2));
    }

    #[test]
    fn test_trace_propagates_credit() {
        let policy = EpsilonGreedy::seeded(0.0, 0).unwrap();
        let mut agent: Sarsa<usize, _> = Sarsa::new(2, policy, 0.5, 1.0, 0.9).unwrap();

        let mut experiment =
            SerialExperiment::new(&mut agent, Box::new(|| Corridor::new(2)), 100);

        experiment.next().unwrap().unwrap();
        drop(experiment);

        // A single episode credits the start cell through the trace:
        assert!(agent.q_func.get(&0, 0) > 0.0);
        assert!(agent.q_func.get(&1, 0) > agent.q_func.get(&0, 0));
    }
}
