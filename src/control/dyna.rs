use crate::core::{Controller, OnlineLearner};
use crate::domains::{Observation, Transition};
use crate::error::{check_step_size, check_unit, Error, Result};
use crate::model::StateActionModel;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

/// Dyna architecture: an inner learner augmented with planning updates drawn
/// from a learned environment model.
///
/// Every real transition first updates the inner learner, then the model of
/// the visited state-action pair, and finally drives `n_planning_steps`
/// simulated updates from uniformly sampled model entries. Successors that
/// were observed to be terminal are replayed as terminal.
pub struct Dyna<S: Ord + Clone, L> {
    pub learner: L,

    model: BTreeMap<(S, usize), StateActionModel<S>>,
    terminals: BTreeSet<S>,

    n_planning_steps: usize,
    greediness: f64,
    model_step_size: f64,

    rng: StdRng,
}

impl<S: Ord + Clone, L> Dyna<S, L> {
    pub fn new(
        learner: L,
        n_planning_steps: usize,
        greediness: f64,
        model_step_size: f64,
        seed: u64,
    ) -> Result<Dyna<S, L>> {
        Ok(Dyna {
            learner,

            model: BTreeMap::new(),
            terminals: BTreeSet::new(),

            n_planning_steps,
            greediness: check_unit("greediness", greediness)?,
            model_step_size: check_step_size("model step size", model_step_size)?,

            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Number of state-action pairs the model has experienced.
    pub fn n_model_entries(&self) -> usize { self.model.len() }
}

impl<S, L> OnlineLearner<S, usize> for Dyna<S, L>
where
    S: Ord + Clone,
    L: OnlineLearner<S, usize>,
{
    fn handle_transition(&mut self, t: &Transition<S, usize>) -> Result<f64> {
        let delta = self.learner.handle_transition(t)?;

        let ns = t.to.state().clone();

        if t.terminated() {
            self.terminals.insert(ns.clone());
        }

        let key = (t.from.state().clone(), t.action);

        if !self.model.contains_key(&key) {
            let seed = self.rng.gen();

            self.model.insert(
                key.clone(),
                StateActionModel::new(self.greediness, self.model_step_size, seed)?,
            );
        }

        if let Some(m) = self.model.get_mut(&key) {
            m.update(ns, t.reward);
        }

        for _ in 0..self.n_planning_steps {
            let i = self.rng.gen_range(0..self.model.len());

            let simulated = {
                let (key, m) = match self.model.iter_mut().nth(i) {
                    Some(entry) => entry,
                    None => continue,
                };

                let ns = match m.next_state() {
                    Ok(ns) => ns.clone(),
                    Err(Error::EmptyModel) => continue,
                    Err(e) => return Err(e),
                };
                let reward = m.reward_of(&ns)?;

                let to = if self.terminals.contains(&ns) {
                    Observation::Terminal(ns)
                } else {
                    Observation::Full(ns)
                };

                Transition {
                    from: Observation::Full(key.0.clone()),
                    action: key.1,
                    reward,
                    to,
                }
            };

            self.learner.handle_transition(&simulated)?;
        }

        Ok(delta)
    }

    fn reset(&mut self) { self.learner.reset(); }
}

impl<S, L> Controller<S, usize> for Dyna<S, L>
where
    S: Ord + Clone,
    L: Controller<S, usize>,
{
    fn sample_target(&mut self, s: &S) -> Result<usize> { self.learner.sample_target(s) }

    fn sample_behaviour(&mut self, s: &S) -> Result<usize> { self.learner.sample_behaviour(s) }
}

#[cfg(test)]
mod tests {
    use super::Dyna;
    use crate::control::tabular::QLearning;
    use crate::core::{run, Controller, SerialExperiment};
    use crate::domains::Corridor;
    use crate::error::Result;
    use crate::policies::EpsilonGreedy;

    #[test]
    fn test_planning_accelerates_convergence() {
        let policy = EpsilonGreedy::seeded(0.0, 0).unwrap();
        let learner = QLearning::new(2, policy, 0.5, 1.0, 0.0).unwrap();
        let mut agent = Dyna::new(learner, 50, 0.9, 0.5, 11).unwrap();

        let episodes = {
            let experiment =
                SerialExperiment::new(&mut agent, Box::new(|| Corridor::new(4)), 200);

            run(experiment, 2, None).unwrap()
        };

        assert_eq!(episodes.len(), 2);

        // Two episodes with planning suffice to back the exit reward all the
        // way up to the start cell:
        assert_eq!(agent.sample_target(&0).unwrap(), 0);
        for s in 0..4 {
            assert!(agent.learner.q_func.get(&s, 0) > agent.learner.q_func.get(&s, 1));
        }
    }

    #[test]
    fn test_model_tracks_visited_pairs() {
        let policy = EpsilonGreedy::seeded(0.0, 0).unwrap();
        let learner = QLearning::new(2, policy, 0.5, 1.0, 0.0).unwrap();
        let mut agent = Dyna::new(learner, 10, 1.0, 0.5, 3).unwrap();

        {
            let experiment =
                SerialExperiment::new(&mut agent, Box::new(|| Corridor::new(4)), 200);

            run(experiment, 1, None).unwrap();
        }

        // A purely greedy first episode walks straight to the exit:
        assert_eq!(agent.n_model_entries(), 4);
    }

    #[test]
    fn test_validation() {
        let policy = EpsilonGreedy::seeded(0.0, 0).unwrap();
        let learner: QLearning<usize, _> = QLearning::new(2, policy, 0.5, 1.0, 0.0).unwrap();

        let result: Result<Dyna<usize, _>> = Dyna::new(learner, 10, 1.5, 0.5, 0);
        assert!(result.is_err());
    }
}
