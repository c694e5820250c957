use super::{Controller, OnlineLearner};
use crate::domains::Domain;
use crate::error::Result;
use slog::{Logger, Record, Result as LogResult, Serializer, KV};

/// Container for episodic statistics.
#[derive(Clone, Debug)]
pub struct Episode {
    /// The number of steps taken to reach the terminal state.
    pub steps: u64,

    /// The total accumulated reward over the episode.
    pub reward: f64,
}

impl KV for Episode {
    fn serialize(&self, _: &Record, serializer: &mut dyn Serializer) -> LogResult {
        serializer.emit_u64("steps", self.steps)?;
        serializer.emit_f64("reward", self.reward)?;

        Ok(())
    }
}

/// Helper function for running experiments.
pub fn run(
    runner: impl Iterator<Item = Result<Episode>>,
    n_episodes: usize,
    logger: Option<Logger>,
) -> Result<Vec<Episode>> {
    let mut episodes = Vec::with_capacity(n_episodes);

    for (i, res) in runner.take(n_episodes).enumerate() {
        let episode = res?;

        if let Some(ref logger) = logger {
            info!(logger, "episode {}", i + 1; &episode);
        }

        episodes.push(episode);
    }

    Ok(episodes)
}

/// Utility for running a sequence of training episodes.
pub struct SerialExperiment<'a, L, D> {
    agent: &'a mut L,
    domain_factory: Box<dyn Fn() -> D>,

    step_limit: u64,
}

impl<'a, L, D> SerialExperiment<'a, L, D>
where
    D: Domain,
    L: OnlineLearner<D::State, usize> + Controller<D::State, usize>,
{
    pub fn new(
        agent: &'a mut L,
        domain_factory: Box<dyn Fn() -> D>,
        step_limit: u64,
    ) -> SerialExperiment<'a, L, D> {
        SerialExperiment {
            agent,
            domain_factory,
            step_limit,
        }
    }
}

impl<'a, L, D> Iterator for SerialExperiment<'a, L, D>
where
    D: Domain,
    L: OnlineLearner<D::State, usize> + Controller<D::State, usize>,
{
    type Item = Result<Episode>;

    fn next(&mut self) -> Option<Result<Episode>> {
        let mut domain = (self.domain_factory)();

        let mut a = match self.agent.sample_behaviour(domain.emit().state()) {
            Ok(a) => a,
            Err(e) => return Some(Err(e)),
        };

        let mut e = Episode {
            steps: 0,
            reward: 0.0,
        };

        for j in 1..=self.step_limit {
            let t = domain.step(a);

            e.steps = j;
            e.reward += t.reward;

            if let Err(err) = self.agent.handle_transition(&t) {
                return Some(Err(err));
            }

            if t.terminated() {
                break;
            } else if j >= self.step_limit {
                // Step cap reached; drop the unfinished episode's traces.
                self.agent.reset();
                break;
            }

            a = match self.agent.sample_behaviour(t.to.state()) {
                Ok(a) => a,
                Err(err) => return Some(Err(err)),
            };
        }

        Some(Ok(e))
    }
}

/// Utility for running evaluation episodes under the target policy, without
/// learning.
pub struct Evaluation<'a, L, D> {
    agent: &'a mut L,
    domain_factory: Box<dyn Fn() -> D>,

    step_limit: u64,
}

impl<'a, L, D> Evaluation<'a, L, D>
where
    D: Domain,
    L: Controller<D::State, usize>,
{
    pub fn new(
        agent: &'a mut L,
        domain_factory: Box<dyn Fn() -> D>,
        step_limit: u64,
    ) -> Evaluation<'a, L, D> {
        Evaluation {
            agent,
            domain_factory,
            step_limit,
        }
    }
}

impl<'a, L, D> Iterator for Evaluation<'a, L, D>
where
    D: Domain,
    L: Controller<D::State, usize>,
{
    type Item = Result<Episode>;

    fn next(&mut self) -> Option<Result<Episode>> {
        let mut domain = (self.domain_factory)();

        let mut a = match self.agent.sample_target(domain.emit().state()) {
            Ok(a) => a,
            Err(e) => return Some(Err(e)),
        };

        let mut e = Episode {
            steps: 0,
            reward: 0.0,
        };

        for j in 1..=self.step_limit {
            let t = domain.step(a);

            e.steps = j;
            e.reward += t.reward;

            if t.terminated() || j >= self.step_limit {
                break;
            }

            a = match self.agent.sample_target(t.to.state()) {
                Ok(a) => a,
                Err(err) => return Some(Err(err)),
            };
        }

        Some(Ok(e))
    }
}
