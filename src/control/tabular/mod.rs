//! Tabular temporal-difference learners over finite state spaces.
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Action-value table with a fixed action count and zero-valued defaults.
#[derive(Clone, Debug)]
pub struct QTable<S: Ord + Clone> {
    values: BTreeMap<S, Vec<f64>>,
    n_actions: usize,
}

impl<S: Ord + Clone> QTable<S> {
    pub fn new(n_actions: usize) -> Result<QTable<S>> {
        if n_actions < 1 {
            return Err(Error::InvalidConfig(
                "Q-table requires at least one action".to_string(),
            ));
        }

        Ok(QTable {
            values: BTreeMap::new(),
            n_actions,
        })
    }

    pub fn n_actions(&self) -> usize { self.n_actions }

    /// Number of states visited so far.
    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn get(&self, s: &S, a: usize) -> f64 {
        self.values.get(s).map(|qs| qs[a]).unwrap_or(0.0)
    }

    /// Q-values of every action in state `s`.
    pub fn action_values(&self, s: &S) -> Vec<f64> {
        self.values
            .get(s)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.n_actions])
    }

    pub(crate) fn nudge(&mut self, s: S, a: usize, amount: f64) {
        let n_actions = self.n_actions;

        self.values.entry(s).or_insert_with(|| vec![0.0; n_actions])[a] += amount;
    }
}

mod sarsa;
pub use self::sarsa::Sarsa;

mod q_learning;
pub use self::q_learning::QLearning;
