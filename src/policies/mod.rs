//! Action-selection policies over snapshots of action values.

/// A decision rule over a finite action set.
///
/// Policies see only a snapshot of per-action values, indexed by action
/// ordinal; they never hold a reference back to the learner that produced
/// them.
pub trait Policy {
    /// Select an action ordinal given the action values `qs`.
    fn sample(&mut self, qs: &[f64]) -> usize;

    /// Selection probability of each action ordinal under `qs`.
    fn probabilities(&self, qs: &[f64]) -> Vec<f64>;
}

mod greedy;
pub use self::greedy::Greedy;

mod random;
pub use self::random::Random;

mod epsilon_greedy;
pub use self::epsilon_greedy::EpsilonGreedy;

mod boltzmann;
pub use self::boltzmann::Boltzmann;
