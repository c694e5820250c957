//! Core abstractions shared by every learning agent.
use crate::domains::Transition;
use crate::error::Result;

/// An agent that learns online from individual environment transitions.
pub trait OnlineLearner<S, A> {
    /// Consume a single transition, returning the temporal-difference error
    /// of the induced update.
    fn handle_transition(&mut self, transition: &Transition<S, A>) -> Result<f64>;

    /// Clear per-episode internal state, such as eligibility traces.
    fn reset(&mut self);
}

/// An agent that can select actions.
pub trait Controller<S, A> {
    /// Sample the target (greedy) policy for a given state `s`.
    fn sample_target(&mut self, s: &S) -> Result<A>;

    /// Sample the behaviour policy for a given state `s`.
    fn sample_behaviour(&mut self, s: &S) -> Result<A>;
}

mod experiment;
pub use self::experiment::{run, Episode, Evaluation, SerialExperiment};
