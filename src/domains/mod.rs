//! Learning benchmark domains module.

/// Container for data associated with a domain observation.
#[derive(Clone, Debug, PartialEq)]
pub enum Observation<S> {
    /// Fully observed state of the environment.
    Full(S),

    /// Terminal state of the environment.
    Terminal(S),
}

impl<S> Observation<S> {
    /// Reference to the state borne by the observation.
    pub fn state(&self) -> &S {
        use self::Observation::*;

        match self {
            Full(ref state) | Terminal(ref state) => state,
        }
    }
}

/// Container for data associated with a domain transition.
#[derive(Clone, Debug)]
pub struct Transition<S, A> {
    /// State transitioned _from_, `s`.
    pub from: Observation<S>,

    /// Action taken to initiate the transition.
    pub action: A,

    /// Reward obtained from the transition.
    pub reward: f64,

    /// State transitioned _to_, `s'`.
    pub to: Observation<S>,
}

impl<S, A> Transition<S, A> {
    /// Returns true if the transition ended the episode.
    pub fn terminated(&self) -> bool {
        matches!(self.to, Observation::Terminal(_))
    }
}

/// An interface for constructing reinforcement learning problem domains with
/// discrete action sets.
pub trait Domain {
    /// State representation type.
    type State: Clone;

    /// Emit an observation of the current state of the environment.
    fn emit(&self) -> Observation<Self::State>;

    /// Transition the environment forward a single step given an action, `a`.
    fn step(&mut self, action: usize) -> Transition<Self::State, usize>;

    /// Returns true if the current state is terminal.
    fn is_terminal(&self) -> bool;

    /// Number of actions available in every state.
    fn n_actions(&self) -> usize;
}

mod corridor;
pub use self::corridor::Corridor;

mod mountain_car;
pub use self::mountain_car::MountainCar;
