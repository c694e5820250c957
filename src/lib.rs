//! Reinforcement learning over tile-coded linear value functions.
//!
//! `tcrl` provides temporal-difference control agents for discrete-action
//! problems in two flavours: tabular learners over finite state spaces, and
//! gradient-descent learners with eligibility traces over continuous state
//! spaces discretised by tile coding. A learned transition model and a Dyna
//! planner allow simulated updates to be interleaved with real experience.
#[macro_use]
extern crate slog;

#[macro_use]
mod macros;
mod utils;

pub mod control;
pub mod core;
pub mod domains;
pub mod error;
pub mod fa;
pub mod logging;
pub mod model;
pub mod policies;

pub use crate::error::{Error, Result};
