//! Crate-wide error and result types.
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// A constructor was given an out-of-range hyperparameter or a malformed
    /// dimension description.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A state coordinate fell outside the bounds of its dimension.
    #[error("input {value} lies outside the dimension bounds [{lo}, {hi}]")]
    OutOfDomain { value: f64, lo: f64, hi: f64 },

    /// A successor state was requested from a model with no recorded
    /// transitions.
    #[error("state-action model has no recorded successor states")]
    EmptyModel,

    /// A reward was requested for a successor state the model has never seen.
    #[error("state-action model has no entry for the requested successor")]
    MissingSuccessor,

    /// A non-finite quantity appeared in an update, typically the sign of a
    /// diverging learning rate.
    #[error("non-finite value in update: {0}")]
    Numeric(f64),
}

pub type Result<T> = ::std::result::Result<T, Error>;

pub(crate) fn check_unit(name: &str, value: f64) -> Result<f64> {
    if value >= 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )))
    }
}

pub(crate) fn check_step_size(name: &str, value: f64) -> Result<f64> {
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must lie in (0, 1], got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_unit() {
        assert!(check_unit("epsilon", 0.0).is_ok());
        assert!(check_unit("epsilon", 1.0).is_ok());
        assert!(check_unit("epsilon", -0.1).is_err());
        assert!(check_unit("epsilon", 1.1).is_err());
        assert!(check_unit("epsilon", ::std::f64::NAN).is_err());
    }

    #[test]
    fn test_check_step_size() {
        assert!(check_step_size("alpha", 0.5).is_ok());
        assert!(check_step_size("alpha", 1.0).is_ok());
        assert!(check_step_size("alpha", 0.0).is_err());
        assert!(check_step_size("alpha", -1.0).is_err());
    }
}
