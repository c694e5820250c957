//! Gradient-descent temporal-difference learners over linear function
//! approximation.
use crate::error::{check_step_size, check_unit, Error, Result};
use crate::fa::{LinearQ, Projection, Trace, TraceKind};

/// The λ-update core shared by the gradient-descent learners.
///
/// Maintains the eligibility trace over (feature, action) pairs and applies
/// the weight step for a precomputed temporal-difference error. The step size
/// is normalised by the projection's tiling count, so `alpha` is expressed
/// per update rather than per tile.
pub struct GradientDescent {
    alpha: f64,
    gamma: f64,
    lambda: f64,

    trace: Trace<(usize, usize)>,
}

impl GradientDescent {
    pub fn new(alpha: f64, gamma: f64, lambda: f64) -> Result<GradientDescent> {
        Ok(GradientDescent {
            alpha: check_step_size("alpha", alpha)?,
            gamma: check_unit("gamma", gamma)?,
            lambda: check_unit("lambda", lambda)?,

            trace: Trace::new(TraceKind::Replacing),
        })
    }

    /// Use an accumulating trace instead of the default replacing rule.
    pub fn with_trace_kind(mut self, kind: TraceKind) -> GradientDescent {
        self.trace = Trace::new(kind);

        self
    }

    pub fn alpha(&self) -> f64 { self.alpha }

    pub fn gamma(&self) -> f64 { self.gamma }

    pub fn lambda(&self) -> f64 { self.lambda }

    pub fn trace(&self) -> &Trace<(usize, usize)> { &self.trace }

    /// Decay the trace, mark the active features of the transition's origin,
    /// and move every eligible weight along `delta`.
    pub fn step<P: Projection>(
        &mut self,
        q_func: &mut LinearQ<P>,
        phi: &[usize],
        action: usize,
        delta: f64,
    ) -> Result<f64> {
        if !delta.is_finite() {
            return Err(Error::Numeric(delta));
        }

        self.trace.decay(self.gamma * self.lambda);
        for &i in phi {
            self.trace.visit((i, action));
        }

        let step = self.alpha / q_func.projection().n_tilings() as f64 * delta;

        for (&(i, a), &e) in self.trace.iter() {
            q_func.nudge(i, a, step * e);
        }

        Ok(delta)
    }

    pub fn reset(&mut self) { self.trace.reset(); }
}

mod sarsa_lambda;
pub use self::sarsa_lambda::SarsaLambda;

mod q_lambda;
pub use self::q_lambda::QLambda;
