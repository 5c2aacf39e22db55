pub mod bootstrap;
pub mod data;
pub mod error;
pub mod fit;
pub mod link;
pub mod objective;
pub mod optimizer;
pub mod output;
pub mod pipeline;
pub mod utils;

use std::time::Duration;

use error::OptimizerError;
use optimizer::Minimum;

/// Stores the knobs that control a single maximum-likelihood fit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitOptions {
    /// Stop when the spread of the simplex objective values drops below this.
    pub tolerance: f64,
    /// Upper bound on the number of simplex iterations.
    pub max_iters: u64,
    /// Edge length of the initial simplex around the starting guess.
    pub simplex_scale: f64,
    /// Optional wall-clock deadline for one optimizer run.
    pub timeout: Option<Duration>,
}

impl FitOptions {
    pub fn new(tolerance: f64, max_iters: u64, simplex_scale: f64) -> Self {
        Self {
            tolerance,
            max_iters,
            simplex_scale,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iters: 1000,
            simplex_scale: 1.0,
            timeout: None,
        }
    }
}

/// A trait that defines a scalar function to be minimized.
pub trait Objective {
    /// Evaluate the function at the parameter vector 'x'. Lower is better.
    #[must_use]
    fn value(&self, x: &[f64]) -> f64;
}

impl<F: Fn(&[f64]) -> f64> Objective for F {
    fn value(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

/// A trait that defines the interface of a derivative-free minimizer.
pub trait Minimizer {
    /// Search for the minimum of 'objective', starting at 'start'. The start
    /// vector is consumed; the best point found is returned in the result.
    fn minimize<O: Objective + ?Sized>(
        &self,
        objective: &O,
        start: Vec<f64>,
    ) -> Result<Minimum, OptimizerError>;
}
