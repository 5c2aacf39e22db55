//! The negative log-likelihood of binary responses under the logistic model.

use crate::link::{clamp_probability, logistic};
use crate::Objective;

/// Scores a parameter vector (b0, b1) against a set of binary responses.
/// The columns are borrowed, so a bootstrap iteration can pair the observed
/// positions with its own simulated responses.
#[derive(Copy, Clone, Debug)]
pub struct NegativeLogLikelihood<'a> {
    /// Stimulus positions.
    positions: &'a [f64],
    /// Responses, where 'true' encodes a 1.
    responses: &'a [bool],
}

impl<'a> NegativeLogLikelihood<'a> {
    pub fn new(positions: &'a [f64], responses: &'a [bool]) -> Self {
        assert_eq!(positions.len(), responses.len(), "Column length mismatch");
        Self {
            positions,
            responses,
        }
    }

    /// Returns the number of observations that contribute to the sum.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Evaluate the summed negative log-likelihood at intercept 'b0' and
    /// slope 'b1'.
    pub fn evaluate(&self, b0: f64, b1: f64) -> f64 {
        let mut nll = 0.0;
        for (pos, response) in self.positions.iter().zip(self.responses) {
            let p = clamp_probability(logistic(b0 + b1 * pos));
            if *response {
                nll -= p.ln();
            } else {
                nll -= (1.0 - p).ln();
            }
        }
        nll
    }
}

impl Objective for NegativeLogLikelihood<'_> {
    /// Evaluate at x = [b0, b1]. Panics if 'x' has fewer than two entries.
    fn value(&self, x: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), 2, "Expected the parameters [b0, b1]");
        self.evaluate(x[0], x[1])
    }
}
