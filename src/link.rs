//! The logistic link function and its inverse.

use crate::error::DomainError;
use crate::fit::Params;

/// Probabilities are kept this far away from 0 and 1 before taking a log.
pub const PROB_EPSILON: f64 = 1e-10;

/// Map the linear predictor 'y' to a probability in (0, 1).
pub fn logistic(y: f64) -> f64 {
    1.0 / (1.0 + (-y).exp())
}

/// Clamp 'p' into [PROB_EPSILON, 1 - PROB_EPSILON].
pub fn clamp_probability(p: f64) -> f64 {
    p.clamp(PROB_EPSILON, 1.0 - PROB_EPSILON)
}

/// Return the log-odds of 'p'. Only defined for p strictly inside (0, 1).
pub fn logit(p: f64) -> Result<f64, DomainError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(DomainError {
            probability: p,
            slope: f64::NAN,
        });
    }
    Ok((p / (1.0 - p)).ln())
}

/// Return the stimulus position at which the curve 'params' predicts a
/// response probability of 'p'.
pub fn inverse_logistic(p: f64, params: &Params) -> Result<f64, DomainError> {
    let domain_error = DomainError {
        probability: p,
        slope: params.b1,
    };
    if params.b1 == 0.0 || params.b1.is_nan() {
        return Err(domain_error);
    }
    let log_odds = logit(p).map_err(|_| domain_error)?;
    Ok((log_odds - params.b0) / params.b1)
}
