//! This module fits the logistic curve to a dataset by maximum likelihood and
//! derives the perceptual metrics from the fitted parameters.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::data::Dataset;
use crate::error::FitError;
use crate::link::{inverse_logistic, logistic};
use crate::objective::NegativeLogLikelihood;
use crate::optimizer::{Convergence, Minimum, SimplexMinimizer};
use crate::{FitOptions, Minimizer};

/// A slope with a smaller magnitude than this is treated as zero.
pub const SLOPE_EPSILON: f64 = 1e-12;

/// The coefficients of the linear predictor y = b0 + b1 * x.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Params {
    /// Intercept.
    pub b0: f64,
    /// Slope.
    pub b1: f64,
}

impl Params {
    pub fn new(b0: f64, b1: f64) -> Self {
        Self { b0, b1 }
    }

    /// Build the parameters from the first two entries of 'x'.
    pub fn from_slice(x: &[f64]) -> Self {
        Self::new(x[0], x[1])
    }

    pub fn to_vec(self) -> Vec<f64> {
        vec![self.b0, self.b1]
    }

    /// Returns the linear predictor at 'x'.
    pub fn predictor(&self, x: f64) -> f64 {
        self.b0 + self.b1 * x
    }

    /// Returns true if the slope is too close to zero to divide by.
    pub fn is_degenerate(&self) -> bool {
        !self.b1.is_finite() || self.b1.abs() < SLOPE_EPSILON
    }
}

/// A fitted psychometric curve and the metrics derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedModel {
    pub params: Params,
    /// The position where the predicted probability is 0.5.
    pub bias: f64,
    /// The slope of the curve at the 50% point.
    pub slope50: f64,
    /// The position where the predicted probability is 0.75.
    pub x75: f64,
    /// The position where the predicted probability is 0.25.
    pub x25: f64,
    /// The distance x75 - x25.
    pub acuity: f64,
    /// The negative log-likelihood at 'params'.
    pub nll: f64,
    pub convergence: Convergence,
}

impl FittedModel {
    /// Derive the metrics for 'params'. Fails if the slope is zero.
    pub fn new(
        params: Params,
        nll: f64,
        convergence: Convergence,
    ) -> Result<Self, FitError> {
        if params.is_degenerate() {
            return Err(FitError::DegenerateFit { params });
        }
        let degenerate = |_| FitError::DegenerateFit { params };
        let x75 = inverse_logistic(0.75, &params).map_err(degenerate)?;
        let x25 = inverse_logistic(0.25, &params).map_err(degenerate)?;

        Ok(Self {
            params,
            bias: -params.b0 / params.b1,
            slope50: params.b1 / 4.0,
            x75,
            x25,
            acuity: x75 - x25,
            nll,
            convergence,
        })
    }

    /// Build a model from the minimizer output.
    pub fn from_minimum(minimum: Minimum) -> Result<Self, FitError> {
        let params = Params::from_slice(&minimum.solution);
        Self::new(params, minimum.value, minimum.convergence)
    }

    /// Returns the predicted response probability at 'x'.
    pub fn predict(&self, x: f64) -> f64 {
        logistic(self.params.predictor(x))
    }

    /// Returns true if the optimizer did not confirm convergence.
    pub fn is_provisional(&self) -> bool {
        !self.convergence.is_converged()
    }

    /// Returns the seven summary fields in output order:
    /// b0 b1 bias slope50 x75 x25 acuity.
    pub fn summary_row(&self) -> [f64; 7] {
        [
            self.params.b0,
            self.params.b1,
            self.bias,
            self.slope50,
            self.x75,
            self.x25,
            self.acuity,
        ]
    }
}

/// Draw a starting guess with both coefficients from Uniform(0, 1).
pub fn random_start<R: Rng + ?Sized>(rng: &mut R) -> Params {
    let unit = Uniform::new(0.0, 1.0);
    let b0 = unit.sample(rng);
    let b1 = unit.sample(rng);
    Params::new(b0, b1)
}

/// Runs maximum-likelihood fits with a minimizer 'M'.
#[derive(Clone, Debug)]
pub struct Fitter<M: Minimizer = SimplexMinimizer> {
    minimizer: M,
}

impl Default for Fitter<SimplexMinimizer> {
    fn default() -> Self {
        Self::new(SimplexMinimizer::default())
    }
}

impl Fitter<SimplexMinimizer> {
    /// Creates a fitter that uses the simplex search configured by 'options'.
    pub fn with_options(options: FitOptions) -> Self {
        Self::new(SimplexMinimizer::new(options))
    }
}

impl<M: Minimizer> Fitter<M> {
    pub fn new(minimizer: M) -> Self {
        Self { minimizer }
    }

    pub fn minimizer(&self) -> &M {
        &self.minimizer
    }

    /// Fit 'dataset' from a random starting guess drawn from 'rng'.
    pub fn fit<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<FittedModel, FitError> {
        let start = random_start(rng);
        log::debug!("Starting guess {:?}", start);
        self.fit_from(dataset, start)
    }

    /// Fit 'dataset' from the fixed starting guess 'start'.
    pub fn fit_from(
        &self,
        dataset: &Dataset,
        start: Params,
    ) -> Result<FittedModel, FitError> {
        self.fit_objective(&dataset.objective(), start)
    }

    /// Minimize 'objective' from 'start' and derive the metrics. Fails
    /// without running the minimizer if there are no observations.
    pub fn fit_objective(
        &self,
        objective: &NegativeLogLikelihood,
        start: Params,
    ) -> Result<FittedModel, FitError> {
        if objective.is_empty() {
            return Err(FitError::EmptyDataset);
        }
        let minimum = self.minimizer.minimize(objective, start.to_vec())?;
        if let Convergence::Provisional { reason } = &minimum.convergence {
            log::debug!(
                "Optimizer stopped without converging ({}), nll = {}",
                reason,
                minimum.value
            );
        }
        FittedModel::from_minimum(minimum)
    }
}
