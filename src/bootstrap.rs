//! This module implements the parametric bootstrap. Each iteration simulates
//! a new response for every stimulus position from the fitted curve, refits
//! the simulated experiment, and reports the refitted model. The spread of the
//! refitted models estimates the sampling distribution of the fit.
//!
//! Every iteration draws its responses from its own generator, seeded from the
//! caller's generator. The sequential iterator and the parallel runner consume
//! the caller's generator in the same way, so they produce the same samples.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::data::Dataset;
use crate::error::FitError;
use crate::fit::{FittedModel, Fitter, Params};
use crate::link::logistic;
use crate::objective::NegativeLogLikelihood;
use crate::optimizer::SimplexMinimizer;
use crate::Minimizer;

/// The refitted model of one simulated experiment.
#[derive(Clone, Debug, PartialEq)]
pub struct BootstrapSample {
    /// Zero-based iteration number.
    pub iteration: usize,
    pub outcome: Result<FittedModel, FitError>,
}

impl BootstrapSample {
    pub fn model(&self) -> Option<&FittedModel> {
        self.outcome.as_ref().ok()
    }
}

/// Counts the samples of a bootstrap run by outcome.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BootstrapSummary {
    /// Samples with a usable model, provisional ones included.
    pub fitted: usize,
    /// Fitted samples that the optimizer did not confirm as converged.
    pub provisional: usize,
    /// Samples whose slope collapsed to zero.
    pub degenerate: usize,
    /// Samples where the optimizer failed.
    pub failed: usize,
}

impl BootstrapSummary {
    /// Count the outcome of 'sample'.
    pub fn record(&mut self, sample: &BootstrapSample) {
        match &sample.outcome {
            Ok(model) => {
                self.fitted += 1;
                if model.is_provisional() {
                    self.provisional += 1;
                }
            }
            Err(FitError::DegenerateFit { .. }) => self.degenerate += 1,
            Err(FitError::Optimizer(_) | FitError::EmptyDataset) => {
                self.failed += 1
            }
        }
    }

    pub fn total(&self) -> usize {
        self.fitted + self.degenerate + self.failed
    }
}

impl fmt::Display for BootstrapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fitted ({} provisional), {} degenerate, {} failed",
            self.fitted, self.provisional, self.degenerate, self.failed
        )
    }
}

/// Count the outcomes in 'samples'.
pub fn summarize(samples: &[BootstrapSample]) -> BootstrapSummary {
    let mut summary = BootstrapSummary::default();
    for sample in samples {
        summary.record(sample);
    }
    summary
}

/// Simulate one response per position from the curve 'params' into 'out'.
/// A response is 1 when a uniform draw from [0, 1) is at most the predicted
/// probability.
pub fn simulate_responses<R: Rng + ?Sized>(
    positions: &[f64],
    params: &Params,
    rng: &mut R,
    out: &mut Vec<bool>,
) {
    let unit = Uniform::new(0.0, 1.0);
    out.clear();
    for pos in positions {
        let p = logistic(params.predictor(*pos));
        let u: f64 = unit.sample(rng);
        out.push(u <= p);
    }
}

/// Runs simulate-and-refit cycles with a fitter.
#[derive(Clone, Debug)]
pub struct BootstrapEngine<M: Minimizer = SimplexMinimizer> {
    fitter: Fitter<M>,
}

impl<M: Minimizer> BootstrapEngine<M> {
    pub fn new(fitter: Fitter<M>) -> Self {
        Self { fitter }
    }

    pub fn fitter(&self) -> &Fitter<M> {
        &self.fitter
    }

    /// Returns a lazy iterator over 'count' bootstrap samples of 'model'
    /// fitted to 'dataset'. Each step advances 'rng' by one seed.
    pub fn simulate<'a, R: Rng + ?Sized>(
        &'a self,
        dataset: &'a Dataset,
        model: &FittedModel,
        count: usize,
        rng: &'a mut R,
    ) -> BootstrapIter<'a, M, R> {
        BootstrapIter {
            engine: self,
            dataset,
            params: model.params,
            count,
            next: 0,
            rng,
            responses: Vec::with_capacity(dataset.len()),
        }
    }

    /// Run the iteration 'iteration' with the response generator seeded by
    /// 'seed'. The refit starts from 'params', the generating model.
    pub fn run_iteration(
        &self,
        dataset: &Dataset,
        params: Params,
        iteration: usize,
        seed: u64,
        responses: &mut Vec<bool>,
    ) -> BootstrapSample {
        let positions = dataset.positions();
        let mut rng = StdRng::seed_from_u64(seed);
        simulate_responses(positions, &params, &mut rng, responses);

        let objective = NegativeLogLikelihood::new(positions, responses);
        let outcome = self.fitter.fit_objective(&objective, params);
        match &outcome {
            Ok(model) if model.is_provisional() => log::warn!(
                "bootstrap iteration {}: the optimizer did not converge ({:?})",
                iteration,
                model.convergence
            ),
            Ok(_) => {}
            Err(err) => log::warn!("bootstrap iteration {}: {}", iteration, err),
        }
        BootstrapSample { iteration, outcome }
    }

    /// Run 'count' iterations on the rayon thread pool. The seeds are drawn
    /// from 'rng' up front, in iteration order.
    #[cfg(feature = "parallel")]
    pub fn simulate_parallel<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        model: &FittedModel,
        count: usize,
        rng: &mut R,
    ) -> Vec<BootstrapSample>
    where
        M: Sync,
    {
        use rayon::prelude::*;

        let params = model.params;
        let seeds: Vec<u64> = (0..count).map(|_| rng.gen()).collect();
        seeds
            .into_par_iter()
            .enumerate()
            .map_init(
                || Vec::with_capacity(dataset.len()),
                |responses, (iteration, seed)| {
                    self.run_iteration(
                        dataset, params, iteration, seed, responses,
                    )
                },
            )
            .collect()
    }
}

/// A finite iterator of bootstrap samples. It advances the caller's
/// generator, so it can't be restarted.
pub struct BootstrapIter<'a, M: Minimizer, R: Rng + ?Sized> {
    engine: &'a BootstrapEngine<M>,
    dataset: &'a Dataset,
    /// The generating model, also the starting guess of every refit.
    params: Params,
    count: usize,
    next: usize,
    rng: &'a mut R,
    /// Scratch space for the simulated responses.
    responses: Vec<bool>,
}

impl<M: Minimizer, R: Rng + ?Sized> Iterator for BootstrapIter<'_, M, R> {
    type Item = BootstrapSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let iteration = self.next;
        self.next += 1;

        let seed: u64 = self.rng.gen();
        Some(self.engine.run_iteration(
            self.dataset,
            self.params,
            iteration,
            seed,
            &mut self.responses,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl<M: Minimizer, R: Rng + ?Sized> ExactSizeIterator
    for BootstrapIter<'_, M, R>
{
}
