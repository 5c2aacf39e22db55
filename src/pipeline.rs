//! This module runs the analysis of one data file: load the trials, fit the
//! curve, write the curve and the summary row, and optionally bootstrap the
//! fit into the distribution file. Progress is printed to a writer.

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use rand::Rng;

use crate::bootstrap::{BootstrapEngine, BootstrapSummary};
use crate::data::Dataset;
use crate::error::{Error, OutputError};
use crate::fit::{FittedModel, Fitter};
use crate::optimizer::SimplexMinimizer;
use crate::output::{
    gnuplot_commands, report, OutputPaths, ResultSink, CURVE_POINTS,
};
use crate::{FitOptions, Minimizer};

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

/// What a successful run produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Number of trials in the input.
    pub rows: usize,
    pub model: FittedModel,
    pub paths: OutputPaths,
    /// The bootstrap outcomes, or None if no simulations were requested.
    pub bootstrap: Option<BootstrapSummary>,
}

/// Fits data files and bootstraps the fits.
#[derive(Clone, Debug)]
pub struct Pipeline<M: Minimizer = SimplexMinimizer> {
    engine: BootstrapEngine<M>,
    curve_points: usize,
}

impl Default for Pipeline<SimplexMinimizer> {
    fn default() -> Self {
        Self::new(Fitter::default())
    }
}

impl Pipeline<SimplexMinimizer> {
    pub fn with_options(options: FitOptions) -> Self {
        Self::new(Fitter::with_options(options))
    }
}

impl<M: Minimizer + Sync> Pipeline<M> {
    pub fn new(fitter: Fitter<M>) -> Self {
        Self {
            engine: BootstrapEngine::new(fitter),
            curve_points: CURVE_POINTS,
        }
    }

    /// Sets the number of rows in the fitted curve table.
    pub fn with_curve_points(mut self, points: usize) -> Self {
        self.curve_points = points;
        self
    }

    /// Analyze the data file 'input' and run 'ndist' bootstrap simulations.
    /// The result files are named after 'input'. The distribution file is
    /// only written when 'ndist' is not zero.
    pub fn run<R: Rng + ?Sized, W: Write>(
        &self,
        input: &Path,
        ndist: usize,
        rng: &mut R,
        out: &mut W,
    ) -> Result<RunSummary, Error> {
        let rule = "*".repeat(63);

        let dataset = Dataset::load(input)?;
        let rows = dataset.len();
        print(
            out,
            &format!("found {} rows of data in {}", rows, input.display()),
        )?;

        let model = self.engine.fitter().fit(&dataset, rng)?;
        print(out, &report(&model))?;

        let sink = ResultSink::new(OutputPaths::for_input(input), self.curve_points);
        print(out, "gnuplot commands to plot result:")?;
        print(out, &gnuplot_commands(input, &sink.paths().pred))?;
        print(out, &rule)?;

        sink.write_fit(&dataset, &model)?;

        let bootstrap = if ndist == 0 {
            None
        } else {
            print(out, &format!("simulating {} times...", ndist))?;
            let timer = Timer::new();

            #[cfg(feature = "parallel")]
            let samples =
                self.engine.simulate_parallel(&dataset, &model, ndist, rng);
            #[cfg(not(feature = "parallel"))]
            let samples = self.engine.simulate(&dataset, &model, ndist, rng);

            let summary = sink.write_distribution(samples)?;
            drop(timer);
            print(out, &format!("done: {}", summary))?;
            Some(summary)
        };

        Ok(RunSummary {
            rows,
            model,
            paths: sink.paths().clone(),
            bootstrap,
        })
    }
}

fn print<W: Write>(out: &mut W, text: &str) -> Result<(), OutputError> {
    writeln!(out, "{}", text).map_err(|source| OutputError::Console { source })
}
