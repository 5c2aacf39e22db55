//! This module implements the minimizer contract with the Nelder-Mead simplex
//! search from 'argmin'. The search is deterministic: the initial simplex is
//! derived from the starting point and the scale only.

use argmin::core::{
    CostFunction, Error as ArgminError, Executor, State, TerminationReason,
    TerminationStatus,
};
use argmin::solver::neldermead::NelderMead;

use crate::error::OptimizerError;
use crate::{FitOptions, Minimizer, Objective};

/// Describes how the search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Convergence {
    /// The simplex collapsed below the tolerance.
    Converged,
    /// The iteration budget or the deadline ran out first. The reported point
    /// is the best one seen, but it may not be a minimum.
    Provisional { reason: String },
}

impl Convergence {
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged)
    }
}

/// The result of a minimization.
#[derive(Clone, Debug, PartialEq)]
pub struct Minimum {
    /// The best parameter vector found.
    pub solution: Vec<f64>,
    /// The objective value at 'solution'.
    pub value: f64,
    /// Number of simplex iterations that were performed.
    pub iterations: u64,
    pub convergence: Convergence,
}

/// Wraps an objective so that argmin can evaluate it.
struct Problem<'a, O: ?Sized> {
    objective: &'a O,
}

impl<O: Objective + ?Sized> CostFunction for Problem<'_, O> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, ArgminError> {
        Ok(self.objective.value(x))
    }
}

/// Build a regular simplex with edge length 'scale' that has 'start' as one
/// of its vertices.
pub fn initial_simplex(start: &[f64], scale: f64) -> Vec<Vec<f64>> {
    let n = start.len() as f64;
    let root = (n + 1.0).sqrt();
    let pn = scale * (root - 1.0 + n) / (n * 2f64.sqrt());
    let qn = scale * (root - 1.0) / (n * 2f64.sqrt());

    let mut vertices = vec![start.to_vec()];
    for i in 0..start.len() {
        let vertex = start
            .iter()
            .enumerate()
            .map(|(j, x)| if i == j { x + pn } else { x + qn })
            .collect();
        vertices.push(vertex);
    }
    vertices
}

/// A Nelder-Mead minimizer configured by FitOptions.
#[derive(Copy, Clone, Debug, Default)]
pub struct SimplexMinimizer {
    options: FitOptions,
}

impl SimplexMinimizer {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }
}

impl Minimizer for SimplexMinimizer {
    fn minimize<O: Objective + ?Sized>(
        &self,
        objective: &O,
        start: Vec<f64>,
    ) -> Result<Minimum, OptimizerError> {
        let simplex = initial_simplex(&start, self.options.simplex_scale);
        let solver: NelderMead<Vec<f64>, f64> = NelderMead::new(simplex)
            .with_sd_tolerance(self.options.tolerance)
            .map_err(|e| OptimizerError::Setup(e.to_string()))?;

        let max_iters = self.options.max_iters;
        let mut executor = Executor::new(Problem { objective }, solver)
            .configure(|state| state.max_iters(max_iters));
        if let Some(timeout) = self.options.timeout {
            executor = executor.timeout(timeout);
        }

        let result = executor
            .run()
            .map_err(|e| OptimizerError::Run(e.to_string()))?;
        let state = result.state();

        let solution = state
            .get_best_param()
            .cloned()
            .ok_or(OptimizerError::MissingSolution)?;

        let convergence = match state.get_termination_status() {
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
            | TerminationStatus::Terminated(
                TerminationReason::TargetCostReached,
            ) => Convergence::Converged,
            status => Convergence::Provisional {
                reason: format!("{:?}", status),
            },
        };

        log::debug!(
            "Simplex stopped after {} iterations at {:?} ({:?})",
            state.get_iter(),
            solution,
            convergence
        );

        Ok(Minimum {
            solution,
            value: state.get_best_cost(),
            iterations: state.get_iter(),
            convergence,
        })
    }
}
