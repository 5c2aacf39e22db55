//! Error types for every stage of the pipeline: loading, fitting, and
//! writing results.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::fit::Params;

/// Failures while reading the input dataset. These abort the run.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("can't read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no rows of data in {}", .path.display())]
    Empty { path: PathBuf },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// The inverse link was evaluated where it is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("inverse logistic undefined at p = {probability}, slope {slope}")]
pub struct DomainError {
    pub probability: f64,
    pub slope: f64,
}

/// Failures reported by the minimizer itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    #[error("can't configure the simplex: {0}")]
    Setup(String),

    #[error("simplex search failed: {0}")]
    Run(String),

    #[error("the optimizer returned no solution")]
    MissingSolution,
}

/// Failures of one maximum-likelihood fit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// The fitted slope is zero, so bias and acuity are undefined.
    #[error(
        "degenerate fit: slope b1 = {} leaves bias and acuity undefined",
        .params.b1
    )]
    DegenerateFit { params: Params },

    #[error("no observations to fit")]
    EmptyDataset,

    #[error(transparent)]
    Optimizer(#[from] OptimizerError),
}

/// Failures while writing result files. Files written earlier are kept.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("error opening {} for writing: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error printing the report: {source}")]
    Console {
        #[source]
        source: io::Error,
    },
}

/// A fatal pipeline error, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] InputError),

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    Write(#[from] OutputError),
}

impl Error {
    /// Return the name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Load(_) => "load",
            Error::Fit(_) => "fit",
            Error::Write(_) => "write",
        }
    }
}
