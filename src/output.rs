//! This module writes the results of a fit: the fitted curve table, the
//! parameter summary row and the bootstrap distribution. Every number is
//! written with five decimals in a field of seven characters, and the fields
//! of a row are separated by a single space.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::bootstrap::{BootstrapSample, BootstrapSummary};
use crate::data::Dataset;
use crate::error::{FitError, OutputError};
use crate::fit::FittedModel;
use crate::utils::linspace;
use crate::utils::naming::{
    with_suffix, DIST_SUFFIX, PARAMS_SUFFIX, PRED_SUFFIX,
};

/// Number of rows in the fitted curve table.
pub const CURVE_POINTS: usize = 50;

/// The names of the three result files, derived from the input path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub params: PathBuf,
    pub pred: PathBuf,
    pub dist: PathBuf,
}

impl OutputPaths {
    pub fn for_input<P: AsRef<Path>>(input: P) -> Self {
        let input = input.as_ref();
        Self {
            params: with_suffix(input, PARAMS_SUFFIX),
            pred: with_suffix(input, PRED_SUFFIX),
            dist: with_suffix(input, DIST_SUFFIX),
        }
    }
}

/// Format 'values' as one row of the result tables, without a newline.
pub fn format_row(values: &[f64]) -> String {
    let mut row = String::new();
    for (i, val) in values.iter().enumerate() {
        if i > 0 {
            row.push(' ');
        }
        let _ = write!(row, "{:7.5}", val);
    }
    row
}

/// Write 'points' rows of (x, predicted probability), with x evenly spaced
/// over 'range'.
pub fn write_curve<W: Write>(
    out: &mut W,
    model: &FittedModel,
    range: (f64, f64),
    points: usize,
) -> io::Result<()> {
    for x in linspace(range.0, range.1, points) {
        writeln!(out, "{}", format_row(&[x, model.predict(x)]))?;
    }
    Ok(())
}

/// Write the row 'b0 b1 bias slope50 x75 x25 acuity'.
pub fn write_summary<W: Write>(
    out: &mut W,
    model: &FittedModel,
) -> io::Result<()> {
    writeln!(out, "{}", format_row(&model.summary_row()))
}

/// Returns the seven summary fields of a bootstrap sample. A degenerate fit
/// keeps its coefficients and reports NaN metrics; a failed fit is all NaN.
pub fn sample_row(sample: &BootstrapSample) -> [f64; 7] {
    match &sample.outcome {
        Ok(model) => model.summary_row(),
        Err(FitError::DegenerateFit { params }) => {
            let mut row = [f64::NAN; 7];
            row[0] = params.b0;
            row[1] = params.b1;
            row[3] = params.b1 / 4.0;
            row
        }
        Err(FitError::Optimizer(_) | FitError::EmptyDataset) => [f64::NAN; 7],
    }
}

/// Write one row per sample, and return the tally of the outcomes.
pub fn write_samples<W, I>(
    out: &mut W,
    samples: I,
) -> io::Result<BootstrapSummary>
where
    W: Write,
    I: IntoIterator<Item = BootstrapSample>,
{
    let mut summary = BootstrapSummary::default();
    for sample in samples {
        writeln!(out, "{}", format_row(&sample_row(&sample)))?;
        summary.record(&sample);
    }
    Ok(summary)
}

/// Render the human readable summary of a fit.
pub fn report(model: &FittedModel) -> String {
    let rule = "*".repeat(63);
    let b = &model.params;
    let mut text = String::new();
    let _ = writeln!(text, "{}", rule);
    let _ = writeln!(text, "y = {:7.5} + ({:7.5} * x)", b.b0, b.b1);
    let _ = writeln!(text, "p(r|x) = 1 / (1 + exp(-y))");
    let _ = writeln!(text, "{}", rule);
    let _ = writeln!(text, "bias = {:7.5}", model.bias);
    let _ = writeln!(text, "slope at 50% = {:7.5}", model.slope50);
    let _ = writeln!(
        text,
        "acuity (x75 - x25) = ({:7.5} - {:7.5}) = {:7.5}",
        model.x75, model.x25, model.acuity
    );
    if model.is_provisional() {
        let _ = writeln!(text, "warning: the optimizer did not converge");
    }
    let _ = write!(text, "{}", rule);
    text
}

/// Render gnuplot commands that plot the data next to the fitted curve.
pub fn gnuplot_commands(input: &Path, pred: &Path) -> String {
    format!(
        "set yrange [-.05:1.15]\n\
         plot '{}' using 1:($2 + (rand(0)/20)) title 'data' with points, \\\n     \
         '{}' using 1:2 title 'model' with lines",
        input.display(),
        pred.display()
    )
}

/// Writes the result files of one run.
#[derive(Clone, Debug)]
pub struct ResultSink {
    paths: OutputPaths,
    curve_points: usize,
}

impl ResultSink {
    pub fn new(paths: OutputPaths, curve_points: usize) -> Self {
        Self {
            paths,
            curve_points,
        }
    }

    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    /// Write the fitted curve and the summary row of 'model'. Both files are
    /// opened before anything is written.
    pub fn write_fit(
        &self,
        dataset: &Dataset,
        model: &FittedModel,
    ) -> Result<(), OutputError> {
        let mut params = create(&self.paths.params)?;
        let mut pred = create(&self.paths.pred)?;

        let range = dataset.range().unwrap_or((0.0, 0.0));
        write_curve(&mut pred, model, range, self.curve_points)
            .and_then(|_| pred.flush())
            .map_err(|source| write_error(&self.paths.pred, source))?;
        log::info!("Wrote {}.", self.paths.pred.display());

        write_summary(&mut params, model)
            .and_then(|_| params.flush())
            .map_err(|source| write_error(&self.paths.params, source))?;
        log::info!("Wrote {}.", self.paths.params.display());
        Ok(())
    }

    /// Stream 'samples' into the distribution file as they are produced.
    /// The file is created before the first sample is requested.
    pub fn write_distribution<I>(
        &self,
        samples: I,
    ) -> Result<BootstrapSummary, OutputError>
    where
        I: IntoIterator<Item = BootstrapSample>,
    {
        let path = &self.paths.dist;
        let mut dist = create(path)?;
        let summary = write_samples(&mut dist, samples)
            .and_then(|summary| dist.flush().map(|_| summary))
            .map_err(|source| write_error(path, source))?;
        log::info!("Wrote {}.", path.display());
        Ok(summary)
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

fn write_error(path: &Path, source: io::Error) -> OutputError {
    OutputError::Write {
        path: path.to_path_buf(),
        source,
    }
}
