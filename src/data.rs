//! This module loads the experimental data: one trial per line, with the
//! stimulus position followed by the binary response.

use std::fs;
use std::path::Path;

use crate::error::InputError;
use crate::objective::NegativeLogLikelihood;
use crate::utils::min_max;

/// One trial of the experiment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observation {
    pub position: f64,
    /// True if the subject responded with a 1.
    pub response: bool,
}

impl Observation {
    pub fn new(position: f64, response: bool) -> Self {
        Self { position, response }
    }
}

/// An ordered list of trials, stored as two columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    positions: Vec<f64>,
    responses: Vec<bool>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obs: Observation) {
        self.positions.push(obs.position);
        self.responses.push(obs.response);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn responses(&self) -> &[bool] {
        &self.responses
    }

    /// Returns the observation at 'idx'.
    pub fn get(&self, idx: usize) -> Option<Observation> {
        let position = *self.positions.get(idx)?;
        Some(Observation::new(position, self.responses[idx]))
    }

    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.positions
            .iter()
            .zip(&self.responses)
            .map(|(p, r)| Observation::new(*p, *r))
    }

    /// Returns the smallest and largest stimulus position.
    pub fn range(&self) -> Option<(f64, f64)> {
        min_max(&self.positions)
    }

    /// Returns the negative log-likelihood of this data.
    pub fn objective(&self) -> NegativeLogLikelihood<'_> {
        NegativeLogLikelihood::new(&self.positions, &self.responses)
    }

    /// Parse whitespace-separated 'position response' rows. Blank lines are
    /// skipped. Does not reject empty input; see 'load'.
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let mut dataset = Dataset::new();
        for (idx, line) in text.lines().enumerate() {
            if let Some(obs) = parse_line(line, idx + 1)? {
                dataset.push(obs);
            }
        }
        Ok(dataset)
    }

    /// Read and parse the data file at 'path'. Fails if the file can't be
    /// read or has no rows.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InputError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::parse(&text)?;
        if dataset.is_empty() {
            return Err(InputError::Empty {
                path: path.to_path_buf(),
            });
        }
        log::debug!("Loaded {} rows from {}", dataset.len(), path.display());
        Ok(dataset)
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        let mut dataset = Dataset::new();
        for obs in iter {
            dataset.push(obs);
        }
        dataset
    }
}

// Parse a single row. Returns None for blank lines.
fn parse_line(
    line: &str,
    line_no: usize,
) -> Result<Option<Observation>, InputError> {
    let malformed = |reason: String| InputError::Malformed {
        line: line_no,
        reason,
    };

    let mut fields = line.split_whitespace();
    let position = match fields.next() {
        Some(field) => field,
        None => return Ok(None),
    };
    let response = fields
        .next()
        .ok_or_else(|| malformed("expected two columns".to_string()))?;
    if fields.next().is_some() {
        return Err(malformed("expected two columns".to_string()));
    }

    let position: f64 = position
        .parse()
        .map_err(|_| malformed(format!("invalid position '{}'", position)))?;
    if !position.is_finite() {
        return Err(malformed(format!("position {} is not finite", position)));
    }

    let value: f64 = response
        .parse()
        .map_err(|_| malformed(format!("invalid response '{}'", response)))?;
    let response = if value == 1.0 {
        true
    } else if value == 0.0 {
        false
    } else {
        return Err(malformed(format!("response {} is not 0 or 1", response)));
    };

    Ok(Some(Observation::new(position, response)))
}
