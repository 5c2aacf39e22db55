//! A collection of utilities for handling ranges of numbers and file names.

/// Suffixes that are appended to the input path to name the result files.
pub mod naming {
    use std::path::{Path, PathBuf};

    pub const PARAMS_SUFFIX: &str = "_params";
    pub const PRED_SUFFIX: &str = "_pred";
    pub const DIST_SUFFIX: &str = "_dist";

    /// Return 'path' with 'suffix' appended to the file name.
    pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }
}

/// Return the smallest and the largest value in 'values', or None if the
/// slice is empty.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    let mut lo = first;
    let mut hi = first;
    for v in &values[1..] {
        lo = lo.min(*v);
        hi = hi.max(*v);
    }
    Some((lo, hi))
}

/// Return 'count' evenly spaced values from 'lo' to 'hi', both included.
pub fn linspace(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (count - 1) as f64;
            (0..count).map(|i| lo + step * i as f64).collect()
        }
    }
}
