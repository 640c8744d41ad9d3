//! Feature standardization.
//!
//! `fit` computes per-column mean and population standard deviation;
//! `apply` maps every value to `(x - mean) / std`. The parameters are plain
//! data so they can be persisted after training and reused on fresh input.

use crate::error::{ModelError, Result};
use crate::math::Array2;
use crate::stats;

/// Per-column standardization parameters, in training column order.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizationParams {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl NormalizationParams {
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Result<Self> {
        if mean.len() != std.len() {
            return Err(ModelError::ShapeMismatch {
                context: "normalization std",
                expected: mean.len(),
                found: std.len(),
            });
        }
        Ok(Self { mean, std })
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn std(&self) -> &[f64] {
        &self.std
    }

    /// Number of feature columns these parameters describe.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Standardize one value of column `col`. A zero-spread column carries no
    /// information and maps to `0.0`. Panics if `col >= self.len()`.
    #[inline]
    pub fn normalize_value(&self, col: usize, x: f64) -> f64 {
        let std = self.std[col];
        if std == 0.0 {
            0.0
        } else {
            (x - self.mean[col]) / std
        }
    }
}

/// Fit parameters from a matrix where rows are samples and columns are
/// features. A matrix without rows yields mean 0 and std 0 for every column.
pub fn fit(x: &Array2<f64>) -> NormalizationParams {
    let ncols = x.ncols();
    let mut mean = Vec::with_capacity(ncols);
    let mut std = Vec::with_capacity(ncols);

    for c in 0..ncols {
        let column = x.column(c);
        mean.push(stats::mean(column.as_slice()).unwrap_or(0.0));
        std.push(stats::std_dev(column.as_slice()).unwrap_or(0.0));
    }

    log::trace!("Fitted normalization over {} rows x {} columns", x.nrows(), ncols);
    NormalizationParams { mean, std }
}

/// Transform every row with `params`, which may come from a different
/// (training) matrix. Column counts must agree.
pub fn apply(x: &Array2<f64>, params: &NormalizationParams) -> Result<Array2<f64>> {
    check_columns(x.ncols(), params)?;

    let (nrows, ncols) = x.shape();
    let mut out = Vec::with_capacity(nrows * ncols);
    for row in x.rows() {
        out.extend(
            row.iter()
                .enumerate()
                .map(|(c, &v)| params.normalize_value(c, v)),
        );
    }

    Ok(Array2::from_shape_vec((nrows, ncols), out)?)
}

/// Standardize a single feature vector.
pub fn apply_row(row: &[f64], params: &NormalizationParams) -> Result<Vec<f64>> {
    check_columns(row.len(), params)?;
    Ok(row
        .iter()
        .enumerate()
        .map(|(c, &v)| params.normalize_value(c, v))
        .collect())
}

/// Fit on `x` and return both the parameters and the transformed matrix.
pub fn fit_transform(x: &Array2<f64>) -> Result<(NormalizationParams, Array2<f64>)> {
    let params = fit(x);
    let transformed = apply(x, &params)?;
    Ok((params, transformed))
}

fn check_columns(found: usize, params: &NormalizationParams) -> Result<()> {
    if found != params.len() {
        return Err(ModelError::ShapeMismatch {
            context: "normalization input",
            expected: params.len(),
            found,
        });
    }
    Ok(())
}
