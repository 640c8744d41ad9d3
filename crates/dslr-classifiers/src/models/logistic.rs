use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::TrainConfig;
use crate::error::{ModelError, Result};
use crate::math::{Array1, Array2};
use crate::stats;

/// Bound applied to the logit before exponentiation.
///
/// Keeps `exp` finite for any input. Logits beyond the bound are treated as
/// the bound, so extreme inputs get slightly different probabilities than an
/// unclamped sigmoid would give.
pub const LOGIT_CLAMP: f64 = 100.0;

/// Logistic link with the logit clamped to `[-LOGIT_CLAMP, LOGIT_CLAMP]`.
pub fn sigmoid(z: f64) -> f64 {
    let z = stats::clamp(z, -LOGIT_CLAMP, LOGIT_CLAMP);
    1.0 / (1.0 + (-z).exp())
}

/// `sigmoid(dot(x, w) + b)`.
pub fn predict_probability(x: &[f64], weights: &Array1<f64>, bias: f64) -> f64 {
    sigmoid(weights.dot(x) + bias)
}

/// One linear decision boundary: a class against everything else.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryLogisticModel {
    weights: Array1<f64>,
    bias: f64,
}

impl BinaryLogisticModel {
    pub fn new(weights: Array1<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    /// All-zero weights and bias: predicts 0.5 everywhere.
    pub fn zeros(n_features: usize) -> Self {
        Self::new(Array1::zeros(n_features), 0.0)
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Probability that `x` belongs to the positive class. `x` must already
    /// be normalized and have `n_features()` values.
    pub fn probability(&self, x: &[f64]) -> f64 {
        predict_probability(x, &self.weights, self.bias)
    }

    /// Train by online gradient descent.
    ///
    /// `y` holds 1.0 for the positive class and 0.0 otherwise. Every epoch
    /// visits each example once and updates the parameters right after it,
    /// in matrix order unless `config.shuffle` is set. There is no early
    /// stopping: all `config.epochs` epochs always run.
    pub fn train(x: &Array2<f64>, y: &[f64], config: &TrainConfig) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(ModelError::LengthMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }

        let mut model = Self::zeros(x.ncols());
        let mut order: Vec<usize> = (0..x.nrows()).collect();
        let mut rng = StdRng::seed_from_u64(config.seed);

        for _ in 0..config.epochs {
            if config.shuffle {
                order.shuffle(&mut rng);
            }
            for &i in &order {
                model.step(x.row_slice(i), y[i], config.learning_rate);
            }
        }

        Ok(model)
    }

    #[inline]
    fn step(&mut self, xi: &[f64], yi: f64, learning_rate: f64) {
        let error = self.probability(xi) - yi;
        for (w, &v) in self.weights.iter_mut().zip(xi) {
            *w -= learning_rate * error * v;
        }
        self.bias -= learning_rate * error;
    }

    /// Mean binary cross-entropy over `x`/`y`. Returns 0.0 for no rows.
    pub fn log_loss(&self, x: &Array2<f64>, y: &[f64]) -> f64 {
        const EPS: f64 = 1e-15;
        if x.is_empty() {
            return 0.0;
        }
        let total: f64 = x
            .rows()
            .zip(y)
            .map(|(row, &yi)| {
                let p = stats::clamp(self.probability(row), EPS, 1.0 - EPS);
                -(yi * p.ln() + (1.0 - yi) * (1.0 - p).ln())
            })
            .sum();
        total / x.nrows() as f64
    }
}
