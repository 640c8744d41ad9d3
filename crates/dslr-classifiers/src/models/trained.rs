use crate::config::TrainConfig;
use crate::error::{ModelError, Result};
use crate::math::Array2;
use crate::models::one_vs_all::{ClassifierSet, OneVsAllTrainer};
use crate::models::predictor;
use crate::preprocessing::{self, NormalizationParams};

/// Everything inference needs: the per-class models and the normalization
/// they were trained under. This is the unit the model store persists.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainedModel {
    pub classifiers: ClassifierSet,
    pub normalization: NormalizationParams,
}

impl TrainedModel {
    /// Pair a classifier set with its normalization, checking that both
    /// describe the same number of features.
    pub fn new(classifiers: ClassifierSet, normalization: NormalizationParams) -> Result<Self> {
        if let Some(n_features) = classifiers.n_features() {
            if n_features != normalization.len() {
                return Err(ModelError::ShapeMismatch {
                    context: "classifier weights vs normalization",
                    expected: normalization.len(),
                    found: n_features,
                });
            }
        }
        Ok(Self {
            classifiers,
            normalization,
        })
    }

    /// Fit normalization on the raw training matrix, then train one model per
    /// class on the normalized copy.
    pub fn fit<S: AsRef<str> + Sync>(x: &Array2<f64>, labels: &[S], config: &TrainConfig) -> Result<Self> {
        let (normalization, x_norm) = preprocessing::fit_transform(x)?;
        let classifiers = OneVsAllTrainer::new(config.clone()).fit(&x_norm, labels)?;
        Self::new(classifiers, normalization)
    }

    /// Normalize a raw matrix with the stored parameters and predict a label
    /// per row.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<String>> {
        let x_norm = preprocessing::apply(x, &self.normalization)?;
        predictor::predict_batch(&x_norm, &self.classifiers)
    }

    /// Predict on a raw matrix and score against known labels. No rows
    /// score 0.0, even when the classifier set is empty.
    pub fn accuracy<S: AsRef<str>>(&self, x: &Array2<f64>, labels: &[S]) -> Result<f64> {
        if x.is_empty() {
            let no_predictions: &[&str] = &[];
            return predictor::accuracy(no_predictions, labels);
        }
        let predicted = self.predict(x)?;
        predictor::accuracy(predicted.as_slice(), labels)
    }
}
