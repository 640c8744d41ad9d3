use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::config::TrainConfig;
use crate::error::{ModelError, Result};
use crate::math::Array2;
use crate::models::logistic::BinaryLogisticModel;

/// Distinct labels in lexicographic order.
///
/// This is the canonical class order used for training, the classifier file
/// layout, and tie-breaks at prediction time. It does not depend on row order.
pub fn class_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .map(|l| l.as_ref())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// 1.0 where the row belongs to `class`, 0.0 elsewhere.
pub fn binary_targets<S: AsRef<str>>(labels: &[S], class: &str) -> Vec<f64> {
    labels
        .iter()
        .map(|l| if l.as_ref() == class { 1.0 } else { 0.0 })
        .collect()
}

/// Ordered mapping from class label to its binary model.
///
/// Iteration follows insertion order. Labels are unique and every model has
/// the same number of weights.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifierSet {
    entries: Vec<(String, BinaryLogisticModel)>,
}

impl ClassifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: String, model: BinaryLogisticModel) -> Result<()> {
        if self.get(&label).is_some() {
            return Err(ModelError::DuplicateLabel(label));
        }
        if let Some(expected) = self.n_features() {
            if model.n_features() != expected {
                return Err(ModelError::ShapeMismatch {
                    context: "classifier weights",
                    expected,
                    found: model.n_features(),
                });
            }
        }
        self.entries.push((label, model));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&BinaryLogisticModel> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, model)| model)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BinaryLogisticModel)> {
        self.entries.iter().map(|(l, m)| (l.as_str(), m))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// Weight count shared by all models, `None` while the set is empty.
    pub fn n_features(&self) -> Option<usize> {
        self.entries.first().map(|(_, m)| m.n_features())
    }
}

/// Trains one binary model per class on a shared, already normalized matrix.
#[derive(Clone, Debug, Default)]
pub struct OneVsAllTrainer {
    config: TrainConfig,
}

impl OneVsAllTrainer {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Train on every distinct label, in [`class_labels`] order.
    pub fn fit<S: AsRef<str> + Sync>(&self, x: &Array2<f64>, labels: &[S]) -> Result<ClassifierSet> {
        let classes = class_labels(labels);
        self.fit_with_classes(x, labels, &classes)
    }

    /// Train one model per entry of `classes`; the returned set iterates in
    /// that order. Either every class trains or an error is returned.
    pub fn fit_with_classes<S: AsRef<str> + Sync>(
        &self,
        x: &Array2<f64>,
        labels: &[S],
        classes: &[String],
    ) -> Result<ClassifierSet> {
        if x.nrows() != labels.len() {
            return Err(ModelError::LengthMismatch {
                rows: x.nrows(),
                labels: labels.len(),
            });
        }
        if classes.is_empty() {
            log::warn!("No class labels to train on; the classifier set will be empty");
        }

        log::info!(
            "Training {} one-vs-all classifiers on {} examples x {} features ({} epochs, lr {})",
            classes.len(),
            x.nrows(),
            x.ncols(),
            self.config.epochs,
            self.config.learning_rate
        );

        let train_one = |class: &String| -> Result<(String, BinaryLogisticModel)> {
            let y = binary_targets(labels, class);
            let model = BinaryLogisticModel::train(x, &y, &self.config)?;
            log::debug!(
                "Class '{}': bias {:.6}, log-loss {:.6}",
                class,
                model.bias(),
                model.log_loss(x, &y)
            );
            Ok((class.clone(), model))
        };

        // par_iter keeps input order on collect, so both paths assemble the
        // set in the same order.
        let trained: Vec<(String, BinaryLogisticModel)> = if self.config.parallel {
            classes.par_iter().map(train_one).collect::<Result<_>>()?
        } else {
            classes.iter().map(train_one).collect::<Result<_>>()?
        };

        let mut set = ClassifierSet::new();
        for (label, model) in trained {
            set.insert(label, model)?;
        }
        Ok(set)
    }
}
