//! Class arbitration over a trained `ClassifierSet`.
//!
//! Inputs must already be normalized with the parameters the set was trained
//! with.
use crate::error::{ModelError, Result};
use crate::math::Array2;
use crate::models::one_vs_all::ClassifierSet;

/// Probability of every class for one feature vector, in set order.
pub fn predict_proba<'a>(x: &[f64], set: &'a ClassifierSet) -> Result<Vec<(&'a str, f64)>> {
    check_input(x.len(), set)?;
    Ok(set
        .iter()
        .map(|(label, model)| (label, model.probability(x)))
        .collect())
}

/// Label with the highest probability.
///
/// Ties go to the class met first in the set's iteration order: a later
/// class only wins with a strictly greater probability. For sets built by
/// `OneVsAllTrainer::fit` that is the lexicographically smallest tied label.
pub fn predict_class<'a>(x: &[f64], set: &'a ClassifierSet) -> Result<&'a str> {
    check_input(x.len(), set)?;

    let mut best: Option<(&'a str, f64)> = None;
    for (label, model) in set.iter() {
        let p = model.probability(x);
        let better = match best {
            None => true,
            Some((_, best_p)) => p > best_p,
        };
        if better {
            best = Some((label, p));
        }
    }

    best.map(|(label, _)| label)
        .ok_or(ModelError::EmptyClassifierSet)
}

/// `predict_class` mapped over the rows of a normalized matrix.
pub fn predict_batch(x: &Array2<f64>, set: &ClassifierSet) -> Result<Vec<String>> {
    check_input(x.ncols(), set)?;
    x.rows()
        .map(|row| predict_class(row, set).map(str::to_string))
        .collect()
}

/// Fraction of positions where `predicted` equals `actual`; 0.0 when empty.
pub fn accuracy<S: AsRef<str>, T: AsRef<str>>(predicted: &[S], actual: &[T]) -> Result<f64> {
    if predicted.len() != actual.len() {
        return Err(ModelError::LengthMismatch {
            rows: predicted.len(),
            labels: actual.len(),
        });
    }
    if actual.is_empty() {
        return Ok(0.0);
    }
    let correct = predicted
        .iter()
        .zip(actual)
        .filter(|(p, a)| p.as_ref() == a.as_ref())
        .count();
    Ok(correct as f64 / actual.len() as f64)
}

fn check_input(found: usize, set: &ClassifierSet) -> Result<()> {
    let expected = set.n_features().ok_or(ModelError::EmptyClassifierSet)?;
    if found != expected {
        return Err(ModelError::ShapeMismatch {
            context: "prediction input",
            expected,
            found,
        });
    }
    Ok(())
}
