//! CSV dataset reader.
//!
//! Turns a labelled table into a numeric Feature Matrix and a Label Vector.
//! Missing feature cells are imputed with `0.0` here, so everything past this
//! module can assume a fully numeric matrix.
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::math::Array2;

pub const DEFAULT_LABEL_COLUMN: &str = "Hogwarts House";
pub const DEFAULT_FIRST_FEATURE_COLUMN: usize = 6;

const MISSING_MARKERS: [&str; 5] = ["", "nan", "na", "n/a", "null"];

/// Parsed dataset ready for training or inference.
#[derive(Debug)]
pub struct Dataset {
    pub x: Array2<f64>,
    /// `None` when the label column is absent or entirely empty, as in an
    /// unlabelled test set.
    pub labels: Option<Vec<String>>,
    pub feature_names: Vec<String>,
    /// Number of feature cells that were missing and replaced by `0.0`.
    pub imputed: usize,
}

/// Which columns of the CSV hold labels and features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetReaderConfig {
    pub label_column: String,
    /// Index of the first feature column when `feature_columns` is not set.
    /// Every later column except the label column is a feature.
    pub first_feature_column: usize,
    /// Explicit feature columns, in order.
    pub feature_columns: Option<Vec<String>>,
}

impl Default for DatasetReaderConfig {
    fn default() -> Self {
        Self {
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            first_feature_column: DEFAULT_FIRST_FEATURE_COLUMN,
            feature_columns: None,
        }
    }
}

pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    read_dataset_with_config(path, &DatasetReaderConfig::default())
}

pub fn read_dataset_with_config<P: AsRef<Path>>(path: P, config: &DatasetReaderConfig) -> Result<Dataset> {
    let file = std::fs::File::open(&path)
        .with_context(|| format!("Failed to open dataset: {}", path.as_ref().display()))?;
    read_dataset_from_reader(file, config)
        .with_context(|| format!("Failed to read dataset: {}", path.as_ref().display()))
}

pub fn read_dataset_from_reader<R: Read>(reader: R, config: &DatasetReaderConfig) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .context("Failed to read header row")?
        .clone();

    let label_idx = find_column(&headers, &config.label_column);
    let feature_indices = resolve_feature_indices(&headers, config, label_idx)?;
    if feature_indices.is_empty() {
        bail!("No feature columns detected in header");
    }

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut imputed = 0usize;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        if let Some(idx) = label_idx {
            labels.push(record.get(idx).unwrap_or_default().trim().to_string());
        }

        for &idx in &feature_indices {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing feature value at row {}", row_idx + 1))?;
            match parse_feature(value) {
                Some(parsed) => features.push(parsed),
                None if is_missing(value) => {
                    imputed += 1;
                    features.push(0.0);
                }
                None => bail!(
                    "Invalid feature '{}' at row {}: {:?}",
                    headers.get(idx).unwrap_or(""),
                    row_idx + 1,
                    value
                ),
            }
        }
    }

    let n_features = feature_indices.len();
    let n_samples = features.len() / n_features;
    let x = Array2::from_shape_vec((n_samples, n_features), features)
        .context("Failed to build feature matrix")?;

    if imputed > 0 {
        log::warn!("Replaced {} missing feature values with 0.0", imputed);
    }

    let labels = match label_idx {
        Some(_) => resolve_labels(labels, &config.label_column)?,
        None => None,
    };

    let feature_names = feature_indices
        .iter()
        .map(|&idx| headers.get(idx).unwrap_or("").to_string())
        .collect();

    Ok(Dataset {
        x,
        labels,
        feature_names,
        imputed,
    })
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

fn resolve_feature_indices(
    headers: &StringRecord,
    config: &DatasetReaderConfig,
    label_idx: Option<usize>,
) -> Result<Vec<usize>> {
    if let Some(names) = &config.feature_columns {
        let mut seen = HashSet::new();
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let idx = find_column(headers, name)
                .ok_or_else(|| anyhow!("Missing feature column '{}'", name))?;
            if !seen.insert(idx) {
                bail!("Feature column '{}' listed twice", name);
            }
            indices.push(idx);
        }
        return Ok(indices);
    }

    Ok((config.first_feature_column..headers.len())
        .filter(|&idx| Some(idx) != label_idx)
        .collect())
}

/// Parse a numeric cell. NaN counts as missing.
fn parse_feature(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    MISSING_MARKERS
        .iter()
        .any(|marker| value.eq_ignore_ascii_case(marker))
}

/// All-empty label columns mean "unlabelled"; partially empty ones are an
/// error because the rows cannot be aligned.
fn resolve_labels(labels: Vec<String>, column: &str) -> Result<Option<Vec<String>>> {
    let missing: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.is_empty())
        .map(|(i, _)| i)
        .collect();

    if labels.is_empty() {
        return Ok(Some(labels));
    }
    if missing.len() == labels.len() {
        return Ok(None);
    }
    if let Some(&first) = missing.first() {
        bail!(
            "Missing label in column '{}' at row {} ({} rows without a label)",
            column,
            first + 1,
            missing.len()
        );
    }
    Ok(Some(labels))
}
