//! Plain-text persistence for trained models.
//!
//! Two UTF-8 files make up a store:
//!
//! * the classifier file, one `label:w0,w1,...,wn;bias` line per class, read
//!   up to the first empty line;
//! * the normalization file, a `mean=m0,...,mn` line and a `std=s0,...,sn`
//!   line, blank lines ignored.
//!
//! Floats are written with the shortest representation that parses back to
//! the same `f64`.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ModelError, Result};
use crate::math::Array1;
use crate::models::logistic::BinaryLogisticModel;
use crate::models::one_vs_all::ClassifierSet;
use crate::models::trained::TrainedModel;
use crate::preprocessing::NormalizationParams;

pub const DEFAULT_CLASSIFIERS_FILE: &str = "classifiers.txt";
pub const DEFAULT_NORMALIZATION_FILE: &str = "normalization_params.txt";

const RESERVED_LABEL_CHARS: [char; 5] = [':', ',', ';', '\n', '\r'];

/// Location of the classifier and normalization files.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelStore {
    classifiers_path: PathBuf,
    normalization_path: PathBuf,
}

impl ModelStore {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(classifiers_path: P, normalization_path: Q) -> Self {
        Self {
            classifiers_path: classifiers_path.into(),
            normalization_path: normalization_path.into(),
        }
    }

    /// Store using the default file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(DEFAULT_CLASSIFIERS_FILE),
            dir.join(DEFAULT_NORMALIZATION_FILE),
        )
    }

    pub fn classifiers_path(&self) -> &Path {
        &self.classifiers_path
    }

    pub fn normalization_path(&self) -> &Path {
        &self.normalization_path
    }

    /// Persist `model`. Both files are fully encoded and staged next to
    /// their targets before either target is replaced. If the second
    /// replacement fails, the previous classifier file is put back and no
    /// staged file is left behind.
    pub fn save(&self, model: &TrainedModel) -> Result<()> {
        let classifiers = encode_classifiers(&model.classifiers)?;
        let normalization = encode_normalization(&model.normalization);

        let staged_classifiers = stage(&self.classifiers_path, &classifiers)?;
        let staged_normalization = match stage(&self.normalization_path, &normalization) {
            Ok(path) => path,
            Err(e) => {
                discard(&staged_classifiers);
                return Err(e);
            }
        };

        let previous = match read_existing(&self.classifiers_path) {
            Ok(previous) => previous,
            Err(e) => {
                discard(&staged_classifiers);
                discard(&staged_normalization);
                return Err(e);
            }
        };

        if let Err(e) = commit(&staged_classifiers, &self.classifiers_path) {
            discard(&staged_classifiers);
            discard(&staged_normalization);
            return Err(e);
        }
        if let Err(e) = commit(&staged_normalization, &self.normalization_path) {
            discard(&staged_normalization);
            restore(&self.classifiers_path, previous.as_deref());
            return Err(e);
        }

        log::trace!(
            "Wrote {} classifiers to {} and normalization to {}",
            model.classifiers.len(),
            self.classifiers_path.display(),
            self.normalization_path.display()
        );
        Ok(())
    }

    /// Load both files. A classifier file without a single classifier line
    /// is rejected as malformed.
    pub fn load(&self) -> Result<TrainedModel> {
        let classifiers = decode_classifiers(&read(&self.classifiers_path)?)?;
        if classifiers.is_empty() {
            return Err(format_error(1, "no classifier lines before the first empty line"));
        }
        let normalization = decode_normalization(&read(&self.normalization_path)?)?;
        log::trace!(
            "Loaded {} classifiers from {}",
            classifiers.len(),
            self.classifiers_path.display()
        );
        TrainedModel::new(classifiers, normalization)
    }
}

pub fn encode_classifiers(set: &ClassifierSet) -> Result<String> {
    let mut out = String::new();
    for (label, model) in set.iter() {
        validate_label(label)?;
        out.push_str(label);
        out.push(':');
        out.push_str(&join_floats(model.weights().as_slice()));
        out.push(';');
        out.push_str(&model.bias().to_string());
        out.push('\n');
    }
    Ok(out)
}

pub fn decode_classifiers(text: &str) -> Result<ClassifierSet> {
    let mut set = ClassifierSet::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.is_empty() {
            break;
        }

        let (label, rest) = line
            .split_once(':')
            .ok_or_else(|| format_error(line_no, "expected '<label>:<weights>;<bias>'"))?;
        let (weights, bias) = rest
            .rsplit_once(';')
            .ok_or_else(|| format_error(line_no, "missing ';' before the bias"))?;
        if label.is_empty() || rest.contains(':') || weights.contains(';') {
            return Err(format_error(line_no, "expected '<label>:<weights>;<bias>'"));
        }

        let weights = parse_floats(weights, line_no)?;
        let bias = parse_float(bias, line_no)?;
        set.insert(
            label.to_string(),
            BinaryLogisticModel::new(Array1::from_vec(weights), bias),
        )
        .map_err(|e| format_error(line_no, &e.to_string()))?;
    }
    Ok(set)
}

pub fn encode_normalization(params: &NormalizationParams) -> String {
    format!(
        "mean={}\nstd={}\n",
        join_floats(params.mean()),
        join_floats(params.std())
    )
}

pub fn decode_normalization(text: &str) -> Result<NormalizationParams> {
    let mut mean = None;
    let mut std = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (key, values) = line
            .split_once('=')
            .ok_or_else(|| format_error(line_no, "expected '<key>=<values>'"))?;
        match key.trim() {
            "mean" => mean = Some(parse_floats(values, line_no)?),
            "std" => std = Some(parse_floats(values, line_no)?),
            other => log::warn!("Ignoring unknown normalization key '{}' at line {}", other, line_no),
        }
    }

    let mean = mean.ok_or(ModelError::MissingNormalizationKey("mean"))?;
    let std = std.ok_or(ModelError::MissingNormalizationKey("std"))?;
    if mean.len() != std.len() {
        return Err(ModelError::ModelFormat {
            line: 0,
            message: format!("{} mean values but {} std values", mean.len(), std.len()),
        });
    }
    NormalizationParams::new(mean, std)
}

fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() || label.contains(RESERVED_LABEL_CHARS) {
        return Err(ModelError::InvalidLabel(label.to_string()));
    }
    Ok(())
}

fn join_floats(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_floats(text: &str, line_no: usize) -> Result<Vec<f64>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',').map(|v| parse_float(v, line_no)).collect()
}

fn parse_float(text: &str, line_no: usize) -> Result<f64> {
    let text = text.trim();
    text.parse::<f64>()
        .map_err(|_| format_error(line_no, &format!("invalid number '{}'", text)))
}

fn format_error(line: usize, message: &str) -> ModelError {
    ModelError::ModelFormat {
        line,
        message: message.to_string(),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn stage(target: &Path, contents: &str) -> Result<PathBuf> {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    let staged = target.with_file_name(name);
    fs::write(&staged, contents).map_err(|source| ModelError::Io {
        path: staged.clone(),
        source,
    })?;
    Ok(staged)
}

fn commit(staged: &Path, target: &Path) -> Result<()> {
    fs::rename(staged, target).map_err(|source| ModelError::Io {
        path: target.to_path_buf(),
        source,
    })
}

/// Current contents of `path`, `None` when it does not exist yet.
fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ModelError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn discard(staged: &Path) {
    if let Err(e) = fs::remove_file(staged) {
        log::warn!("Failed to remove staged file {}: {}", staged.display(), e);
    }
}

/// Put `target` back to what it was before a failed save.
fn restore(target: &Path, previous: Option<&str>) {
    let outcome = match previous {
        Some(contents) => fs::write(target, contents),
        None => fs::remove_file(target),
    };
    if let Err(e) = outcome {
        log::warn!("Failed to restore {}: {}", target.display(), e);
    }
}
