use std::path::PathBuf;

use thiserror::Error;

use crate::math::ShapeError;

/// Errors raised by the training and inference core.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{context}: expected {expected} columns, found {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("feature matrix has {rows} rows but {labels} labels were given")]
    LengthMismatch { rows: usize, labels: usize },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("classifier set is empty")]
    EmptyClassifierSet,

    #[error("duplicate class label '{0}'")]
    DuplicateLabel(String),

    #[error("class label {0:?} cannot be stored (empty or contains ':', ',', ';' or a line break)")]
    InvalidLabel(String),

    #[error("malformed model file at line {line}: {message}")]
    ModelFormat { line: usize, message: String },

    #[error("normalization parameters are missing the '{0}=' line")]
    MissingNormalizationKey(&'static str),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
