//! Small ndarray-like types used throughout the crate.
//!
//! `Array2` is the row-major Feature Matrix and `Array1` holds weight vectors.
//! Both are deliberately minimal: the training loop only needs row slices,
//! columns and dot products.
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::Array1;
