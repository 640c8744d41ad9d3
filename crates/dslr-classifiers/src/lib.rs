//! dslr-classifiers: one-vs-all logistic regression for tabular data.
//!
//! The crate covers the full training and inference path: feature
//! standardization, per-class binary logistic regression trained by online
//! gradient descent, class arbitration at prediction time, and a plain-text
//! model store. CSV loading lives in `io` so the CLI and the tests share one
//! reader.
pub mod config;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod preprocessing;
pub mod stats;

pub use error::ModelError;
