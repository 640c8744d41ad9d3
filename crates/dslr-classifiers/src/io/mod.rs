//! IO utilities: CSV datasets in, model files in and out.

pub mod dataset;
pub mod model_store;

pub use dataset::{read_dataset, read_dataset_with_config, Dataset, DatasetReaderConfig};
pub use model_store::{ModelStore, DEFAULT_CLASSIFIERS_FILE, DEFAULT_NORMALIZATION_FILE};
