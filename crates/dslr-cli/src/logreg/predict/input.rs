use anyhow::{Context, Result};
use clap::ArgMatches;
use dslr_classifiers::io::{DatasetReaderConfig, DEFAULT_CLASSIFIERS_FILE, DEFAULT_NORMALIZATION_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::logreg::util::validate_csv_file;

pub const DEFAULT_PREDICTIONS_FILE: &str = "houses.csv";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogRegPredictConfig {
    pub inference_data: String,
    pub classifiers_file: String,
    pub normalization_file: String,
    pub output_file: String,
    pub dataset: DatasetReaderConfig,
}

impl Default for LogRegPredictConfig {
    fn default() -> Self {
        LogRegPredictConfig {
            inference_data: String::new(),
            classifiers_file: String::from(DEFAULT_CLASSIFIERS_FILE),
            normalization_file: String::from(DEFAULT_NORMALIZATION_FILE),
            output_file: String::from(DEFAULT_PREDICTIONS_FILE),
            dataset: DatasetReaderConfig::default(),
        }
    }
}

impl LogRegPredictConfig {
    /// Load the optional JSON config, then apply CLI overrides.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                let config_json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                serde_json::from_str(&config_json)
                    .with_context(|| format!("Failed to parse config file: {:?}", path))?
            }
            None => LogRegPredictConfig::default(),
        };

        if let Some(inference_data) = matches.get_one::<String>("inference_data") {
            config.inference_data = inference_data.clone();
        }
        validate_csv_file(&config.inference_data)?;

        if let Some(classifiers_file) = matches.get_one::<String>("classifiers_file") {
            config.classifiers_file = classifiers_file.clone();
        }
        if let Some(normalization_file) = matches.get_one::<String>("normalization_file") {
            config.normalization_file = normalization_file.clone();
        }
        if let Some(output_file) = matches.get_one::<String>("output_file") {
            config.output_file = output_file.clone();
        }

        Ok(config)
    }
}
