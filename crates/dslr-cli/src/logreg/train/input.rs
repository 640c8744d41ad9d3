use anyhow::{Context, Result};
use clap::ArgMatches;
use dslr_classifiers::config::TrainConfig;
use dslr_classifiers::io::DatasetReaderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::logreg::util::validate_csv_file;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogRegTrainConfig {
    pub train_data: String,
    /// Directory receiving the classifier and normalization files.
    pub output_dir: String,
    pub training: TrainConfig,
    pub dataset: DatasetReaderConfig,
}

impl Default for LogRegTrainConfig {
    fn default() -> Self {
        LogRegTrainConfig {
            train_data: String::new(),
            output_dir: String::from("."),
            training: TrainConfig::default(),
            dataset: DatasetReaderConfig::default(),
        }
    }
}

impl LogRegTrainConfig {
    /// Load the optional JSON config, then apply CLI overrides.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                let config_json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                serde_json::from_str(&config_json)
                    .with_context(|| format!("Failed to parse config file: {:?}", path))?
            }
            None => LogRegTrainConfig::default(),
        };

        if let Some(train_data) = matches.get_one::<String>("train_data") {
            config.train_data = train_data.clone();
        }
        validate_csv_file(&config.train_data)?;

        if let Some(output_dir) = matches.get_one::<String>("output_dir") {
            config.output_dir = output_dir.clone();
        }
        if let Some(&epochs) = matches.get_one::<usize>("epochs") {
            config.training.epochs = epochs;
        }
        if let Some(&learning_rate) = matches.get_one::<f64>("learning_rate") {
            config.training.learning_rate = learning_rate;
        }
        if let Some(&seed) = matches.get_one::<u64>("seed") {
            config.training.seed = seed;
        }
        if matches.get_flag("shuffle") {
            config.training.shuffle = true;
        }
        if matches.get_flag("parallel") {
            config.training.parallel = true;
        }

        if !(config.training.learning_rate.is_finite() && config.training.learning_rate > 0.0) {
            anyhow::bail!(
                "Learning rate must be a positive number, got {}",
                config.training.learning_rate
            );
        }

        Ok(config)
    }
}
