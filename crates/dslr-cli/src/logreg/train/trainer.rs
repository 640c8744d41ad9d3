use anyhow::{Context, Result};
use dslr_classifiers::io::{read_dataset_with_config, ModelStore};
use dslr_classifiers::models::TrainedModel;
use std::fs;
use std::path::Path;

use crate::logreg::train::input::LogRegTrainConfig;
use crate::logreg::util::write_bytes_to_file;

pub const CONFIG_ECHO_FILE: &str = "dslr_train_config.json";

/// Train on the configured dataset, persist the model and return the
/// training-set accuracy in `[0, 1]`.
pub fn run_training(config: &LogRegTrainConfig) -> Result<f64> {
    let dataset = read_dataset_with_config(&config.train_data, &config.dataset)?;
    let labels = dataset.labels.with_context(|| {
        format!(
            "Training data has no '{}' labels: {}",
            config.dataset.label_column, config.train_data
        )
    })?;
    log::info!(
        "Loaded {} training rows with {} features",
        dataset.x.nrows(),
        dataset.x.ncols()
    );
    log::trace!("Feature columns: {:?}", dataset.feature_names);

    let model = TrainedModel::fit(&dataset.x, labels.as_slice(), &config.training)
        .context("Training failed")?;

    let output_dir = Path::new(&config.output_dir);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let store = ModelStore::in_dir(output_dir);
    store.save(&model).context("Failed to save trained model")?;
    log::info!(
        "Saved {} classifiers to {:?} and normalization to {:?}",
        model.classifiers.len(),
        store.classifiers_path(),
        store.normalization_path()
    );

    let accuracy = model.accuracy(&dataset.x, labels.as_slice())?;
    println!("Training accuracy: {:.2}%", accuracy * 100.0);

    let config_json = serde_json::to_string_pretty(config)?;
    let config_path = output_dir.join(CONFIG_ECHO_FILE);
    write_bytes_to_file(&config_path, config_json.as_bytes())
        .with_context(|| format!("Failed to write config to {:?}", config_path))?;

    Ok(accuracy)
}
