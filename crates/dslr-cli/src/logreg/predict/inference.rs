use anyhow::{Context, Result};
use dslr_classifiers::io::{read_dataset_with_config, ModelStore};

use crate::logreg::predict::input::LogRegPredictConfig;
use crate::logreg::predict::output::write_predictions;

pub fn run_inference(config: &LogRegPredictConfig) -> Result<Vec<String>> {
    let store = ModelStore::new(&config.classifiers_file, &config.normalization_file);
    let model = store
        .load()
        .with_context(|| format!("Failed to load model from {:?}", store.classifiers_path()))?;
    log::info!(
        "Loaded {} classifiers: {:?}",
        model.classifiers.len(),
        model.classifiers.labels().collect::<Vec<_>>()
    );

    let dataset = read_dataset_with_config(&config.inference_data, &config.dataset)?;
    log::info!("Loaded {} rows for prediction", dataset.x.nrows());

    let predictions = model.predict(&dataset.x).context("Prediction failed")?;

    if let Some(labels) = &dataset.labels {
        let accuracy = dslr_classifiers::models::predictor::accuracy(predictions.as_slice(), labels.as_slice())?;
        log::info!("Accuracy against provided labels: {:.2}%", accuracy * 100.0);
    }

    write_predictions(&predictions, &config.output_file)?;
    log::info!("Wrote {} predictions to {}", predictions.len(), config.output_file);

    Ok(predictions)
}
