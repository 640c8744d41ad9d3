//! Integration tests for CLI configs, util helpers and the library entry
//! points behind `dslr train` / `dslr predict`.

use dslr_cli::logreg::predict::inference::run_inference;
use dslr_cli::logreg::predict::input::LogRegPredictConfig;
use dslr_cli::logreg::train::input::LogRegTrainConfig;
use dslr_cli::logreg::train::trainer::{run_training, CONFIG_ECHO_FILE};
use dslr_cli::logreg::util::{validate_csv_file, write_bytes_to_file};

const TRAIN_CSV: &str = "\
Index,Hogwarts House,First Name,Last Name,Birthday,Best Hand,Herbology,Charms
0,Ravenclaw,A,B,2000-01-01,Left,1.0,10.0
1,Ravenclaw,A,B,2000-01-01,Left,1.5,11.0
2,Ravenclaw,A,B,2000-01-01,Left,,10.5
3,Slytherin,A,B,2000-01-01,Right,6.0,2.0
4,Slytherin,A,B,2000-01-01,Right,6.5,1.0
5,Slytherin,A,B,2000-01-01,Right,5.5,1.5
";

// ---------------------------------------------------------------------------
// util
// ---------------------------------------------------------------------------

#[test]
fn validate_csv_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::File::create(&path).unwrap();
    assert!(validate_csv_file(path.to_str().unwrap()).is_ok());
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::File::create(&path).unwrap();
    assert!(validate_csv_file(path.to_str().unwrap()).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_csv_file("/nonexistent/path/data.csv").is_err());
}

#[test]
fn write_bytes_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    write_bytes_to_file(&path, b"{}").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
}

// ---------------------------------------------------------------------------
// Config defaults & serialization
// ---------------------------------------------------------------------------

#[test]
fn train_config_defaults() {
    let cfg = LogRegTrainConfig::default();
    assert_eq!(cfg.output_dir, ".");
    assert_eq!(cfg.training.epochs, 1000);
    assert_eq!(cfg.dataset.label_column, "Hogwarts House");
    assert_eq!(cfg.dataset.first_feature_column, 6);
}

#[test]
fn train_config_partial_json_uses_defaults() {
    let cfg: LogRegTrainConfig =
        serde_json::from_str(r#"{"train_data": "a.csv", "training": {"epochs": 3}}"#).unwrap();
    assert_eq!(cfg.train_data, "a.csv");
    assert_eq!(cfg.training.epochs, 3);
    assert!((cfg.training.learning_rate - 0.1).abs() < 1e-12);
    assert_eq!(cfg.output_dir, ".");
}

#[test]
fn predict_config_defaults() {
    let cfg = LogRegPredictConfig::default();
    assert_eq!(cfg.classifiers_file, "classifiers.txt");
    assert_eq!(cfg.normalization_file, "normalization_params.txt");
    assert_eq!(cfg.output_file, "houses.csv");
}

#[test]
fn predict_config_round_trips_json() {
    let cfg = LogRegPredictConfig {
        inference_data: "test.csv".into(),
        ..LogRegPredictConfig::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let cfg2: LogRegPredictConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, cfg2);
}

// ---------------------------------------------------------------------------
// run_training / run_inference
// ---------------------------------------------------------------------------

#[test]
fn training_then_inference_through_library() {
    let dir = tempfile::tempdir().unwrap();
    let train_path = dir.path().join("train.csv");
    std::fs::write(&train_path, TRAIN_CSV).unwrap();
    let out_dir = dir.path().join("model");

    let train_cfg = LogRegTrainConfig {
        train_data: train_path.to_str().unwrap().to_string(),
        output_dir: out_dir.to_str().unwrap().to_string(),
        ..LogRegTrainConfig::default()
    };
    let accuracy = run_training(&train_cfg).unwrap();
    assert_eq!(accuracy, 1.0);

    let echoed: LogRegTrainConfig =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join(CONFIG_ECHO_FILE)).unwrap())
            .unwrap();
    assert_eq!(echoed, train_cfg);

    let predict_cfg = LogRegPredictConfig {
        inference_data: train_path.to_str().unwrap().to_string(),
        classifiers_file: out_dir.join("classifiers.txt").to_str().unwrap().to_string(),
        normalization_file: out_dir.join("normalization_params.txt").to_str().unwrap().to_string(),
        output_file: dir.path().join("houses.csv").to_str().unwrap().to_string(),
        ..LogRegPredictConfig::default()
    };
    let predictions = run_inference(&predict_cfg).unwrap();
    assert_eq!(
        predictions,
        vec!["Ravenclaw", "Ravenclaw", "Ravenclaw", "Slytherin", "Slytherin", "Slytherin"]
    );
    assert!(dir.path().join("houses.csv").exists());
}

#[test]
fn inference_rejects_feature_count_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("test.csv");
    std::fs::write(&data, TRAIN_CSV).unwrap();
    let classifiers = dir.path().join("classifiers.txt");
    let normalization = dir.path().join("normalization_params.txt");
    std::fs::write(&classifiers, "Ravenclaw:1,2,3;0\n").unwrap();
    std::fs::write(&normalization, "mean=0,0,0\nstd=1,1,1\n").unwrap();

    let cfg = LogRegPredictConfig {
        inference_data: data.to_str().unwrap().to_string(),
        classifiers_file: classifiers.to_str().unwrap().to_string(),
        normalization_file: normalization.to_str().unwrap().to_string(),
        output_file: dir.path().join("houses.csv").to_str().unwrap().to_string(),
        ..LogRegPredictConfig::default()
    };
    assert!(run_inference(&cfg).is_err());
    assert!(!dir.path().join("houses.csv").exists());
}

#[test]
fn header_only_training_data_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let train_path = dir.path().join("train.csv");
    let header = TRAIN_CSV.lines().next().unwrap();
    std::fs::write(&train_path, format!("{}\n", header)).unwrap();
    let out_dir = dir.path().join("model");

    let cfg = LogRegTrainConfig {
        train_data: train_path.to_str().unwrap().to_string(),
        output_dir: out_dir.to_str().unwrap().to_string(),
        ..LogRegTrainConfig::default()
    };
    assert_eq!(run_training(&cfg).unwrap(), 0.0);
    assert!(out_dir.join("classifiers.txt").exists());
    assert!(out_dir.join("normalization_params.txt").exists());
    assert!(out_dir.join(CONFIG_ECHO_FILE).exists());
}
