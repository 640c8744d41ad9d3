//! Integration tests for training configuration.

use dslr_classifiers::config::TrainConfig;

#[test]
fn defaults_match_reference_hyper_parameters() {
    let cfg = TrainConfig::default();
    assert_eq!(cfg.epochs, 1000);
    assert!((cfg.learning_rate - 0.1).abs() < 1e-12);
    assert!(!cfg.shuffle);
    assert!(!cfg.parallel);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg: TrainConfig = serde_json::from_str(r#"{"epochs": 25}"#).unwrap();
    assert_eq!(cfg.epochs, 25);
    assert!((cfg.learning_rate - 0.1).abs() < 1e-12);
}

#[test]
fn config_round_trips_json() {
    let cfg = TrainConfig {
        shuffle: true,
        seed: 9,
        ..TrainConfig::new(10, 0.05)
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let cfg2: TrainConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, cfg2);
}
