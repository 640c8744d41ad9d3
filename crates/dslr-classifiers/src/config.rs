use serde::{Deserialize, Serialize};

/// Hyper-parameters shared by every binary model of a one-vs-all run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,

    /// Visit examples in a seeded random order, reshuffled every epoch.
    /// Off by default so runs are reproducible example-for-example.
    pub shuffle: bool,
    pub seed: u64,

    /// Train the per-class models on the rayon thread pool.
    pub parallel: bool,
}

impl TrainConfig {
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        Self {
            epochs,
            learning_rate,
            ..Self::default()
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 1000,
            learning_rate: 0.1,
            shuffle: false,
            seed: 42,
            parallel: false,
        }
    }
}
