pub mod logistic;
pub mod one_vs_all;
pub mod predictor;
pub mod trained;

pub use logistic::{predict_probability, sigmoid, BinaryLogisticModel, LOGIT_CLAMP};
pub use one_vs_all::{class_labels, ClassifierSet, OneVsAllTrainer};
pub use trained::TrainedModel;
