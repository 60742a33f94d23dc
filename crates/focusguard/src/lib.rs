//! FocusGuard activity classification.
//!
//! Umbrella crate over the workspace:
//!
//! * [`focusguard_core`] – tokenizer, TF-IDF, logistic regression, pipeline artifact
//! * [`focusguard_trainer`] – CSV dataset, split, evaluation and the training run
//! * [`focusguard_server`] – HTTP prediction service
//! * [`focusguard_client`] – HTTP client used by the desktop monitor

pub use focusguard_client;
pub use focusguard_core;
pub use focusguard_server;
pub use focusguard_trainer;

pub use focusguard_client::PredictClient;
pub use focusguard_core::{FocusGuardError, Pipeline, activity_text, artifact};
pub use focusguard_trainer::{Trainer, TrainerConfig};
