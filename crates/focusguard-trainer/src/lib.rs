//! # FocusGuard Trainer
//!
//! Offline training for the activity classifier: reads the labeled
//! application-usage CSV, makes a seeded 80/20 split, fits the TF-IDF +
//! logistic-regression pipeline, reports held-out metrics and writes the
//! model artifact consumed by the prediction server.

pub mod data;
pub mod metrics;
pub mod trainer;

pub use data::{Record, load_dataset, parse_dataset, train_test_split};
pub use metrics::{ClassificationReport, accuracy};
pub use trainer::{Trainer, TrainerConfig, TrainingSummary, evaluate, run_training, save_summary};
