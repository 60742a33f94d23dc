//! Training run: load, split, fit, evaluate, persist.

use std::path::{Path, PathBuf};

use anyhow::Context;
use focusguard_core::{LogisticRegressionConfig, Pipeline, artifact};
use serde::Serialize;
use tracing::info;

use crate::data::{Record, load_dataset, train_test_split};
use crate::metrics::{ClassificationReport, accuracy};

/// Dataset read when no path is given.
pub const DEFAULT_DATA_PATH: &str = "focusguard_app_usage_realistic.csv";
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Everything a training run needs.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub data_path: PathBuf,
    pub output_path: PathBuf,
    pub seed: u64,
    pub test_fraction: f64,
    pub classifier: LogisticRegressionConfig,
    /// Optional JSON dump of the held-out summary.
    pub metrics_path: Option<PathBuf>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_path: PathBuf::from(focusguard_core::DEFAULT_MODEL_PATH),
            seed: DEFAULT_SEED,
            test_fraction: DEFAULT_TEST_FRACTION,
            classifier: LogisticRegressionConfig::default(),
            metrics_path: None,
        }
    }
}

/// Held-out results of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub train_size: usize,
    pub test_size: usize,
    pub accuracy: f64,
    pub report: ClassificationReport,
}

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Split `records`, fit on the train part and evaluate on the rest.
    pub fn fit(&self, records: &[Record]) -> anyhow::Result<(Pipeline, TrainingSummary)> {
        let (train, test) = train_test_split(records, self.config.test_fraction, self.config.seed)?;
        info!(
            train = train.len(),
            test = test.len(),
            seed = self.config.seed,
            "Split dataset"
        );

        let texts: Vec<String> = train.iter().map(Record::text).collect();
        let labels: Vec<&str> = train.iter().map(|r| r.category.as_str()).collect();
        let pipeline = Pipeline::fit(&texts, &labels, &self.config.classifier)
            .context("Failed to fit pipeline")?;

        let summary = evaluate(&pipeline, &test, train.len());
        Ok((pipeline, summary))
    }

    /// Full run against the configured files. Overwrites the output artifact.
    pub fn run(&self) -> anyhow::Result<TrainingSummary> {
        let records = load_dataset(&self.config.data_path)?;
        info!(
            path = %self.config.data_path.display(),
            records = records.len(),
            "Loaded dataset"
        );

        let (pipeline, summary) = self.fit(&records)?;
        self.save_model(&pipeline, &self.config.output_path)?;
        if let Some(path) = &self.config.metrics_path {
            save_summary(&summary, path)?;
        }
        Ok(summary)
    }

    pub fn save_model<P: AsRef<Path>>(&self, pipeline: &Pipeline, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        artifact::save(pipeline, path)
            .with_context(|| format!("Failed to save model to {}", path.display()))
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(TrainerConfig::default())
    }
}

/// Score `pipeline` on held-out records.
pub fn evaluate(pipeline: &Pipeline, test: &[Record], train_size: usize) -> TrainingSummary {
    let texts: Vec<String> = test.iter().map(Record::text).collect();
    let y_true: Vec<&str> = test.iter().map(|r| r.category.as_str()).collect();
    let y_pred = pipeline.predict_batch(&texts);

    TrainingSummary {
        train_size,
        test_size: test.len(),
        accuracy: accuracy(&y_true, &y_pred),
        report: ClassificationReport::new(&y_true, &y_pred),
    }
}

/// Write `summary` as pretty JSON.
pub fn save_summary<P: AsRef<Path>>(summary: &TrainingSummary, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
    info!(path = %path.display(), "Saved metrics");
    Ok(())
}

/// Train with `config` and print the held-out report to stdout.
pub fn run_training(config: TrainerConfig) -> anyhow::Result<TrainingSummary> {
    let trainer = Trainer::new(config);

    info!("Starting training...");
    let summary = trainer.run()?;

    println!("Accuracy: {}", summary.accuracy);
    println!("Classification Report:\n{}", summary.report);
    println!("Model saved to {}", trainer.config().output_path.display());

    Ok(summary)
}
