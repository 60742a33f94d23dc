use std::path::PathBuf;

use clap::Parser;
use focusguard_core::{DEFAULT_MODEL_PATH, LogisticRegressionConfig};
use focusguard_trainer::trainer::{DEFAULT_DATA_PATH, DEFAULT_SEED, DEFAULT_TEST_FRACTION};
use focusguard_trainer::{TrainerConfig, run_training};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Train the FocusGuard activity classifier
#[derive(Parser)]
#[command(name = "train")]
#[command(about = "Fit the TF-IDF + logistic regression pipeline and save the model")]
#[command(version)]
struct Cli {
    /// Labeled CSV with app_name, window_title and category columns
    #[arg(short, long, env = "FOCUSGUARD_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Where to write the model artifact
    #[arg(short, long, env = "FOCUSGUARD_MODEL", default_value = DEFAULT_MODEL_PATH)]
    output: PathBuf,

    /// Seed for the train/test split
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Fraction of records held out for evaluation
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    test_size: f64,

    /// Inverse regularization strength
    #[arg(short = 'C', long = "regularization", default_value_t = 1.0)]
    c: f64,

    /// Optimizer iteration cap
    #[arg(long, default_value_t = 1000)]
    max_iter: usize,

    /// Also write the held-out report as JSON
    #[arg(long)]
    metrics: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = TrainerConfig {
        data_path: cli.data,
        output_path: cli.output,
        seed: cli.seed,
        test_fraction: cli.test_size,
        classifier: LogisticRegressionConfig {
            c: cli.c,
            max_iter: cli.max_iter,
            ..LogisticRegressionConfig::default()
        },
        metrics_path: cli.metrics,
    };

    if let Err(e) = run_training(config) {
        error!("Training failed: {:#}", e);
        std::process::exit(1);
    }
}
