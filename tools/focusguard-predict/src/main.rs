use std::collections::BTreeMap;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use focusguard_core::{DEFAULT_MODEL_PATH, Pipeline, artifact};
use serde::Serialize;

/// Label activity texts read from stdin, one JSON object per line
#[derive(Parser, Debug)]
#[command(name = "focusguard-predict")]
#[command(version)]
struct Cli {
    /// Model artifact written by `train`
    #[arg(short, long, env = "FOCUSGUARD_MODEL", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Include per-class probabilities
    #[arg(long)]
    proba: bool,
}

#[derive(Debug, Serialize)]
struct PredictOutput<'a> {
    input: &'a str,
    prediction: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    probabilities: Option<BTreeMap<&'a str, f64>>,
}

fn predict_line<'a>(pipeline: &'a Pipeline, line: &'a str, proba: bool) -> PredictOutput<'a> {
    PredictOutput {
        input: line,
        prediction: pipeline.predict(line),
        probabilities: proba.then(|| pipeline.predict_proba(line).into_iter().collect()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let pipeline = artifact::load(&cli.model)
        .with_context(|| format!("Failed to load model from {}", cli.model.display()))?;

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = predict_line(&pipeline, line, cli.proba);
        serde_json::to_writer(&mut out, &output)?;
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> Pipeline {
        let texts = ["chrome youtube", "chrome netflix", "code main.rs", "terminal cargo"];
        let labels = ["distracting", "distracting", "productive", "productive"];
        Pipeline::fit(&texts, &labels, &Default::default()).unwrap()
    }

    #[test]
    fn test_output_line() {
        let pipeline = pipeline();
        let output = predict_line(&pipeline, "chrome youtube.com", false);
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(
            json,
            r#"{"input":"chrome youtube.com","prediction":"distracting"}"#
        );
    }

    #[test]
    fn test_output_with_probabilities() {
        let pipeline = pipeline();
        let output = predict_line(&pipeline, "cargo build", true);
        let probs = output.probabilities.as_ref().unwrap();
        assert_eq!(probs.len(), 2);
        assert!((probs.values().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(output.prediction, "productive");
    }
}
