//! Held-out evaluation: accuracy and a per-class precision/recall/F1 report.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Fraction of predictions equal to the truth. Zero for empty input.
pub fn accuracy<A: AsRef<str>, B: AsRef<str>>(y_true: &[A], y_pred: &[B]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t.as_ref() == p.as_ref())
        .count();
    correct as f64 / y_true.len() as f64
}

/// Scores for one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true samples with this label.
    pub support: usize,
}

/// Aggregate scores over all labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Per-class breakdown plus macro and support-weighted averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
    pub support: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl ClassificationReport {
    /// Build the report. Labels are the sorted union of truth and predictions;
    /// undefined ratios count as zero.
    pub fn new<A: AsRef<str>, B: AsRef<str>>(y_true: &[A], y_pred: &[B]) -> Self {
        let labels: BTreeSet<&str> = y_true
            .iter()
            .map(|t| t.as_ref())
            .chain(y_pred.iter().map(|p| p.as_ref()))
            .collect();

        let classes: Vec<ClassMetrics> = labels
            .into_iter()
            .map(|label| {
                let mut tp = 0;
                let mut predicted = 0;
                let mut actual = 0;
                for (t, p) in y_true.iter().zip(y_pred) {
                    let is_true = t.as_ref() == label;
                    let is_pred = p.as_ref() == label;
                    actual += usize::from(is_true);
                    predicted += usize::from(is_pred);
                    tp += usize::from(is_true && is_pred);
                }

                let precision = ratio(tp, predicted);
                let recall = ratio(tp, actual);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                ClassMetrics {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1,
                    support: actual,
                }
            })
            .collect();

        let support: usize = classes.iter().map(|c| c.support).sum();
        let n_classes = classes.len().max(1) as f64;
        let macro_avg = AverageMetrics {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n_classes,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n_classes,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / n_classes,
        };
        let weight = |f: fn(&ClassMetrics) -> f64| -> f64 {
            if support == 0 {
                return 0.0;
            }
            classes
                .iter()
                .map(|c| f(c) * c.support as f64)
                .sum::<f64>()
                / support as f64
        };
        let weighted_avg = AverageMetrics {
            precision: weight(|c| c.precision),
            recall: weight(|c| c.recall),
            f1: weight(|c| c.f1),
        };

        Self {
            accuracy: accuracy(y_true, y_pred),
            classes,
            macro_avg,
            weighted_avg,
            support,
        }
    }

    /// Metrics for one label, if it occurred.
    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.classes.iter().find(|c| c.label == label)
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.chars().count())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.support
        )?;
        for (name, avg) in [
            ("macro avg", &self.macro_avg),
            ("weighted avg", &self.weighted_avg),
        ] {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, avg.precision, avg.recall, avg.f1, self.support
            )?;
        }
        Ok(())
    }
}
