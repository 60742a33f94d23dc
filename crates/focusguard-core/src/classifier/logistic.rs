//! # Logistic Regression
//!
//! Linear classifier over sparse features with an L2 penalty on the weights
//! (the intercept is not penalized). With three or more labels the fitted
//! objective, averaged over the `n` training samples, is
//!
//! ```text
//! f(W, b) = (C · Σᵢ CE(softmax(W xᵢ + b), yᵢ) + ½‖W‖²) / n
//! ```
//!
//! With exactly two labels a single weight vector is fitted with the binary
//! log-loss instead, so `C` means the same as in the usual binary model.
//!
//! Both are minimized with L-BFGS from a zero start, so fitting is
//! deterministic.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classifier::lbfgs::{self, LbfgsOptions, LbfgsResult};
use crate::error::{FocusGuardError, Result};
use crate::text::SparseVector;

/// Hyper-parameters for [`LogisticRegression::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionConfig {
    /// Inverse regularization strength.
    pub c: f64,
    /// Optimizer iteration cap.
    pub max_iter: usize,
    /// Gradient tolerance for convergence.
    pub tol: f64,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-4,
        }
    }
}

/// Fitted multi-class linear classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Sorted, distinct training labels. Row `k` of `coef` scores `classes[k]`.
    classes: Vec<String>,
    /// Row-major `classes.len() × n_features` weights.
    coef: Vec<f64>,
    intercept: Vec<f64>,
    n_features: usize,
    /// Optimizer iterations used during fitting.
    #[serde(default)]
    n_iter: usize,
}

impl LogisticRegression {
    /// Fit on sparse rows `x` with labels `y`.
    pub fn fit<S: AsRef<str>>(
        x: &[SparseVector],
        y: &[S],
        n_features: usize,
        config: &LogisticRegressionConfig,
    ) -> Result<Self> {
        if x.len() != y.len() {
            return Err(FocusGuardError::InvalidInput(format!(
                "{} samples but {} labels",
                x.len(),
                y.len()
            )));
        }
        if config.c <= 0.0 {
            return Err(FocusGuardError::InvalidInput(format!(
                "C must be positive, got {}",
                config.c
            )));
        }
        if let Some(row) = x.iter().find(|row| row.min_width() > n_features) {
            return Err(FocusGuardError::FeatureOutOfRange {
                index: row.min_width() - 1,
                features: n_features,
            });
        }

        let mut classes: Vec<String> = y.iter().map(|l| l.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();
        if classes.len() < 2 {
            return Err(FocusGuardError::InsufficientClasses {
                found: classes.len(),
            });
        }

        let targets: Vec<usize> = y
            .iter()
            .map(|label| {
                classes
                    .binary_search_by(|c| c.as_str().cmp(label.as_ref()))
                    .unwrap_or_default()
            })
            .collect();

        let n_classes = classes.len();
        let options = LbfgsOptions {
            max_iter: config.max_iter,
            gtol: config.tol,
            ..LbfgsOptions::default()
        };

        let (coef, intercept, result) = if n_classes == 2 {
            fit_binary(x, &targets, n_features, config.c, options)
        } else {
            fit_multinomial(x, &targets, n_classes, n_features, config.c, options)
        };

        if result.converged {
            debug!(
                iterations = result.iterations,
                loss = result.value,
                "Logistic regression converged"
            );
        } else {
            warn!(
                iterations = result.iterations,
                loss = result.value,
                "Logistic regression did not converge; increase max_iter"
            );
        }

        Ok(Self {
            classes,
            coef,
            intercept,
            n_features,
            n_iter: result.iterations,
        })
    }

    /// Per-class linear scores `W x + b`, in class order.
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f64> {
        self.intercept
            .iter()
            .enumerate()
            .map(|(k, b)| {
                x.dot(&self.coef[k * self.n_features..(k + 1) * self.n_features]) + b
            })
            .collect()
    }

    /// Class probabilities in class order.
    pub fn predict_proba(&self, x: &SparseVector) -> Vec<f64> {
        let scores = self.decision_function(x);
        let lse = log_sum_exp(&scores);
        scores.iter().map(|s| (s - lse).exp()).collect()
    }

    /// Most likely label. Ties go to the earlier class.
    pub fn predict(&self, x: &SparseVector) -> &str {
        let scores = self.decision_function(x);
        let mut best = 0;
        for (k, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = k;
            }
        }
        &self.classes[best]
    }

    /// Labels this model can return.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Check the weight tables agree. Used after deserialization.
    pub(crate) fn validate(&self) -> Result<()> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(FocusGuardError::InsufficientClasses { found: n_classes });
        }
        if self.intercept.len() != n_classes || self.coef.len() != n_classes * self.n_features {
            return Err(FocusGuardError::InvalidInput(format!(
                "weight shape mismatch: {} classes, {} features, {} coefficients, {} intercepts",
                n_classes,
                self.n_features,
                self.coef.len(),
                self.intercept.len()
            )));
        }
        Ok(())
    }
}

type Fitted = (Vec<f64>, Vec<f64>, LbfgsResult);

/// Two labels: one weight vector `w` scoring `classes[1]` with the log-loss
/// `(C · Σᵢ log(1 + exp(-sᵢ (w·xᵢ + b))) + ½‖w‖²) / n`.
///
/// Stored as rows `[0, w]` and intercepts `[0, b]`, so the softmax over the
/// two rows is the sigmoid of `w·x + b`.
fn fit_binary(
    x: &[SparseVector],
    targets: &[usize],
    n_features: usize,
    c: f64,
    options: LbfgsOptions,
) -> Fitted {
    let n_samples = x.len() as f64;

    let objective = |theta: &[f64], grad: &mut [f64]| -> f64 {
        let (weights, bias) = theta.split_at(n_features);
        grad.fill(0.0);

        let mut loss = 0.0;
        for (row, &target) in x.iter().zip(targets) {
            let z = row.dot(weights) + bias[0];
            let t = if target == 1 { 1.0 } else { 0.0 };
            loss += softplus(z) - t * z;

            let residual = sigmoid(z) - t;
            grad[n_features] += c * residual;
            for (j, v) in row.iter() {
                grad[j] += c * residual * v;
            }
        }

        let penalty: f64 = weights.iter().map(|w| w * w).sum::<f64>() * 0.5;
        for (g, w) in grad[..n_features].iter_mut().zip(weights) {
            *g += w;
        }
        for g in grad.iter_mut() {
            *g /= n_samples;
        }

        (c * loss + penalty) / n_samples
    };

    let mut result = lbfgs::minimize(objective, vec![0.0; n_features + 1], options);
    let bias = result.x[n_features];
    let mut coef = vec![0.0; n_features];
    coef.extend_from_slice(&result.x[..n_features]);
    result.x.clear();

    (coef, vec![0.0, bias], result)
}

/// Three or more labels: one softmax row per class.
fn fit_multinomial(
    x: &[SparseVector],
    targets: &[usize],
    n_classes: usize,
    n_features: usize,
    c: f64,
    options: LbfgsOptions,
) -> Fitted {
    let n_weights = n_classes * n_features;
    let n_samples = x.len() as f64;

    let mut scores = vec![0.0; n_classes];
    let objective = |theta: &[f64], grad: &mut [f64]| -> f64 {
        let (weights, bias) = theta.split_at(n_weights);
        grad.fill(0.0);

        let mut loss = 0.0;
        for (row, &target) in x.iter().zip(targets) {
            for (k, score) in scores.iter_mut().enumerate() {
                *score = row.dot(&weights[k * n_features..(k + 1) * n_features]) + bias[k];
            }
            let lse = log_sum_exp(&scores);
            loss += lse - scores[target];

            let (grad_w, grad_b) = grad.split_at_mut(n_weights);
            for k in 0..n_classes {
                let residual = (scores[k] - lse).exp() - if k == target { 1.0 } else { 0.0 };
                grad_b[k] += c * residual;
                let grad_row = &mut grad_w[k * n_features..(k + 1) * n_features];
                for (j, v) in row.iter() {
                    grad_row[j] += c * residual * v;
                }
            }
        }

        let penalty: f64 = weights.iter().map(|w| w * w).sum::<f64>() * 0.5;
        for (g, w) in grad[..n_weights].iter_mut().zip(weights) {
            *g += w;
        }
        for g in grad.iter_mut() {
            *g /= n_samples;
        }

        (c * loss + penalty) / n_samples
    };

    let mut result = lbfgs::minimize(objective, vec![0.0; n_weights + n_classes], options);
    let intercept = result.x.split_off(n_weights);
    let coef = std::mem::take(&mut result.x);

    (coef, intercept, result)
}

/// `ln(1 + e^z)` without overflow.
fn softplus(z: f64) -> f64 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}
