//! Limited-memory BFGS with Armijo backtracking.
//!
//! Minimizes a smooth objective given a closure that writes the gradient
//! into a buffer and returns the objective value. Fully deterministic.

use std::collections::VecDeque;

/// Sufficient-decrease constant for the Armijo condition.
const ARMIJO_C1: f64 = 1e-4;
/// Step shrink factor while backtracking.
const BACKTRACK: f64 = 0.5;
const MAX_BACKTRACKS: usize = 60;
/// Relative objective change treated as stalled.
const FTOL: f64 = 1e-12;
/// Curvature pairs with `s·y` below this are discarded.
const CURVATURE_EPS: f64 = 1e-10;

/// Stopping parameters.
#[derive(Debug, Clone, Copy)]
pub struct LbfgsOptions {
    pub max_iter: usize,
    /// Stop once the largest absolute gradient component is below this.
    pub gtol: f64,
    /// Number of correction pairs kept.
    pub memory: usize,
}

impl Default for LbfgsOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            gtol: 1e-4,
            memory: 10,
        }
    }
}

/// Outcome of a minimization.
#[derive(Debug, Clone)]
pub struct LbfgsResult {
    pub x: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0f64, |m, x| m.max(x.abs()))
}

/// Minimize `objective` starting from `x0`.
///
/// `objective(x, grad)` must return `f(x)` and fill `grad` with `∇f(x)`.
pub fn minimize<F>(mut objective: F, x0: Vec<f64>, options: LbfgsOptions) -> LbfgsResult
where
    F: FnMut(&[f64], &mut [f64]) -> f64,
{
    let n = x0.len();
    let mut x = x0;
    let mut grad = vec![0.0; n];
    let mut value = objective(&x, &mut grad);

    // (s, y, 1 / s·y), oldest first
    let mut history: VecDeque<(Vec<f64>, Vec<f64>, f64)> = VecDeque::with_capacity(options.memory);

    let mut x_new = vec![0.0; n];
    let mut grad_new = vec![0.0; n];
    let mut direction = vec![0.0; n];
    let mut alphas = vec![0.0; options.memory];

    for iter in 0..options.max_iter {
        if max_abs(&grad) <= options.gtol {
            return LbfgsResult {
                x,
                value,
                iterations: iter,
                converged: true,
            };
        }

        // Two-loop recursion: direction = -H·grad
        direction.copy_from_slice(&grad);
        for (i, (s, y, rho)) in history.iter().enumerate().rev() {
            let alpha = rho * dot(s, &direction);
            alphas[i] = alpha;
            for (d, yj) in direction.iter_mut().zip(y) {
                *d -= alpha * yj;
            }
        }
        let gamma = match history.back() {
            Some((s, y, _)) => dot(s, y) / dot(y, y),
            // First step: cap the largest component of the move at one.
            None => 1.0 / max_abs(&grad).max(1.0),
        };
        for d in direction.iter_mut() {
            *d *= gamma;
        }
        for (i, (s, y, rho)) in history.iter().enumerate() {
            let beta = rho * dot(y, &direction);
            for (d, sj) in direction.iter_mut().zip(s) {
                *d += sj * (alphas[i] - beta);
            }
        }
        for d in direction.iter_mut() {
            *d = -*d;
        }

        let mut slope = dot(&grad, &direction);
        if slope >= 0.0 {
            // Not a descent direction; restart from steepest descent.
            history.clear();
            for (d, g) in direction.iter_mut().zip(&grad) {
                *d = -g;
            }
            slope = -dot(&grad, &grad);
        }

        let mut step = 1.0;
        let mut accepted = None;
        for _ in 0..MAX_BACKTRACKS {
            for ((xn, xi), d) in x_new.iter_mut().zip(&x).zip(&direction) {
                *xn = xi + step * d;
            }
            let candidate = objective(&x_new, &mut grad_new);
            if candidate <= value + ARMIJO_C1 * step * slope {
                accepted = Some(candidate);
                break;
            }
            step *= BACKTRACK;
        }

        let Some(value_new) = accepted else {
            return LbfgsResult {
                x,
                value,
                iterations: iter,
                converged: false,
            };
        };

        let s: Vec<f64> = x_new.iter().zip(&x).map(|(a, b)| a - b).collect();
        let y: Vec<f64> = grad_new.iter().zip(&grad).map(|(a, b)| a - b).collect();
        let sy = dot(&s, &y);
        if sy > CURVATURE_EPS {
            if history.len() == options.memory {
                history.pop_front();
            }
            history.push_back((s, y, 1.0 / sy));
        }

        std::mem::swap(&mut x, &mut x_new);
        std::mem::swap(&mut grad, &mut grad_new);
        let previous = value;
        value = value_new;

        let scale = previous.abs().max(value.abs()).max(1.0);
        if (previous - value) / scale <= FTOL {
            let converged = max_abs(&grad) <= options.gtol;
            return LbfgsResult {
                x,
                value,
                iterations: iter + 1,
                converged,
            };
        }
    }

    let converged = max_abs(&grad) <= options.gtol;
    LbfgsResult {
        x,
        value,
        iterations: options.max_iter,
        converged,
    }
}
