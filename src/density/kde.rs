//! Gaussian kernel density estimate with Scott's bandwidth rule.
//!
//! For a 1-D sample of size n with sample standard deviation σ̂ (ddof = 1):
//!
//! - Scott factor: `n^(-1/(d+4))` with d = 1, i.e. `n^(-0.2)`
//! - kernel bandwidth: `h = σ̂ · n^(-0.2)`
//! - density: `f(x) = 1/(n·h) · Σ φ((x − xᵢ)/h)`, φ the standard normal pdf
//!
//! A sample with zero spread has no valid bandwidth. That case is reported as
//! [`FundsimError::DegenerateSample`] instead of being smoothed over.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{FundsimError, Result};

/// 1/√(2π).
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Fitted Gaussian KDE over a 1-D sample.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    data: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit with Scott's rule. Fails on empty, single-valued, non-finite or
    /// zero-variance samples.
    pub fn fit(sample: &[f64]) -> Result<Self> {
        if sample.is_empty() {
            return Err(FundsimError::empty_data("density estimation"));
        }
        if sample.len() < 2 {
            return Err(FundsimError::InsufficientData {
                required: 2,
                available: sample.len(),
            });
        }
        if let Some(bad) = sample.iter().find(|v| !v.is_finite()) {
            return Err(FundsimError::invalid_parameter(format!(
                "sample contains non-finite value {bad}"
            )));
        }

        let n = sample.len() as f64;
        let mean = sample.iter().sum::<f64>() / n;
        let variance = sample.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let std_dev = variance.sqrt();

        if std_dev <= 1e-12 * mean.abs().max(1.0) {
            return Err(FundsimError::DegenerateSample {
                value: sample[0],
                len: sample.len(),
            });
        }

        Ok(Self {
            data: sample.to_vec(),
            bandwidth: std_dev * scott_factor(sample.len()),
        })
    }

    /// Kernel standard deviation h.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let inv_h = 1.0 / self.bandwidth;
        let sum: f64 = self
            .data
            .iter()
            .map(|&xi| {
                let u = (x - xi) * inv_h;
                (-0.5 * u * u).exp()
            })
            .sum();
        sum * INV_SQRT_2PI * inv_h / self.data.len() as f64
    }

    /// Density at every point of `xs`, evaluated in parallel.
    pub fn evaluate_grid(&self, xs: &[f64]) -> Vec<f64> {
        xs.par_iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// Scott's bandwidth factor for a 1-D sample of size `n`.
pub fn scott_factor(n: usize) -> f64 {
    (n as f64).powf(-1.0 / 5.0)
}

/// `num` evenly spaced points from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            let mut xs: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            xs[num - 1] = end;
            xs
        }
    }
}

/// Density curve ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl DensityCurve {
    /// Highest density value (0.0 for an empty curve).
    pub fn peak(&self) -> f64 {
        self.y.iter().copied().fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Fit a KDE to `sample` and evaluate it on `points` grid points spanning
/// [min(sample), max(sample)].
pub fn density_curve(sample: &[f64], points: usize) -> Result<DensityCurve> {
    if points == 0 {
        return Err(FundsimError::invalid_parameter(
            "density grid needs at least 1 point",
        ));
    }
    let kde = GaussianKde::fit(sample)?;
    let (lo, hi) = sample
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let x = linspace(lo, hi, points);
    let y = kde.evaluate_grid(&x);
    tracing::trace!(
        n = sample.len(),
        bandwidth = kde.bandwidth(),
        lo,
        hi,
        "density curve evaluated"
    );
    Ok(DensityCurve { x, y })
}
