//! Density estimation for simulated payout samples.
//!
//! A Gaussian KDE (Scott's rule) smooths the sample into a continuous curve
//! evaluated on an evenly spaced grid over the sample's range.

pub mod kde;

pub use kde::{density_curve, linspace, scott_factor, DensityCurve, GaussianKde};
