//! # fundsim — Fund Allocation Payout Simulation
//!
//! Splits capital between a fixed-return fund (A) and a normally distributed
//! fund (B), simulates the resulting payouts, smooths them into a density
//! curve and serves the result as an interactive chart.
//!
//! ## Pipeline
//!
//! | Step | Module | Description |
//! |------|--------|-------------|
//! | 1 | [`simulation::payout`] | Draw n payouts `a/100·105 + (1−a/100)·N(120, 20)` |
//! | 2 | [`density`] | Gaussian KDE (Scott's rule) on a 1000-point grid over the sample range |
//! | 3 | [`simulation::expectation`] | Expected return, Monte Carlo (default) or closed form |
//! | 4 | [`chart`] | Typed figure: density, expected-return marker, annotations, axes, shape |
//! | 5 | [`dashboard`] | One render cycle tying 1–4 together, plus the fund labels |
//!
//! [`server`] exposes [`dashboard::render`] over HTTP next to an embedded
//! page with the allocation slider.
//!
//! ## Reproducibility
//!
//! All randomness flows from a single `u64` seed per render (see
//! [`simulation::seed`]). Interactive renders draw a fresh seed and return it,
//! so any chart can be replayed with `?seed=`.

pub mod chart;
pub mod constants;
pub mod dashboard;
pub mod density;
pub mod env_config;
pub mod error;
pub mod server;
pub mod simulation;
pub mod types;

pub use error::{FundsimError, Result};
