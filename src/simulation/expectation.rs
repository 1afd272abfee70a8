//! Expected-return estimation.
//!
//! The Monte Carlo estimate draws a fresh Fund B sample on every call, so the
//! value shown next to the curve wobbles slightly between renders. The closed
//! form is exact and available as an alternative.
//!
//! The parallel estimator splits the sample into fixed-size chunks, each with
//! its own generator derived from the seed. Chunk boundaries do not depend on
//! the rayon pool size, so a given seed yields the same estimate on any
//! machine.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::Distribution;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FundsimError, Result};
use crate::types::Allocation;

use super::payout::{check_sample_size, PayoutModel};
use super::seed::{derive_seed, stream_rng, EXPECTATION_STREAM};

/// Draws per parallel chunk.
const CHUNK_SIZE: usize = 10_000;

/// How the expected return is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectationMethod {
    /// Mean of a fresh Fund B sample.
    #[default]
    MonteCarlo,
    /// a/100 · fund_a_return + (1 − a/100) · fund_b_mean.
    ClosedForm,
}

impl FromStr for ExpectationMethod {
    type Err = FundsimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monte_carlo" | "montecarlo" | "mc" => Ok(Self::MonteCarlo),
            "closed_form" | "closedform" | "exact" => Ok(Self::ClosedForm),
            other => Err(FundsimError::invalid_parameter(format!(
                "unknown expectation method '{other}' (expected monte_carlo or closed_form)"
            ))),
        }
    }
}

impl fmt::Display for ExpectationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonteCarlo => f.write_str("monte_carlo"),
            Self::ClosedForm => f.write_str("closed_form"),
        }
    }
}

/// Exact expected payout.
pub fn expected_return_closed_form(model: &PayoutModel, allocation: Allocation) -> f64 {
    model.payout(allocation, model.fund_b_mean)
}

/// Monte Carlo expected payout from `n` Fund B draws on `rng`.
pub fn expected_return_monte_carlo<R: Rng + ?Sized>(
    model: &PayoutModel,
    allocation: Allocation,
    n: usize,
    rng: &mut R,
) -> Result<f64> {
    let returns = model.fund_b_returns(n, rng)?;
    let mean = returns.iter().sum::<f64>() / n as f64;
    Ok(model.payout(allocation, mean))
}

/// Parallel Monte Carlo expected payout, reproducible for a given `seed`.
pub fn expected_return_monte_carlo_par(
    model: &PayoutModel,
    allocation: Allocation,
    n: usize,
    seed: u64,
) -> Result<f64> {
    check_sample_size(n)?;
    let dist = model.fund_b_distribution()?;
    let base = derive_seed(seed, EXPECTATION_STREAM);
    let num_chunks = n.div_ceil(CHUNK_SIZE);

    let total: f64 = (0..num_chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * CHUNK_SIZE;
            let len = CHUNK_SIZE.min(n - start);
            let mut rng = stream_rng(base, chunk as u64);
            (0..len).map(|_| dist.sample(&mut rng)).sum::<f64>()
        })
        // Collect before summing: keeps the float summation order fixed.
        .collect::<Vec<f64>>()
        .iter()
        .sum();

    Ok(model.payout(allocation, total / n as f64))
}

/// Expected payout by `method`. `n` and `seed` only matter for Monte Carlo.
pub fn expected_return(
    model: &PayoutModel,
    allocation: Allocation,
    method: ExpectationMethod,
    n: usize,
    seed: u64,
) -> Result<f64> {
    match method {
        ExpectationMethod::MonteCarlo => expected_return_monte_carlo_par(model, allocation, n, seed),
        ExpectationMethod::ClosedForm => Ok(expected_return_closed_form(model, allocation)),
    }
}
