//! One render cycle: allocation in, chart and fund labels out.
//!
//! [`render`] has no HTTP or UI dependency. Each call simulates fresh
//! samples, fits the density, composes the figure and discards everything
//! else. The seed is always reported back, so a render the user found
//! interesting can be reproduced exactly.

use std::time::Instant;

use serde::Serialize;

use crate::chart::{compose_figure, fund_labels, Figure};
use crate::constants::{DENSITY_POINTS, DISPLAY_SAMPLE_SIZE, EXPECTATION_SAMPLE_SIZE};
use crate::density::density_curve;
use crate::error::Result;
use crate::simulation::{
    expected_return, fresh_seed, generate_payouts_seeded, ExpectationMethod, PayoutModel,
};
use crate::types::Allocation;

/// Per-render knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub model: PayoutModel,
    pub display_sample_size: usize,
    pub expectation_sample_size: usize,
    pub expectation: ExpectationMethod,
    /// `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            model: PayoutModel::default(),
            display_sample_size: DISPLAY_SAMPLE_SIZE,
            expectation_sample_size: EXPECTATION_SAMPLE_SIZE,
            expectation: ExpectationMethod::default(),
            seed: None,
        }
    }
}

/// Everything the page needs to redraw after a slider change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardUpdate {
    pub allocation: Allocation,
    pub figure: Figure,
    pub fund_a_label: String,
    pub fund_b_label: String,
    pub expected_return: f64,
    pub expectation: ExpectationMethod,
    pub seed: u64,
}

pub fn render(allocation: Allocation, options: &RenderOptions) -> Result<DashboardUpdate> {
    let start = Instant::now();
    let seed = options.seed.unwrap_or_else(fresh_seed);

    let payouts = generate_payouts_seeded(
        &options.model,
        allocation,
        options.display_sample_size,
        seed,
    )?;
    let expected = expected_return(
        &options.model,
        allocation,
        options.expectation,
        options.expectation_sample_size,
        seed,
    )?;
    let curve = density_curve(&payouts, DENSITY_POINTS)?;
    let figure = compose_figure(&curve, expected, allocation)?;
    let (fund_a_label, fund_b_label) = fund_labels(allocation);

    tracing::debug!(
        allocation = allocation.fund_a(),
        seed,
        expectation = %options.expectation,
        expected,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "rendered payout chart"
    );

    Ok(DashboardUpdate {
        allocation,
        figure,
        fund_a_label,
        fund_b_label,
        expected_return: expected,
        expectation: options.expectation,
        seed,
    })
}
