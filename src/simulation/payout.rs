//! Payout simulator.
//!
//! Each simulated payout mixes the two funds by allocation weight:
//! `w_a · fund_a_return + w_b · r_b` with `r_b ~ N(fund_b_mean, fund_b_std)`.
//! Fund A is deterministic, so at 100% allocation every payout is exactly
//! `fund_a_return` and the sample has zero variance.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::constants::{FUND_A_RETURN, FUND_B_MEAN, FUND_B_STD};
use crate::error::{FundsimError, Result};
use crate::types::Allocation;

use super::seed::{stream_rng, DISPLAY_STREAM};

/// Return parameters of the two funds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutModel {
    pub fund_a_return: f64,
    pub fund_b_mean: f64,
    pub fund_b_std: f64,
}

impl Default for PayoutModel {
    fn default() -> Self {
        Self {
            fund_a_return: FUND_A_RETURN,
            fund_b_mean: FUND_B_MEAN,
            fund_b_std: FUND_B_STD,
        }
    }
}

impl PayoutModel {
    /// Normal distribution of Fund B's payout.
    pub fn fund_b_distribution(&self) -> Result<Normal<f64>> {
        Normal::new(self.fund_b_mean, self.fund_b_std).map_err(|e| {
            FundsimError::invalid_parameter(format!(
                "fund B distribution N({}, {}): {e}",
                self.fund_b_mean, self.fund_b_std
            ))
        })
    }

    /// `n` independent draws of Fund B's payout.
    pub fn fund_b_returns<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<f64>> {
        check_sample_size(n)?;
        let dist = self.fund_b_distribution()?;
        Ok((0..n).map(|_| dist.sample(rng)).collect())
    }

    /// Total payout for one Fund B outcome.
    #[inline]
    pub fn payout(&self, allocation: Allocation, fund_b_return: f64) -> f64 {
        allocation.weight_a() * self.fund_a_return + allocation.weight_b() * fund_b_return
    }

    /// `n` independent total payouts for `allocation`.
    pub fn generate_payouts<R: Rng + ?Sized>(
        &self,
        allocation: Allocation,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        let returns = self.fund_b_returns(n, rng)?;
        Ok(returns
            .into_iter()
            .map(|r| self.payout(allocation, r))
            .collect())
    }
}

/// Deterministic payouts: the display stream of `seed`.
pub fn generate_payouts_seeded(
    model: &PayoutModel,
    allocation: Allocation,
    n: usize,
    seed: u64,
) -> Result<Vec<f64>> {
    let mut rng = stream_rng(seed, DISPLAY_STREAM);
    model.generate_payouts(allocation, n, &mut rng)
}

pub(crate) fn check_sample_size(n: usize) -> Result<()> {
    if n == 0 {
        return Err(FundsimError::invalid_parameter(
            "sample size must be at least 1",
        ));
    }
    Ok(())
}
