//! Core value types shared by the simulator, the chart composer and the server.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{ALLOCATION_MAX, ALLOCATION_MIN};
use crate::error::{FundsimError, Result};

/// Percentage of capital placed in Fund A; the remainder goes to Fund B.
///
/// Always within [0, 100], so `fund_a() + fund_b() == 100` holds by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Allocation(u8);

impl Allocation {
    pub fn new(percent: i64) -> Result<Self> {
        if percent < ALLOCATION_MIN as i64 || percent > ALLOCATION_MAX as i64 {
            return Err(FundsimError::InvalidAllocation { value: percent });
        }
        Ok(Self(percent as u8))
    }

    /// Percent in Fund A.
    #[inline]
    pub fn fund_a(self) -> u8 {
        self.0
    }

    /// Percent in Fund B.
    #[inline]
    pub fn fund_b(self) -> u8 {
        ALLOCATION_MAX - self.0
    }

    /// Fund A weight in [0, 1].
    #[inline]
    pub fn weight_a(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Fund B weight, `1 - weight_a()`.
    #[inline]
    pub fn weight_b(self) -> f64 {
        1.0 - self.weight_a()
    }
}

impl TryFrom<i64> for Allocation {
    type Error = FundsimError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Allocation> for u8 {
    fn from(a: Allocation) -> u8 {
        a.0
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
