//! Payout simulation.
//!
//! - [`payout`]: Mixed Fund A / Fund B payout samples
//! - [`expectation`]: Monte Carlo and closed-form expected return
//! - [`seed`]: Seed derivation for reproducible streams

pub mod expectation;
pub mod payout;
pub mod seed;

pub use expectation::{
    expected_return, expected_return_closed_form, expected_return_monte_carlo,
    expected_return_monte_carlo_par, ExpectationMethod,
};
pub use payout::{generate_payouts_seeded, PayoutModel};
pub use seed::{derive_seed, fresh_seed, stream_rng};
