//! Fund parameters, sample sizes and chart geometry.
//!
//! Payout model for allocation `a` (percent in Fund A):
//! - payout = a/100 · [`FUND_A_RETURN`] + (1 − a/100) · N([`FUND_B_MEAN`], [`FUND_B_STD`])
//! - expected payout = a/100 · 105 + (1 − a/100) · 120
//!
//! The chart x-axis never moves ([`X_AXIS_RANGE`]) so curves for different
//! allocations can be compared by eye while dragging the slider.

/// Fixed payout of Fund A per 100 invested.
pub const FUND_A_RETURN: f64 = 105.0;

/// Mean payout of Fund B per 100 invested.
pub const FUND_B_MEAN: f64 = 120.0;

/// Standard deviation of Fund B's payout.
pub const FUND_B_STD: f64 = 20.0;

/// Draws used for the displayed density curve.
pub const DISPLAY_SAMPLE_SIZE: usize = 1_000;

/// Draws used for the Monte Carlo expected-return estimate.
pub const EXPECTATION_SAMPLE_SIZE: usize = 100_000;

/// Number of grid points the KDE is evaluated at.
pub const DENSITY_POINTS: usize = 1_000;

// ── Slider ──────────────────────────────────────────────────────────

pub const ALLOCATION_MIN: u8 = 0;
pub const ALLOCATION_MAX: u8 = 100;
pub const ALLOCATION_STEP: u8 = 5;
pub const ALLOCATION_DEFAULT: u8 = 50;

/// Spacing of labelled slider marks.
pub const ALLOCATION_MARK_STEP: u8 = 10;

// ── Chart geometry ──────────────────────────────────────────────────

pub const X_AXIS_RANGE: [f64; 2] = [50.0, 180.0];

/// Height of the expected-return marker relative to the density peak.
pub const EXPECTED_LINE_HEADROOM: f64 = 1.05;

/// Upper y-axis bound relative to the density peak.
pub const Y_AXIS_HEADROOM: f64 = 1.2;

/// x-position the "Investment capital" arrow points at.
pub const CAPITAL_MARKER_X: f64 = 100.0;

/// Rectangle drawn around the capital marker: (x0, x1, y0, y1).
pub const CAPITAL_RECT: (f64, f64, f64, f64) = (95.0, 105.0, -0.005, 0.004);
