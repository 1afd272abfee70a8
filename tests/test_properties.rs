//! Property-based tests for the simulation, density and chart pipeline.

use proptest::prelude::*;

use fundsim::chart::{fund_labels, Trace};
use fundsim::constants::X_AXIS_RANGE;
use fundsim::dashboard::{render, RenderOptions};
use fundsim::density::density_curve;
use fundsim::simulation::{
    expected_return_closed_form, expected_return_monte_carlo_par, generate_payouts_seeded,
    PayoutModel,
};
use fundsim::types::Allocation;

/// Strategy: allocations the slider can emit (0, 5, ..., 100).
fn slider_allocation() -> impl Strategy<Value = Allocation> {
    (0..=20i64).prop_map(|k| Allocation::new(k * 5).unwrap())
}

/// Strategy: slider allocations with a non-zero Fund B share.
fn mixed_allocation() -> impl Strategy<Value = Allocation> {
    (0..=19i64).prop_map(|k| Allocation::new(k * 5).unwrap())
}

/// Pull the euro amount out of "Amount invested in Fund X: €N".
fn euro_amount(label: &str) -> u32 {
    label.rsplit('€').next().unwrap().parse().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // 1. Payouts are always finite
    #[test]
    fn payouts_finite(a in slider_allocation(), seed in any::<u64>()) {
        let payouts = generate_payouts_seeded(&PayoutModel::default(), a, 1000, seed).unwrap();
        prop_assert_eq!(payouts.len(), 1000);
        prop_assert!(payouts.iter().all(|p| p.is_finite()));
    }

    // 2. Large-sample mean approaches the closed-form expectation
    #[test]
    fn sample_mean_converges(a in slider_allocation(), seed in any::<u64>()) {
        let m = PayoutModel::default();
        let payouts = generate_payouts_seeded(&m, a, 100_000, seed).unwrap();
        let mean = payouts.iter().sum::<f64>() / payouts.len() as f64;
        let exact = expected_return_closed_form(&m, a);
        // 6 standard errors of N(·, 20)/sqrt(1e5)
        prop_assert!((mean - exact).abs() < 0.4, "mean={mean} exact={exact}");
    }

    // 3. Monte Carlo expectation within tolerance of the closed form
    #[test]
    fn expectation_close_to_exact(a in slider_allocation(), seed in any::<u64>()) {
        let m = PayoutModel::default();
        let mc = expected_return_monte_carlo_par(&m, a, 100_000, seed).unwrap();
        prop_assert!((mc - expected_return_closed_form(&m, a)).abs() < 1.0);
    }

    // 4. Density values are non-negative for non-degenerate samples
    #[test]
    fn density_non_negative(a in mixed_allocation(), seed in any::<u64>()) {
        let payouts = generate_payouts_seeded(&PayoutModel::default(), a, 1000, seed).unwrap();
        let curve = density_curve(&payouts, 1000).unwrap();
        prop_assert!(curve.y.iter().all(|&y| y >= 0.0));
        prop_assert!(curve.peak() > 0.0);
    }

    // 5. Label amounts always sum to 100
    #[test]
    fn labels_sum_to_100(p in 0..=100i64) {
        let (a, b) = fund_labels(Allocation::new(p).unwrap());
        prop_assert_eq!(euro_amount(&a) + euro_amount(&b), 100);
        prop_assert_eq!(euro_amount(&a) as i64, p);
    }

    // 6. Same seed, same allocation: identical payouts
    #[test]
    fn seeded_simulation_idempotent(a in slider_allocation(), seed in any::<u64>()) {
        let m = PayoutModel::default();
        let first = generate_payouts_seeded(&m, a, 256, seed).unwrap();
        let second = generate_payouts_seeded(&m, a, 256, seed).unwrap();
        prop_assert_eq!(first, second);
    }

    // 7. x-axis range never moves
    #[test]
    fn x_axis_fixed(a in mixed_allocation(), seed in any::<u64>()) {
        let options = RenderOptions {
            seed: Some(seed),
            expectation_sample_size: 1_000,
            ..RenderOptions::default()
        };
        let update = render(a, &options).unwrap();
        prop_assert_eq!(update.figure.layout.xaxis.range(), X_AXIS_RANGE);
        let Trace::Scatter(marker) = &update.figure.data[1];
        prop_assert_eq!(marker.y()[0], 0.0);
    }
}

// ── Scenarios ───────────────────────────────────────────────────────

#[test]
fn scenario_full_fund_a_constant_and_degenerate() {
    let a = Allocation::new(100).unwrap();
    let payouts = generate_payouts_seeded(&PayoutModel::default(), a, 1000, 0).unwrap();
    assert!(payouts.iter().all(|&p| p == 105.0));
    assert!(matches!(
        density_curve(&payouts, 1000),
        Err(fundsim::FundsimError::DegenerateSample { .. })
    ));
}

#[test]
fn scenario_full_fund_b_expectation() {
    let a = Allocation::new(0).unwrap();
    let e = expected_return_monte_carlo_par(&PayoutModel::default(), a, 100_000, 31).unwrap();
    assert!((e - 120.0).abs() < 1.0, "e={e}");
}

#[test]
fn scenario_even_split_expectation() {
    let a = Allocation::new(50).unwrap();
    let e = expected_return_monte_carlo_par(&PayoutModel::default(), a, 100_000, 32).unwrap();
    assert!((e - 112.5).abs() < 1.0, "e={e}");
}
