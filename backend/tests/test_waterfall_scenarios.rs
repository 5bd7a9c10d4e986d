//! End-to-end waterfall scenarios
//!
//! Four exit stages over the same cap table. Amounts are compared after
//! rounding to the nearest currency unit.

mod common;

use common::{founders, init_tracing, investors, rounded, series_a, series_b, series_c};
use exit_waterfall_core_rs::{simulate, ShareClass, Waterfall};

/// Expected allocation per class: (common, series A, series B, series C)
fn assert_stage(exit_proceeds: f64, expected: (f64, f64, f64, f64)) {
    init_tracing();
    let result = simulate(exit_proceeds, &investors()).unwrap();

    assert_eq!(rounded(&result, ShareClass::Common), expected.0, "common");
    assert_eq!(rounded(&result, ShareClass::PreferredA), expected.1, "series A");
    assert_eq!(rounded(&result, ShareClass::PreferredB), expected.2, "series B");
    assert_eq!(rounded(&result, ShareClass::PreferredC), expected.3, "series C");
}

#[test]
fn test_stage_1_exit_at_60m() {
    assert_stage(
        60_000_000.0,
        (19_980_000.0, 4_020_000.0, 6_000_000.0, 30_000_000.0),
    );
}

#[test]
fn test_stage_2_exit_at_25m() {
    assert_stage(
        25_000_000.0,
        (2_331_000.0, 1_369_000.0, 2_800_000.0, 18_500_000.0),
    );
}

#[test]
fn test_stage_3_exit_at_35m() {
    assert_stage(
        35_000_000.0,
        (5_747_700.0, 1_800_000.0, 3_822_700.0, 23_629_600.0),
    );
}

#[test]
fn test_stage_4_exit_at_45m() {
    assert_stage(
        45_000_000.0,
        (9_546_000.0, 1_909_200.0, 4_200_000.0, 29_344_800.0),
    );
}

#[test]
fn test_all_preferred_convert_at_60m() {
    let result = simulate(60_000_000.0, &investors()).unwrap();

    for class in [ShareClass::PreferredA, ShareClass::PreferredB, ShareClass::PreferredC] {
        let record = result.distribution(class);
        assert!(record.converted_to_common, "{class} should convert");
        assert!(!record.is_capped, "{class} should not be capped");
    }
}

#[test]
fn test_series_a_capped_at_35m() {
    let result = simulate(35_000_000.0, &investors()).unwrap();

    let record = result.distribution(ShareClass::PreferredA);
    assert!(record.is_capped);
    assert_eq!(record.exit_amount, 1_800_000.0);
    // Series A's shares leave the pool
    assert_eq!(result.total_shares_remainder(), 2_800_000);
}

#[test]
fn test_series_b_capped_and_series_a_converted_at_45m() {
    let result = simulate(45_000_000.0, &investors()).unwrap();

    assert!(result.distribution(ShareClass::PreferredB).is_capped);
    assert!(result.distribution(ShareClass::PreferredA).converted_to_common);
    assert_eq!(result.total_shares_remainder(), 2_700_000);
}

#[test]
fn test_allocations_add_up_to_proceeds() {
    for exit_proceeds in [25_000_000.0, 35_000_000.0, 45_000_000.0, 60_000_000.0] {
        let result = simulate(exit_proceeds, &investors()).unwrap();
        let total = result.total_allocated();

        assert!(
            (total - exit_proceeds).abs() < 1.0,
            "allocated {total} of {exit_proceeds}"
        );
    }
}

#[test]
fn test_input_order_does_not_matter() {
    let shuffled = vec![series_b(), founders(), series_c(), series_a()];

    let expected = simulate(35_000_000.0, &investors()).unwrap();
    let result = simulate(35_000_000.0, &shuffled).unwrap();

    assert_eq!(result, expected);
}

#[test]
fn test_waterfall_reused_across_stages() {
    let waterfall = Waterfall::new(investors()).unwrap();

    let low = waterfall.run(25_000_000.0).unwrap();
    let high = waterfall.run(60_000_000.0).unwrap();

    assert_eq!(rounded(&low, ShareClass::PreferredC), 18_500_000.0);
    assert_eq!(rounded(&high, ShareClass::PreferredC), 30_000_000.0);
}

#[test]
fn test_proceeds_below_preferences_pay_seniors_first() {
    // 10m does not cover the 18m of stacked preferences
    let result = simulate(10_000_000.0, &investors()).unwrap();

    assert_eq!(rounded(&result, ShareClass::PreferredC), 10_000_000.0);
    assert_eq!(rounded(&result, ShareClass::PreferredB), 0.0);
    assert_eq!(rounded(&result, ShareClass::PreferredA), 0.0);
    assert_eq!(rounded(&result, ShareClass::Common), 0.0);
    assert_eq!(result.exit_remainder(), 0.0);
}

#[test]
fn test_zero_proceeds() {
    let result = simulate(0.0, &investors()).unwrap();

    assert_eq!(result.total_allocated(), 0.0);
    for (class, record) in result.distributions() {
        assert!(record.exit_amount >= 0.0, "{class}");
    }
}
