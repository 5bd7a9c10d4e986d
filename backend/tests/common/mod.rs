//! Shared fixtures: the four-class cap table used across scenario tests

#![allow(dead_code)]

use exit_waterfall_core_rs::{Action, DistributionState, Investor, ShareClass};

pub fn founders() -> Investor {
    Investor::common("Founders", 1_000_000)
}

pub fn series_a() -> Investor {
    Investor::preferred("Preferred A Investors", ShareClass::PreferredA, 200_000, 900_000.0)
        .unwrap()
        .with_participation(true)
}

pub fn series_b() -> Investor {
    Investor::preferred("Preferred B Investors", ShareClass::PreferredB, 300_000, 2_100_000.0)
        .unwrap()
        .with_participation(true)
}

pub fn series_c() -> Investor {
    Investor::preferred("Preferred C Investors", ShareClass::PreferredC, 1_500_000, 15_000_000.0)
        .unwrap()
        .with_participation(true)
}

/// Fixture list, most junior first
pub fn investors() -> Vec<Investor> {
    vec![founders(), series_a(), series_b(), series_c()]
}

/// State right after initialization against `investor_list`
pub fn build_initial_state(exit_proceeds: f64, investor_list: &[Investor]) -> DistributionState {
    DistributionState::new().apply(&Action::Initialize {
        exit_proceeds,
        investors: investor_list,
    })
}

/// Exit amount for a class, rounded to the nearest unit
pub fn rounded(state: &DistributionState, share_class: ShareClass) -> f64 {
    state.exit_amount(share_class).round()
}

/// Route engine logs to the test harness, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
