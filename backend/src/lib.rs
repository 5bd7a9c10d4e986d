//! Exit Waterfall Core - Rust Engine
//!
//! Distributes exit proceeds from a company sale across common and preferred
//! share classes, honouring liquidation preferences, conversion to common,
//! and caps on total return.
//!
//! # Architecture
//!
//! - **core**: Money type and ownership-fraction rounding
//! - **models**: Domain types (Investor, ShareClass, DistributionState)
//! - **transition**: Pure state transition engine (one action, one new state)
//! - **orchestrator**: Multi-pass waterfall sequencing
//!
//! # Critical Invariants
//!
//! 1. Ownership fractions are rounded to three decimal places
//! 2. Execution is deterministic: same inputs, same distribution
//! 3. `is_capped` and `converted_to_common` are sticky within a run
//! 4. FFI boundary is minimal and safe
//!
//! # Python bindings
//!
//! The `ffi` module is behind the `pyo3` feature, which is off by default so
//! the crate builds and tests without a Python toolchain. Build the extension
//! module with:
//!
//! ```text
//! cargo build --release -p exit-waterfall-core-rs --features pyo3
//! ```
//!
//! or through `maturin develop --features pyo3`. It exposes a single
//! function, `simulate_exit_distribution(exit_proceeds, investors)`.
//!
//! # Example
//!
//! ```rust
//! use exit_waterfall_core_rs::{simulate, Investor, ShareClass};
//!
//! let investors = vec![
//!     Investor::common("Founders", 1_000_000),
//!     Investor::preferred("Series A", ShareClass::PreferredA, 200_000, 900_000.0).unwrap(),
//!     Investor::preferred("Series B", ShareClass::PreferredB, 300_000, 2_100_000.0).unwrap(),
//!     Investor::preferred("Series C", ShareClass::PreferredC, 1_500_000, 15_000_000.0).unwrap(),
//! ];
//!
//! let result = simulate(60_000_000.0, &investors).unwrap();
//! assert_eq!(result.exit_amount(ShareClass::PreferredC).round(), 30_000_000.0);
//! assert_eq!(result.exit_amount(ShareClass::Common).round(), 19_980_000.0);
//! ```

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod transition;

// Re-exports for convenience
pub use crate::core::numeric::Money;
pub use models::{
    investor::{DEFAULT_CAP, DEFAULT_LIQUIDATION_PREFERENCE},
    Cap, DistributionState, Investor, InvestorConfig, InvestorError, ShareClass,
    ShareDistribution,
};
pub use orchestrator::{simulate, Waterfall, WaterfallError};
pub use transition::{Action, ActionKind, TransitionError};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn exit_waterfall_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::simulate_exit_distribution, m)?)?;
    Ok(())
}
