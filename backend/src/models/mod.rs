//! Domain models for the exit waterfall

pub mod investor;
pub mod state;

// Re-exports
pub use investor::{Cap, Investor, InvestorConfig, InvestorError, ShareClass};
pub use state::{DistributionState, ShareDistribution};
