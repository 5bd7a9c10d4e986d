//! State transition engine
//!
//! A pure reducer over [`DistributionState`](crate::models::DistributionState):
//! one action in, one new state out. All business rules for a single
//! investor/action pair live here; sequencing lives in the orchestrator.

pub mod action;
pub mod reducer;

pub use action::{Action, ActionKind, TransitionError};
pub use reducer::{reduce, should_be_capped, should_convert_to_common};
