//! Orchestrator - multi-pass waterfall
//!
//! Sequences the transition engine's actions across the investor list.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{simulate, Waterfall, WaterfallError};
