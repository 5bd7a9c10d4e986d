//! Core numeric primitives shared by the transition engine and orchestrator

pub mod numeric;
