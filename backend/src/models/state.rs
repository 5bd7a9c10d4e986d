//! Distribution State
//!
//! Represents the complete state of an exit distribution while the waterfall
//! runs: one record per share class plus the two shared remainders every
//! transition reads.
//!
//! # Critical Invariants
//!
//! 1. **No Deletion**: A class record, once created, is never removed
//! 2. **Sticky Flags**: `is_capped` and `converted_to_common` never go back to false
//! 3. **Capped Exclusion**: A capped class's shares are no longer counted in
//!    `total_shares_remainder`
//! 4. **Default Record**: A missing record reads as the zero-valued default

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::numeric::Money;
use crate::models::investor::ShareClass;

/// Allocation record for a single share class
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareDistribution {
    /// Class is treated as common stock from here on
    pub converted_to_common: bool,

    /// Amount allocated to the class so far
    pub exit_amount: Money,

    /// Class hit its cap and is out of the pro-rata pool
    pub is_capped: bool,
}

/// Complete distribution state
///
/// Created empty, seeded by the initialize transition, then threaded through
/// every other transition by value.
///
/// # Example
///
/// ```rust
/// use exit_waterfall_core_rs::{DistributionState, ShareClass};
///
/// let state = DistributionState::new();
/// assert_eq!(state.exit_remainder(), 0.0);
/// assert_eq!(state.total_shares_remainder(), 0);
/// assert!(state.get(ShareClass::PreferredA).is_none());
/// assert_eq!(state.exit_amount(ShareClass::PreferredA), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionState {
    /// Per-class records, ordered by seniority for deterministic iteration
    distribution: BTreeMap<ShareClass, ShareDistribution>,

    /// Proceeds not yet allocated to any class
    exit_remainder: Money,

    /// Shares still eligible for pro-rata allocation
    total_shares_remainder: u64,
}

impl DistributionState {
    /// Create an empty state: zero remainders, no class records
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exit_remainder(&self) -> Money {
        self.exit_remainder
    }

    pub fn total_shares_remainder(&self) -> u64 {
        self.total_shares_remainder
    }

    /// Record for a class, if one has been created
    pub fn get(&self, share_class: ShareClass) -> Option<&ShareDistribution> {
        self.distribution.get(&share_class)
    }

    /// Record for a class, or the zero-valued default
    pub fn distribution(&self, share_class: ShareClass) -> ShareDistribution {
        self.get(share_class).copied().unwrap_or_default()
    }

    /// Amount allocated to a class so far
    pub fn exit_amount(&self, share_class: ShareClass) -> Money {
        self.distribution(share_class).exit_amount
    }

    /// All class records, most junior first
    pub fn distributions(&self) -> &BTreeMap<ShareClass, ShareDistribution> {
        &self.distribution
    }

    /// Sum of all class allocations
    ///
    /// After a full waterfall this should approximate the exit proceeds,
    /// up to the rounding of ownership fractions.
    pub fn total_allocated(&self) -> Money {
        self.distribution.values().map(|record| record.exit_amount).sum()
    }

    pub(crate) fn set_exit_remainder(&mut self, exit_remainder: Money) {
        self.exit_remainder = exit_remainder;
    }

    pub(crate) fn set_total_shares_remainder(&mut self, total_shares: u64) {
        self.total_shares_remainder = total_shares;
    }

    /// Mutable record for a class, created with defaults if absent
    pub(crate) fn record_mut(&mut self, share_class: ShareClass) -> &mut ShareDistribution {
        self.distribution.entry(share_class).or_default()
    }
}
