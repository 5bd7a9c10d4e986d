//! Waterfall engine
//!
//! Runs the fixed four-pass protocol over investors ordered most-senior first:
//!
//! 1. Initialize once over the whole list
//! 2. Per investor: conversion check, then preferred payout, back-to-back
//! 3. Per investor: cap check, once every preference has been paid
//! 4. Per investor: pro-rata split, once every cap is resolved
//!
//! Each pass reads `exit_remainder` and `total_shares_remainder` as the
//! previous pass left them, so passes cannot be merged or reordered.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::core::numeric::Money;
use crate::models::investor::{Investor, ShareClass};
use crate::models::state::DistributionState;
use crate::transition::{reduce, Action};

/// Errors that can occur when setting up or running a waterfall
#[derive(Debug, Error, PartialEq)]
pub enum WaterfallError {
    #[error("Exit proceeds must be a finite, non-negative amount, got {0}")]
    InvalidProceeds(Money),

    #[error("Share class {0} appears more than once in the investor list")]
    DuplicateShareClass(ShareClass),

    #[error("Total share count of the investor list exceeds {}", u64::MAX)]
    ShareCountOverflow,
}

/// A validated investor list ready to be run against any exit amount
///
/// # Example
///
/// ```rust
/// use exit_waterfall_core_rs::{Investor, ShareClass, Waterfall};
///
/// let waterfall = Waterfall::new(vec![
///     Investor::common("Founders", 1_000_000),
///     Investor::preferred("Series A", ShareClass::PreferredA, 200_000, 900_000.0).unwrap(),
/// ])
/// .unwrap();
///
/// // Most senior first
/// assert_eq!(waterfall.investors()[0].share_class(), ShareClass::PreferredA);
///
/// let result = waterfall.run(10_000_000.0).unwrap();
/// assert!((result.total_allocated() - 10_000_000.0).abs() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Waterfall {
    /// Investors, most senior class first
    investors: Vec<Investor>,
}

impl Waterfall {
    /// Validate and order an investor list
    ///
    /// # Errors
    ///
    /// [`WaterfallError::DuplicateShareClass`] if two investors hold the same
    /// class; distribution records are keyed by class.
    /// [`WaterfallError::ShareCountOverflow`] if the share counts do not fit
    /// in a single `u64` pool.
    pub fn new(mut investors: Vec<Investor>) -> Result<Self, WaterfallError> {
        investors.sort_by(|a, b| b.share_class().cmp(&a.share_class()));

        if let Some(pair) = investors
            .windows(2)
            .find(|pair| pair[0].share_class() == pair[1].share_class())
        {
            return Err(WaterfallError::DuplicateShareClass(pair[0].share_class()));
        }

        investors
            .iter()
            .try_fold(0u64, |total, investor| total.checked_add(investor.num_shares()))
            .ok_or(WaterfallError::ShareCountOverflow)?;

        Ok(Self { investors })
    }

    /// Investors in processing order
    pub fn investors(&self) -> &[Investor] {
        &self.investors
    }

    /// Distribute `exit_proceeds` across the investor list
    ///
    /// # Errors
    ///
    /// [`WaterfallError::InvalidProceeds`] if the proceeds are negative or not finite.
    #[instrument(level = "debug", skip(self), fields(investors = self.investors.len()))]
    pub fn run(&self, exit_proceeds: Money) -> Result<DistributionState, WaterfallError> {
        if !(exit_proceeds.is_finite() && exit_proceeds >= 0.0) {
            return Err(WaterfallError::InvalidProceeds(exit_proceeds));
        }

        let state = self.set_initial_state(DistributionState::new(), exit_proceeds);
        let state = self.compute_preferred_shares(state);
        let state = self.check_and_apply_caps(state);
        let state = self.compute_pro_rata_split(state);

        debug!(
            total_allocated = state.total_allocated(),
            exit_remainder = state.exit_remainder(),
            "waterfall complete"
        );
        Ok(state)
    }

    fn set_initial_state(&self, state: DistributionState, exit_proceeds: Money) -> DistributionState {
        reduce(
            state,
            &Action::Initialize {
                exit_proceeds,
                investors: &self.investors,
            },
        )
    }

    /// Conversion and payout must run back-to-back per investor: the payout
    /// for one investor must not see conversion decisions for the next.
    fn compute_preferred_shares(&self, state: DistributionState) -> DistributionState {
        let state = self.investors.iter().fold(state, |state, investor| {
            let state = reduce(state, &Action::CheckAndConvertToCommon(investor));
            reduce(state, &Action::ComputePreferredShare(investor))
        });

        debug!(exit_remainder = state.exit_remainder(), "preferred pass complete");
        state
    }

    fn check_and_apply_caps(&self, state: DistributionState) -> DistributionState {
        let state = self.fold_pass(state, Action::CheckAndApplyCap);

        debug!(
            exit_remainder = state.exit_remainder(),
            total_shares_remainder = state.total_shares_remainder(),
            "cap pass complete"
        );
        state
    }

    fn compute_pro_rata_split(&self, state: DistributionState) -> DistributionState {
        let state = self.fold_pass(state, Action::ComputeProRataSplit);

        debug!("pro-rata pass complete");
        state
    }

    fn fold_pass<'a>(
        &'a self,
        state: DistributionState,
        action: fn(&'a Investor) -> Action<'a>,
    ) -> DistributionState {
        self.investors
            .iter()
            .fold(state, |state, investor| reduce(state, &action(investor)))
    }
}

/// Simulate one exit
///
/// One-shot form of [`Waterfall::new`] followed by [`Waterfall::run`].
///
/// # Example
///
/// ```rust
/// use exit_waterfall_core_rs::{simulate, Investor, ShareClass};
///
/// let investors = vec![
///     Investor::common("Founders", 1_000_000),
///     Investor::preferred("Series B", ShareClass::PreferredB, 300_000, 2_100_000.0).unwrap(),
/// ];
///
/// let result = simulate(20_000_000.0, &investors).unwrap();
/// assert!(result.exit_amount(ShareClass::PreferredB) > 2_100_000.0);
/// ```
pub fn simulate(
    exit_proceeds: Money,
    investors: &[Investor],
) -> Result<DistributionState, WaterfallError> {
    Waterfall::new(investors.to_vec())?.run(exit_proceeds)
}
