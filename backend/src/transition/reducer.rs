//! Reducer and action handlers
//!
//! Every handler takes the previous state by value and returns the next one.
//! Single-investor handlers always leave a record for the investor's class
//! behind, even when they change nothing else.

use tracing::{debug, trace};

use crate::core::numeric::{share_ownership, Money};
use crate::models::investor::{Cap, Investor};
use crate::models::state::DistributionState;
use crate::transition::action::Action;

/// Apply one action to a state
///
/// # Example
///
/// ```rust
/// use exit_waterfall_core_rs::transition::{reduce, Action};
/// use exit_waterfall_core_rs::{DistributionState, Investor, ShareClass};
///
/// let investors = vec![
///     Investor::common("Founders", 1_000_000),
///     Investor::preferred("Series C", ShareClass::PreferredC, 1_500_000, 15_000_000.0).unwrap(),
/// ];
///
/// let state = reduce(
///     DistributionState::new(),
///     &Action::Initialize { exit_proceeds: 60_000_000.0, investors: &investors },
/// );
/// let state = reduce(state, &Action::ComputePreferredShare(&investors[1]));
///
/// assert_eq!(state.exit_remainder(), 45_000_000.0);
/// assert_eq!(state.exit_amount(ShareClass::PreferredC), 15_000_000.0);
/// ```
pub fn reduce(state: DistributionState, action: &Action<'_>) -> DistributionState {
    trace!(action = %action.kind(), "applying transition");

    match *action {
        Action::Initialize {
            exit_proceeds,
            investors,
        } => set_initial_state(state, exit_proceeds, investors),
        Action::CheckAndConvertToCommon(investor) => convert_to_common_stock(state, investor),
        Action::ComputePreferredShare(investor) => compute_preferred_share(state, investor),
        Action::CheckAndApplyCap(investor) => check_and_apply_cap(state, investor),
        Action::ComputeProRataSplit(investor) => compute_pro_rata_split(state, investor),
    }
}

impl DistributionState {
    /// Method form of [`reduce`]
    pub fn apply(self, action: &Action<'_>) -> Self {
        reduce(self, action)
    }
}

/// Whether converting to common pays at least as much as staying preferred
///
/// Common stock and uncapped investors never convert. Ownership is measured
/// against the shares still in the pool.
pub fn should_convert_to_common(state: &DistributionState, investor: &Investor) -> bool {
    if investor.share_class().is_common() {
        return false;
    }
    let Cap::Multiple(cap) = investor.cap() else {
        return false;
    };

    let ownership = share_ownership(investor.num_shares(), state.total_shares_remainder());
    let return_with_common = state.exit_remainder() * ownership;
    let return_with_cap = (investor.purchase_price() * cap)
        .min(investor.preference_amount() + return_with_common);

    return_with_cap <= return_with_common
}

/// Whether the class's uncapped return would reach its cap
///
/// Uncapped, common and converted classes are never capped.
pub fn should_be_capped(state: &DistributionState, investor: &Investor) -> bool {
    capped_exit_amount(state, investor).is_some()
}

/// Capped amount for the investor, if the cap applies
fn capped_exit_amount(state: &DistributionState, investor: &Investor) -> Option<Money> {
    let previous = state.distribution(investor.share_class());
    if investor.share_class().is_common() || previous.converted_to_common {
        return None;
    }
    let cap = investor.cap().multiple()?;

    let ownership = share_ownership(investor.num_shares(), state.total_shares_remainder());
    let capped = investor.purchase_price() * cap;
    let uncapped = previous.exit_amount + state.exit_remainder() * ownership;

    (uncapped >= capped).then_some(capped)
}

fn set_initial_state(
    mut state: DistributionState,
    exit_proceeds: Money,
    investors: &[Investor],
) -> DistributionState {
    let total_shares = investors
        .iter()
        .fold(state.total_shares_remainder(), |total, investor| {
            total.saturating_add(investor.num_shares())
        });

    state.set_exit_remainder(exit_proceeds);
    state.set_total_shares_remainder(total_shares);
    state
}

fn convert_to_common_stock(mut state: DistributionState, investor: &Investor) -> DistributionState {
    let should_convert = should_convert_to_common(&state, investor);
    let record = state.record_mut(investor.share_class());

    if should_convert && !record.converted_to_common {
        debug!(share_class = %investor.share_class(), "converting to common");
        record.converted_to_common = true;
    }
    state
}

fn compute_preferred_share(mut state: DistributionState, investor: &Investor) -> DistributionState {
    let share_class = investor.share_class();
    let exit_remainder = state.exit_remainder();
    let record = state.record_mut(share_class);

    if share_class.is_common() || record.converted_to_common {
        return state;
    }

    // No double spending: the payout never exceeds the remainder it reads.
    // Seniors are processed first, so a junior preference only takes what is left.
    let exit_amount = investor.preference_amount().min(exit_remainder.max(0.0));
    record.exit_amount = exit_amount;
    state.set_exit_remainder(exit_remainder - exit_amount);

    debug!(
        share_class = %share_class,
        exit_amount,
        exit_remainder = state.exit_remainder(),
        "paid liquidation preference"
    );
    state
}

fn check_and_apply_cap(mut state: DistributionState, investor: &Investor) -> DistributionState {
    let share_class = investor.share_class();

    let Some(capped) = capped_exit_amount(&state, investor) else {
        state.record_mut(share_class);
        return state;
    };

    let previous = state.distribution(share_class).exit_amount;
    let exit_remainder = state.exit_remainder() - (capped - previous);
    let total_shares = state
        .total_shares_remainder()
        .saturating_sub(investor.num_shares());

    state.set_exit_remainder(exit_remainder);
    state.set_total_shares_remainder(total_shares);

    let record = state.record_mut(share_class);
    record.exit_amount = capped;
    record.is_capped = true;

    debug!(
        share_class = %share_class,
        exit_amount = capped,
        exit_remainder,
        total_shares_remainder = total_shares,
        "applied cap"
    );
    state
}

fn compute_pro_rata_split(mut state: DistributionState, investor: &Investor) -> DistributionState {
    let share_class = investor.share_class();
    if state.distribution(share_class).is_capped {
        return state;
    }

    let ownership = share_ownership(investor.num_shares(), state.total_shares_remainder());
    let share = state.exit_remainder() * ownership;
    state.record_mut(share_class).exit_amount += share;

    trace!(share_class = %share_class, ownership, share, "pro-rata split");
    state
}
