//! Transition actions
//!
//! [`Action`] is the typed, exhaustive form the reducer dispatches on.
//! [`ActionKind`] is the tag form used where actions are named by string
//! (bindings, logs); parsing or binding a tag is where contract violations
//! surface.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::numeric::Money;
use crate::models::investor::Investor;

/// Contract violations raised while building an action
///
/// These indicate a caller bug rather than a recoverable domain condition.
#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("Unknown reducer action \"{0}\"")]
    UnknownAction(String),

    #[error("Action {0} does not take a single-investor payload")]
    PayloadMismatch(ActionKind),
}

/// One state transition with its payload
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    /// Seed the remainders from the exit proceeds and the full investor list
    Initialize {
        exit_proceeds: Money,
        investors: &'a [Investor],
    },

    /// Flag the investor's class as converted if common would pay at least as much
    CheckAndConvertToCommon(&'a Investor),

    /// Pay the liquidation preference of a preferred class
    ComputePreferredShare(&'a Investor),

    /// Cap the class if its uncapped return would reach the cap
    CheckAndApplyCap(&'a Investor),

    /// Add the class's pro-rata share of the remaining proceeds
    ComputeProRataSplit(&'a Investor),
}

impl Action<'_> {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Initialize { .. } => ActionKind::Initialize,
            Action::CheckAndConvertToCommon(_) => ActionKind::CheckAndConvertToCommon,
            Action::ComputePreferredShare(_) => ActionKind::ComputePreferredShare,
            Action::CheckAndApplyCap(_) => ActionKind::CheckAndApplyCap,
            Action::ComputeProRataSplit(_) => ActionKind::ComputeProRataSplit,
        }
    }
}

/// Action tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Initialize,
    CheckAndConvertToCommon,
    ComputePreferredShare,
    CheckAndApplyCap,
    ComputeProRataSplit,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Initialize,
        ActionKind::CheckAndConvertToCommon,
        ActionKind::ComputePreferredShare,
        ActionKind::CheckAndApplyCap,
        ActionKind::ComputeProRataSplit,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ActionKind::Initialize => "SET_INITIAL_STATE",
            ActionKind::CheckAndConvertToCommon => "CHECK_AND_CONVERT_TO_COMMON",
            ActionKind::ComputePreferredShare => "COMPUTE_PREFERRED_SHARE",
            ActionKind::CheckAndApplyCap => "CHECK_AND_APPLY_CAP",
            ActionKind::ComputeProRataSplit => "COMPUTE_PRO_RATA_SPLIT",
        }
    }

    /// Bind a single-investor tag to its payload
    ///
    /// # Errors
    ///
    /// [`TransitionError::PayloadMismatch`] for [`ActionKind::Initialize`],
    /// which needs the proceeds and the whole investor list.
    ///
    /// # Example
    /// ```
    /// use exit_waterfall_core_rs::transition::ActionKind;
    /// use exit_waterfall_core_rs::Investor;
    ///
    /// let founders = Investor::common("Founders", 1_000_000);
    /// let kind: ActionKind = "COMPUTE_PRO_RATA_SPLIT".parse().unwrap();
    /// let action = kind.for_investor(&founders).unwrap();
    /// assert_eq!(action.kind(), kind);
    ///
    /// assert!("UNKNOWN_ACTION".parse::<ActionKind>().is_err());
    /// ```
    pub fn for_investor(self, investor: &Investor) -> Result<Action<'_>, TransitionError> {
        match self {
            ActionKind::Initialize => Err(TransitionError::PayloadMismatch(self)),
            ActionKind::CheckAndConvertToCommon => Ok(Action::CheckAndConvertToCommon(investor)),
            ActionKind::ComputePreferredShare => Ok(Action::ComputePreferredShare(investor)),
            ActionKind::CheckAndApplyCap => Ok(Action::CheckAndApplyCap(investor)),
            ActionKind::ComputeProRataSplit => Ok(Action::ComputeProRataSplit(investor)),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ActionKind {
    type Err = TransitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| TransitionError::UnknownAction(s.to_string()))
    }
}
