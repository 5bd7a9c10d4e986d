//! Investor model
//!
//! Represents one share class holder taking part in an exit.
//! Each investor has:
//! - Share class (seniority tier)
//! - Number of shares owned
//! - Purchase price paid for the position
//! - Liquidation preference multiple (preferred stock only)
//! - Participation flag
//! - Cap on total return, or uncapped
//!
//! Defaults for the cap and the liquidation preference are applied here, on
//! the construction path, and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::numeric::Money;

/// Cap applied to preferred holders unless configured otherwise
pub const DEFAULT_CAP: Cap = Cap::Multiple(2.0);

/// Liquidation preference multiple applied to preferred holders unless configured otherwise
pub const DEFAULT_LIQUIDATION_PREFERENCE: f64 = 1.0;

/// Errors that can occur while building an investor
#[derive(Debug, Error, PartialEq)]
pub enum InvestorError {
    #[error("Purchase price must be a finite, non-negative amount, got {0}")]
    InvalidPurchasePrice(Money),

    #[error("Liquidation preference must be a finite, positive multiple, got {0}")]
    InvalidLiquidationPreference(f64),

    #[error("Cap must be a finite, positive multiple, got {0}")]
    InvalidCap(f64),

    #[error("Share class {0} is not a preferred share class")]
    NotPreferred(ShareClass),

    #[error("Unknown share class '{0}'")]
    UnknownShareClass(String),

    #[error("Unknown cap label '{0}', expected a number or \"uncapped\"")]
    UnknownCapLabel(String),
}

/// Share class, ordered by seniority
///
/// Declaration order is priority order: `Common` is the most junior class and
/// `PreferredC` the most senior, so the derived `Ord` compares seniority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShareClass {
    #[serde(rename = "common")]
    Common,
    #[serde(rename = "seriesA")]
    PreferredA,
    #[serde(rename = "seriesB")]
    PreferredB,
    #[serde(rename = "seriesC")]
    PreferredC,
}

impl ShareClass {
    /// All share classes, most junior first
    pub const ALL: [ShareClass; 4] = [
        ShareClass::Common,
        ShareClass::PreferredA,
        ShareClass::PreferredB,
        ShareClass::PreferredC,
    ];

    /// Seniority priority (0 = common, higher = more senior)
    ///
    /// # Example
    /// ```
    /// use exit_waterfall_core_rs::ShareClass;
    ///
    /// assert_eq!(ShareClass::Common.priority(), 0);
    /// assert_eq!(ShareClass::PreferredC.priority(), 3);
    /// ```
    pub fn priority(self) -> u8 {
        match self {
            ShareClass::Common => 0,
            ShareClass::PreferredA => 1,
            ShareClass::PreferredB => 2,
            ShareClass::PreferredC => 3,
        }
    }

    pub fn is_common(self) -> bool {
        self == ShareClass::Common
    }

    /// Stable label used in configuration and bindings
    pub fn label(self) -> &'static str {
        match self {
            ShareClass::Common => "common",
            ShareClass::PreferredA => "seriesA",
            ShareClass::PreferredB => "seriesB",
            ShareClass::PreferredC => "seriesC",
        }
    }
}

impl fmt::Display for ShareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShareClass {
    type Err = InvestorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShareClass::ALL
            .into_iter()
            .find(|class| class.label() == s)
            .ok_or_else(|| InvestorError::UnknownShareClass(s.to_string()))
    }
}

/// Ceiling on the total return of a preferred position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CapRepr", into = "CapRepr")]
pub enum Cap {
    /// Total return limited to `purchase_price × multiple`
    Multiple(f64),
    /// No ceiling; the holder never converts to common
    Uncapped,
}

impl Cap {
    /// Cap multiple, or `None` when uncapped
    pub fn multiple(self) -> Option<f64> {
        match self {
            Cap::Multiple(multiple) => Some(multiple),
            Cap::Uncapped => None,
        }
    }

    pub fn is_uncapped(self) -> bool {
        matches!(self, Cap::Uncapped)
    }

    fn validate(self) -> Result<Self, InvestorError> {
        match self {
            Cap::Multiple(multiple) if !(multiple.is_finite() && multiple > 0.0) => {
                Err(InvestorError::InvalidCap(multiple))
            }
            cap => Ok(cap),
        }
    }
}

/// Configuration form of a cap: a number, or the label `"uncapped"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum CapRepr {
    Multiple(f64),
    Label(String),
}

const UNCAPPED_LABEL: &str = "uncapped";

impl TryFrom<CapRepr> for Cap {
    type Error = InvestorError;

    fn try_from(repr: CapRepr) -> Result<Self, Self::Error> {
        match repr {
            CapRepr::Multiple(multiple) => Cap::Multiple(multiple).validate(),
            CapRepr::Label(label) if label == UNCAPPED_LABEL => Ok(Cap::Uncapped),
            CapRepr::Label(label) => Err(InvestorError::UnknownCapLabel(label)),
        }
    }
}

impl From<Cap> for CapRepr {
    fn from(cap: Cap) -> Self {
        match cap {
            Cap::Multiple(multiple) => CapRepr::Multiple(multiple),
            Cap::Uncapped => CapRepr::Label(UNCAPPED_LABEL.to_string()),
        }
    }
}

fn default_cap() -> Cap {
    DEFAULT_CAP
}

/// Serializable investor configuration
///
/// Missing `cap` and `liquidation_preference` fields fall back to
/// [`DEFAULT_CAP`] and [`DEFAULT_LIQUIDATION_PREFERENCE`] for preferred
/// classes. Both are ignored for common stock, as is a valid `purchase_price`;
/// a negative or non-finite price is rejected for every class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorConfig {
    pub title: String,
    pub share_class: ShareClass,
    pub num_shares: u64,
    #[serde(default)]
    pub purchase_price: Money,
    #[serde(default)]
    pub liquidation_preference: Option<f64>,
    #[serde(default)]
    pub is_participating: bool,
    #[serde(default = "default_cap")]
    pub cap: Cap,
}

/// An investor holding one share class
///
/// # Example
/// ```
/// use exit_waterfall_core_rs::{Cap, Investor, ShareClass};
///
/// let founders = Investor::common("Founders", 1_000_000);
/// assert!(founders.share_class().is_common());
/// assert_eq!(founders.liquidation_preference(), None);
///
/// let series_a = Investor::preferred("Series A", ShareClass::PreferredA, 200_000, 900_000.0)
///     .unwrap();
/// assert_eq!(series_a.cap(), Cap::Multiple(2.0));
/// assert_eq!(series_a.liquidation_preference(), Some(1.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InvestorConfig", into = "InvestorConfig")]
pub struct Investor {
    /// Display name, not used by the computation
    title: String,

    share_class: ShareClass,

    num_shares: u64,

    purchase_price: Money,

    /// `None` for common stock
    liquidation_preference: Option<f64>,

    /// Carried with the investor but not consulted by any transition
    is_participating: bool,

    cap: Cap,
}

impl Investor {
    /// Create a common stock holder
    ///
    /// Common stock has no purchase-price-based terms: no preference, no cap.
    pub fn common(title: impl Into<String>, num_shares: u64) -> Self {
        Self {
            title: title.into(),
            share_class: ShareClass::Common,
            num_shares,
            purchase_price: 0.0,
            liquidation_preference: None,
            is_participating: false,
            cap: Cap::Uncapped,
        }
    }

    /// Create a preferred holder with the default cap and liquidation preference
    ///
    /// # Errors
    ///
    /// - [`InvestorError::NotPreferred`] if `share_class` is common
    /// - [`InvestorError::InvalidPurchasePrice`] if the price is negative or not finite
    pub fn preferred(
        title: impl Into<String>,
        share_class: ShareClass,
        num_shares: u64,
        purchase_price: Money,
    ) -> Result<Self, InvestorError> {
        if share_class.is_common() {
            return Err(InvestorError::NotPreferred(share_class));
        }
        if !(purchase_price.is_finite() && purchase_price >= 0.0) {
            return Err(InvestorError::InvalidPurchasePrice(purchase_price));
        }

        Ok(Self {
            title: title.into(),
            share_class,
            num_shares,
            purchase_price,
            liquidation_preference: Some(DEFAULT_LIQUIDATION_PREFERENCE),
            is_participating: false,
            cap: DEFAULT_CAP,
        })
    }

    /// Replace the cap
    pub fn with_cap(mut self, cap: Cap) -> Result<Self, InvestorError> {
        self.cap = cap.validate()?;
        Ok(self)
    }

    /// Replace the liquidation preference multiple (ignored for common stock)
    pub fn with_liquidation_preference(mut self, multiple: f64) -> Result<Self, InvestorError> {
        if !(multiple.is_finite() && multiple > 0.0) {
            return Err(InvestorError::InvalidLiquidationPreference(multiple));
        }
        if !self.share_class.is_common() {
            self.liquidation_preference = Some(multiple);
        }
        Ok(self)
    }

    pub fn with_participation(mut self, is_participating: bool) -> Self {
        self.is_participating = is_participating;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn share_class(&self) -> ShareClass {
        self.share_class
    }

    pub fn num_shares(&self) -> u64 {
        self.num_shares
    }

    pub fn purchase_price(&self) -> Money {
        self.purchase_price
    }

    pub fn liquidation_preference(&self) -> Option<f64> {
        self.liquidation_preference
    }

    pub fn is_participating(&self) -> bool {
        self.is_participating
    }

    pub fn cap(&self) -> Cap {
        self.cap
    }

    /// Amount owed before any pro-rata split: `purchase_price × liquidation_preference`
    pub fn preference_amount(&self) -> Money {
        self.purchase_price * self.liquidation_preference.unwrap_or(0.0)
    }
}

impl TryFrom<InvestorConfig> for Investor {
    type Error = InvestorError;

    fn try_from(config: InvestorConfig) -> Result<Self, Self::Error> {
        if !(config.purchase_price.is_finite() && config.purchase_price >= 0.0) {
            return Err(InvestorError::InvalidPurchasePrice(config.purchase_price));
        }
        if config.share_class.is_common() {
            return Ok(Investor::common(config.title, config.num_shares)
                .with_participation(config.is_participating));
        }

        let investor = Investor::preferred(
            config.title,
            config.share_class,
            config.num_shares,
            config.purchase_price,
        )?
        .with_participation(config.is_participating)
        .with_cap(config.cap)?;

        match config.liquidation_preference {
            Some(multiple) => investor.with_liquidation_preference(multiple),
            None => Ok(investor),
        }
    }
}

impl From<Investor> for InvestorConfig {
    fn from(investor: Investor) -> Self {
        Self {
            title: investor.title,
            share_class: investor.share_class,
            num_shares: investor.num_shares,
            purchase_price: investor.purchase_price,
            liquidation_preference: investor.liquidation_preference,
            is_participating: investor.is_participating,
            cap: investor.cap,
        }
    }
}
