//! Monetary amounts and ownership fractions
//!
//! Exit proceeds are modelled as `f64` currency units rather than integer
//! cents: ownership fractions and preference multiples are rational, and the
//! reference scenarios are defined in terms of IEEE-754 double arithmetic.
//!
//! # Critical Invariants
//!
//! 1. Ownership fractions are rounded to three decimal places before use
//! 2. A zero share denominator yields zero ownership, never NaN or infinity

use tracing::warn;

/// Monetary amount in currency units
pub type Money = f64;

/// Scale applied when rounding ownership fractions (three decimal places)
pub const OWNERSHIP_PRECISION: f64 = 1_000.0;

/// Round a fraction to three decimal places
///
/// Half-way values round up, which is the behaviour the reference scenarios
/// were computed with for non-negative inputs.
///
/// # Example
/// ```
/// use exit_waterfall_core_rs::core::numeric::round_fraction;
///
/// assert_eq!(round_fraction(1.0 / 3.0), 0.333);
/// assert_eq!(round_fraction(0.0665), 0.067);
/// ```
pub fn round_fraction(value: f64) -> f64 {
    (value * OWNERSHIP_PRECISION).round() / OWNERSHIP_PRECISION
}

/// Fraction of the eligible share pool held by `num_shares`
///
/// Returns zero when `total_shares` is zero: with nobody left in the pool
/// there is nothing to own.
///
/// # Example
/// ```
/// use exit_waterfall_core_rs::core::numeric::share_ownership;
///
/// assert_eq!(share_ownership(200_000, 3_000_000), 0.067);
/// assert_eq!(share_ownership(10, 0), 0.0);
/// ```
pub fn share_ownership(num_shares: u64, total_shares: u64) -> f64 {
    if total_shares == 0 {
        if num_shares > 0 {
            warn!(num_shares, "share pool exhausted, treating ownership as zero");
        }
        return 0.0;
    }

    round_fraction(num_shares as f64 / total_shares as f64)
}
