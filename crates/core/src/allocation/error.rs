//! Allocation error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced when validating a budget split before saving.
///
/// The calculator operations themselves never fail; validation happens at the
/// preferences save boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// The three percentages do not total 100 within tolerance.
    #[error("percentages must total 100, got {total}")]
    InvalidPercentageSum {
        /// The sum that was supplied.
        total: Decimal,
    },

    /// A percentage component is negative.
    #[error("percentages cannot be negative, got {value}")]
    NegativePercent {
        /// The offending value.
        value: Decimal,
    },
}
