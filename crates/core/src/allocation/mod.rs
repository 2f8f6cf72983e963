//! Budget split allocation and monthly summary math.
//!
//! Implements the three-way percentage split (50/30/20 by default): ideal
//! spending ceilings per expense group, percent-of-ideal utilization with a
//! status tier, and the assembled monthly summary.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;
#[cfg(test)]
mod tests;

pub use error::AllocationError;
pub use service::AllocationService;
pub use types::{
    BudgetSplit, ExpenseGroup, GroupActuals, GroupAllocation, IdealCeilings, MonthlySummary,
    UtilizationStatus,
};
