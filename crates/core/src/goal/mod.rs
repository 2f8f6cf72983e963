//! Savings goal progress.

pub mod progress;

pub use progress::{is_reached, progress_percent};
