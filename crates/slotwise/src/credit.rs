//! Pre-submission credit gate.
//!
//! Compares the total proposed session minutes against the student's
//! remaining time balance. Never mutates the ledger; an insufficient balance
//! is a checker result, not an error, so preview and editing stay possible.

use serde::{Deserialize, Serialize};

/// A student's remaining purchasable time, summed over their packages by the
/// external ledger. Read-only to this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBalance {
    pub total_remaining_minutes: u32,
}

impl CreditBalance {
    /// Sum per-package remaining minutes into a single balance.
    pub fn from_package_minutes(packages: impl IntoIterator<Item = u32>) -> Self {
        Self {
            total_remaining_minutes: packages.into_iter().sum(),
        }
    }
}

/// Result of the credit gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCheck {
    pub sufficient: bool,
    /// Zero when sufficient; otherwise the shortfall to display.
    pub deficit_minutes: u32,
}

/// Check whether the balance covers the proposed minutes.
pub fn check(proposed_minutes: u32, balance: &CreditBalance) -> CreditCheck {
    CreditCheck {
        sufficient: balance.total_remaining_minutes >= proposed_minutes,
        deficit_minutes: proposed_minutes.saturating_sub(balance.total_remaining_minutes),
    }
}
