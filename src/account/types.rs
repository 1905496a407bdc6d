//! Account type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account identifier - sequential, starting at 1
pub type AccountNumber = u64;

/// Monetary amount (fixed-point, no float drift)
pub type Amount = Decimal;

/// Concrete account variants
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountKind {
    Checking,
    Savings,
}

impl AccountKind {
    /// Title used in statement headers
    pub fn title(&self) -> &'static str {
        match self {
            AccountKind::Checking => "Checking Account Statement",
            AccountKind::Savings => "Savings Account Statement",
        }
    }
}

/// Point-in-time view of an account
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AccountSnapshot {
    pub number: AccountNumber,
    pub kind: AccountKind,
    pub balance: Amount,
}
