//! Account system
//!
//! - Sequential account numbering (`AccountRegistry`)
//! - Lock-guarded balances with deposit / withdraw / transfer
//! - Checking and savings variants, each with its own statement

pub mod types;
pub mod balance;
pub mod registry;
pub mod statement;

pub use types::{AccountKind, AccountNumber, AccountSnapshot, Amount};
pub use balance::{Account, BalanceError};
pub use registry::AccountRegistry;
pub use statement::{CheckingAccount, SavingsAccount, Statement, StatementStyle};
