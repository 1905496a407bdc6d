//! Balance tracking for a single account

use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};
use super::registry::AccountRegistry;
use super::types::{AccountNumber, Amount};

/// Why a balance mutation was rejected. A rejected call never changes any balance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BalanceError {
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Amount),
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Amount, requested: Amount },
    #[error("balance overflow")]
    Overflow,
    #[error("cannot transfer from account #{0} to itself")]
    SameAccount(AccountNumber),
}

/// Numbered account with a lock-guarded balance
#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    balance: Mutex<Amount>,
}

impl Account {
    /// Open an account numbered by the process-wide registry
    pub fn new() -> Self {
        AccountRegistry::global().open()
    }

    pub(crate) fn with_number(number: AccountNumber) -> Self {
        Self {
            number,
            balance: Mutex::new(Amount::ZERO),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn balance(&self) -> Amount {
        *self.lock()
    }

    /// Credit a positive amount
    pub fn deposit(&self, amount: Amount) -> Result<(), BalanceError> {
        let mut balance = self.lock();
        if let Err(e) = credit(&mut balance, amount) {
            warn!("Deposit into #{} rejected: {}", self.number, e);
            return Err(e);
        }
        debug!("Deposited {} into #{} (balance {})", amount, self.number, *balance);
        Ok(())
    }

    /// Debit a positive amount not exceeding the balance
    pub fn withdraw(&self, amount: Amount) -> Result<(), BalanceError> {
        let mut balance = self.lock();
        if let Err(e) = debit(&mut balance, amount) {
            warn!("Withdrawal from #{} rejected: {}", self.number, e);
            return Err(e);
        }
        debug!("Withdrew {} from #{} (balance {})", amount, self.number, *balance);
        Ok(())
    }

    /// Move `amount` into `destination`. Both balances are locked for the
    /// whole operation, lower account first.
    pub fn transfer(&self, amount: Amount, destination: &Account) -> Result<(), BalanceError> {
        let result = self.transfer_locked(amount, destination);
        match &result {
            Ok(()) => debug!(
                "Transferred {} from #{} to #{}",
                amount, self.number, destination.number
            ),
            Err(e) => warn!(
                "Transfer from #{} to #{} rejected: {}",
                self.number, destination.number, e
            ),
        }
        result
    }

    fn transfer_locked(&self, amount: Amount, destination: &Account) -> Result<(), BalanceError> {
        if ptr::eq(self, destination) {
            return Err(BalanceError::SameAccount(self.number));
        }
        if amount <= Amount::ZERO {
            return Err(BalanceError::InvalidAmount(amount));
        }

        let (mut from, mut to) = self.lock_pair(destination);

        // Stage both sides so a failure leaves neither touched
        let mut new_from = *from;
        let mut new_to = *to;
        debit(&mut new_from, amount)?;
        credit(&mut new_to, amount)?;

        *from = new_from;
        *to = new_to;
        Ok(())
    }

    /// Run `op` against a staged copy of the balance with the lock held
    /// throughout; the result is committed only if `op` succeeds.
    pub(crate) fn update<R>(
        &self,
        op: impl FnOnce(&mut Amount) -> Result<R, BalanceError>,
    ) -> Result<R, BalanceError> {
        let mut balance = self.lock();
        let mut staged = *balance;
        let result = op(&mut staged)?;
        *balance = staged;
        Ok(result)
    }

    fn lock(&self) -> MutexGuard<'_, Amount> {
        // The guarded value is a plain number, never left half-written
        self.balance.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock (self, other) in a global order: account number, then address
    fn lock_pair<'a>(&'a self, other: &'a Account) -> (MutexGuard<'a, Amount>, MutexGuard<'a, Amount>) {
        let self_key = (self.number, self as *const Account as usize);
        let other_key = (other.number, other as *const Account as usize);

        if self_key < other_key {
            let mine = self.lock();
            let theirs = other.lock();
            (mine, theirs)
        } else {
            let theirs = other.lock();
            let mine = self.lock();
            (mine, theirs)
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn credit(balance: &mut Amount, amount: Amount) -> Result<(), BalanceError> {
    if amount <= Amount::ZERO {
        return Err(BalanceError::InvalidAmount(amount));
    }
    *balance = balance.checked_add(amount).ok_or(BalanceError::Overflow)?;
    Ok(())
}

fn debit(balance: &mut Amount, amount: Amount) -> Result<(), BalanceError> {
    if amount <= Amount::ZERO {
        return Err(BalanceError::InvalidAmount(amount));
    }
    if *balance < amount {
        return Err(BalanceError::InsufficientFunds {
            balance: *balance,
            requested: amount,
        });
    }
    *balance -= amount;
    Ok(())
}
