//! Account numbering

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use lazy_static::lazy_static;
use tracing::info;
use super::balance::Account;
use super::statement::{CheckingAccount, SavingsAccount, Statement};
use super::types::{AccountNumber, Amount};

lazy_static! {
    static ref GLOBAL_REGISTRY: Arc<AccountRegistry> = Arc::new(AccountRegistry::new());
}

/// Issues account numbers in creation order, starting at 1
#[derive(Debug)]
pub struct AccountRegistry {
    next: AtomicU64,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Process-wide registry backing the `::new()` constructors. Never reset.
    pub fn global() -> Arc<AccountRegistry> {
        GLOBAL_REGISTRY.clone()
    }

    /// Take the next number
    pub fn next_number(&self) -> AccountNumber {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// How many numbers have been handed out so far
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst) - 1
    }

    /// Open a bare account with the next number
    pub fn open(&self) -> Account {
        Account::with_number(self.next_number())
    }

    pub fn open_checking(&self) -> CheckingAccount {
        let account = CheckingAccount::from_account(self.open());
        info!("Opened checking account #{}", account.number());
        account
    }

    pub fn open_savings(&self, monthly_rate: Amount) -> SavingsAccount {
        let account = SavingsAccount::from_account(self.open(), monthly_rate);
        info!(
            "Opened savings account #{} (monthly rate {})",
            account.number(),
            monthly_rate
        );
        account
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_sequential_numbers() {
        let registry = AccountRegistry::new();
        let numbers: Vec<_> = (0..5).map(|_| registry.open().number()).collect();

        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(registry.issued(), 5);
    }

    #[test]
    fn test_variants_share_counter() {
        let registry = AccountRegistry::new();
        let checking = registry.open_checking();
        let savings = registry.open_savings(Amount::ZERO);

        assert_eq!(checking.number(), 1);
        assert_eq!(savings.number(), 2);
    }

    #[test]
    fn test_global_registry_is_shared() {
        let a = AccountRegistry::global().next_number();
        let b = AccountRegistry::global().next_number();
        assert!(b > a);
    }

    #[test]
    fn test_concurrent_numbers_unique() {
        let registry = Arc::new(AccountRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    (0..100).map(|_| registry.next_number()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for n in handle.join().unwrap() {
                assert!(seen.insert(n), "duplicate account number {}", n);
            }
        }
        assert_eq!(seen.len(), 800);
        assert_eq!(seen.iter().min(), Some(&1));
        assert_eq!(seen.iter().max(), Some(&800));
    }
}
