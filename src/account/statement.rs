//! Account variants and their statements

use std::io::{self, Write};
use tracing::{info, warn};
use super::balance::{self, Account, BalanceError};
use super::registry::AccountRegistry;
use super::types::{AccountKind, AccountNumber, AccountSnapshot, Amount};

/// Presentation settings shared by all statements
#[derive(Clone, Debug, PartialEq)]
pub struct StatementStyle {
    pub bank_name: String,
    pub currency_symbol: String,
}

impl Default for StatementStyle {
    fn default() -> Self {
        Self {
            bank_name: "Banco".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl StatementStyle {
    fn money(&self, amount: Amount) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }

    fn write_header(&self, out: &mut dyn Write, kind: AccountKind, number: AccountNumber) -> io::Result<()> {
        writeln!(out, "=== {} ===", self.bank_name)?;
        writeln!(out, "{}", kind.title())?;
        writeln!(out, "Account: {}", number)
    }
}

/// Common behaviour of every account variant. Implementors supply the
/// statement; everything else delegates to the wrapped [`Account`].
pub trait Statement {
    fn account(&self) -> &Account;

    fn kind(&self) -> AccountKind;

    /// Write the variant-specific statement
    fn write_statement(&self, out: &mut dyn Write) -> io::Result<()>;

    /// The statement as text
    fn render_statement(&self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_statement(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn print_statement(&self) {
        match self.render_statement() {
            Ok(text) => print!("{}", text),
            Err(e) => warn!("Failed to print statement for #{}: {}", self.number(), e),
        }
    }

    fn number(&self) -> AccountNumber {
        self.account().number()
    }

    fn balance(&self) -> Amount {
        self.account().balance()
    }

    fn deposit(&self, amount: Amount) -> Result<(), BalanceError> {
        self.account().deposit(amount)
    }

    fn withdraw(&self, amount: Amount) -> Result<(), BalanceError> {
        self.account().withdraw(amount)
    }

    fn transfer(&self, amount: Amount, destination: &dyn Statement) -> Result<(), BalanceError> {
        self.account().transfer(amount, destination.account())
    }

    fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            number: self.number(),
            kind: self.kind(),
            balance: self.balance(),
        }
    }
}

#[derive(Debug)]
pub struct CheckingAccount {
    account: Account,
    style: StatementStyle,
}

impl CheckingAccount {
    /// Open with the process-wide registry
    pub fn new() -> Self {
        AccountRegistry::global().open_checking()
    }

    pub(crate) fn from_account(account: Account) -> Self {
        Self {
            account,
            style: StatementStyle::default(),
        }
    }

    pub fn with_style(mut self, style: StatementStyle) -> Self {
        self.style = style;
        self
    }
}

impl Default for CheckingAccount {
    fn default() -> Self {
        Self::new()
    }
}

impl Statement for CheckingAccount {
    fn account(&self) -> &Account {
        &self.account
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Checking
    }

    fn write_statement(&self, out: &mut dyn Write) -> io::Result<()> {
        self.style.write_header(out, self.kind(), self.number())?;
        writeln!(out, "Balance: {}", self.style.money(self.balance()))
    }
}

#[derive(Debug)]
pub struct SavingsAccount {
    account: Account,
    monthly_rate: Amount,
    style: StatementStyle,
}

impl SavingsAccount {
    /// Open with the process-wide registry
    pub fn new(monthly_rate: Amount) -> Self {
        AccountRegistry::global().open_savings(monthly_rate)
    }

    pub(crate) fn from_account(account: Account, monthly_rate: Amount) -> Self {
        Self {
            account,
            monthly_rate,
            style: StatementStyle::default(),
        }
    }

    pub fn with_style(mut self, style: StatementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn monthly_rate(&self) -> Amount {
        self.monthly_rate
    }

    /// Deposit one month of interest, rounded to cents, computed and
    /// credited under a single lock. Returns the amount credited; zero when
    /// the interest rounds away.
    pub fn credit_interest(&self) -> Result<Amount, BalanceError> {
        let rate = self.monthly_rate;
        let interest = self.account.update(|current| {
            let interest = current
                .checked_mul(rate)
                .ok_or(BalanceError::Overflow)?
                .round_dp(2);
            if interest <= Amount::ZERO {
                return Ok(Amount::ZERO);
            }
            balance::credit(current, interest)?;
            Ok(interest)
        })?;
        if interest > Amount::ZERO {
            info!("Credited {} interest to #{}", interest, self.number());
        }
        Ok(interest)
    }
}

impl Statement for SavingsAccount {
    fn account(&self) -> &Account {
        &self.account
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Savings
    }

    fn write_statement(&self, out: &mut dyn Write) -> io::Result<()> {
        self.style.write_header(out, self.kind(), self.number())?;
        writeln!(out, "Balance: {}", self.style.money(self.balance()))?;
        match self.monthly_rate.checked_mul(Amount::ONE_HUNDRED) {
            Some(percent) => writeln!(out, "Monthly rate: {:.2}%", percent),
            None => writeln!(out, "Monthly rate: {} (fraction)", self.monthly_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(n: i64) -> Amount {
        Amount::from(n)
    }

    fn render(account: &dyn Statement) -> String {
        let mut buf = Vec::new();
        account.write_statement(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_scenario() {
        let registry = AccountRegistry::new();

        let a = registry.open_checking();
        assert_eq!(a.number(), 1);
        assert_eq!(a.balance(), Amount::ZERO);
        a.deposit(amt(100)).unwrap();
        assert_eq!(a.balance(), amt(100));

        let b = registry.open_checking();
        assert_eq!(b.number(), 2);
        assert_eq!(b.balance(), Amount::ZERO);

        a.transfer(amt(40), &b).unwrap();
        assert_eq!(a.balance(), amt(60));
        assert_eq!(b.balance(), amt(40));

        assert!(a.withdraw(amt(1000)).is_err());
        assert_eq!(a.balance(), amt(60));
    }

    #[test]
    fn test_transfer_across_variants() {
        let registry = AccountRegistry::new();
        let checking = registry.open_checking();
        let savings = registry.open_savings(Amount::new(1, 2));

        checking.deposit(amt(250)).unwrap();
        checking.transfer(amt(200), &savings).unwrap();
        savings.transfer(amt(50), &checking).unwrap();

        assert_eq!(checking.balance(), amt(100));
        assert_eq!(savings.balance(), amt(150));
    }

    #[test]
    fn test_checking_statement() {
        let registry = AccountRegistry::new();
        let account = registry.open_checking();
        account.deposit(Amount::new(6050, 2)).unwrap();

        assert_eq!(
            render(&account),
            "=== Banco ===\nChecking Account Statement\nAccount: 1\nBalance: $60.50\n"
        );
    }

    #[test]
    fn test_savings_statement_with_style() {
        let registry = AccountRegistry::new();
        let style = StatementStyle {
            bank_name: "Test Bank".to_string(),
            currency_symbol: "R$".to_string(),
        };
        let account = registry.open_savings(Amount::new(5, 3)).with_style(style);
        account.deposit(amt(40)).unwrap();

        assert_eq!(
            render(&account),
            "=== Test Bank ===\nSavings Account Statement\nAccount: 1\nBalance: R$40.00\nMonthly rate: 0.50%\n"
        );
    }

    #[test]
    fn test_statement_via_trait_object() {
        let registry = AccountRegistry::new();
        let accounts: Vec<Box<dyn Statement>> = vec![
            Box::new(registry.open_checking()),
            Box::new(registry.open_savings(Amount::new(2, 2))),
        ];
        accounts[0].deposit(amt(12)).unwrap();

        assert_eq!(
            accounts[0].render_statement().unwrap(),
            "=== Banco ===\nChecking Account Statement\nAccount: 1\nBalance: $12.00\n"
        );
        assert_eq!(
            accounts[1].render_statement().unwrap(),
            "=== Banco ===\nSavings Account Statement\nAccount: 2\nBalance: $0.00\nMonthly rate: 2.00%\n"
        );
        for account in &accounts {
            account.print_statement();
        }
    }

    #[test]
    fn test_huge_rate_statement_does_not_overflow() {
        let registry = AccountRegistry::new();
        let account = registry.open_savings(Amount::MAX);

        let text = render(&account);
        assert!(text.ends_with(&format!("Monthly rate: {} (fraction)\n", Amount::MAX)));
    }

    #[test]
    fn test_credit_interest_overflow_leaves_balance() {
        let registry = AccountRegistry::new();
        let account = registry.open_savings(Amount::MAX);
        account.deposit(amt(10)).unwrap();

        assert_eq!(account.credit_interest(), Err(BalanceError::Overflow));
        assert_eq!(account.balance(), amt(10));
    }

    #[test]
    fn test_concurrent_interest_is_atomic() {
        use std::sync::Arc;
        use std::thread;

        let registry = AccountRegistry::new();
        let rate = Amount::new(1, 2);
        let account = Arc::new(registry.open_savings(rate));
        account.deposit(amt(1000)).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let account = account.clone();
                thread::spawn(move || {
                    for _ in 0..5 {
                        account.credit_interest().unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every credit must see the previous one's result
        let mut expected = amt(1000);
        for _ in 0..40 {
            expected += (expected * rate).round_dp(2);
        }
        assert_eq!(account.balance(), expected);
    }

    #[test]
    fn test_credit_interest() {
        let registry = AccountRegistry::new();
        let account = registry.open_savings(Amount::new(1, 2));
        assert_eq!(account.monthly_rate(), Amount::new(1, 2));
        account.deposit(amt(1000)).unwrap();

        assert_eq!(account.credit_interest().unwrap(), amt(10));
        assert_eq!(account.balance(), amt(1010));
    }

    #[test]
    fn test_credit_interest_rounds_to_zero() {
        let registry = AccountRegistry::new();
        let account = registry.open_savings(Amount::new(1, 3));
        account.deposit(Amount::new(1, 0)).unwrap();

        assert_eq!(account.credit_interest().unwrap(), Amount::ZERO);
        assert_eq!(account.balance(), amt(1));
    }

    #[test]
    fn test_snapshot() {
        let registry = AccountRegistry::new();
        let account = registry.open_savings(Amount::ZERO);
        account.deposit(amt(75)).unwrap();

        let snapshot = account.snapshot();
        assert_eq!(snapshot.number, 1);
        assert_eq!(snapshot.kind, AccountKind::Savings);
        assert_eq!(snapshot.balance, amt(75));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["number"], 1);
        assert_eq!(json["kind"], "Savings");
        assert_eq!(json["balance"].as_str().unwrap().parse::<Amount>().unwrap(), amt(75));
    }
}
