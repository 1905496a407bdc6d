use std::io::Write;
use tracing::{info, warn};

use crate::account::{AccountRegistry, Amount, BalanceError, Statement};
use crate::config::BancoConfig;
use crate::error::BancoError;

/// Inputs for one scenario run
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioParams {
    pub deposit: Amount,
    pub transfer: Amount,
    pub withdraw: Amount,
    pub interest: bool,
    pub json: bool,
}

impl ScenarioParams {
    /// Deposit 100, transfer 40, try to withdraw 1000
    pub fn demo() -> Self {
        Self {
            deposit: Amount::from(100),
            transfer: Amount::from(40),
            withdraw: Amount::from(1000),
            interest: false,
            json: false,
        }
    }
}

/// Rejections are reported and the scenario carries on
fn report(step: &str, result: Result<(), BalanceError>) {
    match result {
        Ok(()) => info!("{}: ok", step),
        Err(e) => warn!("{}: rejected ({})", step, e),
    }
}

pub fn run_scenario(
    config: &BancoConfig,
    params: &ScenarioParams,
    out: &mut dyn Write,
) -> Result<(), BancoError> {
    let registry = AccountRegistry::new();
    let style = config.statement_style();

    let checking = registry.open_checking().with_style(style.clone());
    let savings = registry
        .open_savings(config.savings.monthly_interest_rate)
        .with_style(style);

    report("deposit", checking.deposit(params.deposit));
    report("transfer", checking.transfer(params.transfer, &savings));
    report("withdraw", checking.withdraw(params.withdraw));

    if params.interest {
        let credited = savings.credit_interest()?;
        info!("interest: {}", credited);
    }

    if params.json {
        let snapshots = vec![checking.snapshot(), savings.snapshot()];
        let json = serde_json::to_string_pretty(&snapshots)?;
        writeln!(out, "{}", json)?;
    } else {
        checking.write_statement(out)?;
        writeln!(out)?;
        savings.write_statement(out)?;
    }
    Ok(())
}
