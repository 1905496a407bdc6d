pub mod account;

use clap::{Parser, Subcommand};
use crate::account::Amount;

#[derive(Parser)]
#[command(name = "banco")]
#[command(about = "Banco account CLI", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "banco.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the reference scenario: deposit 100, transfer 40, overdraw 1000
    Demo,
    /// Open a checking and a savings account and drive them
    Scenario {
        /// Deposited into the checking account
        #[arg(long, allow_hyphen_values = true)]
        deposit: Amount,
        /// Moved from checking to savings
        #[arg(long, allow_hyphen_values = true)]
        transfer: Amount,
        /// Withdrawn from checking
        #[arg(long, allow_hyphen_values = true)]
        withdraw: Amount,
        /// Credit one month of savings interest at the end
        #[arg(long)]
        interest: bool,
        /// Print JSON snapshots instead of statements
        #[arg(long)]
        json: bool,
    },
}
