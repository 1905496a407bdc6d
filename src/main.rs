use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use rust_banco::cli::account::{run_scenario, ScenarioParams};
use rust_banco::cli::{Cli, Commands};
use rust_banco::config::BancoConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Peek at the config for the log level before logging is up
    let log_level = BancoConfig::load(&cli.config)
        .map(|c| c.logging.log_level)
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = BancoConfig::load_or_default(&cli.config);

    let params = match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => ScenarioParams::demo(),
        Commands::Scenario { deposit, transfer, withdraw, interest, json } => ScenarioParams {
            deposit,
            transfer,
            withdraw,
            interest,
            json,
        },
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run_scenario(&config, &params, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Scenario failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
