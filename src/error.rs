use thiserror::Error;

use crate::account::BalanceError;

#[derive(Error, Debug)]
pub enum BancoError {
    #[error("Balance error: {0}")]
    Balance(#[from] BalanceError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
