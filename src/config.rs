use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::account::{Amount, StatementStyle};
use crate::error::BancoError;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BancoConfig {
    pub bank: BankConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub savings: SavingsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BankConfig {
    pub name: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SavingsConfig {
    pub monthly_interest_rate: Amount,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            monthly_interest_rate: Amount::new(5, 3),
        }
    }
}

impl Default for BancoConfig {
    fn default() -> Self {
        Self {
            bank: BankConfig {
                name: "Banco".to_string(),
                currency_symbol: default_currency_symbol(),
            },
            logging: LoggingConfig::default(),
            savings: SavingsConfig::default(),
        }
    }
}

impl BancoConfig {
    /// Strict load: any read or parse failure is an error
    pub fn load(path: &str) -> Result<Self, BancoError> {
        let s = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&s)?;
        let rate = config.savings.monthly_interest_rate;
        if rate < Amount::ZERO || rate > Amount::ONE {
            return Err(BancoError::InvalidInput(format!(
                "monthly_interest_rate {} outside [0, 1]",
                rate
            )));
        }
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<(), BancoError> {
        let s = toml::to_string_pretty(self)?;
        std::fs::write(path, s)?;
        Ok(())
    }

    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match Self::load(path) {
                Ok(c) => {
                    info!("Config loaded from {}", path);
                    c
                }
                Err(e) => {
                    warn!("Error loading config: {}. Using defaults.", e);
                    Self::default()
                }
            }
        } else {
            info!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Err(e) = config.save(path) {
                warn!("Could not write default config: {}", e);
            }
            config
        }
    }

    pub fn statement_style(&self) -> StatementStyle {
        StatementStyle {
            bank_name: self.bank.name.clone(),
            currency_symbol: self.bank.currency_symbol.clone(),
        }
    }
}
