//! Settings, loaded from <config_dir>/incomeledger/config.toml when present

use crate::core::CurrencyCode;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "incomeledger";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "ledger.db";

/// National Bank of Ukraine daily exchange rates
pub const DEFAULT_RATE_API: &str = "https://bank.gov.ua/NBUStatService/v1/statdirectory/exchange";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Currency all sums and taxes are reported in
    pub local_currency: CurrencyCode,
    /// SQLite ledger file
    pub database: PathBuf,
    /// Base URL of the daily rate table
    pub rate_api: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            local_currency: CurrencyCode::default(),
            database: default_database(),
            rate_api: DEFAULT_RATE_API.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `path`, or from the default location. A missing default file
    /// means defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_file() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Settings::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let settings = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

fn default_database() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_default()
        .join(DATABASE_FILE)
}
