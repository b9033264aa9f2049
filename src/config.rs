// Desk configuration
use std::env;
use std::path::PathBuf;

use crate::bill::DEFAULT_CURRENCY_SYMBOL;

pub const SNAPSHOT_PATH_VAR: &str = "HOTEL_SNAPSHOT_PATH";
pub const CURRENCY_SYMBOL_VAR: &str = "HOTEL_CURRENCY_SYMBOL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelConfig {
    pub snapshot_path: PathBuf,
    pub currency_symbol: String,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("hotel_backup.json"),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl HotelConfig {
    /// Defaults, overridden by `HOTEL_SNAPSHOT_PATH` and `HOTEL_CURRENCY_SYMBOL`
    /// when they are set and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(SNAPSHOT_PATH_VAR).filter(|v| !v.is_empty()) {
            config.snapshot_path = PathBuf::from(path);
        }
        if let Some(symbol) = lookup(CURRENCY_SYMBOL_VAR).filter(|v| !v.is_empty()) {
            config.currency_symbol = symbol;
        }
        config
    }
}
