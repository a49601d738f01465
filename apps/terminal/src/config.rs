//! # Store Configuration
//!
//! Configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PAYPOINT_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization, so no locking is needed.

use paypoint_core::{Money, TaxRate};
use serde::{Deserialize, Serialize};

/// Store configuration for the register shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store name (banner and receipts).
    pub store_name: String,

    /// Store address line (receipts).
    pub store_address: String,

    /// Store telephone number (receipts).
    pub telephone: String,

    /// Currency symbol for display.
    pub currency_symbol: String,

    /// Register tax rate in basis points (1000 = 10%).
    pub tax_rate_bps: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: "Best Buy Retail Store".to_string(),
            store_address: "7 Magic Way, Mullah District, Richmond".to_string(),
            telephone: "1-658-619-9000".to_string(),
            currency_symbol: "$".to_string(),
            tax_rate_bps: 1000, // 10%
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `PAYPOINT_STORE_NAME`: Override store name
    /// - `PAYPOINT_STORE_ADDRESS`: Override address line
    /// - `PAYPOINT_TELEPHONE`: Override telephone
    /// - `PAYPOINT_TAX_RATE`: Override tax rate as a percentage (e.g. "10")
    pub fn from_env() -> Self {
        let mut config = StoreConfig::default();

        if let Ok(store_name) = std::env::var("PAYPOINT_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(store_address) = std::env::var("PAYPOINT_STORE_ADDRESS") {
            config.store_address = store_address;
        }

        if let Ok(telephone) = std::env::var("PAYPOINT_TELEPHONE") {
            config.telephone = telephone;
        }

        if let Ok(tax_rate_str) = std::env::var("PAYPOINT_TAX_RATE") {
            if let Ok(pct) = tax_rate_str.parse::<f64>() {
                config.tax_rate_bps = TaxRate::from_percentage(pct).bps();
            }
        }

        config
    }

    /// The configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.store_name, "Best Buy Retail Store");
        assert_eq!(config.tax_rate().bps(), 1000);
    }

    #[test]
    fn test_format_money() {
        let config = StoreConfig::default();
        assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_money(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_money(Money::from_cents(0)), "$0.00");
        assert_eq!(config.format_money(Money::from_cents(-550)), "-$5.50");
        assert_eq!(config.format_money(Money::from_cents(630_000)), "$6300.00");
    }

    #[test]
    fn test_config_round_trips_as_json() {
        let config = StoreConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: StoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.store_name, config.store_name);
        assert_eq!(back.tax_rate_bps, config.tax_rate_bps);
    }
}
