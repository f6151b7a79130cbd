//! Configuration for the fixed gas price policy.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use gasprice_common::{
    config::{FIXED_GAS_PRICE, FIXED_PRICE_GAS_LIMIT, FIXED_PRICE_TX_COUNT_PER_CONTRACT_LIMIT},
    transaction::GasPrice,
};
use serde::{Deserialize, Serialize};

const fn default_discounted_price() -> u64 {
    FIXED_GAS_PRICE
}

const fn default_gas_ceiling() -> u64 {
    FIXED_PRICE_GAS_LIMIT
}

const fn default_daily_limit_per_destination() -> u64 {
    FIXED_PRICE_TX_COUNT_PER_CONTRACT_LIMIT
}

/// Thresholds of the fixed gas price policy.
///
/// Supplied once when the policy is built, never reloaded.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args, Serialize, Deserialize)]
pub struct GasPriceConfig {
    /// Gas price charged to transactions eligible for the fixed price.
    #[clap(name = "fixed-gas-price", long, default_value_t = default_discounted_price())]
    #[serde(default = "default_discounted_price")]
    pub discounted_price: u64,

    /// Maximum gas a transaction may use to be eligible for the fixed price.
    #[clap(name = "fixed-price-gas-limit", long, default_value_t = default_gas_ceiling())]
    #[serde(default = "default_gas_ceiling")]
    pub gas_ceiling: u64,

    /// Maximum fixed price transactions a destination may receive per UTC day.
    #[clap(
        name = "fixed-price-tx-limit-per-contract",
        long,
        default_value_t = default_daily_limit_per_destination()
    )]
    #[serde(default = "default_daily_limit_per_destination")]
    pub daily_limit_per_destination: u64,
}

impl Default for GasPriceConfig {
    fn default() -> Self {
        Self {
            discounted_price: FIXED_GAS_PRICE,
            gas_ceiling: FIXED_PRICE_GAS_LIMIT,
            daily_limit_per_destination: FIXED_PRICE_TX_COUNT_PER_CONTRACT_LIMIT,
        }
    }
}

impl GasPriceConfig {
    pub fn new(discounted_price: u64, gas_ceiling: u64, daily_limit_per_destination: u64) -> Self {
        Self {
            discounted_price,
            gas_ceiling,
            daily_limit_per_destination,
        }
    }

    /// Load the configuration from a JSON file.
    ///
    /// Missing fields fall back to their default value.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Error while reading gas price config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid gas price config {}", path.display()))?;
        Ok(config)
    }

    /// Fixed gas price in the transaction price unit
    pub fn get_discounted_price(&self) -> GasPrice {
        GasPrice::from(self.discounted_price)
    }
}
