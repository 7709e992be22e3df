//! Agent configuration

use eyre::{eyre, Result};
use std::env;
use std::str::FromStr;

/// Terra derivation path (same as Cosmos, coin type 330)
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/330'/0'/0/0";

/// Upper bound of the random percentage picked when a claim doesn't name one
pub const DEFAULT_MAX_RANDOM_PERCENTAGE: u8 = 20;

/// Agent configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Primary LCD URL
    pub lcd_url: String,
    /// Extra LCD URLs tried when broadcasting to the primary fails
    pub fallback_lcd_urls: Vec<String>,
    /// Chain ID (e.g. columbus-5, localterra)
    pub chain_id: String,
    /// Bech32 account prefix
    pub account_prefix: String,
    /// Faucet contract address
    pub faucet_address: String,
    /// Mnemonic of the agent wallet (claim agent or owner)
    pub mnemonic: String,
    /// HD derivation path for the agent key
    pub derivation_path: String,
    /// Fee denom
    pub fee_denom: String,
    /// Gas price in `fee_denom`
    pub gas_price: f64,
    /// Gas limit per transaction
    pub gas_limit: u64,
    /// Random claim percentage is drawn from 1..=this
    pub max_random_percentage: u8,
}

impl Config {
    /// Load configuration from environment
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded .env from {:?}", path);
        }

        let max_random_percentage: u8 = parse_or_default(
            "MAX_RANDOM_PERCENTAGE",
            env::var("MAX_RANDOM_PERCENTAGE").ok(),
            DEFAULT_MAX_RANDOM_PERCENTAGE,
        )?;
        if max_random_percentage == 0 || max_random_percentage > 100 {
            return Err(eyre!(
                "MAX_RANDOM_PERCENTAGE must be between 1 and 100, got {}",
                max_random_percentage
            ));
        }

        Ok(Self {
            lcd_url: env::var("TERRA_LCD_URL").map_err(|_| eyre!("TERRA_LCD_URL required"))?,
            fallback_lcd_urls: env::var("TERRA_FALLBACK_LCD_URLS")
                .map(|v| parse_url_list(&v))
                .unwrap_or_default(),
            chain_id: env::var("TERRA_CHAIN_ID").map_err(|_| eyre!("TERRA_CHAIN_ID required"))?,
            account_prefix: env::var("ACCOUNT_PREFIX").unwrap_or_else(|_| "terra".to_string()),
            faucet_address: env::var("FAUCET_ADDRESS")
                .map_err(|_| eyre!("FAUCET_ADDRESS required"))?,
            mnemonic: env::var("AGENT_MNEMONIC").map_err(|_| eyre!("AGENT_MNEMONIC required"))?,
            derivation_path: env::var("DERIVATION_PATH")
                .unwrap_or_else(|_| DEFAULT_DERIVATION_PATH.to_string()),
            fee_denom: env::var("FEE_DENOM").unwrap_or_else(|_| "uluna".to_string()),
            gas_price: parse_or_default("GAS_PRICE", env::var("GAS_PRICE").ok(), 0.015)?,
            gas_limit: parse_or_default("GAS_LIMIT", env::var("GAS_LIMIT").ok(), 500_000)?,
            max_random_percentage,
        })
    }
}

/// Parse an optional setting; unset means `default`, set but malformed is an error.
fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| eyre!("Invalid {} '{}': {}", key, v, e)),
    }
}

/// Split a comma-separated URL list, dropping blanks and trailing slashes.
fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
