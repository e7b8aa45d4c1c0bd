// Configuration constants for the application

use std::{env, time::Duration};

use alloy_primitives::Address;
use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::cli::Cli;
use crate::wallet::BrokerOptions;

/// Wallet / network settings
pub const DEFAULT_PROVIDER_URL: &str = "ws://127.0.0.1:1248";
pub const DEFAULT_NETWORK: &str = "goerli";
pub const GOERLI_CHAIN_ID: u64 = 5;

/// Contract address environment variables
pub const DEFAULT_NFT_ADDRESS_ENV: &str = "NFT_CONTRACT_ADDRESS";
pub const DEFAULT_TOKEN_ADDRESS_ENV: &str = "TOKEN_CONTRACT_ADDRESS";

/// Sale parameters (mirrors the deployed token contract)
pub const TOKEN_UNIT_PRICE_ETH: &str = "0.001";
pub const TOKENS_PER_NFT: u64 = 10;
pub const MAX_TOKEN_SUPPLY: u64 = 10_000;
pub const TOKEN_DECIMALS: u8 = 18;

/// Update intervals (in milliseconds)
pub const TICK_RATE_MS: u64 = 50;
pub const UI_UPDATE_RATE_MS: u64 = 1000;
pub const RECEIPT_POLL_INTERVAL_MS: u64 = 2_000;

/// Max in-flight NFT checks while counting claimable tokens
pub const CLAIM_SCAN_CONCURRENCY: usize = 8;

/// Chain id for a well-known network name.
pub fn chain_id_for_network(network: &str) -> Option<u64> {
    match network.to_lowercase().as_str() {
        "mainnet" | "homestead" => Some(1),
        "goerli" => Some(GOERLI_CHAIN_ID),
        "sepolia" => Some(11_155_111),
        "holesky" => Some(17_000),
        _ => None,
    }
}

/// Everything the app needs at runtime, resolved from the CLI and the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub broker: BrokerOptions,
    pub nft_address: Address,
    pub token_address: Address,
    pub unit_price: Decimal,
    pub receipt_poll_interval: Duration,
    pub auto_connect: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let chain_id = match cli.chain_id {
            Some(id) => id,
            None => chain_id_for_network(&cli.network).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown network '{}'. Pass --chain-id to use a custom network.",
                    cli.network
                )
            })?,
        };

        if cli.unit_price.is_sign_negative() {
            anyhow::bail!("Unit price must not be negative (got {})", cli.unit_price);
        }

        Ok(Self {
            broker: BrokerOptions {
                network: cli.network.clone(),
                chain_id,
                provider_url: cli.provider_url.clone(),
                provider_options: Default::default(),
                disable_injected_provider: cli.disable_injected_provider,
            },
            nft_address: address_from_env(&cli.nft_address_env)?,
            token_address: address_from_env(&cli.token_address_env)?,
            unit_price: cli.unit_price,
            receipt_poll_interval: Duration::from_millis(RECEIPT_POLL_INTERVAL_MS),
            auto_connect: !cli.no_auto_connect,
        })
    }
}

fn address_from_env(var: &str) -> Result<Address> {
    let raw = env::var(var).map_err(|_| {
        anyhow::anyhow!(
            "Contract address not found in environment variable '{}'. Please set it in your .env file or environment.",
            var
        )
    })?;
    raw.trim()
        .parse::<Address>()
        .with_context(|| format!("'{var}' does not hold a valid address: {raw}"))
}
