use anyhow::Result;
use config::{Config, File};
use core_logic::{ConfirmSettings, RetrySettings};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct OgConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    #[serde(default = "default_key_file")]
    pub private_key_file: String,
    /// Idle seconds between consecutive operations.
    #[serde(default = "default_pause_secs")]
    pub pause_secs: u64,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub gas: GasSettings,
    #[serde(default)]
    pub confirm: ConfirmConfig,
    #[serde(default)]
    pub swap: SwapSettings,
}

impl OgConfig {
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path))
            .build()?;

        settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))
    }
}

/// Send-retry tolerances per mode. Swaps fight a busier mempool than
/// plain transfers and get more attempts.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct RetryConfig {
    #[serde(default = "default_transfer_retry")]
    pub transfer: RetrySettings,
    #[serde(default = "default_swap_retry")]
    pub swap: RetrySettings,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            transfer: default_transfer_retry(),
            swap: default_swap_retry(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct GasSettings {
    /// Fixed gas price for approve/swap, in wei.
    #[serde(default = "default_gas_price_wei")]
    pub price_wei: u64,
    /// Transfers pay network price times this, to clear quickly.
    #[serde(default = "default_price_multiplier")]
    pub price_multiplier: u64,
    #[serde(default = "default_approve_limit")]
    pub approve_limit: u64,
    #[serde(default = "default_swap_limit")]
    pub swap_limit: u64,
    #[serde(default = "default_transfer_limit")]
    pub transfer_limit: u64,
}

impl Default for GasSettings {
    fn default() -> Self {
        Self {
            price_wei: default_gas_price_wei(),
            price_multiplier: default_price_multiplier(),
            approve_limit: default_approve_limit(),
            swap_limit: default_swap_limit(),
            transfer_limit: default_transfer_limit(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ConfirmConfig {
    #[serde(default = "default_transfer_confirm")]
    pub transfer: ConfirmSettings,
    #[serde(default = "default_approve_confirm")]
    pub approve: ConfirmSettings,
    #[serde(default = "default_swap_confirm")]
    pub swap: ConfirmSettings,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            transfer: default_transfer_confirm(),
            approve: default_approve_confirm(),
            swap: default_swap_confirm(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SwapSettings {
    /// USDT token contract.
    #[serde(default = "default_token_address")]
    pub token_address: String,
    /// Swap contract granted the allowance.
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    /// Sentinel address the swap contract accepts for the native coin.
    #[serde(default = "default_eth_token_address")]
    pub eth_token_address: String,
}

impl Default for SwapSettings {
    fn default() -> Self {
        Self {
            token_address: default_token_address(),
            contract_address: default_contract_address(),
            eth_token_address: default_eth_token_address(),
        }
    }
}

fn default_key_file() -> String {
    "privatekey.txt".to_string()
}

fn default_pause_secs() -> u64 {
    5
}

fn default_transfer_retry() -> RetrySettings {
    RetrySettings {
        max_attempts: 5,
        delay_secs: 30,
    }
}

fn default_swap_retry() -> RetrySettings {
    RetrySettings {
        max_attempts: 10,
        delay_secs: 30,
    }
}

fn default_gas_price_wei() -> u64 {
    5_000_000_000
}

fn default_price_multiplier() -> u64 {
    2
}

fn default_approve_limit() -> u64 {
    39_566
}

fn default_swap_limit() -> u64 {
    8_750_000
}

fn default_transfer_limit() -> u64 {
    28_000
}

fn default_transfer_confirm() -> ConfirmSettings {
    ConfirmSettings::new(300, 10)
}

fn default_approve_confirm() -> ConfirmSettings {
    ConfirmSettings::new(300, 5)
}

fn default_swap_confirm() -> ConfirmSettings {
    ConfirmSettings::new(1800, 5)
}

fn default_token_address() -> String {
    "0x9A87C2412d500343c073E5Ae5394E3bE3874F76b".to_string()
}

fn default_contract_address() -> String {
    "0xD86b764618c6E3C078845BE3c3fCe50CE9535Da7".to_string()
}

fn default_eth_token_address() -> String {
    "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE".to_string()
}
