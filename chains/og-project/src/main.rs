mod client;
mod config;
mod ops;

use crate::client::EthersChainClient;
use crate::config::OgConfig;
use crate::ops::{AutoSwapOp, OpContext, TransferOp};
use anyhow::Result;
use clap::{Parser, Subcommand};
use core_logic::{
    load_private_key, setup_logger, ChainClient, NonceCounter, OpRunner, Operation, OperationDriver,
    RetrySettings, RunPlan,
};
use dialoguer::{theme::ColorfulTheme, Input};
use dotenv::dotenv;
use ethers::signers::LocalWallet;
use ethers::types::{Address, U256};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "chains/og-project/config.toml")]
    config: String,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Mode {
    /// Send repeated native-token transfers to one recipient
    Transfer,
    /// Run repeated USDT -> ETH approve+swap pairs
    Autoswap,
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_guard = setup_logger();
    // Keep guard alive for file logging
    std::mem::forget(log_guard);
    dotenv().ok();

    let args = Args::parse();
    info!("Loading config from: {}", args.config);

    let config = match OgConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return Ok(());
        }
    };

    info!("==== 0G-Newton-Testnet Transaction Pipeline ====");

    let key = match load_private_key(Path::new(&config.private_key_file)) {
        Ok(k) => k,
        Err(e) => {
            error!("{}", e);
            return Ok(());
        }
    };
    let wallet: LocalWallet = key.parse()?;

    let client = match EthersChainClient::new(&config.rpc_url, wallet, config.chain_id) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to set up chain client: {:#}", e);
            return Ok(());
        }
    };

    if !client.is_connected().await {
        error!(
            "Failed to connect to 0G-Newton-Testnet at {}. Try again later.",
            config.rpc_url
        );
        return Ok(());
    }
    info!(
        "Connected to 0G-Newton-Testnet (Chain ID: {})",
        config.chain_id
    );

    let sender = client.address();
    info!("Sender address: {:?}", sender);

    let theme = ColorfulTheme::default();
    let count: u32 = Input::with_theme(&theme)
        .with_prompt("Number of transactions")
        .interact_text()?;

    let (operation, retry): (Box<dyn Operation<OpContext>>, RetrySettings) = match args.mode {
        Mode::Transfer => {
            let recipient_raw: String = Input::with_theme(&theme)
                .with_prompt("Recipient address (0x...)")
                .interact_text()?;
            let recipient: Address = recipient_raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid recipient address: {}", recipient_raw))?;

            let min_amount: f64 = Input::with_theme(&theme)
                .with_prompt("Minimum A0GI per transfer")
                .interact_text()?;
            let max_amount: f64 = Input::with_theme(&theme)
                .with_prompt("Maximum A0GI per transfer")
                .interact_text()?;
            if min_amount < 0.0 || min_amount > max_amount {
                error!("Minimum amount must be positive and no larger than the maximum.");
                return Ok(());
            }

            (
                Box::new(TransferOp {
                    recipient,
                    min_amount,
                    max_amount,
                }),
                config.retry.transfer,
            )
        }
        Mode::Autoswap => {
            let amount_usdt: f64 = Input::with_theme(&theme)
                .with_prompt("USDT to swap per transaction (e.g., 1)")
                .interact_text()?;
            let amount_eth: f64 = Input::with_theme(&theme)
                .with_prompt("Desired ETH per transaction (e.g., 0.000001)")
                .interact_text()?;

            let amount_in: U256 =
                ethers::utils::parse_units(format!("{:.6}", amount_usdt), 6u32)?.into();
            let amount_out: U256 =
                ethers::utils::parse_units(format!("{:.18}", amount_eth), "ether")?.into();

            (
                Box::new(AutoSwapOp::new(&config.swap, amount_in, amount_out)?),
                config.retry.swap,
            )
        }
    };

    let nonce = NonceCounter::from_pending(client.as_ref(), sender).await?;
    let driver = OperationDriver::new(client.clone(), nonce, retry.policy());

    info!(
        "Will run {} {} operation(s) from {:?}",
        count,
        operation.name(),
        sender
    );

    let plan = RunPlan {
        count,
        pause: Duration::from_secs(config.pause_secs),
    };
    let mut ctx = OpContext {
        driver,
        client: client.clone(),
        config,
        sender,
    };

    OpRunner::run(operation.as_ref(), &mut ctx, plan).await?;

    Ok(())
}
