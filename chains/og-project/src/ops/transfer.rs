use crate::ops::OpContext;
use anyhow::{Context, Result};
use async_trait::async_trait;
use core_logic::{ChainClient, OpReport, Operation, TransactionIntent};
use ethers::types::{Address, Bytes, U256};
use rand::Rng;

/// Repeated native-token transfers to one recipient, each for a random
/// amount inside the prompted range.
pub struct TransferOp {
    pub recipient: Address,
    pub min_amount: f64,
    pub max_amount: f64,
}

#[async_trait]
impl Operation<OpContext> for TransferOp {
    fn name(&self) -> &str {
        "transfer"
    }

    async fn run(&self, ctx: &mut OpContext, _index: u32) -> Result<OpReport> {
        let amount = {
            let mut rng = rand::thread_rng();
            rng.gen_range(self.min_amount..=self.max_amount)
        };
        let amount_wei: U256 = ethers::utils::parse_units(format!("{:.6}", amount), "ether")
            .context("Failed to convert amount to wei")?
            .into();

        let gas_price =
            ctx.client.gas_price().await? * U256::from(ctx.config.gas.price_multiplier);

        let (from, to) = (ctx.sender, self.recipient);
        let (chain_id, gas_limit) = (ctx.config.chain_id, ctx.config.gas.transfer_limit);
        let outcome = ctx
            .driver
            .run_operation(
                "transfer",
                ctx.config.confirm.transfer.policy(),
                move |nonce| TransactionIntent {
                    from,
                    to,
                    value: amount_wei,
                    gas_limit: U256::from(gas_limit),
                    gas_price,
                    nonce,
                    chain_id,
                    data: Bytes::new(),
                },
            )
            .await;

        let message = if outcome.is_success() {
            format!("Sent {:.6} A0GI to {:?}", amount, to)
        } else {
            format!(
                "Transfer of {:.6} A0GI to {:?} failed: {}",
                amount,
                to,
                outcome.describe()
            )
        };

        Ok(OpReport {
            success: outcome.is_success(),
            message,
            tx_hash: outcome.receipt().map(|r| format!("{:?}", r.tx_hash)),
        })
    }
}
