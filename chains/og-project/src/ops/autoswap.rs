use crate::config::SwapSettings;
use crate::ops::OpContext;
use anyhow::{Context, Result};
use async_trait::async_trait;
use core_logic::{OpReport, Operation, TransactionIntent, TxStep};
use ethers::abi::Abi;
use ethers::contract::BaseContract;
use ethers::types::{Address, U256};
use std::time::{SystemTime, UNIX_EPOCH};

const ERC20_ABI: &str = r#"[
    {"constant":false,"inputs":[{"name":"_spender","type":"address"},{"name":"_value","type":"uint256"}],"name":"approve","outputs":[{"name":"success","type":"bool"}],"type":"function"}
]"#;

const SWAP_ABI: &str = r#"[
    {"inputs":[{"internalType":"address","name":"tokenFrom","type":"address"},{"internalType":"address","name":"tokenTo","type":"address"},{"internalType":"uint256","name":"minReturn","type":"uint256"},{"internalType":"address","name":"sender","type":"address"},{"internalType":"uint256","name":"amountIn","type":"uint256"},{"internalType":"uint256","name":"amountOut","type":"uint256"},{"internalType":"uint256","name":"fee","type":"uint256"},{"internalType":"uint256","name":"deadline","type":"uint256"}],"name":"swap","outputs":[],"stateMutability":"nonpayable","type":"function"}
]"#;

/// Accepted slippage floor, as a share of the desired output.
const MIN_RETURN_PCT: u64 = 90;
/// Swap deadline, seconds from now.
const DEADLINE_SECS: u64 = 1800;

/// One approve + swap pair per iteration. The swap step is only reached
/// once the allowance transaction has confirmed on-chain.
pub struct AutoSwapOp {
    token: Address,
    swap_contract: Address,
    eth_token: Address,
    amount_in: U256,
    amount_out: U256,
    erc20: BaseContract,
    swapper: BaseContract,
}

impl AutoSwapOp {
    pub fn new(swap: &SwapSettings, amount_in: U256, amount_out: U256) -> Result<Self> {
        let token = swap
            .token_address
            .parse()
            .context("Invalid token address")?;
        let swap_contract = swap
            .contract_address
            .parse()
            .context("Invalid swap contract address")?;
        let eth_token = swap
            .eth_token_address
            .parse()
            .context("Invalid ETH token address")?;

        let erc20 = BaseContract::from(serde_json::from_str::<Abi>(ERC20_ABI)?);
        let swapper = BaseContract::from(serde_json::from_str::<Abi>(SWAP_ABI)?);

        Ok(Self {
            token,
            swap_contract,
            eth_token,
            amount_in,
            amount_out,
            erc20,
            swapper,
        })
    }

    fn min_return(&self) -> U256 {
        self.amount_out * U256::from(MIN_RETURN_PCT) / U256::from(100u64)
    }
}

#[async_trait]
impl Operation<OpContext> for AutoSwapOp {
    fn name(&self) -> &str {
        "autoswap"
    }

    async fn run(&self, ctx: &mut OpContext, _index: u32) -> Result<OpReport> {
        let deadline = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock is before the epoch")?
            .as_secs()
            + DEADLINE_SECS;

        let approve_data = self
            .erc20
            .encode("approve", (self.swap_contract, self.amount_in))
            .context("Failed to encode approve calldata")?;
        let swap_data = self
            .swapper
            .encode(
                "swap",
                (
                    self.token,
                    self.eth_token,
                    self.min_return(),
                    ctx.sender,
                    self.amount_in,
                    self.amount_out,
                    U256::zero(),
                    U256::from(deadline),
                ),
            )
            .context("Failed to encode swap calldata")?;

        let gas_price = U256::from(ctx.config.gas.price_wei);
        let (from, chain_id) = (ctx.sender, ctx.config.chain_id);
        let (token, swap_contract) = (self.token, self.swap_contract);
        let (approve_gas, swap_gas) = (ctx.config.gas.approve_limit, ctx.config.gas.swap_limit);

        let steps = vec![
            TxStep::new(
                "approve",
                ctx.config.confirm.approve.policy(),
                move |nonce| TransactionIntent {
                    from,
                    to: token,
                    value: U256::zero(),
                    gas_limit: U256::from(approve_gas),
                    gas_price,
                    nonce,
                    chain_id,
                    data: approve_data,
                },
            ),
            TxStep::new("swap", ctx.config.confirm.swap.policy(), move |nonce| {
                TransactionIntent {
                    from,
                    to: swap_contract,
                    value: U256::zero(),
                    gas_limit: U256::from(swap_gas),
                    gas_price,
                    nonce,
                    chain_id,
                    data: swap_data,
                }
            }),
        ];

        let outcome = ctx.driver.run_sequence(steps).await;

        let amount_display = ethers::utils::format_units(self.amount_in, 6u32)
            .unwrap_or_else(|_| self.amount_in.to_string());
        let message = if outcome.is_success() {
            format!("Swapped {} USDT for ETH", amount_display)
        } else {
            format!("Swap of {} USDT failed: {}", amount_display, outcome.describe())
        };

        Ok(OpReport {
            success: outcome.is_success(),
            message,
            tx_hash: outcome.receipt().map(|r| format!("{:?}", r.tx_hash)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_calldata_uses_canonical_selector() {
        let op = AutoSwapOp::new(
            &SwapSettings::default(),
            U256::from(1_000_000u64),
            U256::exp10(12),
        )
        .unwrap();

        let data = op
            .erc20
            .encode("approve", (op.swap_contract, op.amount_in))
            .unwrap();

        assert_eq!(data[..4], [0x09, 0x5e, 0xa7, 0xb3]);
        // 4-byte selector plus two 32-byte words.
        assert_eq!(data.len(), 68);
    }

    #[test]
    fn swap_calldata_carries_all_eight_arguments() {
        let op = AutoSwapOp::new(
            &SwapSettings::default(),
            U256::from(1_000_000u64),
            U256::exp10(12),
        )
        .unwrap();

        let data = op
            .swapper
            .encode(
                "swap",
                (
                    op.token,
                    op.eth_token,
                    op.min_return(),
                    Address::zero(),
                    op.amount_in,
                    op.amount_out,
                    U256::zero(),
                    U256::from(1_900_000_000u64),
                ),
            )
            .unwrap();

        assert_eq!(data.len(), 4 + 8 * 32);
    }

    #[test]
    fn min_return_is_ninety_percent() {
        let op = AutoSwapOp::new(&SwapSettings::default(), U256::from(1u64), U256::from(1_000u64))
            .unwrap();
        assert_eq!(op.min_return(), U256::from(900u64));
    }

    #[test]
    fn bad_address_is_rejected() {
        let swap = SwapSettings {
            token_address: "not-an-address".to_string(),
            ..SwapSettings::default()
        };
        assert!(AutoSwapOp::new(&swap, U256::one(), U256::one()).is_err());
    }
}
