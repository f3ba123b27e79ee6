use crate::client::EthersChainClient;
use crate::config::OgConfig;
use core_logic::OperationDriver;
use ethers::types::Address;
use std::sync::Arc;

pub mod autoswap;
pub mod transfer;

pub use autoswap::AutoSwapOp;
pub use transfer::TransferOp;

/// Everything an operation needs for one run session.
pub struct OpContext {
    pub driver: OperationDriver<EthersChainClient>,
    pub client: Arc<EthersChainClient>,
    pub config: OgConfig,
    pub sender: Address,
}
