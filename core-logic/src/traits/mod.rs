use crate::error::{ClientError, SendFault};
use crate::pipeline::{Receipt, SignedTransaction, TransactionIntent};
use anyhow::Result;
use async_trait::async_trait;
use ethers::types::{Address, H256, U256};

/// Remote-node collaborator for the submission pipeline.
///
/// The adapter owns the signing key and the RPC transport; the pipeline
/// only sees intents, opaque signed payloads and structured faults.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn is_connected(&self) -> bool;

    /// Account nonce as seen by the node's pending view.
    async fn pending_nonce(&self, address: Address) -> Result<u64, ClientError>;

    /// Current network gas price in native fee units.
    async fn gas_price(&self) -> Result<U256, ClientError>;

    /// Sign an intent with the adapter-held key.
    async fn sign(&self, intent: &TransactionIntent) -> Result<SignedTransaction, ClientError>;

    /// Broadcast a signed transaction. Faults carry a structured
    /// transient/permanent classification.
    async fn send(&self, tx: &SignedTransaction) -> Result<H256, SendFault>;

    /// `None` until the transaction is indexed and mined.
    async fn receipt(&self, tx_hash: H256) -> Result<Option<Receipt>, ClientError>;
}

/// Human-readable summary of one finished operation.
#[derive(Debug, Clone)]
pub struct OpReport {
    pub success: bool,
    pub message: String,
    pub tx_hash: Option<String>,
}

/// A repeatable logical operation (one transfer, one approve+swap pair).
#[async_trait]
pub trait Operation<Ctx: Send>: Send + Sync {
    /// Returns the name of the operation
    fn name(&self) -> &str;

    /// Executes one iteration
    async fn run(&self, ctx: &mut Ctx, index: u32) -> Result<OpReport>;
}

#[derive(Debug, Default, Clone)]
pub struct RunStats {
    pub success: u64,
    pub failed: u64,
}
