use anyhow::{Context, Result};
use async_trait::async_trait;
use core_logic::{
    ChainClient, ClientError, Receipt, SendFault, SignedTransaction, TransactionIntent,
};
use ethers::prelude::*;
use ethers::types::transaction::eip2718::TypedTransaction;
use reqwest::Url;
use std::time::Duration;

const RPC_TIMEOUT_SECS: u64 = 30;

/// `ChainClient` over an ethers HTTP provider and a locally held signer.
pub struct EthersChainClient {
    provider: Provider<Http>,
    wallet: LocalWallet,
}

impl EthersChainClient {
    pub fn new(rpc_url: &str, wallet: LocalWallet, chain_id: u64) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(RPC_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        let url = Url::parse(rpc_url).with_context(|| format!("Invalid RPC URL: {}", rpc_url))?;
        let provider = Provider::new(Http::new_with_client(url, http_client));

        Ok(Self {
            provider,
            wallet: wallet.with_chain_id(chain_id),
        })
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}

#[async_trait]
impl ChainClient for EthersChainClient {
    async fn is_connected(&self) -> bool {
        self.provider.get_chainid().await.is_ok()
    }

    async fn pending_nonce(&self, address: Address) -> Result<u64, ClientError> {
        let nonce = self
            .provider
            .get_transaction_count(address, Some(BlockNumber::Pending.into()))
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))?;
        Ok(nonce.as_u64())
    }

    async fn gas_price(&self) -> Result<U256, ClientError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))
    }

    async fn sign(&self, intent: &TransactionIntent) -> Result<SignedTransaction, ClientError> {
        let request = TransactionRequest::new()
            .from(intent.from)
            .to(intent.to)
            .value(intent.value)
            .gas(intent.gas_limit)
            .gas_price(intent.gas_price)
            .nonce(intent.nonce)
            .chain_id(intent.chain_id)
            .data(intent.data.clone());

        let typed: TypedTransaction = request.into();
        let signature = self
            .wallet
            .sign_transaction(&typed)
            .await
            .map_err(|e| ClientError::Signing(e.to_string()))?;

        Ok(SignedTransaction {
            raw: typed.rlp_signed(&signature),
        })
    }

    async fn send(&self, tx: &SignedTransaction) -> Result<H256, SendFault> {
        let pending = self
            .provider
            .send_raw_transaction(tx.raw.clone())
            .await
            .map_err(|e| SendFault::classify(e.to_string()))?;
        Ok(*pending)
    }

    async fn receipt(&self, tx_hash: H256) -> Result<Option<Receipt>, ClientError> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))?;

        Ok(receipt.and_then(|r| {
            // A receipt without a block number is still pending.
            let block_number = r.block_number?;
            Some(Receipt {
                tx_hash: r.transaction_hash,
                block_number: block_number.as_u64(),
                status: r.status.map(|s| s.as_u64()).unwrap_or_default(),
            })
        }))
    }
}
