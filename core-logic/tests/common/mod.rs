#![allow(dead_code)]

use async_trait::async_trait;
use core_logic::{
    ChainClient, ClientError, Receipt, SendFault, SignedTransaction, TransactionIntent,
};
use ethers::types::{Address, Bytes, H256, U256};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted response for one `send` call.
pub enum SendStep {
    Accept,
    MempoolFull,
    Reject(&'static str),
}

/// Scripted response for one `receipt` call.
pub enum ReceiptStep {
    Absent,
    /// (block_number, status)
    Found(u64, u64),
    Fail(&'static str),
}

/// Chain client double driven by per-call scripts. An exhausted send
/// script accepts; an exhausted receipt script reports "not indexed yet".
pub struct MockClient {
    start_nonce: u64,
    send_script: Mutex<VecDeque<SendStep>>,
    receipt_script: Mutex<VecDeque<ReceiptStep>>,
    send_calls: AtomicUsize,
    receipt_calls: AtomicUsize,
    signed: Mutex<Vec<u64>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            start_nonce: 0,
            send_script: Mutex::new(VecDeque::new()),
            receipt_script: Mutex::new(VecDeque::new()),
            send_calls: AtomicUsize::new(0),
            receipt_calls: AtomicUsize::new(0),
            signed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_start_nonce(mut self, nonce: u64) -> Self {
        self.start_nonce = nonce;
        self
    }

    pub fn script_sends(self, steps: Vec<SendStep>) -> Self {
        *self.send_script.lock().unwrap() = steps.into();
        self
    }

    pub fn script_receipts(self, steps: Vec<ReceiptStep>) -> Self {
        *self.receipt_script.lock().unwrap() = steps.into();
        self
    }

    pub fn send_count(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn receipt_count(&self) -> usize {
        self.receipt_calls.load(Ordering::SeqCst)
    }

    /// Nonces of every intent that reached `sign`, in order.
    pub fn signed_nonces(&self) -> Vec<u64> {
        self.signed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for MockClient {
    async fn is_connected(&self) -> bool {
        true
    }

    async fn pending_nonce(&self, _address: Address) -> Result<u64, ClientError> {
        Ok(self.start_nonce)
    }

    async fn gas_price(&self) -> Result<U256, ClientError> {
        Ok(U256::from(1_000_000_000u64))
    }

    async fn sign(&self, intent: &TransactionIntent) -> Result<SignedTransaction, ClientError> {
        self.signed.lock().unwrap().push(intent.nonce);
        Ok(SignedTransaction {
            raw: Bytes::from(intent.nonce.to_be_bytes().to_vec()),
        })
    }

    async fn send(&self, _tx: &SignedTransaction) -> Result<H256, SendFault> {
        let call = self.send_calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.send_script.lock().unwrap().pop_front() {
            Some(SendStep::Accept) | None => Ok(H256::from_low_u64_be(call as u64)),
            Some(SendStep::MempoolFull) => Err(SendFault::classify(
                "mempool is full: too many pending transactions",
            )),
            Some(SendStep::Reject(msg)) => Err(SendFault::classify(msg)),
        }
    }

    async fn receipt(&self, tx_hash: H256) -> Result<Option<Receipt>, ClientError> {
        self.receipt_calls.fetch_add(1, Ordering::SeqCst);
        match self.receipt_script.lock().unwrap().pop_front() {
            Some(ReceiptStep::Found(block_number, status)) => Ok(Some(Receipt {
                tx_hash,
                block_number,
                status,
            })),
            Some(ReceiptStep::Absent) | None => Ok(None),
            Some(ReceiptStep::Fail(msg)) => Err(ClientError::Rpc(msg.to_string())),
        }
    }
}
