use crate::error::SendError;
use ethers::types::{Address, Bytes, H256, U256};

/// Semantic fields of one transaction. Built fresh per operation with the
/// nonce handed in by the driver, and never mutated after construction.
#[derive(Debug, Clone)]
pub struct TransactionIntent {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub gas_limit: U256,
    pub gas_price: U256,
    pub nonce: u64,
    pub chain_id: u64,
    pub data: Bytes,
}

/// RLP-encoded signed transaction. Opaque to the pipeline beyond being
/// submittable.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub raw: Bytes,
}

/// Chain-produced record of a mined transaction's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: H256,
    pub block_number: u64,
    pub status: u64,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status == 1
    }
}

/// Terminal result of waiting for a receipt. A mined-but-reverted
/// transaction is `Confirmed` with a failing status; `TimedOut` means the
/// transaction was never observed and may still land later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResult {
    Confirmed(Receipt),
    TimedOut,
}

/// Terminal result of one driver operation.
#[derive(Debug, Clone)]
pub enum OperationOutcome {
    Success(Receipt),
    SendFailure(SendError),
    ConfirmFailure(ConfirmationResult),
}

impl OperationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Success(_))
    }

    /// Mined but reverted on-chain.
    pub fn reverted(&self) -> bool {
        matches!(
            self,
            OperationOutcome::ConfirmFailure(ConfirmationResult::Confirmed(r)) if !r.succeeded()
        )
    }

    /// Never observed within the confirmation window.
    pub fn timed_out(&self) -> bool {
        matches!(
            self,
            OperationOutcome::ConfirmFailure(ConfirmationResult::TimedOut)
        )
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        match self {
            OperationOutcome::Success(r) => Some(r),
            OperationOutcome::ConfirmFailure(ConfirmationResult::Confirmed(r)) => Some(r),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            OperationOutcome::Success(r) => format!("confirmed in block {}", r.block_number),
            OperationOutcome::SendFailure(e) => e.to_string(),
            OperationOutcome::ConfirmFailure(ConfirmationResult::Confirmed(r)) => {
                format!("reverted in block {}", r.block_number)
            }
            OperationOutcome::ConfirmFailure(ConfirmationResult::TimedOut) => {
                "not confirmed within the wait window".to_string()
            }
        }
    }
}
