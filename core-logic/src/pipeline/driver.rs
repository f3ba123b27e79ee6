use crate::error::SendError;
use crate::pipeline::confirm::{wait_for_confirmation, ConfirmPolicy};
use crate::pipeline::nonce::NonceCounter;
use crate::pipeline::sender::{send_with_retry, RetryPolicy};
use crate::pipeline::types::{ConfirmationResult, OperationOutcome, TransactionIntent};
use crate::traits::ChainClient;
use std::sync::Arc;
use tracing::{info, warn};

/// One step of a multi-transaction operation. The intent builder is only
/// invoked once every earlier step has confirmed, so a later step can
/// assume its preconditions actually landed on-chain.
pub struct TxStep {
    label: String,
    confirm: ConfirmPolicy,
    build: Box<dyn FnOnce(u64) -> TransactionIntent + Send>,
}

impl TxStep {
    pub fn new(
        label: impl Into<String>,
        confirm: ConfirmPolicy,
        build: impl FnOnce(u64) -> TransactionIntent + Send + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            confirm,
            build: Box::new(build),
        }
    }
}

/// Drives operations through sign -> send-with-retry -> confirm for a
/// single account, threading the local nonce counter between them.
/// Retry bounds are fixed at construction; confirmation bounds are
/// supplied per step since approve, swap and transfer tolerate different
/// waits.
pub struct OperationDriver<C: ChainClient + ?Sized> {
    client: Arc<C>,
    nonce: NonceCounter,
    retry: RetryPolicy,
}

impl<C: ChainClient + ?Sized> OperationDriver<C> {
    pub fn new(client: Arc<C>, nonce: NonceCounter, retry: RetryPolicy) -> Self {
        Self {
            client,
            nonce,
            retry,
        }
    }

    /// Nonce the next operation will be built with.
    pub fn next_nonce(&self) -> u64 {
        self.nonce.current()
    }

    /// Run a single transaction to a terminal outcome.
    ///
    /// The nonce slot is consumed as soon as the node accepts the
    /// broadcast, whether or not the transaction ever confirms. A send
    /// that never got accepted leaves the counter untouched, so the next
    /// operation reuses the slot instead of stalling the account.
    pub async fn run_operation<F>(
        &mut self,
        label: &str,
        confirm: ConfirmPolicy,
        build: F,
    ) -> OperationOutcome
    where
        F: FnOnce(u64) -> TransactionIntent,
    {
        let nonce = self.nonce.current();
        let intent = build(nonce);

        let signed = match self.client.sign(&intent).await {
            Ok(signed) => signed,
            Err(e) => {
                warn!("{}: {}", label, e);
                return OperationOutcome::SendFailure(SendError::Signing(e.to_string()));
            }
        };

        let tx_hash = match send_with_retry(self.client.as_ref(), &signed, self.retry).await {
            Ok(tx_hash) => tx_hash,
            Err(e) => {
                warn!("{}: {}", label, e);
                return OperationOutcome::SendFailure(e);
            }
        };

        self.nonce.advance();
        info!("{} sent: {:?} (nonce {})", label, tx_hash, nonce);

        match wait_for_confirmation(self.client.as_ref(), tx_hash, confirm).await {
            ConfirmationResult::Confirmed(receipt) if receipt.succeeded() => {
                info!("{} confirmed in block {}", label, receipt.block_number);
                OperationOutcome::Success(receipt)
            }
            result => OperationOutcome::ConfirmFailure(result),
        }
    }

    /// Run steps in order, stopping at the first step that does not reach
    /// a successful confirmation. Builders of skipped steps are never
    /// invoked.
    pub async fn run_sequence(&mut self, steps: Vec<TxStep>) -> OperationOutcome {
        let mut outcome =
            OperationOutcome::SendFailure(SendError::Rejected("operation has no steps".into()));

        for step in steps {
            let TxStep {
                label,
                confirm,
                build,
            } = step;

            outcome = self.run_operation(&label, confirm, build).await;
            if !outcome.is_success() {
                warn!("{} did not complete; skipping remaining steps", label);
                return outcome;
            }
        }

        outcome
    }
}
