use crate::error::ClientError;
use crate::traits::ChainClient;
use ethers::types::Address;
use tracing::debug;

/// Process-local nonce counter for a single account.
///
/// Seeded once from the node's pending view, then advanced locally so a
/// run never depends on the remote node noticing its own pending
/// transactions. Invariants: a slot is consumed at most once, and the
/// counter never moves backwards within a run. It may drift ahead of the
/// chain if an accepted send never lands; the next run re-seeds.
#[derive(Debug, Clone)]
pub struct NonceCounter {
    next: u64,
}

impl NonceCounter {
    pub fn new(start: u64) -> Self {
        Self { next: start }
    }

    /// Seed from the chain's pending-nonce view.
    pub async fn from_pending<C>(client: &C, address: Address) -> Result<Self, ClientError>
    where
        C: ChainClient + ?Sized,
    {
        let start = client.pending_nonce(address).await?;
        debug!("Starting nonce for {:?}: {}", address, start);
        Ok(Self::new(start))
    }

    pub fn current(&self) -> u64 {
        self.next
    }

    /// Consume the current slot. Called exactly once per accepted send.
    pub fn advance(&mut self) {
        self.next += 1;
    }
}
