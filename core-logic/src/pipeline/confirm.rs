use crate::pipeline::types::ConfirmationResult;
use crate::traits::ChainClient;
use ethers::types::H256;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Bounds for the confirmation poller. The wait window is measured from
/// the first poll, not from send time.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmPolicy {
    pub max_wait: Duration,
    pub poll_interval: Duration,
}

impl Default for ConfirmPolicy {
    fn default() -> Self {
        Self {
            max_wait: Duration::from_secs(300),
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// Poll for a receipt until it appears or the wait window closes.
///
/// "Not indexed yet" is not an error, and neither is a failed lookup: the
/// transaction may still land, so both keep the poll going. A receipt with
/// a non-success status is a terminal on-chain revert, reported distinctly
/// from a timeout.
pub async fn wait_for_confirmation<C>(
    client: &C,
    tx_hash: H256,
    policy: ConfirmPolicy,
) -> ConfirmationResult
where
    C: ChainClient + ?Sized,
{
    debug!("Waiting for confirmation of {:?}...", tx_hash);
    let started = Instant::now();

    loop {
        match client.receipt(tx_hash).await {
            Ok(Some(receipt)) => {
                if receipt.succeeded() {
                    debug!(
                        "Transaction {:?} confirmed in block {}",
                        tx_hash, receipt.block_number
                    );
                } else {
                    warn!(
                        "Transaction {:?} reverted in block {}",
                        tx_hash, receipt.block_number
                    );
                }
                return ConfirmationResult::Confirmed(receipt);
            }
            Ok(None) => {}
            Err(e) => {
                debug!("Receipt lookup for {:?} failed, still waiting: {}", tx_hash, e);
            }
        }

        if started.elapsed() >= policy.max_wait {
            warn!(
                "Transaction {:?} not confirmed in {:?}",
                tx_hash, policy.max_wait
            );
            return ConfirmationResult::TimedOut;
        }

        sleep(policy.poll_interval).await;
    }
}
