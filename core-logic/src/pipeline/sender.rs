use crate::error::SendError;
use crate::pipeline::types::SignedTransaction;
use crate::traits::ChainClient;
use ethers::types::H256;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Bounds for the retrying sender. `max_attempts` is inclusive of the
/// first attempt; the delay is fixed, not exponential.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts,
            retry_delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            retry_delay: Duration::from_secs(30),
        }
    }
}

/// Broadcast a signed transaction, absorbing mempool-capacity faults.
///
/// Only the transient mempool-full condition is retried; every other fault
/// aborts immediately so real problems (bad nonce, insufficient balance,
/// malformed payload) are never masked by the retry loop. Sleeps happen
/// between attempts only.
pub async fn send_with_retry<C>(
    client: &C,
    tx: &SignedTransaction,
    policy: RetryPolicy,
) -> Result<H256, SendError>
where
    C: ChainClient + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match client.send(tx).await {
            Ok(tx_hash) => {
                if attempt > 1 {
                    debug!("Send accepted on attempt {}/{}", attempt, max_attempts);
                }
                return Ok(tx_hash);
            }
            Err(fault) if fault.is_transient() => {
                if attempt == max_attempts {
                    break;
                }
                warn!(
                    "Mempool full. Waiting {:?} before retrying... (attempt {}/{})",
                    policy.retry_delay, attempt, max_attempts
                );
                sleep(policy.retry_delay).await;
            }
            Err(fault) => {
                return Err(SendError::Rejected(fault.into_message()));
            }
        }
    }

    Err(SendError::RetriesExhausted {
        attempts: max_attempts,
    })
}
