//! The transaction submission pipeline: sign, send with bounded retry,
//! poll for a receipt, and advance the local nonce on accepted sends.

pub mod confirm;
pub mod driver;
pub mod nonce;
pub mod sender;
pub mod types;

pub use confirm::{wait_for_confirmation, ConfirmPolicy};
pub use driver::{OperationDriver, TxStep};
pub use nonce::NonceCounter;
pub use sender::{send_with_retry, RetryPolicy};
pub use types::{
    ConfirmationResult, OperationOutcome, Receipt, SignedTransaction, TransactionIntent,
};
