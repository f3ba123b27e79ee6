//! # Core Logic - Shared Transaction Pipeline
//!
//! This crate provides the chain-agnostic submission pipeline used by the
//! chain binaries: sign, send with bounded retry, poll for confirmation,
//! and thread a locally tracked nonce between operations.
//!
//! ## Modules
//!
//! - [`config`] - Shared settings structures for retry and confirmation
//! - [`error`] - Typed error handling with thiserror
//! - [`pipeline`] - Retrying sender, confirmation poller, operation driver
//! - [`traits`] - Chain client and operation trait definitions
//! - [`utils`] - Utility modules (logging, run loop, key loading)

// Module declarations - internal modules marked pub(crate)
pub mod config;
pub mod error;
pub mod pipeline;
pub mod traits;
pub(crate) mod utils;

// Selective exports - only public API types
pub use config::{ConfirmSettings, RetrySettings};
pub use error::{ClientError, SendError, SendFault, WalletError};
pub use pipeline::{
    send_with_retry, wait_for_confirmation, ConfirmPolicy, ConfirmationResult, NonceCounter,
    OperationDriver, OperationOutcome, Receipt, RetryPolicy, SignedTransaction, TransactionIntent,
    TxStep,
};
pub use traits::{ChainClient, OpReport, Operation, RunStats};

// Utils are pub(crate) - only export specific public utilities
pub use utils::{load_private_key, setup_logger, OpRunner, RunPlan};
