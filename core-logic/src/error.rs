//! # Core Error Types
//!
//! Centralized error definitions for the core-logic crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Signing-key loading errors
#[derive(Error, Debug, Clone)]
pub enum WalletError {
    #[error("Key file not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error reading {path}: {msg}")]
    Io { path: String, msg: String },

    #[error("Invalid private key format: expected hex string")]
    InvalidKeyFormat,

    #[error("Private key too short: expected 64 hex chars, got {length}")]
    InvalidKeyLength { length: usize },
}

/// Faults raised by the chain client outside of transaction broadcast
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Fault wording that marks a broadcast as retryable. Anything the node
/// says that is not on this list is treated as permanent.
const TRANSIENT_SEND_PATTERNS: &[&str] = &["mempool is full", "mempool full", "txpool is full"];

/// Structured classification of a transaction-broadcast fault.
///
/// The chain client surfaces raw fault text; [`SendFault::classify`] sorts
/// it into the one retryable condition (mempool capacity) or a permanent
/// rejection, so the retry loop never inspects strings itself.
#[derive(Error, Debug, Clone)]
pub enum SendFault {
    #[error("Mempool is full: {message}")]
    MempoolFull { message: String },

    #[error("{message}")]
    Rejected { message: String },
}

impl SendFault {
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_lowercase();
        if TRANSIENT_SEND_PATTERNS.iter().any(|p| lowered.contains(p)) {
            SendFault::MempoolFull { message }
        } else {
            SendFault::Rejected { message }
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, SendFault::MempoolFull { .. })
    }

    pub fn into_message(self) -> String {
        match self {
            SendFault::MempoolFull { message } | SendFault::Rejected { message } => message,
        }
    }
}

/// Terminal failure of a send attempt, after retries were applied
#[derive(Error, Debug, Clone)]
pub enum SendError {
    #[error("{0}")]
    Signing(String),

    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Mempool still full after {attempts} send attempts")]
    RetriesExhausted { attempts: u32 },
}
