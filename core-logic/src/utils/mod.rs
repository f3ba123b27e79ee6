//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

// Internal modules - not part of public API
pub(crate) mod logger;
pub(crate) mod runner;
pub(crate) mod wallet;

// Selective exports - only public utilities
pub use logger::setup_logger;
pub use runner::{OpRunner, RunPlan};
pub use wallet::load_private_key;
