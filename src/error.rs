//! Error types for the bridge orchestrator
//!
//! One taxonomy covers the whole run: validation errors (bad input, no chain
//! interaction yet), pre-flight state errors (reads done, nothing written),
//! simulation errors, and submission/confirmation errors. Submission failure
//! is deliberately distinct from an on-chain revert: a failed broadcast has
//! an unknown fate and must not be blindly resent.

use alloy::primitives::U256;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Unknown destination chain: {requested}. Available chains: {available}")]
    UnknownChain { requested: String, available: String },

    #[error("Malformed amount {input:?}: {reason}")]
    MalformedAmount { input: String, reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // ========================================================================
    // Pre-flight State Errors
    // ========================================================================

    #[error("Insufficient token balance: need {required} wei, have {available} wei")]
    InsufficientTokenBalance { required: U256, available: U256 },

    #[error("Insufficient native balance for fees: need at least {required} wei, have {available} wei")]
    InsufficientFunds { required: U256, available: U256 },

    // ========================================================================
    // Chain Interaction Errors
    // ========================================================================

    #[error("RPC request {method} failed: {message}")]
    Rpc {
        method: &'static str,
        message: String,
    },

    #[error("Contract call {method} reverted: {reason}")]
    ContractRevert {
        method: &'static str,
        reason: String,
    },

    #[error("Gas estimation failed, the bridge call would revert: {reason}")]
    GasEstimation { reason: String },

    #[error("Transaction broadcast failed with unknown fate, check the chain before resending: {reason}")]
    Submission { reason: String },
}
