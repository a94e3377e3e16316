//! ERIS Bridge: Client-Side CCIP Bridge Orchestration
//!
//! This crate executes cross-chain ERIS token transfers against the ERIS
//! token contract over an EVM JSON-RPC endpoint, with Chainlink CCIP as the
//! cross-chain transport:
//!
//! - **Chain Directory** - static destination table (canonical names + CCIP selectors)
//! - **Amount Codec** - decimal <-> fixed-point conversion at 18 decimals
//! - **Fee Guard** - buffered native budget computation and validation
//! - **Chain Access** - alloy-backed reads, gas estimation, and submission
//! - **Orchestrator** - the forward-only bridge run state machine
//! - **Event Extraction** - `CrossChainSent` decoding from receipt logs
//!
//! ## Usage
//!
//! ```ignore
//! use eris_bridge::{BridgeOrchestrator, EvmBridgeClient, OrchestratorSettings};
//!
//! let client = EvmBridgeClient::new(rpc_url, token_address, private_key)?;
//! let orchestrator = BridgeOrchestrator::new(client, OrchestratorSettings::default());
//! let report = orchestrator.run("base", amount).await?;
//! ```

pub mod amount;
pub mod chains;
pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod events;
pub mod fee;
pub mod orchestrator;

// Re-export commonly used items at the crate root
pub use chains::{resolve, ChainEntry, SUPPORTED_CHAINS};
pub use client::{ChainAccess, ConfirmedReceipt, EvmBridgeClient};
pub use config::Config;
pub use error::BridgeError;
pub use events::{extract_cross_chain_sent, CrossChainSentEvent};
pub use orchestrator::{
    BridgeOrchestrator, BridgeRunReport, FeeQuoteReport, OrchestratorSettings, ReceiptSummary,
    RunState,
};
