//! Run configuration
//!
//! All run parameters come from environment variables (a `.env` file is
//! honored when present) and are validated before any chain interaction.
//! The private key is redacted from Debug output.

use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::amount::{self, ERIS_DECIMALS};
use crate::chains;
use crate::error::BridgeError;
use crate::fee;
use crate::orchestrator::OrchestratorSettings;

/// Configuration for one bridge run.
#[derive(Clone)]
pub struct Config {
    /// EVM RPC URL of the source chain
    pub rpc_url: String,
    /// ERIS contract address (0x-prefixed)
    pub contract_address: String,
    /// Destination chain key (e.g. "base")
    pub destination_chain: String,
    /// Amount to bridge, as a decimal token string
    pub amount: String,
    /// Sender private key (0x-prefixed)
    pub private_key: String,
    /// Percent buffer on top of the fee quote
    pub fee_buffer_percent: u32,
    /// Delay between receipt polls
    pub receipt_poll_interval_ms: u64,
    /// Receipt deadline in seconds; 0 polls until confirmation
    pub receipt_timeout_secs: u64,
    /// Quote the fee and stop, without bridging
    pub quote_only: bool,
}

/// Custom Debug that redacts the private key to prevent accidental log leakage.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("contract_address", &self.contract_address)
            .field("destination_chain", &self.destination_chain)
            .field("amount", &self.amount)
            .field("private_key", &"<redacted>")
            .field("fee_buffer_percent", &self.fee_buffer_percent)
            .field("receipt_poll_interval_ms", &self.receipt_poll_interval_ms)
            .field("receipt_timeout_secs", &self.receipt_timeout_secs)
            .field("quote_only", &self.quote_only)
            .finish()
    }
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_receipt_timeout_secs() -> u64 {
    300
}

fn required(name: &'static str) -> Result<String, BridgeError> {
    env::var(name).map_err(|_| BridgeError::InvalidConfig {
        reason: format!("{} environment variable is required", name),
    })
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if it
    /// exists.
    pub fn load() -> Result<Self, BridgeError> {
        if Path::new(".env").exists() {
            dotenvy::from_filename(".env").map_err(|e| BridgeError::InvalidConfig {
                reason: format!("failed to load .env: {}", e),
            })?;
        }
        Self::load_from_env()
    }

    /// Load configuration from environment variables only.
    pub fn load_from_env() -> Result<Self, BridgeError> {
        let config = Config {
            rpc_url: required("ERIS_RPC_URL")?,
            contract_address: required("ERIS_CONTRACT_ADDRESS")?,
            destination_chain: required("DESTINATION_CHAIN")?,
            amount: required("BRIDGE_AMOUNT")?,
            private_key: required("ERIS_PRIVATE_KEY")?,
            fee_buffer_percent: env::var("FEE_BUFFER_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fee::DEFAULT_FEE_BUFFER_PERCENT),
            receipt_poll_interval_ms: env::var("RECEIPT_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default_poll_interval_ms()),
            receipt_timeout_secs: env::var("RECEIPT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default_receipt_timeout_secs()),
            quote_only: env::var("QUOTE_ONLY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration before any chain interaction.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.rpc_url.is_empty() {
            return Err(BridgeError::InvalidConfig {
                reason: "rpc_url cannot be empty".to_string(),
            });
        }

        if self.contract_address.len() != 42 || !self.contract_address.starts_with("0x") {
            return Err(BridgeError::InvalidConfig {
                reason: "contract_address must be a valid hex address (42 chars with 0x prefix)"
                    .to_string(),
            });
        }

        if self.private_key.len() != 66 || !self.private_key.starts_with("0x") {
            return Err(BridgeError::InvalidConfig {
                reason: "private_key must be 66 chars (0x + 64 hex chars)".to_string(),
            });
        }

        if self.fee_buffer_percent > 100 {
            return Err(BridgeError::InvalidConfig {
                reason: "fee_buffer_percent cannot exceed 100".to_string(),
            });
        }

        if self.receipt_poll_interval_ms == 0 {
            return Err(BridgeError::InvalidConfig {
                reason: "receipt_poll_interval_ms must be positive".to_string(),
            });
        }

        // These two fail with their own taxonomy variants, before any RPC
        chains::resolve(&self.destination_chain)?;
        amount::parse_amount(&self.amount, ERIS_DECIMALS)?;

        Ok(())
    }

    /// Orchestrator settings derived from this configuration.
    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            buffer_percent: self.fee_buffer_percent,
            poll_interval: Duration::from_millis(self.receipt_poll_interval_ms),
            receipt_deadline: match self.receipt_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }
}
