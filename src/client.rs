//! EVM Chain Access
//!
//! Wraps an alloy HTTP provider behind the [`ChainAccess`] seam the
//! orchestrator drives. Reads go through a shared read-only provider; the
//! submission path builds a wallet-backed provider per call so the signer
//! never leaks into the read side.
//!
//! Transport failures and contract reverts are classified into distinct
//! error variants here; no retry logic lives at this layer.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, Log, B256, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
    transports::TransportError,
};
use async_trait::async_trait;
use tracing::info;

use crate::contracts::ErisToken;
use crate::error::BridgeError;

/// Minimal receipt view the orchestrator consumes.
#[derive(Debug, Clone, Default)]
pub struct ConfirmedReceipt {
    /// Block the transaction landed in
    pub block_number: Option<u64>,
    /// Gas consumed by the transaction
    pub gas_used: u128,
    /// True when the transaction succeeded on-chain
    pub status: bool,
    /// Emitted logs, in receipt order
    pub logs: Vec<Log>,
}

impl ConfirmedReceipt {
    /// Build from an alloy RPC receipt.
    pub fn from_rpc(receipt: &TransactionReceipt) -> Self {
        Self {
            block_number: receipt.block_number,
            gas_used: receipt.gas_used.into(),
            status: receipt.status(),
            logs: receipt.inner.logs().iter().map(|l| l.inner.clone()).collect(),
        }
    }
}

/// Chain operations the orchestrator sequences.
///
/// Exactly the reads, the gas simulation, the single broadcast, and the
/// receipt lookup of a bridge run. Implemented by [`EvmBridgeClient`] for
/// real chains and by mocks in the state-machine tests.
#[async_trait]
pub trait ChainAccess {
    /// Address whose tokens are bridged and which signs the transaction
    fn sender(&self) -> Address;

    /// Chain ID reported by the RPC endpoint
    async fn chain_id(&self) -> Result<u64, BridgeError>;

    /// ERIS balance of an account
    async fn token_balance(&self, account: Address) -> Result<U256, BridgeError>;

    /// Bridge fee quote for (destination chain name, amount)
    async fn bridge_fee(&self, destination: &str, amount: U256) -> Result<U256, BridgeError>;

    /// Native-currency balance of an account
    async fn native_balance(&self, account: Address) -> Result<U256, BridgeError>;

    /// Simulate the bridge call with `value` attached and return a gas limit
    async fn estimate_bridge_gas(
        &self,
        destination: &str,
        amount: U256,
        value: U256,
    ) -> Result<u64, BridgeError>;

    /// Sign and broadcast the bridge call. Exactly one broadcast per run;
    /// a failure here leaves the transaction's fate unknown.
    async fn submit_bridge(
        &self,
        destination: &str,
        amount: U256,
        value: U256,
        gas_limit: u64,
    ) -> Result<B256, BridgeError>;

    /// Receipt for a submitted transaction, if one exists yet
    async fn receipt_for(&self, tx_hash: B256) -> Result<Option<ConfirmedReceipt>, BridgeError>;
}

/// Alloy-backed [`ChainAccess`] implementation.
#[derive(Debug)]
pub struct EvmBridgeClient {
    rpc_url: String,
    token_address: Address,
    signer: PrivateKeySigner,
    sender: Address,
    provider: RootProvider<Http<Client>>,
}

impl EvmBridgeClient {
    /// Create a client for the ERIS contract at `token_address`.
    pub fn new(
        rpc_url: &str,
        token_address: Address,
        private_key: &str,
    ) -> Result<Self, BridgeError> {
        let signer: PrivateKeySigner =
            private_key
                .parse()
                .map_err(|e| BridgeError::InvalidConfig {
                    reason: format!("invalid private key: {}", e),
                })?;
        let sender = signer.address();

        let provider =
            ProviderBuilder::new().on_http(rpc_url.parse().map_err(|e| {
                BridgeError::InvalidConfig {
                    reason: format!("invalid RPC URL: {}", e),
                }
            })?);

        info!(
            rpc_url = %rpc_url,
            token = %token_address,
            sender = %sender,
            "EVM bridge client created"
        );

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            token_address,
            signer,
            sender,
            provider,
        })
    }

    /// The ERIS contract address this client talks to.
    pub fn token_address(&self) -> Address {
        self.token_address
    }
}

#[async_trait]
impl ChainAccess for EvmBridgeClient {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn chain_id(&self) -> Result<u64, BridgeError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| transport_error("eth_chainId", e))
    }

    async fn token_balance(&self, account: Address) -> Result<U256, BridgeError> {
        let contract = ErisToken::new(self.token_address, &self.provider);
        let result = contract
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| classify_call_error("balanceOf", e))?;
        Ok(result._0)
    }

    async fn bridge_fee(&self, destination: &str, amount: U256) -> Result<U256, BridgeError> {
        let contract = ErisToken::new(self.token_address, &self.provider);
        let result = contract
            .getBridgeFee(destination.to_string(), amount)
            .call()
            .await
            .map_err(|e| classify_call_error("getBridgeFee", e))?;
        Ok(result.fee)
    }

    async fn native_balance(&self, account: Address) -> Result<U256, BridgeError> {
        self.provider
            .get_balance(account)
            .await
            .map_err(|e| transport_error("eth_getBalance", e))
    }

    async fn estimate_bridge_gas(
        &self,
        destination: &str,
        amount: U256,
        value: U256,
    ) -> Result<u64, BridgeError> {
        let contract = ErisToken::new(self.token_address, &self.provider);
        contract
            .sendCCIPCrossChainBridge(destination.to_string(), amount)
            .value(value)
            .from(self.sender)
            .estimate_gas()
            .await
            .map_err(|e| match classify_call_error("sendCCIPCrossChainBridge", e) {
                BridgeError::ContractRevert { reason, .. } => {
                    BridgeError::GasEstimation { reason }
                }
                other => other,
            })
    }

    async fn submit_bridge(
        &self,
        destination: &str,
        amount: U256,
        value: U256,
        gas_limit: u64,
    ) -> Result<B256, BridgeError> {
        // Wallet-backed provider is built per submission; the shared
        // provider stays read-only
        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new().wallet(wallet).on_http(
            self.rpc_url
                .parse()
                .map_err(|e| BridgeError::InvalidConfig {
                    reason: format!("invalid RPC URL: {}", e),
                })?,
        );

        let contract = ErisToken::new(self.token_address, &provider);
        let pending = contract
            .sendCCIPCrossChainBridge(destination.to_string(), amount)
            .value(value)
            .gas(gas_limit)
            .from(self.sender)
            .send()
            .await
            .map_err(|e| BridgeError::Submission {
                reason: e.to_string(),
            })?;

        Ok(*pending.tx_hash())
    }

    async fn receipt_for(&self, tx_hash: B256) -> Result<Option<ConfirmedReceipt>, BridgeError> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| transport_error("eth_getTransactionReceipt", e))?;
        Ok(receipt.as_ref().map(ConfirmedReceipt::from_rpc))
    }
}

/// Map a provider-level transport error, keeping the method for context.
fn transport_error(method: &'static str, err: TransportError) -> BridgeError {
    BridgeError::Rpc {
        method,
        message: err.to_string(),
    }
}

/// Split a contract call failure into revert vs. transport.
///
/// A JSON-RPC error response on a call is a revert (the node executed the
/// call and it failed); anything else never reached contract execution.
fn classify_call_error(method: &'static str, err: alloy::contract::Error) -> BridgeError {
    match err {
        alloy::contract::Error::TransportError(rpc_err) => match rpc_err.as_error_resp() {
            Some(payload) => BridgeError::ContractRevert {
                method,
                reason: payload.message.to_string(),
            },
            None => BridgeError::Rpc {
                method,
                message: rpc_err.to_string(),
            },
        },
        other => BridgeError::Rpc {
            method,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_invalid_private_key() {
        let err = EvmBridgeClient::new(
            "http://localhost:8545",
            Address::ZERO,
            "not-a-key",
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidConfig { .. }));
    }

    #[test]
    fn test_client_rejects_invalid_rpc_url() {
        let err = EvmBridgeClient::new(
            "not a url",
            Address::ZERO,
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::InvalidConfig { .. }));
    }

    #[test]
    fn test_sender_derived_from_key() {
        // First Anvil dev key
        let client = EvmBridgeClient::new(
            "http://localhost:8545",
            Address::ZERO,
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap();
        assert_eq!(
            client.sender(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
                .parse::<Address>()
                .unwrap()
        );
    }
}
