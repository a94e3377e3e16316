//! Bridge Run Orchestration
//!
//! Drives one cross-chain transfer as an explicit state machine:
//!
//! `Start -> BalanceChecked -> FeeQuoted -> BudgetValidated -> GasEstimated
//!  -> Submitted -> Confirmed -> EventExtracted -> Done`
//!
//! Transitions only move forward; each has a single failure mode that
//! terminates the run. The one long suspend point is receipt polling after
//! broadcast. A deadline expiry there does NOT fail the run: the
//! transaction is on the wire and cannot be unsent, so the report carries
//! the hash with final state `Submitted` and [`BridgeOrchestrator::confirm`]
//! resumes the wait later.

use std::time::Duration;

use alloy::primitives::{B256, U256};
use serde::Serialize;
use std::fmt;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::chains::{self, ChainEntry};
use crate::client::{ChainAccess, ConfirmedReceipt};
use crate::error::BridgeError;
use crate::events::{self, CrossChainSentEvent};
use crate::fee;

/// Position of a bridge run in its lifecycle.
///
/// Also the final state of a run report: `Submitted` means broadcast but
/// unconfirmed (resumable), `Done` means the receipt was observed and the
/// logs were scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Start,
    BalanceChecked,
    FeeQuoted,
    BudgetValidated,
    GasEstimated,
    Submitted,
    Confirmed,
    EventExtracted,
    Done,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Start => "start",
            RunState::BalanceChecked => "balance_checked",
            RunState::FeeQuoted => "fee_quoted",
            RunState::BudgetValidated => "budget_validated",
            RunState::GasEstimated => "gas_estimated",
            RunState::Submitted => "submitted",
            RunState::Confirmed => "confirmed",
            RunState::EventExtracted => "event_extracted",
            RunState::Done => "done",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receipt fields surfaced in the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceiptSummary {
    pub block_number: Option<u64>,
    pub gas_used: u128,
    /// False means the transaction reverted on-chain
    pub status: bool,
}

impl From<&ConfirmedReceipt> for ReceiptSummary {
    fn from(receipt: &ConfirmedReceipt) -> Self {
        Self {
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            status: receipt.status,
        }
    }
}

/// Structured outcome of a bridge run.
///
/// `event` is optional by design: a confirmed receipt with no matching
/// `CrossChainSent` log still terminates in `Done` and is flagged for the
/// caller to investigate, not treated as a failure.
#[derive(Debug, Clone, Serialize)]
pub struct BridgeRunReport {
    pub final_state: RunState,
    pub source_chain_id: u64,
    pub destination: String,
    pub destination_selector: u64,
    pub amount: U256,
    pub fee_quote: Option<U256>,
    pub attached_value: Option<U256>,
    pub gas_estimate: Option<u64>,
    pub tx_hash: Option<B256>,
    pub receipt: Option<ReceiptSummary>,
    pub event: Option<CrossChainSentEvent>,
}

/// Fee quotation without a write (the read-only run mode).
#[derive(Debug, Clone, Serialize)]
pub struct FeeQuoteReport {
    pub source_chain_id: u64,
    pub destination: String,
    pub destination_selector: u64,
    pub amount: U256,
    pub fee_quote: U256,
    pub buffered_budget: U256,
}

/// Tunables for a bridge run.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Percent added on top of the fee quote for the attached value
    pub buffer_percent: u32,
    /// Delay between receipt polls
    pub poll_interval: Duration,
    /// Give up polling after this long; `None` polls until confirmation
    pub receipt_deadline: Option<Duration>,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            buffer_percent: fee::DEFAULT_FEE_BUFFER_PERCENT,
            poll_interval: Duration::from_millis(500),
            receipt_deadline: Some(Duration::from_secs(300)),
        }
    }
}

/// Sequences one bridge transfer over a [`ChainAccess`] implementation.
///
/// Holds no per-run state; independent runs may share nothing but the
/// static chain table, so concurrent orchestrators are safe.
pub struct BridgeOrchestrator<C> {
    chain: C,
    settings: OrchestratorSettings,
}

impl<C: ChainAccess> BridgeOrchestrator<C> {
    pub fn new(chain: C, settings: OrchestratorSettings) -> Self {
        Self { chain, settings }
    }

    /// Execute a full bridge run for `amount` towards `destination_key`.
    ///
    /// Validation and pre-flight errors return `Err` with no on-chain
    /// effect. After broadcast the run no longer fails: the outcome is a
    /// report whose `final_state` is `Submitted` (unconfirmed) or `Done`.
    pub async fn run(
        &self,
        destination_key: &str,
        amount: U256,
    ) -> Result<BridgeRunReport, BridgeError> {
        let sender = self.chain.sender();
        let source_chain_id = self.chain.chain_id().await?;
        info!(
            sender = %sender,
            source_chain_id,
            destination = %destination_key,
            amount = %amount,
            "Starting bridge run"
        );

        // Start -> BalanceChecked
        let balance = self.chain.token_balance(sender).await?;
        if balance < amount {
            return Err(BridgeError::InsufficientTokenBalance {
                required: amount,
                available: balance,
            });
        }
        info!(state = %RunState::BalanceChecked, balance = %balance, "Token balance sufficient");

        // BalanceChecked -> FeeQuoted
        let entry = chains::resolve(destination_key)?;
        let quote = self.chain.bridge_fee(entry.contract_name, amount).await?;
        info!(state = %RunState::FeeQuoted, fee_wei = %quote, "Bridge fee quoted");

        // FeeQuoted -> BudgetValidated
        let required = fee::required_budget(quote, self.settings.buffer_percent);
        let native = self.chain.native_balance(sender).await?;
        fee::validate_budget(native, required)?;
        info!(
            state = %RunState::BudgetValidated,
            budget_wei = %required,
            native_balance_wei = %native,
            "Native budget validated"
        );

        // BudgetValidated -> GasEstimated
        let gas_estimate = self
            .chain
            .estimate_bridge_gas(entry.contract_name, amount, required)
            .await?;
        info!(state = %RunState::GasEstimated, gas = gas_estimate, "Gas estimated");

        // GasEstimated -> Submitted. Exactly one broadcast per run; a
        // failure from here on has an unknown fate and is never retried.
        let tx_hash = self
            .chain
            .submit_bridge(entry.contract_name, amount, required, gas_estimate)
            .await?;
        info!(state = %RunState::Submitted, tx_hash = %tx_hash, "Transaction broadcast");

        let mut report = BridgeRunReport {
            final_state: RunState::Submitted,
            source_chain_id,
            destination: entry.contract_name.to_string(),
            destination_selector: entry.selector,
            amount,
            fee_quote: Some(quote),
            attached_value: Some(required),
            gas_estimate: Some(gas_estimate),
            tx_hash: Some(tx_hash),
            receipt: None,
            event: None,
        };
        self.finish(entry, tx_hash, &mut report).await;
        Ok(report)
    }

    /// Resume a run that ended in `Submitted`: wait for the receipt of a
    /// previously broadcast transaction and extract its event.
    pub async fn confirm(
        &self,
        destination_key: &str,
        amount: U256,
        tx_hash: B256,
    ) -> Result<BridgeRunReport, BridgeError> {
        let entry = chains::resolve(destination_key)?;
        let source_chain_id = self.chain.chain_id().await?;

        let mut report = BridgeRunReport {
            final_state: RunState::Submitted,
            source_chain_id,
            destination: entry.contract_name.to_string(),
            destination_selector: entry.selector,
            amount,
            fee_quote: None,
            attached_value: None,
            gas_estimate: None,
            tx_hash: Some(tx_hash),
            receipt: None,
            event: None,
        };
        self.finish(entry, tx_hash, &mut report).await;
        Ok(report)
    }

    /// Quote the bridge fee and buffered budget without any write.
    pub async fn quote_fee(
        &self,
        destination_key: &str,
        amount: U256,
    ) -> Result<FeeQuoteReport, BridgeError> {
        let entry = chains::resolve(destination_key)?;
        let source_chain_id = self.chain.chain_id().await?;
        let quote = self.chain.bridge_fee(entry.contract_name, amount).await?;
        let buffered = fee::required_budget(quote, self.settings.buffer_percent);
        info!(
            destination = %entry.contract_name,
            fee_wei = %quote,
            buffered_wei = %buffered,
            "Bridge fee quoted"
        );

        Ok(FeeQuoteReport {
            source_chain_id,
            destination: entry.contract_name.to_string(),
            destination_selector: entry.selector,
            amount,
            fee_quote: quote,
            buffered_budget: buffered,
        })
    }

    /// Submitted -> Confirmed -> EventExtracted -> Done, mutating the
    /// report as the states are reached. Leaves the report at `Submitted`
    /// when the deadline expires first.
    async fn finish(&self, entry: &ChainEntry, tx_hash: B256, report: &mut BridgeRunReport) {
        let receipt = match self.await_receipt(tx_hash).await {
            Some(receipt) => receipt,
            None => {
                warn!(
                    tx_hash = %tx_hash,
                    deadline = ?self.settings.receipt_deadline,
                    "Receipt not observed before deadline; transaction remains pending"
                );
                return;
            }
        };

        report.final_state = RunState::Confirmed;
        report.receipt = Some(ReceiptSummary::from(&receipt));
        info!(
            state = %RunState::Confirmed,
            block_number = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "Transaction confirmed"
        );
        if !receipt.status {
            warn!(tx_hash = %tx_hash, "Transaction reverted on-chain");
        }

        let event = events::extract_cross_chain_sent(&receipt.logs);
        report.final_state = RunState::EventExtracted;
        match &event {
            Some(event) => {
                if event.destination_chain != entry.selector {
                    warn!(
                        expected = entry.selector,
                        observed = event.destination_chain,
                        "CrossChainSent selector does not match requested destination"
                    );
                }
                info!(
                    message_id = %event.message_id_hex(),
                    destination_selector = event.destination_chain,
                    amount = %event.amount,
                    owner = %event.owner,
                    "Cross-chain message sent"
                );
            }
            None => {
                warn!(tx_hash = %tx_hash, "No CrossChainSent event in receipt logs");
            }
        }

        report.event = event;
        report.final_state = RunState::Done;
    }

    /// Poll for the receipt until it appears or the deadline passes.
    ///
    /// Transient lookup errors are logged and retried; the transaction's
    /// fate stays unknown until a receipt is actually observed.
    async fn await_receipt(&self, tx_hash: B256) -> Option<ConfirmedReceipt> {
        let started = Instant::now();
        loop {
            match self.chain.receipt_for(tx_hash).await {
                Ok(Some(receipt)) => return Some(receipt),
                Ok(None) => {}
                Err(e) => {
                    warn!(tx_hash = %tx_hash, error = %e, "Receipt lookup failed, retrying");
                }
            }
            if let Some(deadline) = self.settings.receipt_deadline {
                if started.elapsed() >= deadline {
                    return None;
                }
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_state_as_str() {
        assert_eq!(RunState::Start.as_str(), "start");
        assert_eq!(RunState::Submitted.as_str(), "submitted");
        assert_eq!(RunState::Done.as_str(), "done");
    }

    #[test]
    fn test_default_settings() {
        let settings = OrchestratorSettings::default();
        assert_eq!(settings.buffer_percent, 10);
        assert_eq!(settings.poll_interval, Duration::from_millis(500));
        assert_eq!(settings.receipt_deadline, Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_receipt_summary_from_confirmed() {
        let receipt = ConfirmedReceipt {
            block_number: Some(42),
            gas_used: 21_000,
            status: true,
            logs: vec![],
        };
        let summary = ReceiptSummary::from(&receipt);
        assert_eq!(summary.block_number, Some(42));
        assert_eq!(summary.gas_used, 21_000);
        assert!(summary.status);
    }
}
