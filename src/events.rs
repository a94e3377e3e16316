//! CrossChainSent Event Extraction
//!
//! A bridge receipt commonly carries logs unrelated to the cross-chain leg
//! (burn transfers, fee transfers). Extraction filters by the event
//! signature and decodes the first match; logs that do not decode under the
//! signature are an expected negative, not an error, so absence is modeled
//! as `None` rather than a caught-and-discarded failure.

use alloy::primitives::{Address, Log, B256, U256};
use alloy::sol_types::SolEvent;
use serde::{Deserialize, Serialize};

use crate::contracts::ErisToken;

/// Decoded `CrossChainSent` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossChainSentEvent {
    /// CCIP message identifier
    pub message_id: B256,
    /// CCIP chain selector of the destination
    pub destination_chain: u64,
    /// Bridged amount in token smallest units
    pub amount: U256,
    /// Account whose tokens were bridged
    pub owner: Address,
}

impl CrossChainSentEvent {
    /// Message id as a 0x-prefixed hex string.
    pub fn message_id_hex(&self) -> String {
        format!("0x{}", hex::encode(self.message_id))
    }
}

impl From<ErisToken::CrossChainSent> for CrossChainSentEvent {
    fn from(event: ErisToken::CrossChainSent) -> Self {
        Self {
            message_id: event.messageId,
            destination_chain: event.destinationChain,
            amount: event.amount,
            owner: event.owner,
        }
    }
}

/// Extract the first `CrossChainSent` event from a receipt's logs.
///
/// Non-matching and undecodable logs are skipped. Returns `None` when no
/// log matches, which is a valid (if surprising) outcome for the caller to
/// investigate, not an error.
pub fn extract_cross_chain_sent(logs: &[Log]) -> Option<CrossChainSentEvent> {
    logs.iter().find_map(|log| {
        if log.data.topics().first() != Some(&ErisToken::CrossChainSent::SIGNATURE_HASH) {
            return None;
        }
        ErisToken::CrossChainSent::decode_log_data(&log.data, true)
            .ok()
            .map(CrossChainSentEvent::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, LogData};

    fn cross_chain_sent_log(message_id: B256, selector: u64, amount: U256, owner: Address) -> Log {
        let event = ErisToken::CrossChainSent {
            messageId: message_id,
            destinationChain: selector,
            amount,
            owner,
        };
        Log {
            address: Address::repeat_byte(0x11),
            data: event.encode_log_data(),
        }
    }

    fn unrelated_log() -> Log {
        Log {
            address: Address::repeat_byte(0x22),
            data: LogData::new_unchecked(vec![B256::repeat_byte(0xaa)], Bytes::new()),
        }
    }

    #[test]
    fn test_extract_from_matching_log() {
        let message_id = B256::repeat_byte(0x01);
        let log = cross_chain_sent_log(
            message_id,
            15_971_525_489_660_198_786,
            U256::from(500u64),
            Address::repeat_byte(0x33),
        );

        let event = extract_cross_chain_sent(&[log]).unwrap();
        assert_eq!(event.message_id, message_id);
        assert_eq!(event.destination_chain, 15_971_525_489_660_198_786);
        assert_eq!(event.amount, U256::from(500u64));
        assert_eq!(event.owner, Address::repeat_byte(0x33));
    }

    #[test]
    fn test_extract_skips_unrelated_logs() {
        let message_id = B256::repeat_byte(0x02);
        let logs = vec![
            unrelated_log(),
            cross_chain_sent_log(
                message_id,
                4_949_039_107_694_359_620,
                U256::from(7u64),
                Address::ZERO,
            ),
        ];

        let event = extract_cross_chain_sent(&logs).unwrap();
        assert_eq!(event.message_id, message_id);
    }

    #[test]
    fn test_extract_absent_when_no_match() {
        assert_eq!(extract_cross_chain_sent(&[]), None);
        assert_eq!(extract_cross_chain_sent(&[unrelated_log()]), None);
    }

    #[test]
    fn test_extract_returns_first_match() {
        let first = cross_chain_sent_log(
            B256::repeat_byte(0x03),
            1,
            U256::from(1u64),
            Address::ZERO,
        );
        let second = cross_chain_sent_log(
            B256::repeat_byte(0x04),
            2,
            U256::from(2u64),
            Address::ZERO,
        );

        let event = extract_cross_chain_sent(&[first, second]).unwrap();
        assert_eq!(event.message_id, B256::repeat_byte(0x03));
    }

    #[test]
    fn test_message_id_hex() {
        let event = CrossChainSentEvent {
            message_id: B256::repeat_byte(0xab),
            destination_chain: 1,
            amount: U256::ZERO,
            owner: Address::ZERO,
        };
        assert_eq!(event.message_id_hex(), format!("0x{}", "ab".repeat(32)));
    }
}
