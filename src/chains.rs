//! Destination Chain Directory
//!
//! Maps lowercase user-facing chain keys to the canonical chain names the
//! ERIS contract expects, together with the Chainlink CCIP chain selector
//! for each destination. The table is static and never mutated; lookups are
//! case-normalized. Unknown keys are a hard error carrying the full set of
//! valid keys so the caller can self-correct.

use crate::error::BridgeError;

/// A supported bridge destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainEntry {
    /// Lowercase user-facing key (e.g. "base")
    pub key: &'static str,
    /// Canonical chain name the contract expects (e.g. "Base")
    pub contract_name: &'static str,
    /// CCIP chain selector (not an EVM chain ID)
    pub selector: u64,
}

/// Supported mainnet destinations.
pub const SUPPORTED_CHAINS: &[ChainEntry] = &[
    ChainEntry {
        key: "ethereum",
        contract_name: "Ethereum",
        selector: 5_009_297_550_715_157_269,
    },
    ChainEntry {
        key: "base",
        contract_name: "Base",
        selector: 15_971_525_489_660_198_786,
    },
    ChainEntry {
        key: "polygon",
        contract_name: "Polygon",
        selector: 4_051_577_828_743_386_545,
    },
    ChainEntry {
        key: "bnb",
        contract_name: "BNB",
        selector: 11_344_663_589_394_136_015,
    },
    ChainEntry {
        key: "arbitrum",
        contract_name: "Arbitrum One",
        selector: 4_949_039_107_694_359_620,
    },
    ChainEntry {
        key: "ink",
        contract_name: "Ink",
        selector: 3_461_204_551_265_785_888,
    },
    ChainEntry {
        key: "worldchain",
        contract_name: "World Chain",
        selector: 2_049_429_975_587_534_727,
    },
    ChainEntry {
        key: "soneium",
        contract_name: "Soneium",
        selector: 12_505_351_618_335_765_396,
    },
    ChainEntry {
        key: "unichain",
        contract_name: "Unichain",
        selector: 1_923_510_103_922_296_319,
    },
];

/// Resolve a destination chain key to its directory entry.
///
/// Lookup is case-insensitive ("BASE" and "base" resolve identically).
pub fn resolve(identifier: &str) -> Result<&'static ChainEntry, BridgeError> {
    let key = identifier.trim().to_ascii_lowercase();
    SUPPORTED_CHAINS
        .iter()
        .find(|entry| entry.key == key)
        .ok_or_else(|| BridgeError::UnknownChain {
            requested: identifier.to_string(),
            available: available_keys().join(", "),
        })
}

/// All valid destination keys, in table order.
pub fn available_keys() -> Vec<&'static str> {
    SUPPORTED_CHAINS.iter().map(|entry| entry.key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_chain() {
        let entry = resolve("base").unwrap();
        assert_eq!(entry.contract_name, "Base");
        assert_eq!(entry.selector, 15_971_525_489_660_198_786);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let lower = resolve("base").unwrap();
        let upper = resolve("BASE").unwrap();
        let mixed = resolve("  Base ").unwrap();
        assert_eq!(lower.contract_name, upper.contract_name);
        assert_eq!(lower.contract_name, mixed.contract_name);
    }

    #[test]
    fn test_resolve_arbitrum_selector() {
        let entry = resolve("arbitrum").unwrap();
        assert_eq!(entry.contract_name, "Arbitrum One");
        assert_eq!(entry.selector, 4_949_039_107_694_359_620);
    }

    #[test]
    fn test_resolve_unknown_chain() {
        let err = resolve("optimism").unwrap_err();
        match err {
            BridgeError::UnknownChain {
                requested,
                available,
            } => {
                assert_eq!(requested, "optimism");
                assert!(available.contains("base"));
                assert!(available.contains("unichain"));
            }
            other => panic!("Expected UnknownChain, got {:?}", other),
        }
    }

    #[test]
    fn test_all_keys_are_lowercase() {
        for entry in SUPPORTED_CHAINS {
            assert_eq!(entry.key, entry.key.to_ascii_lowercase());
        }
    }
}
