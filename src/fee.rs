//! Bridge Fee Budget
//!
//! The fee quote and the later submission are not atomic: chain state can
//! shift between the two, so the attached value carries a percentage buffer
//! on top of the quote. All arithmetic is integer-only; fee amounts are
//! large and floating point is unacceptable.

use alloy::primitives::U256;

use crate::error::BridgeError;

/// Default buffer applied on top of the quoted bridge fee.
pub const DEFAULT_FEE_BUFFER_PERCENT: u32 = 10;

/// Native budget required for a quoted fee: `quote * (100 + buffer) / 100`.
pub fn required_budget(quote: U256, buffer_percent: u32) -> U256 {
    quote * U256::from(100 + buffer_percent) / U256::from(100u8)
}

/// Check that the sender's native balance covers the required budget.
pub fn validate_budget(available: U256, required: U256) -> Result<(), BridgeError> {
    if available < required {
        return Err(BridgeError::InsufficientFunds {
            required,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_budget_default_buffer() {
        assert_eq!(
            required_budget(U256::from(1000u64), 10),
            U256::from(1100u64)
        );
    }

    #[test]
    fn test_required_budget_zero_quote() {
        assert_eq!(required_budget(U256::ZERO, 10), U256::ZERO);
    }

    #[test]
    fn test_required_budget_rounds_down() {
        // 101 * 110 / 100 = 111.1 -> 111
        assert_eq!(required_budget(U256::from(101u64), 10), U256::from(111u64));
    }

    #[test]
    fn test_required_budget_zero_buffer() {
        assert_eq!(required_budget(U256::from(1000u64), 0), U256::from(1000u64));
    }

    #[test]
    fn test_validate_budget_sufficient() {
        assert!(validate_budget(U256::from(1100u64), U256::from(1100u64)).is_ok());
        assert!(validate_budget(U256::from(2000u64), U256::from(1100u64)).is_ok());
    }

    #[test]
    fn test_validate_budget_insufficient() {
        let err = validate_budget(U256::from(1050u64), U256::from(1100u64)).unwrap_err();
        assert_eq!(
            err,
            BridgeError::InsufficientFunds {
                required: U256::from(1100u64),
                available: U256::from(1050u64),
            }
        );
    }
}
