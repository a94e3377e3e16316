//! Token Amount Codec
//!
//! Converts between decimal strings and fixed-point `U256` amounts at a
//! parameterized precision (ERIS uses 18 decimals, same as the native
//! currency). Conversion never rounds: inputs with more fractional digits
//! than the precision are rejected rather than truncated.

use alloy::primitives::U256;

use crate::error::BridgeError;

/// Decimal precision of the ERIS token (and of the native currency).
pub const ERIS_DECIMALS: u8 = 18;

fn malformed(input: &str, reason: impl Into<String>) -> BridgeError {
    BridgeError::MalformedAmount {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn pow10(exp: u8) -> U256 {
    U256::from(10u8).pow(U256::from(exp))
}

fn parse_digits(input: &str, digits: &str) -> Result<U256, BridgeError> {
    let mut value = U256::ZERO;
    for c in digits.chars() {
        let d = c
            .to_digit(10)
            .ok_or_else(|| malformed(input, format!("unexpected character {:?}", c)))?;
        value = value
            .checked_mul(U256::from(10u8))
            .and_then(|v| v.checked_add(U256::from(d)))
            .ok_or_else(|| malformed(input, "value exceeds 256 bits"))?;
    }
    Ok(value)
}

/// Parse a decimal string into its smallest-unit representation.
///
/// Accepts plain decimals like `"100"`, `"1.5"` or `".5"`. Negative values,
/// empty input, and more than `decimals` fractional digits are rejected.
pub fn parse_amount(input: &str, decimals: u8) -> Result<U256, BridgeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(malformed(input, "empty amount"));
    }
    if trimmed.starts_with('-') {
        return Err(malformed(input, "negative amounts are not representable"));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (trimmed, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(malformed(input, "no digits"));
    }
    if frac_part.len() > decimals as usize {
        return Err(malformed(
            input,
            format!("more than {} fractional digits", decimals),
        ));
    }

    let int_value = parse_digits(input, int_part)?;
    let frac_value = parse_digits(input, frac_part)?;
    let frac_scale = pow10(decimals - frac_part.len() as u8);

    int_value
        .checked_mul(pow10(decimals))
        .and_then(|scaled| frac_value.checked_mul(frac_scale).and_then(|f| scaled.checked_add(f)))
        .ok_or_else(|| malformed(input, "value exceeds 256 bits"))
}

/// Format a smallest-unit amount as a canonical decimal string.
///
/// Trailing fractional zeros are trimmed; whole values carry no decimal
/// point. Exact inverse of [`parse_amount`] for canonical inputs.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let (whole, frac) = amount.div_rem(pow10(decimals));
    if frac.is_zero() {
        return whole.to_string();
    }
    let digits = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_amount() {
        let amount = parse_amount("100", 18).unwrap();
        assert_eq!(amount, U256::from(100u64) * pow10(18));
    }

    #[test]
    fn test_parse_fractional_amount() {
        let amount = parse_amount("1.5", 18).unwrap();
        assert_eq!(amount, U256::from(15u64) * pow10(17));

        let amount = parse_amount(".5", 18).unwrap();
        assert_eq!(amount, U256::from(5u64) * pow10(17));
    }

    #[test]
    fn test_parse_full_precision() {
        let amount = parse_amount("0.000000000000000001", 18).unwrap();
        assert_eq!(amount, U256::from(1u64));
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        let err = parse_amount("1.0000000000000000001", 18).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedAmount { .. }));
    }

    #[test]
    fn test_parse_rejects_negative() {
        let err = parse_amount("-1", 18).unwrap_err();
        assert!(matches!(err, BridgeError::MalformedAmount { .. }));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", " ", ".", "1e18", "0x10", "1.2.3", "ten"] {
            assert!(
                parse_amount(bad, 18).is_err(),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_format_whole_amount() {
        let amount = U256::from(100u64) * pow10(18);
        assert_eq!(format_amount(amount, 18), "100");
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        let amount = U256::from(15u64) * pow10(17);
        assert_eq!(format_amount(amount, 18), "1.5");
    }

    #[test]
    fn test_format_small_fraction() {
        assert_eq!(format_amount(U256::from(1u64), 18), "0.000000000000000001");
    }

    #[test]
    fn test_round_trip_canonical_inputs() {
        for s in ["0", "1", "100", "1.5", "0.25", "123456.789", "0.000000000000000001"] {
            let parsed = parse_amount(s, 18).unwrap();
            assert_eq!(format_amount(parsed, 18), s, "round-trip of {:?}", s);
        }
    }

    #[test]
    fn test_round_trip_canonicalizes() {
        // "1.50" parses fine but formats back canonically
        let parsed = parse_amount("1.50", 18).unwrap();
        assert_eq!(format_amount(parsed, 18), "1.5");
    }

    #[test]
    fn test_other_precisions() {
        let amount = parse_amount("1.25", 6).unwrap();
        assert_eq!(amount, U256::from(1_250_000u64));
        assert_eq!(format_amount(amount, 6), "1.25");
    }
}
