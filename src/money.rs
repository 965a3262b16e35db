//! Money helpers shared by the split engine and the balance summary.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ApiError;

/// Half-up rounding to two decimal places. Applied independently after
/// every division step, so rounding drift is never reconciled against
/// the original amount.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Amounts are persisted as decimal strings. A row that fails to parse
/// is a corrupt record, not a client error.
pub fn parse_stored_amount(raw: &str) -> Result<Decimal, ApiError> {
    raw.parse::<Decimal>()
        .map_err(|_| ApiError::Corrupt(format!("unparseable amount {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round2(dec("50.005")), dec("50.01"));
        assert_eq!(round2(dec("33.333")), dec("33.33"));
        assert_eq!(round2(dec("16.665")), dec("16.67"));
    }

    #[test]
    fn parses_stored_amounts() {
        assert_eq!(parse_stored_amount("25.00").expect("parses"), dec("25.00"));
        assert!(parse_stored_amount("not a number").is_err());
    }
}
