use rust_decimal::prelude::*;
use std::str::FromStr;

/// Round to whole cents, always toward positive infinity.
pub fn round_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity)
}

/// Lenient numeric parse for user input: plain and scientific notation are accepted,
/// anything unparsable reads as zero (which record validation then rejects).
pub fn parse_lenient(raw: &str) -> Decimal {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}
