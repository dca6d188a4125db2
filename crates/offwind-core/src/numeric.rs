//! Null-safe decimal arithmetic underlying every formula in the crate.
//!
//! Monetary and ratio values are always `rust_decimal::Decimal`; an absent
//! value is `None`, never a placeholder zero. Ratios are rounded to
//! [`RATIO_SCALE`] fractional digits before percentage conversion and
//! percentages to [`PERCENT_SCALE`], round-half-up in both cases, so chained
//! calculations do not accumulate rounding drift.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept on intermediate ratios.
pub const RATIO_SCALE: u32 = 4;

/// Fractional digits kept on percentages.
pub const PERCENT_SCALE: u32 = 2;

/// Round to `scale` fractional digits with ties going away from zero.
///
/// Scale and mode are explicit parameters rather than ambient context so
/// results are reproducible regardless of call site.
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// The value, or the additive identity when absent.
///
/// Makes optional ledger fields summable without special-casing absence.
pub fn zero_or_value(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

/// Divide two optional decimals, returning `None` when either operand is
/// absent or the denominator is zero. The quotient is rounded to
/// [`RATIO_SCALE`] digits, half-up.
pub fn safe_divide(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    let n = numerator?;
    let d = denominator?;
    if d.is_zero() {
        return None;
    }
    Some(round_half_up(n / d, RATIO_SCALE))
}

/// Convert a ratio to a percentage (x100), rounded to [`PERCENT_SCALE`]
/// digits, half-up. `None` propagates.
pub fn to_percent(value: Option<Decimal>) -> Option<Decimal> {
    value.map(|v| round_half_up(v * Decimal::ONE_HUNDRED, PERCENT_SCALE))
}
