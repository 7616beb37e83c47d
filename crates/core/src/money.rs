//! Fixed-precision money type
//!
//! All monetary quantities in this crate are `rust_decimal::Decimal`, never a
//! float (component design §4.6, design notes §9). Six fractional digits,
//! rounded half-even.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

pub const MONEY_SCALE: u32 = 6;

/// Round a decimal amount to the crate's money precision using half-even
/// (banker's) rounding, the standard for accounting aggregation.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

pub fn zero() -> Decimal {
    Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(round_money(dec!(1.0000005)), dec!(1.000000));
        assert_eq!(round_money(dec!(1.0000015)), dec!(1.000002));
    }

    #[test]
    fn preserves_scale() {
        let rounded = round_money(dec!(12.3));
        assert_eq!(rounded.scale(), MONEY_SCALE);
    }
}
