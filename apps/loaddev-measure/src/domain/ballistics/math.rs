//! Decimal math helpers for shot statistics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TWO: Decimal = dec!(2);
const TOLERANCE: Decimal = dec!(0.0000000000001);

/// Approximate square root using Newton's method.
///
/// Returns `None` for negative input.
pub fn sqrt_decimal(value: Decimal) -> Option<Decimal> {
    if value < Decimal::ZERO {
        return None;
    }
    if value == Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let mut guess = if value > Decimal::ONE {
        value / TWO
    } else {
        Decimal::ONE
    };

    for _ in 0..100 {
        let Some(quotient) = value.checked_div(guess) else {
            return Some(guess);
        };
        let next = (guess + quotient) / TWO;
        if (next - guess).abs() < TOLERANCE {
            return Some(next);
        }
        guess = next;
    }

    Some(guess)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_perfect_squares() {
        let root = sqrt_decimal(dec!(144)).unwrap();
        assert!((root - dec!(12)).abs() < dec!(0.0000001));
        let root = sqrt_decimal(dec!(0.25)).unwrap();
        assert!((root - dec!(0.5)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_sqrt_zero_and_negative() {
        assert_eq!(sqrt_decimal(Decimal::ZERO), Some(Decimal::ZERO));
        assert_eq!(sqrt_decimal(dec!(-1)), None);
    }

    #[test]
    fn test_sqrt_irrational() {
        let root = sqrt_decimal(dec!(50)).unwrap();
        assert!((root - dec!(7.0710678118)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_sqrt_tiny() {
        let root = sqrt_decimal(dec!(0.0000000001)).unwrap();
        assert!((root - dec!(0.00001)).abs() < dec!(0.0000001));
    }
}
