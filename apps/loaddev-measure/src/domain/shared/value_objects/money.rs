//! Monetary amount value object.

use std::fmt;

use rust_decimal::Decimal;

use super::currency::Currency;
use crate::domain::shared::DomainError;

/// A decimal amount in a specific currency.
///
/// The amount keeps the precision it was created with; `39.995 USD` is
/// never rounded to the currency's minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonetaryAmount {
    amount: Decimal,
    currency: Currency,
}

impl MonetaryAmount {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create an amount from a currency code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownCurrency` for an unresolvable code.
    pub fn of(amount: Decimal, code: &str) -> Result<Self, DomainError> {
        Ok(Self::new(amount, Currency::from_code(code)?))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Add two amounts of the same currency.
    pub fn checked_add(&self, other: &Self) -> Result<Self, DomainError> {
        self.same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| DomainError::overflow("money addition"))?;
        Ok(Self::new(amount, self.currency))
    }

    /// Subtract two amounts of the same currency.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, DomainError> {
        self.same_currency(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| DomainError::overflow("money subtraction"))?;
        Ok(Self::new(amount, self.currency))
    }

    fn same_currency(&self, other: &Self) -> Result<(), DomainError> {
        if self.currency == other.currency {
            return Ok(());
        }
        Err(DomainError::CurrencyMismatch {
            left: self.currency.code().to_string(),
            right: other.currency.code().to_string(),
        })
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_precision_is_kept() {
        let price = MonetaryAmount::of(dec!(39.995), "USD").unwrap();
        assert_eq!(price.amount().to_string(), "39.995");
        assert_eq!(price.to_string(), "39.995 USD");
    }

    #[test]
    fn test_unknown_currency() {
        assert!(matches!(
            MonetaryAmount::of(dec!(1), "ABC"),
            Err(DomainError::UnknownCurrency { .. })
        ));
    }

    #[test]
    fn test_checked_add_same_currency() {
        let a = MonetaryAmount::new(dec!(10.50), Currency::USD);
        let b = MonetaryAmount::new(dec!(0.25), Currency::USD);
        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(10.75));
    }

    #[test]
    fn test_checked_sub_goes_negative() {
        let a = MonetaryAmount::new(dec!(1), Currency::EUR);
        let b = MonetaryAmount::new(dec!(2), Currency::EUR);
        assert!(a.checked_sub(&b).unwrap().is_negative());
    }

    #[test]
    fn test_mixed_currency_rejected() {
        let a = MonetaryAmount::new(dec!(1), Currency::USD);
        let b = MonetaryAmount::new(dec!(1), Currency::EUR);
        assert_eq!(
            a.checked_add(&b).unwrap_err(),
            DomainError::CurrencyMismatch {
                left: "USD".to_string(),
                right: "EUR".to_string()
            }
        );
    }
}
