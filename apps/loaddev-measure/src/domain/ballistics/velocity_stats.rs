//! Streaming velocity statistics.
//!
//! [`VelocityStats`] is a persistent accumulator: [`VelocityStats::add`]
//! borrows the current state and returns a new one, so a "before" state
//! stays valid for comparison. Incoming velocities are converted into the
//! reporting unit chosen at [`VelocityStats::empty`], and every derived value
//! is returned as a [`Quantity`] in that unit.
//!
//! The sum of squared deviations is maintained with Welford's update
//! `m2 += (x - mean_prev) * (x - mean_next)` and clamped at zero, so the
//! variance can never go negative for near-identical shots.

use std::borrow::Borrow;

use rust_decimal::Decimal;
use serde::Serialize;

use super::math::sqrt_decimal;
use crate::domain::shared::{DomainError, Quantity, Unit};

/// Immutable accumulator state over a sequence of speed quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VelocityStats {
    count: u64,
    sum: Decimal,
    min: Option<Decimal>,
    max: Option<Decimal>,
    m2: Decimal,
    unit: Unit,
}

/// Serializable snapshot of the derived statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VelocitySummary {
    /// Number of shots.
    pub count: u64,
    /// Mean velocity.
    pub average: Quantity,
    /// Sample standard deviation.
    pub standard_deviation: Quantity,
    /// Maximum minus minimum velocity.
    pub extreme_spread: Quantity,
}

impl VelocityStats {
    /// Zero state reporting in `unit`.
    #[must_use]
    pub const fn empty(unit: Unit) -> Self {
        Self {
            count: 0,
            sum: Decimal::ZERO,
            min: None,
            max: None,
            m2: Decimal::ZERO,
            unit,
        }
    }

    /// Fold a sequence of velocities starting from `empty(unit)`.
    ///
    /// # Errors
    ///
    /// Fails on the first velocity whose unit is not a speed compatible
    /// with `unit`.
    pub fn compute<I, Q>(velocities: I, unit: Unit) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = Q>,
        Q: Borrow<Quantity>,
    {
        let stats = velocities
            .into_iter()
            .try_fold(Self::empty(unit), |acc, v| acc.add(v.borrow()))?;
        tracing::debug!(
            count = stats.count,
            unit = %stats.unit,
            "Computed velocity statistics"
        );
        Ok(stats)
    }

    /// Return a new state with `velocity` added.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompatibleUnits` if `velocity` cannot be
    /// converted into the reporting unit.
    pub fn add(&self, velocity: &Quantity) -> Result<Self, DomainError> {
        let x = velocity.value_in(&self.unit)?;
        let overflow = || DomainError::overflow("velocity accumulation");

        let count = self.count + 1;
        let sum = self.sum.checked_add(x).ok_or_else(overflow)?;

        let m2 = if self.count == 0 {
            Decimal::ZERO
        } else {
            let prev_mean = self
                .sum
                .checked_div(Decimal::from(self.count))
                .ok_or_else(overflow)?;
            let next_mean = sum
                .checked_div(Decimal::from(count))
                .ok_or_else(overflow)?;
            let delta = x
                .checked_sub(prev_mean)
                .and_then(|a| x.checked_sub(next_mean).and_then(|b| a.checked_mul(b)))
                .ok_or_else(overflow)?;
            self.m2.checked_add(delta).ok_or_else(overflow)?.max(Decimal::ZERO)
        };

        Ok(Self {
            count,
            sum,
            min: Some(self.min.map_or(x, |m| m.min(x))),
            max: Some(self.max.map_or(x, |m| m.max(x))),
            m2,
            unit: self.unit.clone(),
        })
    }

    /// Number of velocities added.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Reporting unit.
    #[must_use]
    pub const fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Sum of all velocities.
    #[must_use]
    pub fn sum(&self) -> Quantity {
        self.quantity(self.sum)
    }

    /// Slowest velocity, if any.
    #[must_use]
    pub fn min(&self) -> Option<Quantity> {
        self.min.map(|v| self.quantity(v))
    }

    /// Fastest velocity, if any.
    #[must_use]
    pub fn max(&self) -> Option<Quantity> {
        self.max.map(|v| self.quantity(v))
    }

    /// Mean velocity; zero when empty.
    #[must_use]
    pub fn average(&self) -> Quantity {
        if self.count == 0 {
            return self.quantity(Decimal::ZERO);
        }
        self.quantity(self.sum / Decimal::from(self.count))
    }

    /// Sample variance (n - 1 denominator); zero for fewer than two shots.
    /// Expressed in the square of the reporting unit.
    #[must_use]
    pub fn variance(&self) -> Decimal {
        if self.count < 2 {
            return Decimal::ZERO;
        }
        (self.m2 / Decimal::from(self.count - 1)).max(Decimal::ZERO)
    }

    /// Sample standard deviation; zero for fewer than two shots.
    #[must_use]
    pub fn standard_deviation(&self) -> Quantity {
        self.quantity(sqrt_decimal(self.variance()).unwrap_or(Decimal::ZERO))
    }

    /// Population standard deviation (n denominator); zero when empty.
    #[must_use]
    pub fn population_standard_deviation(&self) -> Quantity {
        if self.count == 0 {
            return self.quantity(Decimal::ZERO);
        }
        let variance = (self.m2 / Decimal::from(self.count)).max(Decimal::ZERO);
        self.quantity(sqrt_decimal(variance).unwrap_or(Decimal::ZERO))
    }

    /// Maximum minus minimum; zero when empty.
    #[must_use]
    pub fn extreme_spread(&self) -> Quantity {
        match (self.min, self.max) {
            (Some(min), Some(max)) => self.quantity(max - min),
            _ => self.quantity(Decimal::ZERO),
        }
    }

    /// Snapshot of the derived values.
    #[must_use]
    pub fn summary(&self) -> VelocitySummary {
        VelocitySummary {
            count: self.count,
            average: self.average(),
            standard_deviation: self.standard_deviation(),
            extreme_spread: self.extreme_spread(),
        }
    }

    fn quantity(&self, value: Decimal) -> Quantity {
        Quantity::new(value, self.unit.clone())
    }
}
