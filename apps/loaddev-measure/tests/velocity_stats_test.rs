//! Integration tests for the velocity statistics accumulator.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use loaddev_measure::units::{FOOT_PER_SECOND, METRE, METRE_PER_SECOND};
use loaddev_measure::{DomainError, Quantity, VelocityStats, default_codec};

fn fps(value: Decimal) -> Quantity {
    Quantity::new(value, FOOT_PER_SECOND)
}

fn chrono_string() -> Vec<Quantity> {
    [dec!(2800), dec!(2810), dec!(2790), dec!(2805), dec!(2795)]
        .into_iter()
        .map(fps)
        .collect()
}

#[test]
fn test_empty_accumulator_is_zero_in_unit() {
    let stats = VelocityStats::empty(METRE_PER_SECOND);
    for q in [stats.average(), stats.standard_deviation(), stats.extreme_spread()] {
        assert_eq!(q.value(), Decimal::ZERO);
        assert_eq!(q.unit(), &METRE_PER_SECOND);
    }
}

#[test]
fn test_known_statistics() {
    let stats = VelocityStats::compute(chrono_string(), FOOT_PER_SECOND).unwrap();
    assert_eq!(stats.average().value(), dec!(2800.0));
    assert_eq!(stats.extreme_spread().value(), dec!(20.0));

    // Population deviation of this string is sqrt(50).
    let population = stats.population_standard_deviation().value();
    assert!((population - dec!(7.07)).abs() < dec!(0.5), "{population}");

    // Sample deviation uses n - 1: sqrt(62.5).
    let sample = stats.standard_deviation().value();
    assert!((sample - dec!(7.906)).abs() < dec!(0.01), "{sample}");
    assert!(sample > population);
}

#[test]
fn test_single_value() {
    let stats = VelocityStats::compute([fps(dec!(2812))], FOOT_PER_SECOND).unwrap();
    assert_eq!(stats.standard_deviation().value(), Decimal::ZERO);
    assert_eq!(stats.extreme_spread().value(), Decimal::ZERO);
}

#[test]
fn test_unit_mixed_accumulation() {
    let direct =
        VelocityStats::compute([fps(dec!(2800)), fps(dec!(2800))], FOOT_PER_SECOND).unwrap();
    let metric_shot = fps(dec!(2800)).to(&METRE_PER_SECOND).unwrap();
    assert_eq!(metric_shot.value(), dec!(853.44));

    let mixed = VelocityStats::compute([fps(dec!(2800)), metric_shot], FOOT_PER_SECOND).unwrap();
    let diff = (mixed.average().value() - direct.average().value()).abs();
    assert!(diff < dec!(0.000001), "{diff}");
}

#[test]
fn test_statistics_reported_in_target_unit() {
    let stats = VelocityStats::compute(chrono_string(), METRE_PER_SECOND).unwrap();
    assert_eq!(stats.average().unit(), &METRE_PER_SECOND);
    assert_eq!(stats.average().value(), dec!(853.44));
    assert_eq!(stats.extreme_spread().value(), dec!(6.096));
}

#[test]
fn test_incompatible_unit_raises() {
    let err = VelocityStats::compute([fps(dec!(2800)), Quantity::new(dec!(1), METRE)], FOOT_PER_SECOND)
        .unwrap_err();
    assert!(matches!(err, DomainError::IncompatibleUnits { .. }));
}

#[test]
fn test_before_state_is_reusable() {
    let base = VelocityStats::compute(chrono_string(), FOOT_PER_SECOND).unwrap();
    let fast = base.add(&fps(dec!(2900))).unwrap();
    let slow = base.add(&fps(dec!(2700))).unwrap();
    assert_eq!(base.count(), 5);
    assert_eq!(fast.extreme_spread().value(), dec!(110));
    assert_eq!(slow.extreme_spread().value(), dec!(110));
    assert!(fast.average().value() > slow.average().value());
}

#[test]
fn test_summary_serializes_through_codec() {
    let summary = VelocityStats::compute(chrono_string(), FOOT_PER_SECOND)
        .unwrap()
        .summary();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["count"], json!(5));
    assert_eq!(json["average"]["unit"], json!("[ft_i]/s"));
    assert_eq!(json["extreme_spread"]["unit"], json!("[ft_i]/s"));
}

#[test]
fn test_decoded_wire_velocities() {
    let shots: Vec<Quantity> = [
        json!({"value": 2800, "unit": "[ft_i]/s"}),
        json!({"value": 853.44, "unit": "m/s"}),
    ]
    .iter()
    .map(|j| default_codec().decode_quantity(j).unwrap())
    .collect();
    let stats = VelocityStats::compute(&shots, FOOT_PER_SECOND).unwrap();
    assert_eq!(stats.average().value(), dec!(2800));
}

proptest! {
    #[test]
    fn prop_compute_equals_manual_adds(
        values in prop::collection::vec(1_000_i64..5_000, 0..40),
    ) {
        let shots: Vec<Quantity> = values.iter().map(|v| fps(Decimal::from(*v))).collect();

        let mut manual = VelocityStats::empty(FOOT_PER_SECOND);
        for shot in &shots {
            manual = manual.add(shot).unwrap();
        }
        let folded = VelocityStats::compute(&shots, FOOT_PER_SECOND).unwrap();
        prop_assert_eq!(manual, folded);
    }

    #[test]
    fn prop_near_identical_values_never_negative(
        base in 2_000_i64..4_000,
        jitter in prop::collection::vec(0_i64..3, 1..30),
    ) {
        let shots = jitter
            .iter()
            .map(|j| fps(Decimal::from(base) + Decimal::new(*j, 12)));
        let stats = VelocityStats::compute(shots, FOOT_PER_SECOND).unwrap();
        prop_assert!(stats.variance() >= Decimal::ZERO);
        prop_assert!(stats.standard_deviation().value() >= Decimal::ZERO);
        prop_assert!(stats.population_standard_deviation().value() >= Decimal::ZERO);
    }

    #[test]
    fn prop_spread_bounds_deviation(
        values in prop::collection::vec(1_000_i64..5_000, 2..30),
    ) {
        let stats = VelocityStats::compute(
            values.iter().map(|v| fps(Decimal::from(*v))),
            FOOT_PER_SECOND,
        )
        .unwrap();
        prop_assert!(stats.population_standard_deviation().value() <= stats.extreme_spread().value());
    }
}
