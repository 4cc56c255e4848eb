//! Property tests for the formula set.

use super::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn amdahl_is_at_least_one_and_non_decreasing(
        f in 0.0..1.0f64,
        p in 1u32..1000,
    ) {
        let s1 = amdahl_speedup(f, p).unwrap();
        let s2 = amdahl_speedup(f, p + 1).unwrap();
        prop_assert!(s1 >= 1.0 - 1e-12, "speedup {} below 1 for f={} p={}", s1, f, p);
        prop_assert!(s2 >= s1 - 1e-12, "speedup decreased from {} to {} at p={}", s1, s2, p);
    }

    #[test]
    fn amdahl_is_bounded_by_inverse_serial_fraction(
        f in 0.01..=1.0f64,
        p in 1u32..10_000,
    ) {
        let s = amdahl_speedup(f, p).unwrap();
        prop_assert!(s <= 1.0 / f + 1e-9);
    }

    #[test]
    fn amdahl_fully_parallel_matches_processor_count(p in 1u32..10_000) {
        let s = amdahl_speedup(0.0, p).unwrap();
        prop_assert!((s - f64::from(p)).abs() < 1e-9 * f64::from(p));
    }

    #[test]
    fn efficiency_of_equal_values_is_one(p in 1.0..1.0e6f64) {
        prop_assert_eq!(efficiency(p, p).unwrap(), 1.0);
    }

    #[test]
    fn pipeline_speedup_ignores_stage_time(
        k in 1u32..1000,
        p in 1u32..1000,
        t in 0.001..1000.0f64,
    ) {
        let s = balanced_pipeline_speedup(k, p, t).unwrap();
        let expected = f64::from(k) * f64::from(p) / (f64::from(k) + f64::from(p) - 1.0);
        prop_assert!((s - expected).abs() <= 1e-9 * expected);
    }

    #[test]
    fn pipeline_single_stage_efficiency_is_one(
        k in 1u32..1000,
        t in 0.001..1000.0f64,
    ) {
        let e = balanced_pipeline_efficiency(k, 1, t).unwrap();
        prop_assert!((e - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_serial_fraction_bounds() {
    assert!(SerialFraction::new(0.0).is_ok());
    assert!(SerialFraction::new(1.0).is_ok());
    assert!(SerialFraction::new(1.0001).is_err());
    assert!(SerialFraction::new(f64::NAN).is_err());
}

#[test]
fn test_processor_count_rejects_zero() {
    assert!(ProcessorCount::new(0).is_err());
    assert_eq!(ProcessorCount::new(16).unwrap().get(), 16);
}

#[test]
fn test_pipeline_params_validation() {
    assert!(PipelineParams::new(8, 8, 0.1).is_ok());
    assert!(PipelineParams::new(8, 8, f64::INFINITY).is_err());
    assert_eq!(PipelineParams::new(8, 8, 0.1).unwrap().fill_length(), 15.0);
}

#[test]
fn test_validated_types_deserialize_with_checks() {
    let f: SerialFraction = serde_json::from_str("0.25").unwrap();
    assert_eq!(f.value(), 0.25);
    assert!(serde_json::from_str::<SerialFraction>("2.0").is_err());
    assert!(serde_json::from_str::<ProcessorCount>("0").is_err());
}
