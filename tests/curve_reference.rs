//! Zero-curve reference tests.
//!
//! The sample curve matches the standard model's documentation example:
//! anchored 2025-05-05 with knots at 6 months, 1, 2, and 5 years.

use approx::assert_relative_eq;
use chrono::NaiveDate;

use opencds::core::PricingError;
use opencds::rates::{
    CompoundingBasis, DayCountConvention, InterpolationMethod, ZeroCurve, year_fraction,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_curve() -> ZeroCurve {
    ZeroCurve::from_series(
        d(2025, 5, 5),
        &[d(2025, 11, 5), d(2026, 5, 5), d(2027, 5, 5), d(2030, 5, 5)],
        &[0.03, 0.035, 0.04, 0.045],
        DayCountConvention::Act365Fixed,
        CompoundingBasis::Annual,
    )
    .unwrap()
}

const METHODS: [InterpolationMethod; 3] = [
    InterpolationMethod::Linear,
    InterpolationMethod::FlatForward,
    InterpolationMethod::LinearForward,
];

// ===========================================================================
// 1. Discount factors
// ===========================================================================

#[test]
fn discount_factor_at_base_is_exactly_one() {
    let curve = sample_curve();
    for method in METHODS {
        assert_eq!(curve.discount_factor(d(2025, 5, 5), method).unwrap(), 1.0);
    }
}

#[test]
fn flat_forward_discount_factor_mid_curve() {
    let curve = sample_curve();
    let df = curve
        .discount_factor(d(2026, 1, 5), InterpolationMethod::FlatForward)
        .unwrap();
    assert!(df > 0.97 && df < 0.99, "df = {df}");
}

#[test]
fn discount_factors_decrease_with_maturity() {
    let curve = sample_curve();
    for method in METHODS {
        let mut prev = 1.0;
        for months in 1..=80 {
            let date = opencds::rates::add_months(d(2025, 5, 5), months);
            let df = curve.discount_factor(date, method).unwrap();
            assert!(df > 0.0 && df < prev, "df not decreasing at {date}");
            prev = df;
        }
    }
}

// ===========================================================================
// 2. Zero rates
// ===========================================================================

#[test]
fn flat_forward_zero_rate_sits_inside_the_bracketing_segment() {
    let curve = sample_curve();
    let rate = curve
        .zero_rate(d(2028, 5, 5), InterpolationMethod::FlatForward)
        .unwrap();
    assert!(rate > 0.040 && rate < 0.045, "rate = {rate}");
}

#[test]
fn linear_zero_rate_is_strictly_between_adjacent_knots() {
    let curve = sample_curve();
    let rate = curve
        .zero_rate(d(2028, 5, 5), InterpolationMethod::Linear)
        .unwrap();
    assert!(rate > 0.040 && rate < 0.045, "rate = {rate}");

    // Closer to the 2y knot than the 5y knot in proportion to time.
    let t2 = curve.time_from_base(d(2027, 5, 5));
    let t5 = curve.time_from_base(d(2030, 5, 5));
    let t = curve.time_from_base(d(2028, 5, 5));
    let expected = 0.04 + (t - t2) / (t5 - t2) * 0.005;
    assert_relative_eq!(rate, expected, epsilon = 1e-12);
}

#[test]
fn zero_rate_round_trips_to_the_discount_factor() {
    let curve = sample_curve();
    for method in METHODS {
        for date in [d(2026, 1, 5), d(2027, 11, 20), d(2029, 6, 1), d(2033, 5, 5)] {
            let rate = curve.zero_rate(date, method).unwrap();
            let df = curve.discount_factor(date, method).unwrap();
            let recovered = curve
                .compounding
                .discount_factor(rate, curve.time_from_base(date))
                .unwrap();
            assert_relative_eq!(df, recovered, epsilon = 1e-12);
        }
    }
}

#[test]
fn zero_rate_on_the_base_date_is_rejected() {
    let curve = sample_curve();
    let result = curve.zero_rate(d(2025, 5, 5), InterpolationMethod::FlatForward);
    assert!(matches!(result, Err(PricingError::OutOfRange(_))));
}

// ===========================================================================
// 3. Forward rates
// ===========================================================================

#[test]
fn forward_rate_matches_the_segment_forward() {
    let curve = sample_curve();
    let start = d(2026, 5, 5);
    let end = d(2027, 5, 5);

    let fwd = curve
        .forward_rate(start, end, InterpolationMethod::FlatForward)
        .unwrap();

    // Both endpoints are knots, so the forward is fixed by the knot
    // discount factors alone.
    let df_start = curve
        .discount_factor(start, InterpolationMethod::FlatForward)
        .unwrap();
    let df_end = curve
        .discount_factor(end, InterpolationMethod::FlatForward)
        .unwrap();
    let span = year_fraction(start, end, DayCountConvention::Act365Fixed);
    let expected = curve
        .compounding
        .implied_rate(df_end / df_start, span)
        .unwrap();

    assert_relative_eq!(fwd, expected, epsilon = 1e-13);
    assert!(fwd > 0.04 && fwd < 0.05, "fwd = {fwd}");
}

#[test]
fn forward_rate_is_invariant_to_interpolation_at_knots() {
    let curve = sample_curve();
    let start = d(2027, 5, 5);
    let end = d(2030, 5, 5);
    let reference = curve
        .forward_rate(start, end, InterpolationMethod::FlatForward)
        .unwrap();
    for method in METHODS {
        assert_relative_eq!(
            curve.forward_rate(start, end, method).unwrap(),
            reference,
            epsilon = 1e-12
        );
    }
}

// ===========================================================================
// 4. Construction and degenerate curves
// ===========================================================================

#[test]
fn construction_rejects_malformed_series() {
    let base = d(2025, 5, 5);
    let dcc = DayCountConvention::Act365Fixed;
    let comp = CompoundingBasis::Annual;

    assert!(matches!(
        ZeroCurve::from_series(base, &[], &[], dcc, comp),
        Err(PricingError::InvalidInput(_))
    ));
    assert!(matches!(
        ZeroCurve::from_series(base, &[d(2026, 5, 5)], &[0.03, 0.04], dcc, comp),
        Err(PricingError::InvalidInput(_))
    ));
    assert!(matches!(
        ZeroCurve::from_series(
            base,
            &[d(2027, 5, 5), d(2026, 5, 5)],
            &[0.03, 0.04],
            dcc,
            comp
        ),
        Err(PricingError::InvalidInput(_))
    ));
    assert!(matches!(
        ZeroCurve::from_series(base, &[d(2026, 5, 5)], &[f64::INFINITY], dcc, comp),
        Err(PricingError::InvalidInput(_))
    ));
}

#[test]
fn single_knot_curves_agree_across_methods() {
    let curve = ZeroCurve::from_series(
        d(2025, 5, 5),
        &[d(2028, 5, 5)],
        &[0.04],
        DayCountConvention::Act365Fixed,
        CompoundingBasis::Annual,
    )
    .unwrap();

    for date in [d(2025, 8, 1), d(2027, 2, 14), d(2028, 5, 5), d(2033, 1, 1)] {
        let reference = curve
            .discount_factor(date, InterpolationMethod::Linear)
            .unwrap();
        for method in METHODS {
            assert_relative_eq!(
                curve.discount_factor(date, method).unwrap(),
                reference,
                epsilon = 1e-14
            );
        }
    }
}
