//! Credit-curve bootstrapping from market CDS quotes.
//!
//! Benchmarks are processed from the shortest tenor outward. Each step
//! appends one hazard segment to the curve and solves for the constant
//! intensity on that segment which prices the benchmark contract to par;
//! earlier segments are never revisited.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::PricingError;
use crate::credit::contract::{CdsContract, CdsCouponInfo, CdsDates, Frequency};
use crate::credit::pricer::CdsPricer;
use crate::credit::survival_curve::SurvivalCurve;
use crate::math::root_finding::{RootConfig, expand_bracket, find_root_brent};
use crate::rates::calendar::{BusinessDayConvention, add_business_days};
use crate::rates::day_count::{DayCountConvention, add_tenor};
use crate::rates::zero_curve::ZeroCurve;

/// Standard contract date offsets, in business days from the valuation
/// date.
pub const STEP_IN_BUSINESS_DAYS: i32 = 1;
pub const CASH_SETTLE_BUSINESS_DAYS: i32 = 3;

/// Day count the bootstrapped hazard curve is expressed in.
pub const HAZARD_CURVE_DAY_COUNT: DayCountConvention = DayCountConvention::Act365Fixed;

const MAX_BRACKET_EXPANSIONS: usize = 60;

/// A market CDS quote: tenor in years against a running spread in decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditCurveQuote {
    pub tenor_years: f64,
    pub spread: f64,
}

/// Coupon conventions shared by every benchmark contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsConvention {
    pub payment_frequency: Frequency,
    pub day_count: DayCountConvention,
    pub business_day_convention: BusinessDayConvention,
}

impl Default for CdsConvention {
    fn default() -> Self {
        Self {
            payment_frequency: Frequency::Quarterly,
            day_count: DayCountConvention::Act360,
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
        }
    }
}

/// Bootstraps a survival curve so that every benchmark CDS prices to par.
///
/// The output curve is anchored at the valuation date, carries continuous
/// hazard rates under ACT/365F, and has one knot per benchmark maturity with
/// piecewise-constant intensity between knots.
pub fn bootstrap_credit_curve(
    discount: &ZeroCurve,
    valuation_date: NaiveDate,
    quotes: &[CreditCurveQuote],
    recovery_rate: f64,
    convention: &CdsConvention,
) -> Result<SurvivalCurve, PricingError> {
    validate_inputs(discount, valuation_date, quotes, recovery_rate)?;

    let effective = add_business_days(valuation_date, STEP_IN_BUSINESS_DAYS);
    let step_in = effective;
    let settlement = add_business_days(valuation_date, CASH_SETTLE_BUSINESS_DAYS);

    let solver = RootConfig::default();
    let mut segments: Vec<(NaiveDate, f64)> = Vec::with_capacity(quotes.len());

    for quote in quotes {
        let maturity = add_tenor(valuation_date, quote.tenor_years)?;
        if maturity <= effective {
            return Err(PricingError::InvalidInput(format!(
                "tenor {}y matures at {maturity}, on or before the standard effective date {effective}",
                quote.tenor_years
            )));
        }
        if let Some(&(previous, _)) = segments.last() {
            if maturity <= previous {
                return Err(PricingError::InvalidInput(format!(
                    "tenor {}y maps to maturity {maturity}, not after the previous knot {previous}",
                    quote.tenor_years
                )));
            }
        }

        let benchmark = CdsContract {
            dates: CdsDates {
                trade_date: valuation_date,
                effective_date: effective,
                maturity_date: maturity,
                value_date: valuation_date,
                settlement_date: settlement,
                step_in_date: step_in,
            },
            coupon_info: CdsCouponInfo {
                payment_frequency: convention.payment_frequency,
                day_count: convention.day_count,
                business_day_convention: convention.business_day_convention,
                coupon_rate: quote.spread,
            },
            notional: 1.0,
            recovery_rate,
            include_accrued_premium: true,
            is_buy_protection: true,
        };

        let mut objective = |hazard: f64| -> Result<f64, PricingError> {
            let mut candidate = segments.clone();
            candidate.push((maturity, hazard.max(0.0)));
            let survival =
                SurvivalCurve::from_piecewise_hazard(valuation_date, HAZARD_CURVE_DAY_COUNT, &candidate)?;
            CdsPricer::new(discount, &survival).mark_to_market(&benchmark)
        };

        let at_zero = objective(0.0)?;
        if at_zero.abs() <= solver.tolerance {
            segments.push((maturity, 0.0));
            continue;
        }

        // Expand the bracket upward from the flat-LGD hazard estimate.
        let guess = (quote.spread / (1.0 - recovery_rate)).max(1.0e-6);
        let (lo, hi, _, _) =
            expand_bracket(&mut objective, 0.0, 2.0 * guess, MAX_BRACKET_EXPANSIONS).map_err(
                |_| {
                    PricingError::NumericalError(format!(
                        "credit curve bootstrap non-convergent at tenor {}y: failed to bracket the hazard",
                        quote.tenor_years
                    ))
                },
            )?;

        let hazard = find_root_brent(&mut objective, lo, hi, &solver).map_err(|_| {
            PricingError::NumericalError(format!(
                "credit curve bootstrap non-convergent at tenor {}y",
                quote.tenor_years
            ))
        })?;
        segments.push((maturity, hazard.max(0.0)));
    }

    SurvivalCurve::from_piecewise_hazard(valuation_date, HAZARD_CURVE_DAY_COUNT, &segments)
}

fn validate_inputs(
    discount: &ZeroCurve,
    valuation_date: NaiveDate,
    quotes: &[CreditCurveQuote],
    recovery_rate: f64,
) -> Result<(), PricingError> {
    if quotes.is_empty() {
        return Err(PricingError::InvalidInput(
            "credit curve bootstrap requires at least one quote".into(),
        ));
    }
    if !(recovery_rate.is_finite() && recovery_rate >= 0.0 && recovery_rate < 1.0) {
        return Err(PricingError::InvalidInput(format!(
            "recovery rate must lie in [0, 1), got {recovery_rate}"
        )));
    }
    for quote in quotes {
        if !(quote.tenor_years.is_finite() && quote.tenor_years > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "quote tenor must be positive finite, got {}",
                quote.tenor_years
            )));
        }
        if !(quote.spread.is_finite() && quote.spread >= 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "quote spread must be finite and non-negative, got {}",
                quote.spread
            )));
        }
    }
    for pair in quotes.windows(2) {
        if pair[1].tenor_years <= pair[0].tenor_years {
            return Err(PricingError::InvalidInput(format!(
                "quote tenors must be strictly increasing, got {}y then {}y",
                pair[0].tenor_years, pair[1].tenor_years
            )));
        }
    }
    if valuation_date < discount.base_date {
        return Err(PricingError::Inconsistent(format!(
            "valuation date {valuation_date} precedes the discount curve base date {}",
            discount.base_date
        )));
    }
    Ok(())
}
