//! Zero-coupon term structure with date-keyed knots.
//!
//! The curve stores (date, rate) knots against a base date and converts
//! between rates and discount factors under its day-count convention and
//! compounding basis. Interpolation works in year-fraction coordinates;
//! log-discount arithmetic is used wherever possible to keep long-tenor
//! precision.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::PricingError;
use crate::rates::compounding::CompoundingBasis;
use crate::rates::day_count::{DayCountConvention, year_fraction};
use crate::rates::interpolation::InterpolationMethod;

/// A single (date, rate) knot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Zero-coupon yield curve anchored at a base date.
///
/// Knot dates are strictly increasing and never precede the base date; a
/// curve has at least one knot. Rates are interpreted under the curve's
/// day-count convention and compounding basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroCurve {
    pub base_date: NaiveDate,
    pub points: Vec<CurvePoint>,
    pub day_count: DayCountConvention,
    pub compounding: CompoundingBasis,
}

impl ZeroCurve {
    /// Creates a curve from (date, rate) pairs, validating the knot layout.
    pub fn new(
        base_date: NaiveDate,
        points: Vec<(NaiveDate, f64)>,
        day_count: DayCountConvention,
        compounding: CompoundingBasis,
    ) -> Result<Self, PricingError> {
        if points.is_empty() {
            return Err(PricingError::InvalidInput(
                "curve requires at least one knot".into(),
            ));
        }
        for &(date, rate) in &points {
            if !rate.is_finite() {
                return Err(PricingError::InvalidInput(format!(
                    "curve rate at {date} must be finite, got {rate}"
                )));
            }
            if date < base_date {
                return Err(PricingError::InvalidInput(format!(
                    "curve date {date} precedes base date {base_date}"
                )));
            }
        }
        for pair in points.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(PricingError::InvalidInput(format!(
                    "curve dates must be strictly increasing, got {} then {}",
                    pair[0].0, pair[1].0
                )));
            }
        }

        Ok(Self {
            base_date,
            points: points
                .into_iter()
                .map(|(date, rate)| CurvePoint { date, rate })
                .collect(),
            day_count,
            compounding,
        })
    }

    /// Creates a curve from parallel date and rate series.
    pub fn from_series(
        base_date: NaiveDate,
        dates: &[NaiveDate],
        rates: &[f64],
        day_count: DayCountConvention,
        compounding: CompoundingBasis,
    ) -> Result<Self, PricingError> {
        if dates.len() != rates.len() {
            return Err(PricingError::InvalidInput(format!(
                "dates and rates must have the same length ({} vs {})",
                dates.len(),
                rates.len()
            )));
        }
        Self::new(
            base_date,
            dates.iter().copied().zip(rates.iter().copied()).collect(),
            day_count,
            compounding,
        )
    }

    /// Year fraction from the base date under the curve's day count.
    pub fn time_from_base(&self, date: NaiveDate) -> f64 {
        year_fraction(self.base_date, date, self.day_count)
    }

    /// Discount factor at `target`, interpolating with `method`.
    ///
    /// Dates on or before the base date return exactly 1. Beyond either end
    /// of the knot range the boundary knot rate is held flat.
    pub fn discount_factor(
        &self,
        target: NaiveDate,
        method: InterpolationMethod,
    ) -> Result<f64, PricingError> {
        let t = self.time_from_base(target);
        if t <= 0.0 {
            return Ok(1.0);
        }

        let first = self.points[0];
        let last = self.points[self.points.len() - 1];

        let df = if target >= last.date {
            self.compounding.discount_factor(last.rate, t)?
        } else if target <= first.date {
            self.compounding.discount_factor(first.rate, t)?
        } else {
            let idx = self.points.partition_point(|p| p.date < target);
            let lo = self.points[idx - 1];
            let hi = self.points[idx];
            let t_lo = self.time_from_base(lo.date);
            let t_hi = self.time_from_base(hi.date);

            if t_hi - t_lo <= f64::EPSILON {
                // Distinct dates can collapse under 30/360; take the later knot.
                self.compounding.discount_factor(hi.rate, t)?
            } else {
                let w = (t - t_lo) / (t_hi - t_lo);
                match method {
                    InterpolationMethod::Linear => {
                        let rate = lo.rate + w * (hi.rate - lo.rate);
                        self.compounding.discount_factor(rate, t)?
                    }
                    InterpolationMethod::FlatForward => {
                        let ln_lo = self.compounding.discount_factor(lo.rate, t_lo)?.ln();
                        let ln_hi = self.compounding.discount_factor(hi.rate, t_hi)?.ln();
                        (ln_lo + w * (ln_hi - ln_lo)).exp()
                    }
                    InterpolationMethod::LinearForward => {
                        let z_lo = self.continuous_zero(lo, t_lo)?;
                        let z_hi = self.continuous_zero(hi, t_hi)?;
                        let z = z_lo + w * (z_hi - z_lo);
                        (-z * t).exp()
                    }
                }
            }
        };

        if df.is_finite() && df > 0.0 {
            Ok(df)
        } else {
            Err(PricingError::NumericalError(format!(
                "discount factor at {target} is not positive finite"
            )))
        }
    }

    /// Zero rate at `target` in the curve's compounding basis.
    pub fn zero_rate(
        &self,
        target: NaiveDate,
        method: InterpolationMethod,
    ) -> Result<f64, PricingError> {
        let t = self.time_from_base(target);
        if t <= 0.0 {
            return Err(PricingError::OutOfRange(format!(
                "zero rate is undefined at or before the base date ({target})"
            )));
        }
        let df = self.discount_factor(target, method)?;
        self.compounding.implied_rate(df, t)
    }

    /// Forward rate between two dates, via the forward discount-factor
    /// identity `FDF = DF(end) / DF(start)`.
    pub fn forward_rate(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        method: InterpolationMethod,
    ) -> Result<f64, PricingError> {
        if end <= start {
            return Err(PricingError::InvalidInput(format!(
                "forward period end {end} must be after start {start}"
            )));
        }

        let df_start = self.discount_factor(start, method)?;
        let df_end = self.discount_factor(end, method)?;
        let span = year_fraction(start, end, self.day_count);
        if span <= 0.0 {
            return Err(PricingError::OutOfRange(format!(
                "forward period {start} to {end} has zero length under {}",
                self.day_count
            )));
        }
        self.compounding.implied_rate(df_end / df_start, span)
    }

    /// Continuously-compounded zero yield at a knot, taking the limit value
    /// for knots sitting on the base date.
    fn continuous_zero(&self, point: CurvePoint, t: f64) -> Result<f64, PricingError> {
        if t <= f64::EPSILON {
            return self.compounding.continuous_equivalent(point.rate);
        }
        let df = self.compounding.discount_factor(point.rate, t)?;
        Ok(-df.ln() / t)
    }
}
