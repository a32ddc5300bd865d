//! Survival-probability term structure.
//!
//! A survival curve shares the zero-curve engine but carries hazard
//! semantics: knot rates are default intensities, conventionally under
//! continuous compounding, and the engine's discount factor at a date is the
//! survival probability to that date. Keeping the type distinct stops
//! survival quantities leaking into interest-rate code and vice versa.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::PricingError;
use crate::rates::compounding::CompoundingBasis;
use crate::rates::day_count::{DayCountConvention, year_fraction};
use crate::rates::interpolation::InterpolationMethod;
use crate::rates::zero_curve::{CurvePoint, ZeroCurve};

/// Credit curve mapping dates to survival probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ZeroCurve", into = "ZeroCurve")]
pub struct SurvivalCurve {
    curve: ZeroCurve,
}

impl SurvivalCurve {
    /// Wraps a hazard-rate curve, rejecting curves whose implied survival
    /// probabilities are not monotone non-increasing in (0, 1].
    pub fn new(curve: ZeroCurve) -> Result<Self, PricingError> {
        let mut previous = 1.0_f64;
        for point in &curve.points {
            let t = curve.time_from_base(point.date);
            let survival = curve.compounding.discount_factor(point.rate, t)?;
            if survival > previous + 1.0e-12 {
                return Err(PricingError::Inconsistent(format!(
                    "implied survival probability rises to {survival} at {}",
                    point.date
                )));
            }
            previous = survival;
        }
        Ok(Self { curve })
    }

    /// Builds a curve from piecewise-constant hazard segments.
    ///
    /// Each entry `(date, hazard)` is the constant intensity on the segment
    /// ending at `date`; segments start at the base date. Knot rates are the
    /// cumulative-average hazards, so flat-forward interpolation reproduces
    /// the piecewise-constant intensities exactly.
    pub fn from_piecewise_hazard(
        base_date: NaiveDate,
        day_count: DayCountConvention,
        segments: &[(NaiveDate, f64)],
    ) -> Result<Self, PricingError> {
        if segments.is_empty() {
            return Err(PricingError::InvalidInput(
                "survival curve requires at least one hazard segment".into(),
            ));
        }

        let mut points = Vec::with_capacity(segments.len());
        let mut cumulative = 0.0_f64;
        let mut prev_t = 0.0_f64;
        for &(date, hazard) in segments {
            if !hazard.is_finite() || hazard < 0.0 {
                return Err(PricingError::InvalidInput(format!(
                    "hazard for segment ending {date} must be finite and non-negative, got {hazard}"
                )));
            }
            let t = year_fraction(base_date, date, day_count);
            if t <= prev_t {
                return Err(PricingError::InvalidInput(format!(
                    "hazard segment dates must be strictly increasing past the base date, got {date}"
                )));
            }
            cumulative += hazard * (t - prev_t);
            points.push((date, cumulative / t));
            prev_t = t;
        }

        Self::new(ZeroCurve::new(
            base_date,
            points,
            day_count,
            CompoundingBasis::Continuous,
        )?)
    }

    /// Curve anchor date, where survival is exactly 1.
    pub fn base_date(&self) -> NaiveDate {
        self.curve.base_date
    }

    /// Day-count convention the hazard rates are measured under.
    pub fn day_count(&self) -> DayCountConvention {
        self.curve.day_count
    }

    /// Curve knots as (date, hazard-style rate) points.
    pub fn knots(&self) -> &[CurvePoint] {
        &self.curve.points
    }

    /// Survival probability to `date`; 1 on or before the base date.
    pub fn survival_probability(
        &self,
        date: NaiveDate,
        method: InterpolationMethod,
    ) -> Result<f64, PricingError> {
        self.curve.discount_factor(date, method)
    }

    /// Probability of default inside `(start, end]`.
    pub fn default_probability(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        method: InterpolationMethod,
    ) -> Result<f64, PricingError> {
        if end <= start {
            return Ok(0.0);
        }
        let s_start = self.survival_probability(start, method)?;
        let s_end = self.survival_probability(end, method)?;
        Ok((s_start - s_end).clamp(0.0, 1.0))
    }

    /// Average continuous hazard over `(start, end]`, from the survival
    /// ratio.
    pub fn forward_hazard(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        method: InterpolationMethod,
    ) -> Result<f64, PricingError> {
        let span = year_fraction(start, end, self.curve.day_count);
        if span <= 0.0 {
            return Err(PricingError::OutOfRange(format!(
                "hazard period {start} to {end} has no positive length"
            )));
        }
        let s_start = self.survival_probability(start, method)?;
        let s_end = self.survival_probability(end, method)?;
        Ok(-(s_end / s_start).ln() / span)
    }
}

impl TryFrom<ZeroCurve> for SurvivalCurve {
    type Error = PricingError;

    fn try_from(curve: ZeroCurve) -> Result<Self, Self::Error> {
        Self::new(curve)
    }
}

impl From<SurvivalCurve> for ZeroCurve {
    fn from(survival: SurvivalCurve) -> Self {
        survival.curve
    }
}
