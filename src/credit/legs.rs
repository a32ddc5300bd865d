//! Premium and protection leg valuation.
//!
//! Both legs are valued off a joint discount/survival process assumed
//! log-linear between knots, which makes the instantaneous forward `f` and
//! hazard `h` constant on every sub-interval of the merged knot grid and
//! gives closed-form integrals. All present values are anchored to the
//! contract's value date by rescaling each curve by its own factor at that
//! date. Curve evaluation uses flat-forward interpolation, the standard
//! model's scheme.

use chrono::NaiveDate;

use crate::core::PricingError;
use crate::credit::contract::CdsContract;
use crate::credit::schedule::{AccrualPeriod, premium_schedule};
use crate::credit::survival_curve::SurvivalCurve;
use crate::rates::day_count::{DayCountConvention, year_fraction};
use crate::rates::interpolation::InterpolationMethod;
use crate::rates::zero_curve::ZeroCurve;

/// Interpolation used by the pricer on both curves.
pub(crate) const PRICING_INTERPOLATION: InterpolationMethod = InterpolationMethod::FlatForward;

/// Degeneracy threshold for hazard-plus-forward in the closed-form
/// integrals.
const HAZARD_FORWARD_EPS: f64 = 1.0e-14;

/// Premium leg present value, split into its two terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PremiumLeg {
    /// Value of the scheduled coupons.
    pub coupon_pv: f64,
    /// Value of premium accrued up to the default date.
    pub accrued_on_default_pv: f64,
}

impl PremiumLeg {
    /// Total premium leg value.
    pub fn total(&self) -> f64 {
        self.coupon_pv + self.accrued_on_default_pv
    }
}

/// Curves rescaled so that both discounting and survival equal 1 at the
/// contract's value date.
struct AnchoredCurves<'a> {
    discount: &'a ZeroCurve,
    survival: &'a SurvivalCurve,
    value_date: NaiveDate,
    discount_at_value: f64,
    survival_at_value: f64,
}

impl<'a> AnchoredCurves<'a> {
    fn new(
        discount: &'a ZeroCurve,
        survival: &'a SurvivalCurve,
        value_date: NaiveDate,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            discount,
            survival,
            value_date,
            discount_at_value: discount.discount_factor(value_date, PRICING_INTERPOLATION)?,
            survival_at_value: survival.survival_probability(value_date, PRICING_INTERPOLATION)?,
        })
    }

    fn df(&self, date: NaiveDate) -> Result<f64, PricingError> {
        Ok(self.discount.discount_factor(date, PRICING_INTERPOLATION)? / self.discount_at_value)
    }

    fn survival(&self, date: NaiveDate) -> Result<f64, PricingError> {
        Ok(self.survival.survival_probability(date, PRICING_INTERPOLATION)?
            / self.survival_at_value)
    }

    /// Integration time coordinate: year fraction from the value date under
    /// the discount curve's day count.
    fn t(&self, date: NaiveDate) -> f64 {
        year_fraction(self.value_date, date, self.discount.day_count)
    }
}

/// Sorted, deduplicated union of both curves' knot dates. Computed once per
/// pricing call and shared by every integration interval.
fn merged_curve_knots(discount: &ZeroCurve, survival: &SurvivalCurve) -> Vec<NaiveDate> {
    let mut knots: Vec<NaiveDate> = discount
        .points
        .iter()
        .map(|p| p.date)
        .chain(survival.knots().iter().map(|p| p.date))
        .collect();
    knots.sort_unstable();
    knots.dedup();
    knots
}

/// Integration grid on `[lo, hi]`: the endpoints plus every merged knot
/// strictly inside.
fn integration_grid(knots: &[NaiveDate], lo: NaiveDate, hi: NaiveDate) -> Vec<NaiveDate> {
    let mut grid = Vec::with_capacity(knots.len() + 2);
    grid.push(lo);
    for &knot in knots {
        if knot > lo && knot < hi {
            grid.push(knot);
        }
    }
    grid.push(hi);
    grid
}

/// Present value of the premium leg at the given running coupon.
///
/// Coupons are `coupon * alpha_i * DF(pay_i) * S(accrual_end_i)` for every
/// period whose accrual end lies after the step-in date; the
/// accrued-on-default term is included when the contract asks for it. Both
/// terms scale with the notional and are linear in the coupon.
pub fn premium_leg_pv(
    contract: &CdsContract,
    discount: &ZeroCurve,
    survival: &SurvivalCurve,
    coupon: f64,
) -> Result<PremiumLeg, PricingError> {
    let anchored = AnchoredCurves::new(discount, survival, contract.dates.value_date)?;
    let knots = merged_curve_knots(discount, survival);
    let step_in = contract.dates.step_in_date;
    let coupon_day_count = contract.coupon_info.day_count;

    let mut coupon_sum = 0.0;
    let mut accrual_sum = 0.0;
    for period in &premium_schedule(contract) {
        if period.accrual_end <= step_in {
            continue;
        }

        let alpha = year_fraction(period.accrual_start, period.accrual_end, coupon_day_count);
        coupon_sum += alpha * anchored.df(period.pay_date)? * anchored.survival(period.accrual_end)?;

        if contract.include_accrued_premium {
            accrual_sum +=
                accrued_on_default(&anchored, &knots, period, step_in, coupon_day_count)?;
        }
    }

    let scale = coupon * contract.notional;
    let leg = PremiumLeg {
        coupon_pv: scale * coupon_sum,
        accrued_on_default_pv: scale * accrual_sum,
    };
    if leg.coupon_pv.is_finite() && leg.accrued_on_default_pv.is_finite() {
        Ok(leg)
    } else {
        Err(PricingError::NumericalError(
            "premium leg value is not finite".into(),
        ))
    }
}

/// Expected premium accrued from the period start to the default time, per
/// unit coupon and notional.
///
/// On each sub-interval `[a, b]` of the merged grid, with `delta` the
/// discount-daycount length, `k = f + h`, entry values `DF_a`, `S_a`,
/// accrual offset `alpha_0 = alpha(a)` and `kappa` the coupon-daycount
/// length per unit of `delta`:
///
/// ```text
/// ∫ alpha(u) DF(u) h S(u) du = h DF_a S_a (alpha_0 I0 + kappa I1)
/// I0 = (1 - e^{-k delta}) / k
/// I1 = (1 - (1 + k delta) e^{-k delta}) / k^2
/// ```
///
/// with `I0 -> delta`, `I1 -> delta^2 / 2` as `k -> 0`.
fn accrued_on_default(
    anchored: &AnchoredCurves<'_>,
    knots: &[NaiveDate],
    period: &AccrualPeriod,
    step_in: NaiveDate,
    coupon_day_count: DayCountConvention,
) -> Result<f64, PricingError> {
    let lo = period.accrual_start.max(step_in);
    let hi = period.accrual_end;
    if lo >= hi {
        return Ok(0.0);
    }

    let grid = integration_grid(knots, lo, hi);
    let mut total = 0.0;
    for pair in grid.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let delta = anchored.t(b) - anchored.t(a);
        if delta <= 0.0 {
            continue;
        }

        let df_a = anchored.df(a)?;
        let df_b = anchored.df(b)?;
        let s_a = anchored.survival(a)?;
        let s_b = anchored.survival(b)?;

        let forward = -(df_b / df_a).ln() / delta;
        let hazard = -(s_b / s_a).ln() / delta;
        if hazard == 0.0 {
            continue;
        }

        let alpha_0 = year_fraction(period.accrual_start, a, coupon_day_count);
        let kappa = year_fraction(a, b, coupon_day_count) / delta;

        let k = forward + hazard;
        let (i0, i1) = if k.abs() < HAZARD_FORWARD_EPS {
            (delta, 0.5 * delta * delta)
        } else {
            let decay = (-k * delta).exp();
            (
                (1.0 - decay) / k,
                (1.0 - (1.0 + k * delta) * decay) / (k * k),
            )
        };

        total += hazard * df_a * s_a * (alpha_0 * i0 + kappa * i1);
    }
    Ok(total)
}

/// Present value of the protection leg.
///
/// Integrates `DF(u) (-dS(u))` from the value date to maturity over the
/// merged knot grid; on each sub-interval the log-linear assumption gives
///
/// ```text
/// (h / (h + f)) DF_a S_a (1 - e^{-(h + f) delta})
/// ```
///
/// degenerating to `DF_a S_a h delta` when `h + f` vanishes. The result
/// scales with loss given default and notional.
pub fn protection_leg_pv(
    contract: &CdsContract,
    discount: &ZeroCurve,
    survival: &SurvivalCurve,
) -> Result<f64, PricingError> {
    let lo = contract.dates.value_date;
    let hi = contract.dates.maturity_date;
    if hi <= lo {
        return Ok(0.0);
    }

    let anchored = AnchoredCurves::new(discount, survival, lo)?;
    let knots = merged_curve_knots(discount, survival);
    let grid = integration_grid(&knots, lo, hi);

    let mut integral = 0.0;
    for pair in grid.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let delta = anchored.t(b) - anchored.t(a);
        if delta <= 0.0 {
            continue;
        }

        let df_a = anchored.df(a)?;
        let df_b = anchored.df(b)?;
        let s_a = anchored.survival(a)?;
        let s_b = anchored.survival(b)?;

        let forward = -(df_b / df_a).ln() / delta;
        let hazard = -(s_b / s_a).ln() / delta;
        if hazard == 0.0 {
            continue;
        }

        let k = forward + hazard;
        if k.abs() < HAZARD_FORWARD_EPS {
            integral += df_a * s_a * hazard * delta;
        } else {
            integral += (hazard / k) * df_a * s_a * (1.0 - (-k * delta).exp());
        }
    }

    let pv = (1.0 - contract.recovery_rate) * contract.notional * integral;
    if pv.is_finite() {
        Ok(pv)
    } else {
        Err(PricingError::NumericalError(
            "protection leg value is not finite".into(),
        ))
    }
}
