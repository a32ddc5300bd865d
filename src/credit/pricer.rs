//! CDS contract pricing.

use serde::{Deserialize, Serialize};

use crate::core::PricingError;
use crate::credit::contract::CdsContract;
use crate::credit::legs::{PRICING_INTERPOLATION, premium_leg_pv, protection_leg_pv};
use crate::credit::survival_curve::SurvivalCurve;
use crate::rates::zero_curve::ZeroCurve;

/// Full valuation output for a CDS contract.
///
/// Leg values are as of the contract's value date; the mark-to-market and
/// upfront carry the additional discounting to the cash-settlement date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsPriceResult {
    /// Contract mark: premium leg minus protection leg for a protection
    /// buyer (negative when protection was bought below its par coupon),
    /// settled at the settlement date.
    pub mark_to_market: f64,
    /// Coupon that would price the contract to zero at inception.
    pub par_spread: f64,
    /// Value of the scheduled premium coupons.
    pub premium_leg_pv: f64,
    /// Value of the contingent protection payment.
    pub protection_leg_pv: f64,
    /// Value of premium accrued to the default date.
    pub accrued_premium_pv: f64,
    /// Upfront payment under the post-2009 convention: positive when the
    /// protection buyer pays.
    pub upfront_charge: f64,
    /// Upfront as a fraction of notional.
    pub upfront_fraction: f64,
}

/// Prices CDS contracts against a discount curve and a survival curve.
pub struct CdsPricer<'a> {
    discount: &'a ZeroCurve,
    survival: &'a SurvivalCurve,
}

impl<'a> CdsPricer<'a> {
    pub fn new(discount: &'a ZeroCurve, survival: &'a SurvivalCurve) -> Self {
        Self { discount, survival }
    }

    /// Values the contract, producing all pricing measures at once.
    pub fn price(&self, contract: &CdsContract) -> Result<CdsPriceResult, PricingError> {
        contract.validate()?;

        let dates = &contract.dates;
        if dates.value_date < self.discount.base_date {
            return Err(PricingError::Inconsistent(format!(
                "value date {} precedes the discount curve base date {}",
                dates.value_date, self.discount.base_date
            )));
        }
        if dates.value_date < self.survival.base_date() {
            return Err(PricingError::Inconsistent(format!(
                "value date {} precedes the survival curve base date {}",
                dates.value_date,
                self.survival.base_date()
            )));
        }

        // Premium leg per unit coupon; both terms scale linearly with the
        // contract coupon.
        let unit = premium_leg_pv(contract, self.discount, self.survival, 1.0)?;
        let annuity = unit.total();

        let coupon = contract.coupon_info.coupon_rate;
        let premium_pv = coupon * unit.coupon_pv;
        let accrued_pv = coupon * unit.accrued_on_default_pv;
        let protection_pv = protection_leg_pv(contract, self.discount, self.survival)?;

        if annuity.abs() <= 1.0e-14 {
            return Err(PricingError::NumericalError(
                "premium annuity is degenerate; the par spread is undefined".into(),
            ));
        }
        let par_spread = protection_pv / annuity;

        // Forward value from the value date to cash settlement.
        let discount_at_value = self
            .discount
            .discount_factor(dates.value_date, PRICING_INTERPOLATION)?;
        let settlement_df = self
            .discount
            .discount_factor(dates.settlement_date, PRICING_INTERPOLATION)?
            / discount_at_value;
        if !(settlement_df.is_finite() && settlement_df > 0.0) {
            return Err(PricingError::NumericalError(format!(
                "settlement discount factor at {} is not positive finite",
                dates.settlement_date
            )));
        }

        let buyer_mtm = (premium_pv + accrued_pv - protection_pv) / settlement_df;
        let buyer_upfront = (protection_pv - premium_pv - accrued_pv) / settlement_df;
        let direction = if contract.is_buy_protection { 1.0 } else { -1.0 };
        let mark_to_market = direction * buyer_mtm;
        let upfront_charge = direction * buyer_upfront;

        let result = CdsPriceResult {
            mark_to_market,
            par_spread,
            premium_leg_pv: premium_pv,
            protection_leg_pv: protection_pv,
            accrued_premium_pv: accrued_pv,
            upfront_charge,
            upfront_fraction: upfront_charge / contract.notional,
        };
        if result.mark_to_market.is_finite() && result.par_spread.is_finite() {
            Ok(result)
        } else {
            Err(PricingError::NumericalError(
                "pricing produced a non-finite result".into(),
            ))
        }
    }

    /// Mark-to-market only.
    pub fn mark_to_market(&self, contract: &CdsContract) -> Result<f64, PricingError> {
        Ok(self.price(contract)?.mark_to_market)
    }

    /// Par spread only.
    pub fn par_spread(&self, contract: &CdsContract) -> Result<f64, PricingError> {
        Ok(self.price(contract)?.par_spread)
    }

    /// Upfront charge only (absolute amount).
    pub fn upfront_charge(&self, contract: &CdsContract) -> Result<f64, PricingError> {
        Ok(self.price(contract)?.upfront_charge)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::*;
    use crate::credit::contract::{CdsCouponInfo, CdsDates, Frequency};
    use crate::rates::calendar::BusinessDayConvention;
    use crate::rates::compounding::CompoundingBasis;
    use crate::rates::day_count::{DayCountConvention, add_years};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn flat_discount(base: NaiveDate, rate: f64) -> ZeroCurve {
        ZeroCurve::new(
            base,
            (1..=10).map(|i| (add_years(base, i), rate)).collect(),
            DayCountConvention::Act365Fixed,
            CompoundingBasis::Continuous,
        )
        .unwrap()
    }

    fn flat_survival(base: NaiveDate, hazard: f64) -> SurvivalCurve {
        SurvivalCurve::from_piecewise_hazard(
            base,
            DayCountConvention::Act365Fixed,
            &(1..=10)
                .map(|i| (add_years(base, i), hazard))
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    fn contract(base: NaiveDate, coupon: f64, buy: bool) -> CdsContract {
        CdsContract {
            dates: CdsDates {
                trade_date: base,
                effective_date: base,
                maturity_date: add_years(base, 5),
                value_date: base,
                settlement_date: base,
                step_in_date: base,
            },
            coupon_info: CdsCouponInfo {
                payment_frequency: Frequency::Quarterly,
                day_count: DayCountConvention::Act360,
                business_day_convention: BusinessDayConvention::ModifiedFollowing,
                coupon_rate: coupon,
            },
            notional: 10_000_000.0,
            recovery_rate: 0.4,
            include_accrued_premium: true,
            is_buy_protection: buy,
        }
    }

    #[test]
    fn mtm_vanishes_at_the_par_coupon() {
        let base = d(2025, 5, 5);
        let discount = flat_discount(base, 0.03);
        let survival = flat_survival(base, 0.025);
        let pricer = CdsPricer::new(&discount, &survival);

        let par = pricer.par_spread(&contract(base, 0.01, true)).unwrap();
        let result = pricer.price(&contract(base, par, true)).unwrap();
        assert_relative_eq!(
            result.mark_to_market / 10_000_000.0,
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn par_spread_approximates_hazard_times_lgd() {
        let base = d(2025, 5, 5);
        let hazard = 0.02;
        let discount = flat_discount(base, 0.03);
        let survival = flat_survival(base, hazard);
        let pricer = CdsPricer::new(&discount, &survival);

        let par = pricer.par_spread(&contract(base, 0.01, true)).unwrap();
        assert_relative_eq!(par, (1.0 - 0.4) * hazard, max_relative = 2e-2);
    }

    #[test]
    fn buyer_and_seller_marks_are_opposite() {
        let base = d(2025, 5, 5);
        let discount = flat_discount(base, 0.03);
        let survival = flat_survival(base, 0.02);
        let pricer = CdsPricer::new(&discount, &survival);

        let buyer = pricer.price(&contract(base, 0.01, true)).unwrap();
        let seller = pricer.price(&contract(base, 0.01, false)).unwrap();
        assert_relative_eq!(
            buyer.mark_to_market,
            -seller.mark_to_market,
            max_relative = 1e-12
        );
        assert_relative_eq!(buyer.par_spread, seller.par_spread, max_relative = 1e-15);
    }

    #[test]
    fn mtm_is_linear_in_coupon() {
        let base = d(2025, 5, 5);
        let discount = flat_discount(base, 0.03);
        let survival = flat_survival(base, 0.02);
        let pricer = CdsPricer::new(&discount, &survival);

        let at_zero = pricer.price(&contract(base, 0.0, true));
        // A zero-coupon contract still has a well-defined annuity.
        let v0 = at_zero.unwrap().mark_to_market;
        let v1 = pricer.price(&contract(base, 0.01, true)).unwrap().mark_to_market;
        let v2 = pricer.price(&contract(base, 0.02, true)).unwrap().mark_to_market;
        assert_relative_eq!(v2 - v1, v1 - v0, max_relative = 1e-9);
    }

    #[test]
    fn upfront_sign_tracks_coupon_versus_par() {
        let base = d(2025, 5, 5);
        let discount = flat_discount(base, 0.03);
        let survival = flat_survival(base, 0.02);
        let pricer = CdsPricer::new(&discount, &survival);

        let par = pricer.par_spread(&contract(base, 0.01, true)).unwrap();

        // Buying protection below par: the buyer owes an upfront and the
        // contract marks negative.
        let cheap = pricer.price(&contract(base, 0.5 * par, true)).unwrap();
        assert!(cheap.upfront_charge > 0.0);
        assert!(cheap.mark_to_market < 0.0);

        // Buying above par: the seller pays the buyer.
        let rich = pricer.price(&contract(base, 2.0 * par, true)).unwrap();
        assert!(rich.upfront_charge < 0.0);
        assert!(rich.mark_to_market > 0.0);

        // The upfront is the mark with its sign reversed.
        assert_relative_eq!(
            cheap.upfront_charge,
            -cheap.mark_to_market,
            max_relative = 1e-15
        );
        assert_relative_eq!(
            cheap.upfront_fraction,
            cheap.upfront_charge / 10_000_000.0,
            max_relative = 1e-15
        );
    }

    #[test]
    fn settlement_discounting_scales_the_mark() {
        let base = d(2025, 5, 5);
        let discount = flat_discount(base, 0.03);
        let survival = flat_survival(base, 0.02);
        let pricer = CdsPricer::new(&discount, &survival);

        let spot = contract(base, 0.01, true);
        let mut deferred = spot.clone();
        deferred.dates.settlement_date = d(2025, 8, 5);

        let spot_result = pricer.price(&spot).unwrap();
        let deferred_result = pricer.price(&deferred).unwrap();

        // Legs are unchanged; only the mark is forward-valued.
        assert_relative_eq!(
            spot_result.premium_leg_pv,
            deferred_result.premium_leg_pv,
            max_relative = 1e-15
        );
        assert!(deferred_result.mark_to_market.abs() > spot_result.mark_to_market.abs());
    }

    #[test]
    fn value_date_before_curve_base_is_inconsistent() {
        let base = d(2025, 5, 5);
        let discount = flat_discount(base, 0.03);
        let survival = flat_survival(base, 0.02);
        let pricer = CdsPricer::new(&discount, &survival);

        let mut early = contract(base, 0.01, true);
        early.dates.value_date = d(2025, 1, 1);
        assert!(matches!(
            pricer.price(&early),
            Err(PricingError::Inconsistent(_))
        ));
    }
}
