//! CDS contract value types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::PricingError;
use crate::rates::calendar::BusinessDayConvention;
use crate::rates::day_count::DayCountConvention;

/// Premium payment frequency. Numeric encoding is payments per year:
/// 1, 2, 4, 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Frequency {
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
}

impl Frequency {
    /// Number of months in one regular coupon period.
    pub fn months(self) -> i32 {
        match self {
            Self::Annual => 12,
            Self::SemiAnnual => 6,
            Self::Quarterly => 3,
            Self::Monthly => 1,
        }
    }

    /// Premium payments per year.
    pub fn payments_per_year(self) -> u32 {
        match self {
            Self::Annual => 1,
            Self::SemiAnnual => 2,
            Self::Quarterly => 4,
            Self::Monthly => 12,
        }
    }
}

impl From<Frequency> for u32 {
    fn from(frequency: Frequency) -> Self {
        frequency.payments_per_year()
    }
}

impl TryFrom<u32> for Frequency {
    type Error = PricingError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Annual),
            2 => Ok(Self::SemiAnnual),
            4 => Ok(Self::Quarterly),
            12 => Ok(Self::Monthly),
            other => Err(PricingError::InvalidInput(format!(
                "unrecognized payment frequency {other} (expected 1, 2, 4 or 12)"
            ))),
        }
    }
}

/// The dates fixing a CDS trade's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdsDates {
    pub trade_date: NaiveDate,
    pub effective_date: NaiveDate,
    pub maturity_date: NaiveDate,
    /// Date all present values are anchored to.
    pub value_date: NaiveDate,
    /// Cash-settlement date for the mark-to-market.
    pub settlement_date: NaiveDate,
    /// First date from which protection (and premium accrual) is owned.
    pub step_in_date: NaiveDate,
}

/// Coupon terms of the premium leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsCouponInfo {
    pub payment_frequency: Frequency,
    pub day_count: DayCountConvention,
    pub business_day_convention: BusinessDayConvention,
    /// Running coupon in decimal, e.g. 0.01 for 100 bps.
    pub coupon_rate: f64,
}

/// A single-name CDS contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsContract {
    pub dates: CdsDates,
    pub coupon_info: CdsCouponInfo,
    pub notional: f64,
    pub recovery_rate: f64,
    /// Whether premium accrued to the default date is paid on default.
    pub include_accrued_premium: bool,
    pub is_buy_protection: bool,
}

impl CdsContract {
    /// Validates the contract terms.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.notional.is_finite() && self.notional > 0.0) {
            return Err(PricingError::InvalidInput(format!(
                "notional must be positive finite, got {}",
                self.notional
            )));
        }
        if !(self.recovery_rate.is_finite()
            && self.recovery_rate >= 0.0
            && self.recovery_rate < 1.0)
        {
            return Err(PricingError::InvalidInput(format!(
                "recovery rate must lie in [0, 1), got {}",
                self.recovery_rate
            )));
        }
        if !self.coupon_info.coupon_rate.is_finite() {
            return Err(PricingError::InvalidInput(format!(
                "coupon rate must be finite, got {}",
                self.coupon_info.coupon_rate
            )));
        }
        if self.dates.maturity_date <= self.dates.effective_date {
            return Err(PricingError::InvalidInput(format!(
                "maturity {} must be after effective date {}",
                self.dates.maturity_date, self.dates.effective_date
            )));
        }
        Ok(())
    }
}
