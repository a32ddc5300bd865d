//! Credit primitives: survival curves, CDS contracts, leg valuation,
//! pricing, and credit-curve bootstrapping.

pub mod bootstrap;
pub mod contract;
pub mod legs;
pub mod pricer;
pub mod schedule;
pub mod survival_curve;

pub use bootstrap::{
    CASH_SETTLE_BUSINESS_DAYS, CdsConvention, CreditCurveQuote, HAZARD_CURVE_DAY_COUNT,
    STEP_IN_BUSINESS_DAYS, bootstrap_credit_curve,
};
pub use contract::{CdsContract, CdsCouponInfo, CdsDates, Frequency};
pub use legs::{PremiumLeg, premium_leg_pv, protection_leg_pv};
pub use pricer::{CdsPriceResult, CdsPricer};
pub use schedule::{AccrualPeriod, premium_schedule};
pub use survival_curve::SurvivalCurve;
