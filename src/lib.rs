//! OpenCDS implements the computational core of the ISDA CDS Standard
//! Model: interest-rate and survival term structures, dated single-name CDS
//! valuation, and credit-curve bootstrapping from market spreads.
//!
//! The library is a set of pure functions over immutable value types. Every
//! operation takes its inputs by value or shared reference and returns a
//! freshly allocated result; there is no shared state, no I/O, and the same
//! inputs always produce the same outputs, so values can be priced from any
//! number of threads at once. Request/response surfaces are expected to
//! live in a thin adapter on top of the serde-enabled types.
//!
//! References used across modules:
//! - ISDA CDS Standard Model (the JP Morgan C library) for curve
//!   interpolation, premium accrual, and bootstrap semantics.
//! - O'Kane, *Modelling Single-name and Multi-name Credit Derivatives*
//!   (2008), Ch. 5-7 for the leg integrals.
//! - Hull, *Options, Futures, and Other Derivatives* (11th ed.), Ch. 24-25
//!   for CDS valuation identities.
//!
//! Numerical considerations:
//! - Discount factors are interpolated in log space and the leg integrals
//!   use closed forms under piecewise-constant forwards and hazards, so
//!   long-tenor values do not lose precision to repeated exponentiation.
//! - The hazard-plus-forward degeneracy in the leg integrals switches to
//!   its analytic limit below 1e-14.
//! - The bootstrapper brackets each hazard before solving and reports
//!   non-convergence per tenor instead of returning a partial curve.
//!
//! # Quick Start
//! Build a zero curve and query a discount factor:
//! ```rust
//! use chrono::NaiveDate;
//! use opencds::rates::{CompoundingBasis, DayCountConvention, InterpolationMethod, ZeroCurve};
//!
//! let base = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
//! let curve = ZeroCurve::new(
//!     base,
//!     vec![
//!         (NaiveDate::from_ymd_opt(2026, 5, 5).unwrap(), 0.035),
//!         (NaiveDate::from_ymd_opt(2030, 5, 5).unwrap(), 0.045),
//!     ],
//!     DayCountConvention::Act365Fixed,
//!     CompoundingBasis::Annual,
//! )
//! .unwrap();
//!
//! let df = curve
//!     .discount_factor(
//!         NaiveDate::from_ymd_opt(2027, 5, 5).unwrap(),
//!         InterpolationMethod::FlatForward,
//!     )
//!     .unwrap();
//! assert!(df > 0.8 && df < 1.0);
//! ```
//!
//! Bootstrap a credit curve and read off a survival probability:
//! ```rust
//! use chrono::NaiveDate;
//! use opencds::credit::{CdsConvention, CreditCurveQuote, bootstrap_credit_curve};
//! use opencds::rates::{CompoundingBasis, DayCountConvention, InterpolationMethod, ZeroCurve};
//!
//! let valuation = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
//! let discount = ZeroCurve::new(
//!     valuation,
//!     vec![
//!         (NaiveDate::from_ymd_opt(2027, 5, 5).unwrap(), 0.03),
//!         (NaiveDate::from_ymd_opt(2032, 5, 5).unwrap(), 0.035),
//!     ],
//!     DayCountConvention::Act365Fixed,
//!     CompoundingBasis::Continuous,
//! )
//! .unwrap();
//!
//! let quotes = [
//!     CreditCurveQuote { tenor_years: 1.0, spread: 0.010 },
//!     CreditCurveQuote { tenor_years: 5.0, spread: 0.020 },
//! ];
//! let survival =
//!     bootstrap_credit_curve(&discount, valuation, &quotes, 0.4, &CdsConvention::default())
//!         .unwrap();
//!
//! let s5 = survival
//!     .survival_probability(
//!         NaiveDate::from_ymd_opt(2030, 5, 5).unwrap(),
//!         InterpolationMethod::FlatForward,
//!     )
//!     .unwrap();
//! assert!(s5 > 0.7 && s5 < 1.0);
//! ```

pub mod core;
pub mod credit;
pub mod math;
pub mod rates;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::PricingError;
    pub use crate::credit::{
        AccrualPeriod, CdsContract, CdsConvention, CdsCouponInfo, CdsDates, CdsPriceResult,
        CdsPricer, CreditCurveQuote, Frequency, SurvivalCurve, bootstrap_credit_curve,
        premium_schedule,
    };
    pub use crate::rates::{
        BusinessDayConvention, CompoundingBasis, CurvePoint, DayCountConvention,
        InterpolationMethod, ZeroCurve, year_fraction,
    };
}
