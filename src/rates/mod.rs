//! Interest-rate primitives: day counts, business-day handling, compounding,
//! and the zero-coupon term structure.

pub mod calendar;
pub mod compounding;
pub mod day_count;
pub mod interpolation;
pub mod zero_curve;

pub use calendar::{BusinessDayConvention, add_business_days, adjust_business_day, is_weekend};
pub use compounding::CompoundingBasis;
pub use day_count::{DayCountConvention, add_months, add_tenor, add_years, year_fraction};
pub use interpolation::InterpolationMethod;
pub use zero_curve::{CurvePoint, ZeroCurve};
