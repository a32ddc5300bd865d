//! Day-count conventions and calendar arithmetic.
//!
//! Year fractions follow the ISDA 2006 definitions for the conventions the
//! CDS standard model needs (ACT/365 Fixed, ACT/360, 30/360 bond basis,
//! ACT/ACT ISDA). Month arithmetic clamps to the end of month, so adding a
//! month to January 31st lands on the last day of February.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::PricingError;

/// Supported day-count conventions.
///
/// Wire names match the market tokens: `ACT_365F`, `ACT_360`, `THIRTY_360`,
/// `ACT_ACT_ISDA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual day count over a fixed 365-day year.
    #[serde(rename = "ACT_365F")]
    Act365Fixed,
    /// Actual day count over a 360-day year.
    #[serde(rename = "ACT_360")]
    Act360,
    /// 30/360 US bond basis.
    #[serde(rename = "THIRTY_360")]
    Thirty360,
    /// ISDA actual/actual, split at calendar year boundaries.
    #[serde(rename = "ACT_ACT_ISDA")]
    ActActIsda,
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Act365Fixed => "ACT_365F",
            Self::Act360 => "ACT_360",
            Self::Thirty360 => "THIRTY_360",
            Self::ActActIsda => "ACT_ACT_ISDA",
        };
        write!(f, "{name}")
    }
}

/// Computes the year fraction between two dates under a day-count
/// convention.
///
/// `year_fraction(d, d)` is zero and swapping the arguments flips the sign.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use opencds::rates::{DayCountConvention, year_fraction};
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
/// let yf = year_fraction(start, end, DayCountConvention::Act365Fixed);
/// assert!((yf - 181.0 / 365.0).abs() < 1e-12);
/// ```
pub fn year_fraction(start: NaiveDate, end: NaiveDate, convention: DayCountConvention) -> f64 {
    if start == end {
        return 0.0;
    }
    if start > end {
        return -year_fraction(end, start, convention);
    }

    match convention {
        DayCountConvention::Act365Fixed => (end - start).num_days() as f64 / 365.0,
        DayCountConvention::Act360 => (end - start).num_days() as f64 / 360.0,
        DayCountConvention::Thirty360 => year_fraction_thirty_360(start, end),
        DayCountConvention::ActActIsda => year_fraction_act_act_isda(start, end),
    }
}

fn year_fraction_thirty_360(start: NaiveDate, end: NaiveDate) -> f64 {
    let y1 = start.year();
    let m1 = start.month() as i32;
    let mut d1 = start.day() as i32;
    let y2 = end.year();
    let m2 = end.month() as i32;
    let mut d2 = end.day() as i32;

    if d1 == 31 {
        d1 = 30;
    }
    if d2 == 31 && d1 >= 30 {
        d2 = 30;
    }

    let days = 360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1);
    days as f64 / 360.0
}

fn year_fraction_act_act_isda(start: NaiveDate, end: NaiveDate) -> f64 {
    if start.year() == end.year() {
        return (end - start).num_days() as f64 / days_in_year(start.year()) as f64;
    }

    let start_of_next_year = first_of_january(start.year() + 1);
    let start_of_end_year = first_of_january(end.year());

    let mut fraction =
        (start_of_next_year - start).num_days() as f64 / days_in_year(start.year()) as f64;
    fraction += (end.year() - start.year() - 1) as f64;
    fraction += (end - start_of_end_year).num_days() as f64 / days_in_year(end.year()) as f64;
    fraction
}

fn first_of_january(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).expect("valid first of january")
}

/// Adds calendar months with end-of-month clamping.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let month0 = date.month0() as i32;
    let total = month0 + months;

    let mut year = date.year() + total.div_euclid(12);
    let mut month0_new = total.rem_euclid(12);
    if month0_new < 0 {
        year -= 1;
        month0_new += 12;
    }

    let month = month0_new as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("valid add_months result")
}

/// Adds whole calendar years with end-of-month clamping.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    add_months(date, years * 12)
}

/// Adds a possibly fractional tenor in years.
///
/// Tenors that land on a whole number of months use calendar-month addition;
/// anything else falls back to day-accurate addition at 365.25 days per
/// year. Non-finite tenors are rejected.
pub fn add_tenor(date: NaiveDate, tenor_years: f64) -> Result<NaiveDate, PricingError> {
    if !tenor_years.is_finite() {
        return Err(PricingError::InvalidInput(format!(
            "tenor must be finite, got {tenor_years}"
        )));
    }
    if tenor_years.abs() > 1000.0 {
        return Err(PricingError::OutOfRange(format!(
            "tenor {tenor_years}y is outside the representable calendar"
        )));
    }

    let months = tenor_years * 12.0;
    let rounded = months.round();
    if (months - rounded).abs() < 1.0e-9 {
        return Ok(add_months(date, rounded as i32));
    }

    Ok(date + Duration::days((tenor_years * 365.25).round() as i64))
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => unreachable!("invalid month"),
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_year(year: i32) -> i32 {
    if is_leap_year(year) { 366 } else { 365 }
}
