//! Weekend-only business-day calendar.
//!
//! The CDS standard model's date adjustments need only a weekend rule; no
//! holiday centres are involved. Saturday and Sunday are non-business days
//! everywhere in this crate.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Business-day adjustment rule for a date falling on a weekend.
///
/// Wire names follow the market tokens: `FOLLOW`, `MODIFIED_FOLLOW`,
/// `PRECEDING`, `NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessDayConvention {
    /// Roll forward to the next business day.
    #[serde(rename = "FOLLOW")]
    Following,
    /// Roll forward unless that crosses a month boundary, then roll back.
    #[serde(rename = "MODIFIED_FOLLOW")]
    ModifiedFollowing,
    /// Roll back to the previous business day.
    #[serde(rename = "PRECEDING")]
    Preceding,
    /// Leave the date unchanged.
    #[serde(rename = "NONE")]
    Unadjusted,
}

/// Returns true when `date` falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Adjusts a date according to a business-day convention.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use opencds::rates::{BusinessDayConvention, adjust_business_day};
///
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
/// let adjusted = adjust_business_day(saturday, BusinessDayConvention::Following);
/// assert_eq!(adjusted, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
/// ```
pub fn adjust_business_day(date: NaiveDate, convention: BusinessDayConvention) -> NaiveDate {
    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => next_business_day(date),
        BusinessDayConvention::Preceding => previous_business_day(date),
        BusinessDayConvention::ModifiedFollowing => {
            let following = next_business_day(date);
            if following.month() != date.month() {
                previous_business_day(date)
            } else {
                following
            }
        }
    }
}

/// Adds business days to a date. Negative `days` moves backward.
pub fn add_business_days(date: NaiveDate, days: i32) -> NaiveDate {
    if days == 0 {
        return date;
    }

    let step = if days > 0 { 1_i64 } else { -1_i64 };
    let mut left = days.abs();
    let mut current = date;

    while left > 0 {
        current += Duration::days(step);
        if !is_weekend(current) {
            left -= 1;
        }
    }

    current
}

fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut d = date;
    while is_weekend(d) {
        d += Duration::days(1);
    }
    d
}

fn previous_business_day(date: NaiveDate) -> NaiveDate {
    let mut d = date;
    while is_weekend(d) {
        d -= Duration::days(1);
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn business_day_dates_pass_through() {
        let wednesday = d(2026, 1, 7);
        for conv in [
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::Unadjusted,
        ] {
            assert_eq!(adjust_business_day(wednesday, conv), wednesday);
        }
    }

    #[test]
    fn adjustments_cover_all_conventions() {
        // 2026-01-31 is a Saturday at a month end.
        let saturday = d(2026, 1, 31);

        assert_eq!(
            adjust_business_day(saturday, BusinessDayConvention::Following),
            d(2026, 2, 2)
        );
        assert_eq!(
            adjust_business_day(saturday, BusinessDayConvention::ModifiedFollowing),
            d(2026, 1, 30)
        );
        assert_eq!(
            adjust_business_day(saturday, BusinessDayConvention::Preceding),
            d(2026, 1, 30)
        );
        assert_eq!(
            adjust_business_day(saturday, BusinessDayConvention::Unadjusted),
            saturday
        );
    }

    #[test]
    fn modified_following_stays_forward_mid_month() {
        // 2026-01-10 is a Saturday in the middle of the month.
        let saturday = d(2026, 1, 10);
        assert_eq!(
            adjust_business_day(saturday, BusinessDayConvention::ModifiedFollowing),
            d(2026, 1, 12)
        );
    }

    #[test]
    fn business_day_arithmetic_skips_weekends() {
        let friday = d(2026, 1, 2);
        assert_eq!(add_business_days(friday, 1), d(2026, 1, 5));
        assert_eq!(add_business_days(friday, 3), d(2026, 1, 7));
        assert_eq!(add_business_days(d(2026, 1, 5), -1), friday);
        assert_eq!(add_business_days(friday, 0), friday);
    }
}
