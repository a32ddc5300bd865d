//! Premium payment schedule generation.
//!
//! Accrual periods are generated backward from the maturity date in steps of
//! one coupon interval, so any stub lands at the front of the schedule.
//! Accrual boundaries stay unadjusted for day-count measurement; only the
//! pay date rolls under the contract's business-day convention.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::credit::contract::CdsContract;
use crate::rates::calendar::adjust_business_day;
use crate::rates::day_count::add_months;

/// One premium accrual period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualPeriod {
    pub accrual_start: NaiveDate,
    pub accrual_end: NaiveDate,
    pub pay_date: NaiveDate,
}

/// Generates the contract's premium accrual periods.
///
/// The final period ends exactly at the maturity date and the first begins
/// at the effective date; a contract whose maturity does not sit a whole
/// number of coupon periods after the effective date gets a short front
/// stub. Degenerate contracts (maturity on or before effective) produce an
/// empty schedule.
pub fn premium_schedule(contract: &CdsContract) -> Vec<AccrualPeriod> {
    let effective = contract.dates.effective_date;
    let maturity = contract.dates.maturity_date;
    if maturity <= effective {
        return Vec::new();
    }

    let step_months = contract.coupon_info.payment_frequency.months();

    // Unadjusted period ends, walking back from maturity. Stepping from the
    // maturity anchor each time avoids end-of-month clamp drift.
    let mut ends = Vec::new();
    let mut back = 0;
    loop {
        let date = add_months(maturity, -(step_months * back));
        if date <= effective {
            break;
        }
        ends.push(date);
        back += 1;
    }
    ends.reverse();

    let convention = contract.coupon_info.business_day_convention;
    let mut periods = Vec::with_capacity(ends.len());
    let mut start = effective;
    for end in ends {
        periods.push(AccrualPeriod {
            accrual_start: start,
            accrual_end: end,
            pay_date: adjust_business_day(end, convention),
        });
        start = end;
    }
    periods
}
