//! Next-payment projection
//!
//! Every charge of a subscription is anchored to its start date: charge `k`
//! falls `k` cycles after the start, with the day clamped to the end of
//! shorter months. A subscription started on Jan 31 is charged on Feb 29 in a
//! leap year and back on Mar 31 the month after, it never drifts to the 29th.
//!
//! "Today" is always passed in as `as_of`. Nothing here reads the clock.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

use crate::error::{SubtrackError, SubtrackResult};
use crate::models::{BillingCycle, Subscription};

/// The next charge of a subscription relative to a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    /// First charge date strictly after `as_of`
    pub next_date: NaiveDate,
    /// Whole days from `as_of` to `next_date`, never negative
    pub days_until: i64,
}

/// Parse a start date in `YYYY-MM-DD` form
///
/// A trailing time component (`2024-01-31T00:00:00`) is accepted and dropped.
///
/// # Errors
///
/// Returns `SubtrackError::InvalidDate` if the text is not a calendar date.
pub fn parse_start_date(s: &str) -> SubtrackResult<NaiveDate> {
    let trimmed = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .map_err(|_| {
            SubtrackError::InvalidDate(format!("'{}' is not a valid YYYY-MM-DD date", s))
        })
}

/// The `index`-th charge date (index 0 is the start date itself)
pub fn occurrence(start_date: NaiveDate, cycle: BillingCycle, index: u32) -> SubtrackResult<NaiveDate> {
    let months = index
        .checked_mul(cycle.months())
        .ok_or_else(|| out_of_range(start_date, index))?;

    start_date
        .checked_add_months(Months::new(months))
        .ok_or_else(|| out_of_range(start_date, index))
}

/// First charge date strictly after `as_of`
///
/// If the subscription starts after `as_of`, the start date is the answer.
/// Otherwise the search jumps straight to the cycle containing `as_of` and
/// steps forward from there, which gives the same result as stepping from the
/// start one cycle at a time.
pub fn next_occurrence(
    start_date: NaiveDate,
    cycle: BillingCycle,
    as_of: NaiveDate,
) -> SubtrackResult<NaiveDate> {
    if start_date > as_of {
        return Ok(start_date);
    }

    let elapsed = months_between(start_date, as_of);
    let mut index = u32::try_from(elapsed / i64::from(cycle.months()))
        .map_err(|_| out_of_range(start_date, u32::MAX))?;

    let mut candidate = occurrence(start_date, cycle, index)?;
    while candidate <= as_of {
        index += 1;
        candidate = occurrence(start_date, cycle, index)?;
    }

    Ok(candidate)
}

/// Whole days from `as_of` until the next charge
pub fn days_until(start_date: NaiveDate, cycle: BillingCycle, as_of: NaiveDate) -> SubtrackResult<i64> {
    let next = next_occurrence(start_date, cycle, as_of)?;
    Ok(days_between(as_of, next))
}

/// Next charge date and day count together
pub fn project(start_date: NaiveDate, cycle: BillingCycle, as_of: NaiveDate) -> SubtrackResult<Projection> {
    let next_date = next_occurrence(start_date, cycle, as_of)?;
    Ok(Projection {
        next_date,
        days_until: days_between(as_of, next_date),
    })
}

/// Project a subscription's next charge
pub fn project_subscription(subscription: &Subscription, as_of: NaiveDate) -> SubtrackResult<Projection> {
    project(subscription.start_date, subscription.cycle, as_of)
}

/// Projection from unvalidated text, as it arrives from a form or a file
///
/// The date is checked before the cycle, and both before any projection runs.
pub fn project_str(start_date: &str, cycle: &str, as_of: NaiveDate) -> SubtrackResult<Projection> {
    let start_date = parse_start_date(start_date)?;
    let cycle: BillingCycle = cycle.parse()?;
    project(start_date, cycle, as_of)
}

/// Day count from `from` to `to`, floored at zero
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days().max(0)
}

/// Calendar months from `from` to `to`, ignoring the day of month
fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let years = i64::from(to.year() - from.year());
    let months = i64::from(to.month()) - i64::from(from.month());
    years * 12 + months
}

fn out_of_range(start_date: NaiveDate, index: u32) -> SubtrackError {
    SubtrackError::InvalidDate(format!(
        "charge {} after {} is outside the supported calendar range",
        index, start_date
    ))
}
