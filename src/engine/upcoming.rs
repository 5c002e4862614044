//! Upcoming-charge selection

use chrono::NaiveDate;
use serde::Serialize;

use super::projector::project_subscription;
use crate::error::SubtrackResult;
use crate::models::Subscription;

/// Reminder window used when the caller does not choose one
pub const DEFAULT_REMINDER_WINDOW_DAYS: i64 = 7;

/// A subscription that will be charged soon
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingCharge {
    pub subscription: Subscription,
    pub next_date: NaiveDate,
    pub days_until: i64,
}

/// Subscriptions charged within `window_days` of `as_of`, soonest first
///
/// The window is inclusive. Charges due on the same day keep their input order.
pub fn select_upcoming<'a, I>(
    subscriptions: I,
    as_of: NaiveDate,
    window_days: i64,
) -> SubtrackResult<Vec<UpcomingCharge>>
where
    I: IntoIterator<Item = &'a Subscription>,
{
    let mut upcoming = Vec::new();

    for subscription in subscriptions {
        let projection = project_subscription(subscription, as_of)?;
        if projection.days_until <= window_days {
            upcoming.push(UpcomingCharge {
                subscription: subscription.clone(),
                next_date: projection.next_date,
                days_until: projection.days_until,
            });
        }
    }

    upcoming.sort_by_key(|charge| charge.days_until);
    Ok(upcoming)
}

/// Whether a subscription is charged within `window_days` of `as_of`
pub fn is_due_soon(subscription: &Subscription, as_of: NaiveDate, window_days: i64) -> SubtrackResult<bool> {
    Ok(project_subscription(subscription, as_of)?.days_until <= window_days)
}
