//! Billing-cycle normalization
//!
//! Converts a per-cycle price into its monthly (or yearly) equivalent so that
//! subscriptions on different cycles can be compared and summed. No rounding
//! happens here.

use rust_decimal::Decimal;

use crate::error::SubtrackResult;
use crate::models::{BillingCycle, Money, Subscription};

/// Monthly-equivalent of `price` charged once per `cycle`
///
/// # Examples
/// ```
/// use subtrack::engine::normalizer::monthly_equivalent;
/// use subtrack::models::{BillingCycle, Money};
///
/// let monthly = monthly_equivalent(Money::from_units(2190), BillingCycle::Yearly);
/// assert_eq!(monthly, Money::parse("182.5").unwrap());
/// ```
pub fn monthly_equivalent(price: Money, cycle: BillingCycle) -> Money {
    match cycle {
        BillingCycle::Monthly => price,
        BillingCycle::Quarterly => price / Decimal::from(3),
        BillingCycle::Yearly => price / Decimal::from(12),
    }
}

/// Monthly-equivalent for a cycle given by name
///
/// # Errors
///
/// Returns `SubtrackError::InvalidCycle` for anything other than monthly,
/// quarterly or yearly.
pub fn monthly_equivalent_str(price: Money, cycle: &str) -> SubtrackResult<Money> {
    let cycle: BillingCycle = cycle.parse()?;
    Ok(monthly_equivalent(price, cycle))
}

/// Total cost of `price` charged once per `cycle` over a year
pub fn yearly_cost(price: Money, cycle: BillingCycle) -> Money {
    price * Decimal::from(cycle.charges_per_year())
}

/// Monthly-equivalent cost of a subscription
pub fn subscription_monthly_cost(subscription: &Subscription) -> Money {
    monthly_equivalent(subscription.price, subscription.cycle)
}

/// Yearly cost of a subscription
pub fn subscription_yearly_cost(subscription: &Subscription) -> Money {
    yearly_cost(subscription.price, subscription.cycle)
}

/// Sum of monthly-equivalent costs
pub fn total_monthly<'a, I>(subscriptions: I) -> Money
where
    I: IntoIterator<Item = &'a Subscription>,
{
    subscriptions
        .into_iter()
        .map(subscription_monthly_cost)
        .sum()
}

/// Sum of yearly costs
pub fn total_yearly<'a, I>(subscriptions: I) -> Money
where
    I: IntoIterator<Item = &'a Subscription>,
{
    subscriptions
        .into_iter()
        .map(subscription_yearly_cost)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;

    fn sub(price: i64, cycle: BillingCycle) -> Subscription {
        Subscription::new(
            "Test",
            Money::from_units(price),
            cycle,
            Category::Other,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_divisors() {
        let price = Money::from_units(1200);
        assert_eq!(monthly_equivalent(price, BillingCycle::Monthly), Money::from_units(1200));
        assert_eq!(monthly_equivalent(price, BillingCycle::Quarterly), Money::from_units(400));
        assert_eq!(monthly_equivalent(price, BillingCycle::Yearly), Money::from_units(100));
    }

    #[test]
    fn test_yearly_price_splits_evenly() {
        let monthly = monthly_equivalent(Money::from_units(2190), BillingCycle::Yearly);
        assert_eq!(monthly, Money::parse("182.5").unwrap());
    }

    #[test]
    fn test_no_rounding_applied() {
        let monthly = monthly_equivalent(Money::from_units(100), BillingCycle::Quarterly);
        assert_ne!(monthly, Money::parse("33.33").unwrap());
        assert_eq!(monthly.round_dp(2), Money::parse("33.33").unwrap());
    }

    #[test]
    fn test_linear_in_price() {
        for cycle in BillingCycle::ALL {
            let single = monthly_equivalent(Money::from_units(250), cycle);
            let double = monthly_equivalent(Money::from_units(500), cycle);
            assert_eq!(single + single, double);
            assert_eq!(monthly_equivalent(Money::zero(), cycle), Money::zero());
        }
    }

    #[test]
    fn test_monthly_times_twelve_matches_yearly_cost() {
        for cycle in BillingCycle::ALL {
            let price = Money::from_units(360);
            let monthly = monthly_equivalent(price, cycle);
            assert_eq!(monthly * Decimal::from(12), yearly_cost(price, cycle));
        }
    }

    #[test]
    fn test_unknown_cycle_name_is_rejected() {
        let err = monthly_equivalent_str(Money::from_units(100), "weekly").unwrap_err();
        assert!(err.is_invalid_cycle());

        let ok = monthly_equivalent_str(Money::from_units(300), "quarterly").unwrap();
        assert_eq!(ok, Money::from_units(100));
    }

    #[test]
    fn test_totals() {
        let subs = vec![
            sub(390, BillingCycle::Monthly),
            sub(1680, BillingCycle::Monthly),
            sub(2190, BillingCycle::Yearly),
        ];
        assert_eq!(total_monthly(&subs), Money::parse("2252.5").unwrap());
        assert_eq!(total_yearly(&subs), Money::from_units(27030));

        let none: Vec<Subscription> = Vec::new();
        assert_eq!(total_monthly(&none), Money::zero());
    }
}
