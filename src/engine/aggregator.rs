//! Per-category spend aggregation

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::normalizer::subscription_monthly_cost;
use crate::models::{Category, Money, Subscription};

/// Monthly spend attributed to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    /// The category
    pub category: Category,
    /// Sum of monthly-equivalent costs
    pub monthly_amount: Money,
    /// Number of subscriptions in the category
    pub count: usize,
    /// Share of the grand total, rounded to one decimal place
    pub percent_of_total: Decimal,
}

/// Group subscriptions by category, largest monthly spend first
///
/// Categories are compared exactly as stored. Categories with equal spend keep
/// the order in which they were first seen. When every subscription is free the
/// percentages are all zero.
pub fn aggregate<'a, I>(subscriptions: I) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = &'a Subscription>,
{
    let mut shares: Vec<CategoryShare> = Vec::new();
    let mut index: HashMap<&'a Category, usize> = HashMap::new();
    let mut grand_total = Money::zero();

    for subscription in subscriptions {
        let monthly = subscription_monthly_cost(subscription);
        let slot = *index.entry(&subscription.category).or_insert_with(|| {
            shares.push(CategoryShare {
                category: subscription.category.clone(),
                monthly_amount: Money::zero(),
                count: 0,
                percent_of_total: Decimal::ZERO,
            });
            shares.len() - 1
        });

        let share = &mut shares[slot];
        share.monthly_amount += monthly;
        share.count += 1;
        grand_total += monthly;
    }

    for share in &mut shares {
        share.percent_of_total = percent_of(share.monthly_amount, grand_total, 1);
    }

    // sort_by is stable, so ties stay in first-encountered order
    shares.sort_by(|a, b| b.monthly_amount.cmp(&a.monthly_amount));
    shares
}

/// Sum of all category amounts
pub fn grand_total(shares: &[CategoryShare]) -> Money {
    shares.iter().map(|s| s.monthly_amount).sum()
}

/// `part / whole * 100` rounded half away from zero; zero when `whole` is not positive
pub(crate) fn percent_of(part: Money, whole: Money, dp: u32) -> Decimal {
    if !whole.is_positive() {
        return Decimal::ZERO;
    }
    scaled_ratio(part, whole).round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// `part * 100 / whole` for a positive `whole`, saturating instead of overflowing
///
/// Multiplies first to stay exact; amounts too large for that are divided first.
pub(crate) fn scaled_ratio(part: Money, whole: Money) -> Decimal {
    let (part, whole) = (part.amount(), whole.amount());
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .or_else(|| part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if part.is_sign_negative() { Decimal::MIN } else { Decimal::MAX })
}
