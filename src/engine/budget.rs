//! Budget evaluation
//!
//! Classifies monthly spend against a ceiling into one of four tiers and
//! derives what is left (or how far over). A ceiling of zero or below means no
//! budget has been configured, not that every cent is overspent.

use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use super::aggregator::{percent_of, scaled_ratio, CategoryShare};
use super::normalizer::subscription_yearly_cost;
use crate::error::{SubtrackError, SubtrackResult};
use crate::models::{BillingCycle, Category, Money, Subscription};

/// Usage at or above this share of the ceiling is a warning
pub const WARNING_THRESHOLD_PERCENT: u32 = 80;

/// Usage at or above this share of the ceiling is over budget
pub const OVER_THRESHOLD_PERCENT: u32 = 100;

/// Largest monthly ceiling accepted by `validate_ceiling`
pub const MAX_MONTHLY_BUDGET: i64 = 1_000_000;

/// Discount assumed when a monthly or quarterly plan switches to yearly billing
pub const ANNUAL_BILLING_DISCOUNT_PERCENT: u32 = 10;

/// Budget health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    /// No ceiling configured
    None,
    /// Below the warning threshold
    Good,
    /// Between the warning threshold and the ceiling
    Warning,
    /// At or above the ceiling
    Over,
}

impl BudgetTier {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }

    /// Status line shown next to the usage bar
    pub const fn status_text(&self) -> &'static str {
        match self {
            Self::None => "No budget set",
            Self::Good => "Within budget",
            Self::Warning => "Approaching budget limit",
            Self::Over => "Over budget!",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of comparing monthly spend with a ceiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetEvaluation {
    pub ceiling: Money,
    pub spend: Money,
    /// Share of the ceiling used, capped at 100 for display
    pub usage_percent: Decimal,
    pub tier: BudgetTier,
    /// Unspent part of the ceiling
    pub remaining: Money,
    /// Amount spent beyond the ceiling
    pub overage: Money,
}

impl BudgetEvaluation {
    fn unconfigured(ceiling: Money, spend: Money) -> Self {
        Self {
            ceiling,
            spend,
            usage_percent: Decimal::ZERO,
            tier: BudgetTier::None,
            remaining: Money::zero(),
            overage: Money::zero(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.tier != BudgetTier::None
    }
}

/// Evaluate monthly `spend` against `ceiling`
///
/// The tier is decided on the exact, uncapped ratio: spending exactly 80% of
/// the ceiling is a warning and spending exactly the ceiling is over.
pub fn evaluate(ceiling: Money, spend: Money) -> BudgetEvaluation {
    if !ceiling.is_positive() {
        return BudgetEvaluation::unconfigured(ceiling, spend);
    }

    let usage_percent = scaled_ratio(spend, ceiling).min(Decimal::ONE_HUNDRED);

    let (tier, remaining, overage) = if compare_usage(spend, ceiling, OVER_THRESHOLD_PERCENT).is_ge() {
        (BudgetTier::Over, Money::zero(), spend - ceiling)
    } else if compare_usage(spend, ceiling, WARNING_THRESHOLD_PERCENT).is_ge() {
        (BudgetTier::Warning, ceiling - spend, Money::zero())
    } else {
        (BudgetTier::Good, ceiling - spend, Money::zero())
    };

    BudgetEvaluation {
        ceiling,
        spend,
        usage_percent,
        tier,
        remaining,
        overage,
    }
}

/// Compare `spend / ceiling` with `threshold` percent
///
/// Exact while `spend * 100` and `ceiling * threshold` fit in a decimal.
fn compare_usage(spend: Money, ceiling: Money, threshold: u32) -> Ordering {
    let threshold = Decimal::from(threshold);
    match (
        spend.amount().checked_mul(Decimal::ONE_HUNDRED),
        ceiling.amount().checked_mul(threshold),
    ) {
        (Some(scaled_spend), Some(scaled_ceiling)) => scaled_spend.cmp(&scaled_ceiling),
        _ => scaled_ratio(spend, ceiling).cmp(&threshold),
    }
}

/// A category's spend relative to both the total and the budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBudgetUsage {
    pub category: Category,
    pub monthly_amount: Money,
    pub percent_of_total: Decimal,
    /// Share of the ceiling, two decimal places; zero without a budget
    pub percent_of_budget: Decimal,
}

/// Per-category share of the budget ceiling
pub fn category_budget_usage(ceiling: Money, shares: &[CategoryShare]) -> Vec<CategoryBudgetUsage> {
    shares
        .iter()
        .map(|share| CategoryBudgetUsage {
            category: share.category.clone(),
            monthly_amount: share.monthly_amount,
            percent_of_total: share.percent_of_total,
            percent_of_budget: percent_of(share.monthly_amount, ceiling, 2),
        })
        .collect()
}

/// Advisory messages for the dashboard
pub fn recommendations(evaluation: &BudgetEvaluation, usage: &[CategoryBudgetUsage]) -> Vec<String> {
    let mut advice = Vec::new();

    if !evaluation.is_configured() {
        advice.push(
            "Set a monthly budget to keep track of how much your subscriptions cost.".to_string(),
        );
        return advice;
    }

    if evaluation.spend > evaluation.ceiling {
        advice.push(format!(
            "Spending is {} over budget. Review your subscriptions and cancel the ones you no longer use.",
            evaluation.overage
        ));
    }

    let above = |threshold: u32| {
        compare_usage(evaluation.spend, evaluation.ceiling, threshold) == Ordering::Greater
    };

    if above(90) {
        advice.push("Budget usage is above 90%, close to the limit.".to_string());
    } else if above(WARNING_THRESHOLD_PERCENT) {
        advice.push("Budget usage is above 80%, keep an eye on new subscriptions.".to_string());
    }

    let half = Decimal::from(50);
    for row in usage.iter().filter(|row| row.percent_of_budget > half) {
        advice.push(format!(
            "'{}' takes {:.1}% of your budget. Check for overlapping or unused subscriptions.",
            row.category, row.percent_of_budget
        ));
    }

    advice
}

/// Check a ceiling entered by the user
///
/// # Errors
///
/// Returns `SubtrackError::Validation` unless `0 < limit <= 1,000,000`.
pub fn validate_ceiling(limit: Money) -> SubtrackResult<()> {
    if !limit.is_positive() {
        return Err(SubtrackError::Validation(
            "Monthly budget must be greater than zero".into(),
        ));
    }

    if limit > Money::from_units(MAX_MONTHLY_BUDGET) {
        return Err(SubtrackError::Validation(format!(
            "Monthly budget cannot exceed {}",
            Money::from_units(MAX_MONTHLY_BUDGET)
        )));
    }

    Ok(())
}

/// What switching to yearly billing could save
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavingsPotential {
    pub current_yearly_cost: Money,
    pub potential_yearly_cost: Money,
    pub potential_annual_savings: Money,
    /// Savings as a share of the current yearly cost, two decimal places
    pub savings_percent: Decimal,
}

/// Estimate the saving from moving monthly and quarterly plans to yearly ones
pub fn savings_potential<'a, I>(subscriptions: I) -> SavingsPotential
where
    I: IntoIterator<Item = &'a Subscription>,
{
    let keep = Decimal::from(100 - ANNUAL_BILLING_DISCOUNT_PERCENT) / Decimal::ONE_HUNDRED;

    let mut current = Money::zero();
    let mut potential = Money::zero();

    for subscription in subscriptions {
        let yearly = subscription_yearly_cost(subscription);
        current += yearly;
        potential += match subscription.cycle {
            BillingCycle::Yearly => yearly,
            BillingCycle::Monthly | BillingCycle::Quarterly => yearly * keep,
        };
    }

    let savings = (current - potential).max_zero();

    SavingsPotential {
        current_yearly_cost: current,
        potential_yearly_cost: potential,
        potential_annual_savings: savings,
        savings_percent: percent_of(savings, current, 2),
    }
}
