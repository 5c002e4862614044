//! Billing-cycle and budget projection engine
//!
//! Pure calculations over borrowed subscriptions: cycle normalization,
//! next-charge projection, category aggregation, budget evaluation and
//! upcoming-charge selection. Nothing in here performs I/O, reads the clock or
//! keeps state between calls, and inputs are never modified.

pub mod aggregator;
pub mod budget;
pub mod normalizer;
pub mod projector;
pub mod upcoming;

pub use aggregator::{aggregate, CategoryShare};
pub use budget::{
    category_budget_usage, evaluate, recommendations, savings_potential, validate_ceiling,
    BudgetEvaluation, BudgetTier, CategoryBudgetUsage, SavingsPotential,
    OVER_THRESHOLD_PERCENT, WARNING_THRESHOLD_PERCENT,
};
pub use normalizer::{monthly_equivalent, monthly_equivalent_str, total_monthly, total_yearly, yearly_cost};
pub use projector::{days_until, next_occurrence, parse_start_date, project, project_str, Projection};
pub use upcoming::{is_due_soon, select_upcoming, UpcomingCharge, DEFAULT_REMINDER_WINDOW_DAYS};
