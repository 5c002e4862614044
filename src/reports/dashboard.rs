//! Dashboard Report
//!
//! Combines every engine view of the active subscriptions into one snapshot:
//! totals, category breakdown, budget status, upcoming charges, advice and the
//! possible saving from yearly billing.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

use crate::display::{format_budget, format_category_shares, format_upcoming};
use crate::display::report::{double_separator, format_header, format_percentage, separator};
use crate::engine::{
    self, BudgetEvaluation, CategoryBudgetUsage, CategoryShare, SavingsPotential, UpcomingCharge,
};
use crate::error::{SubtrackError, SubtrackResult};
use crate::models::{Money, Subscription};
use crate::storage::Storage;

const WIDTH: usize = 64;

/// Snapshot of subscription spending on a given day
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub as_of: NaiveDate,
    pub window_days: i64,
    pub active_count: usize,
    pub paused_count: usize,
    pub monthly_total: Money,
    pub yearly_total: Money,
    pub categories: Vec<CategoryShare>,
    pub budget: BudgetEvaluation,
    pub category_usage: Vec<CategoryBudgetUsage>,
    pub upcoming: Vec<UpcomingCharge>,
    pub recommendations: Vec<String>,
    pub savings: SavingsPotential,
}

impl DashboardReport {
    /// Build the dashboard from a set of subscriptions
    ///
    /// Paused subscriptions are counted but otherwise left out. A `ceiling` of
    /// zero means no budget is set.
    pub fn generate(
        subscriptions: &[Subscription],
        ceiling: Money,
        as_of: NaiveDate,
        window_days: i64,
    ) -> SubtrackResult<Self> {
        let active: Vec<&Subscription> = subscriptions.iter().filter(|s| s.active).collect();

        let monthly_total = engine::total_monthly(active.iter().copied());
        let yearly_total = engine::total_yearly(active.iter().copied());
        let categories = engine::aggregate(active.iter().copied());
        let budget = engine::evaluate(ceiling, monthly_total);
        let category_usage = engine::category_budget_usage(ceiling, &categories);
        let upcoming = engine::select_upcoming(active.iter().copied(), as_of, window_days)?;
        let recommendations = engine::recommendations(&budget, &category_usage);
        let savings = engine::savings_potential(active.iter().copied());

        Ok(Self {
            as_of,
            window_days,
            active_count: active.len(),
            paused_count: subscriptions.len() - active.len(),
            monthly_total,
            yearly_total,
            categories,
            budget,
            category_usage,
            upcoming,
            recommendations,
            savings,
        })
    }

    /// Build the dashboard from stored subscriptions and budget
    pub fn from_storage(storage: &Storage, as_of: NaiveDate, window_days: i64) -> SubtrackResult<Self> {
        let subscriptions = storage.subscriptions.get_all()?;
        let ceiling = storage.budget.monthly_limit()?;
        Self::generate(&subscriptions, ceiling, as_of, window_days)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format_header(&format!("Subscription Dashboard ({})", self.as_of), WIDTH));
        output.push('\n');
        output.push_str(&double_separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Active subscriptions: {}{}\n",
            self.active_count,
            if self.paused_count > 0 {
                format!(" ({} paused)", self.paused_count)
            } else {
                String::new()
            }
        ));
        output.push_str(&format!(
            "Monthly cost:         {}\n",
            self.monthly_total.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Yearly cost:          {}\n\n",
            self.yearly_total.format_with_symbol(symbol)
        ));

        output.push_str(&format_budget(&self.budget, symbol));
        output.push('\n');

        output.push_str(&format_category_shares(&self.categories, symbol));
        output.push('\n');

        output.push_str(&format_upcoming(&self.upcoming, self.window_days, symbol));
        output.push('\n');

        if self.savings.potential_annual_savings.is_positive() {
            output.push_str(&separator(WIDTH));
            output.push('\n');
            output.push_str(&format!(
                "Switching to yearly billing could save about {} a year ({}).\n",
                self.savings.potential_annual_savings.format_with_symbol(symbol),
                format_percentage(self.savings.savings_percent)
            ));
        }

        if !self.recommendations.is_empty() {
            output.push_str(&separator(WIDTH));
            output.push('\n');
            output.push_str("Recommendations:\n");
            for advice in &self.recommendations {
                output.push_str(&format!("  * {}\n", advice));
            }
        }

        output
    }

    /// Export the category breakdown and totals to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SubtrackResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record([
            "As Of",
            "Category",
            "Subscriptions",
            "Monthly",
            "Percent Of Total",
            "Percent Of Budget",
        ])?;

        for usage in &self.category_usage {
            let count = self
                .categories
                .iter()
                .find(|share| share.category == usage.category)
                .map(|share| share.count)
                .unwrap_or(0);

            csv.write_record([
                self.as_of.to_string(),
                usage.category.as_str().to_string(),
                count.to_string(),
                format!("{:.2}", usage.monthly_amount.amount()),
                usage.percent_of_total.to_string(),
                usage.percent_of_budget.to_string(),
            ])?;
        }

        csv.write_record([
            self.as_of.to_string(),
            "TOTAL".to_string(),
            self.active_count.to_string(),
            format!("{:.2}", self.monthly_total.amount()),
            String::new(),
            self.budget.usage_percent.round_dp(2).to_string(),
        ])?;

        csv.flush().map_err(|e| SubtrackError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BudgetTier;
    use crate::models::{BillingCycle, Category};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Subscription> {
        let mut paused = Subscription::new(
            "Retired",
            Money::from_units(999),
            BillingCycle::Monthly,
            Category::Gaming,
            date(2023, 1, 1),
        );
        paused.pause();

        vec![
            Subscription::new("Netflix", Money::from_units(390), BillingCycle::Monthly, Category::Streaming, date(2024, 1, 3)),
            Subscription::new("Adobe", Money::from_units(1680), BillingCycle::Monthly, Category::Software, date(2023, 11, 20)),
            Subscription::new("Dropbox", Money::from_units(1200), BillingCycle::Yearly, Category::Software, date(2023, 5, 4)),
            paused,
        ]
    }

    #[test]
    fn test_generate_dashboard() {
        let report = DashboardReport::generate(&sample(), Money::from_units(2000), date(2024, 5, 1), 7).unwrap();

        assert_eq!(report.active_count, 3);
        assert_eq!(report.paused_count, 1);
        assert_eq!(report.monthly_total, Money::from_units(2170));
        assert_eq!(report.yearly_total, Money::from_units(26040));
        assert_eq!(report.budget.tier, BudgetTier::Over);
        assert_eq!(report.categories[0].category, Category::Software);

        let names: Vec<_> = report.upcoming.iter().map(|c| c.subscription.name.as_str()).collect();
        assert_eq!(names, vec!["Netflix", "Dropbox"]);
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn test_paused_only_dashboard() {
        let subs: Vec<_> = sample().into_iter().filter(|s| !s.active).collect();
        let report = DashboardReport::generate(&subs, Money::zero(), date(2024, 5, 1), 7).unwrap();

        assert_eq!(report.active_count, 0);
        assert!(report.monthly_total.is_zero());
        assert!(report.categories.is_empty());
        assert!(report.upcoming.is_empty());
        assert_eq!(report.budget.tier, BudgetTier::None);
    }

    #[test]
    fn test_format_terminal() {
        let report = DashboardReport::generate(&sample(), Money::from_units(2000), date(2024, 5, 1), 7).unwrap();
        let output = report.format_terminal("$");

        assert!(output.contains("Subscription Dashboard (2024-05-01)"));
        assert!(output.contains("Active subscriptions: 3 (1 paused)"));
        assert!(output.contains("Monthly cost:         $2170.00"));
        assert!(output.contains("Over budget!"));
        assert!(output.contains("Recommendations:"));
    }

    #[test]
    fn test_export_csv() {
        let report = DashboardReport::generate(&sample(), Money::from_units(2000), date(2024, 5, 1), 7).unwrap();

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("As Of,Category"));
        assert!(lines[1].starts_with("2024-05-01,software,2,1780.00"));
        assert!(lines[3].starts_with("2024-05-01,TOTAL,3,2170.00"));
    }
}
