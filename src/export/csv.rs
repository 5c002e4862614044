//! CSV Export functionality
//!
//! Writes subscriptions in the same column layout the CSV importer reads, so
//! an exported file can be imported again.

use std::io::Write;

use crate::engine::normalizer::subscription_monthly_cost;
use crate::error::{SubtrackError, SubtrackResult};
use crate::models::Subscription;
use crate::storage::Storage;

/// Column headers written by [`export_subscriptions_csv`]
pub const SUBSCRIPTION_HEADERS: [&str; 9] = [
    "name",
    "price",
    "currency",
    "cycle",
    "category",
    "start_date",
    "active",
    "monthly_cost",
    "notes",
];

/// Export all stored subscriptions to CSV
pub fn export_subscriptions_csv<W: Write>(storage: &Storage, writer: &mut W) -> SubtrackResult<()> {
    let subscriptions = storage.subscriptions.get_all()?;
    write_subscriptions_csv(&subscriptions, writer)
}

/// Write the given subscriptions to CSV
pub fn write_subscriptions_csv<W: Write>(subscriptions: &[Subscription], writer: &mut W) -> SubtrackResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(SUBSCRIPTION_HEADERS)
        .map_err(|e| SubtrackError::Export(e.to_string()))?;

    for subscription in subscriptions {
        csv.write_record([
            subscription.name.clone(),
            subscription.price.amount().to_string(),
            subscription.currency.clone(),
            subscription.cycle.as_str().to_string(),
            subscription.category.as_str().to_string(),
            subscription.start_date.to_string(),
            subscription.active.to_string(),
            format!("{:.2}", subscription_monthly_cost(subscription).amount()),
            subscription.notes.clone(),
        ])
        .map_err(|e| SubtrackError::Export(e.to_string()))?;
    }

    csv.flush().map_err(|e| SubtrackError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SubtrackPaths;
    use crate::models::{BillingCycle, Category, Money};
    use crate::services::ImportService;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubtrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_export_subscriptions_csv() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .subscriptions
            .upsert(
                Subscription::new(
                    "Economist, Digital",
                    Money::from_units(2400),
                    BillingCycle::Quarterly,
                    Category::News,
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                )
                .with_currency("GBP"),
            )
            .unwrap();

        let mut output = Vec::new();
        export_subscriptions_csv(&storage, &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "name,price,currency,cycle,category,start_date,active,monthly_cost,notes");
        assert_eq!(
            lines[1],
            "\"Economist, Digital\",2400,GBP,quarterly,news,2024-01-01,true,800.00,"
        );
    }

    #[test]
    fn test_exported_csv_imports_back() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .subscriptions
            .upsert(Subscription::new(
                "Disney+",
                Money::from_cents(27000),
                BillingCycle::Monthly,
                Category::Streaming,
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            ))
            .unwrap();

        let mut output = Vec::new();
        export_subscriptions_csv(&storage, &mut output).unwrap();

        let (_other_dir, target) = create_test_storage();
        let result = ImportService::new(&target).import_from_reader(output.as_slice()).unwrap();
        assert_eq!(result.imported, 1);

        let imported = target.subscriptions.find("Disney+").unwrap().unwrap();
        assert_eq!(imported.price, Money::from_units(270));
        assert_eq!(imported.start_date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }
}
