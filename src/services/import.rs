//! CSV Import service
//!
//! Imports subscriptions from CSV files with a header row. Columns are matched
//! by header name, so their order does not matter:
//!
//! | column       | required | notes                                  |
//! |--------------|----------|----------------------------------------|
//! | `name`       | yes      |                                        |
//! | `price`      | yes      | `$`, `,` and surrounding spaces allowed |
//! | `cycle`      | yes      | monthly, quarterly or yearly           |
//! | `start_date` | yes      | `YYYY-MM-DD`                           |
//! | `currency`   | no       | defaults to the configured currency    |
//! | `category`   | no       | defaults to Other                      |
//! | `notes`      | no       |                                        |
//!
//! A bad row is reported with its line number and does not stop the rest of
//! the file from importing.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, StringRecord};

use crate::engine::parse_start_date;
use crate::error::{SubtrackError, SubtrackResult};
use crate::models::{BillingCycle, Category, Money};
use crate::services::subscription::{NewSubscription, SubscriptionService};
use crate::storage::Storage;

/// Column positions found in the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub name_column: usize,
    pub price_column: usize,
    pub cycle_column: usize,
    pub start_date_column: usize,
    pub currency_column: Option<usize>,
    pub category_column: Option<usize>,
    pub notes_column: Option<usize>,
}

impl ColumnMapping {
    /// Detect column positions from a header record
    ///
    /// # Errors
    ///
    /// Returns `SubtrackError::Import` naming the first required column that
    /// is missing.
    pub fn from_headers(headers: &StringRecord) -> SubtrackResult<Self> {
        let mut name = None;
        let mut price = None;
        let mut cycle = None;
        let mut start_date = None;
        let mut currency = None;
        let mut category = None;
        let mut notes = None;

        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase().replace([' ', '-'], "_");

            match h.as_str() {
                "name" | "service" | "subscription" => name = name.or(Some(idx)),
                "price" | "amount" | "cost" => price = price.or(Some(idx)),
                "cycle" | "billing_cycle" | "billing" => cycle = cycle.or(Some(idx)),
                "start_date" | "start" | "date" => start_date = start_date.or(Some(idx)),
                "currency" => currency = currency.or(Some(idx)),
                "category" => category = category.or(Some(idx)),
                "notes" | "note" | "memo" => notes = notes.or(Some(idx)),
                _ => {}
            }
        }

        let require = |column: Option<usize>, label: &str| {
            column.ok_or_else(|| SubtrackError::Import(format!("Missing '{}' column", label)))
        };

        Ok(Self {
            name_column: require(name, "name")?,
            price_column: require(price, "price")?,
            cycle_column: require(cycle, "cycle")?,
            start_date_column: require(start_date, "start_date")?,
            currency_column: currency,
            category_column: category,
            notes_column: notes,
        })
    }
}

/// A row that could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRowError {
    /// Line number in the file, counting the header as line 1
    pub line: usize,
    pub message: String,
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of subscriptions imported
    pub imported: usize,
    /// Rows skipped because a subscription with that name already exists
    pub duplicates_skipped: usize,
    /// Rows that could not be parsed or validated
    pub errors: Vec<ImportRowError>,
}

impl ImportResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
    subscriptions: SubscriptionService<'a>,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            subscriptions: SubscriptionService::new(storage),
        }
    }

    /// Currency given to rows without a currency column or value
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.subscriptions = self.subscriptions.with_default_currency(currency);
        self
    }

    /// Import a CSV file from disk
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> SubtrackResult<ImportResult> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SubtrackError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_from_reader(file)
    }

    /// Import CSV data from any reader
    pub fn import_from_reader<R: Read>(&self, reader: R) -> SubtrackResult<ImportResult> {
        let mut reader = Reader::from_reader(reader);
        let parsed = self.parse_csv_from_reader(&mut reader)?;

        let mut result = ImportResult::default();
        let mut seen: HashSet<String> = self
            .storage
            .subscriptions
            .get_all()?
            .into_iter()
            .map(|s| s.name.to_lowercase())
            .collect();

        for (line, row) in parsed {
            let subscription = match row.and_then(|new| self.subscriptions.build(new)) {
                Ok(subscription) => subscription,
                Err(e) => {
                    result.errors.push(ImportRowError {
                        line,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            if !seen.insert(subscription.name.to_lowercase()) {
                result.duplicates_skipped += 1;
                continue;
            }

            self.storage.subscriptions.upsert(subscription)?;
            result.imported += 1;
        }

        if result.imported > 0 {
            self.storage.subscriptions.save()?;
        }

        tracing::info!(
            imported = result.imported,
            duplicates = result.duplicates_skipped,
            errors = result.errors.len(),
            "csv import finished"
        );
        Ok(result)
    }

    /// Parse every data row, pairing each outcome with its line number
    pub fn parse_csv_from_reader<R: Read>(
        &self,
        reader: &mut Reader<R>,
    ) -> SubtrackResult<Vec<(usize, SubtrackResult<NewSubscription>)>> {
        let headers = reader.headers()?.clone();
        let mapping = ColumnMapping::from_headers(&headers)?;

        let mut results = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let line = idx + 2;
            let parsed = record
                .map_err(|e| SubtrackError::Import(format!("Error reading CSV record: {}", e)))
                .and_then(|record| parse_record(&record, &mapping));
            results.push((line, parsed));
        }
        Ok(results)
    }
}

fn field<'r>(record: &'r StringRecord, column: usize, label: &str) -> SubtrackResult<&'r str> {
    let value = record.get(column).map(str::trim).unwrap_or("");
    if value.is_empty() {
        return Err(SubtrackError::Import(format!("Missing {}", label)));
    }
    Ok(value)
}

fn optional_field(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    column
        .and_then(|col| record.get(col))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parse a single CSV record
fn parse_record(record: &StringRecord, mapping: &ColumnMapping) -> SubtrackResult<NewSubscription> {
    let name = field(record, mapping.name_column, "name")?;

    let price_str = field(record, mapping.price_column, "price")?;
    let price = Money::parse(price_str)
        .map_err(|_| SubtrackError::Import(format!("Invalid price: '{}'", price_str)))?;

    let cycle: BillingCycle = field(record, mapping.cycle_column, "cycle")?.parse()?;
    let start_date = parse_start_date(field(record, mapping.start_date_column, "start_date")?)?;

    let category = optional_field(record, mapping.category_column)
        .map(Category::new)
        .unwrap_or_default();

    let mut new = NewSubscription::new(name, price, cycle, category, start_date);
    new.currency = optional_field(record, mapping.currency_column).map(str::to_string);
    new.notes = optional_field(record, mapping.notes_column).map(str::to_string);
    Ok(new)
}
