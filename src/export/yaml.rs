//! YAML Export functionality
//!
//! Exports the complete database to YAML format for human-readable backup.

use crate::error::{SubtrackError, SubtrackResult};
use crate::export::json::FullExport;
use crate::storage::Storage;
use std::io::Write;

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> SubtrackResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# Subtrack Full Export\n# Generated: {}\n# App Version: {}\n#\n# Restore with: subtrack import <this file>\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| SubtrackError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SubtrackError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a YAML export
pub fn import_from_yaml(yaml_str: &str) -> SubtrackResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| SubtrackError::Import(e.to_string()))?;

    export.validate().map_err(SubtrackError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SubtrackPaths;
    use crate::models::{BillingCycle, Category, Money, Subscription};
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
    fn test_yaml_export() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .subscriptions
            .upsert(Subscription::new(
                "Spotify",
                Money::from_units(149),
                BillingCycle::Monthly,
                Category::Music,
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            ))
            .unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# Subtrack Full Export"));
        assert!(yaml.contains("schema_version"));
        assert!(yaml.contains("Spotify"));
        assert!(yaml.contains("cycle: monthly"));
    }

    #[test]
    fn test_yaml_import() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .subscriptions
            .upsert(Subscription::new(
                "Nintendo Online",
                Money::from_units(600),
                BillingCycle::Yearly,
                Category::Gaming,
                NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            ))
            .unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.subscriptions.len(), 1);
        assert_eq!(imported.subscriptions[0].cycle, BillingCycle::Yearly);
        assert_eq!(imported.subscriptions[0].category, Category::Gaming);
    }
}
