//! Import and export CLI commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::config::settings::Settings;
use crate::error::{SubtrackError, SubtrackResult};
use crate::export::{export_full_json, export_full_yaml, export_subscriptions_csv, import_from_json, import_from_yaml};
use crate::services::ImportService;
use crate::storage::Storage;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Import subscriptions from a CSV file, or restore a JSON/YAML export
pub fn handle_import_command(storage: &Storage, settings: &Settings, file: &Path) -> SubtrackResult<()> {
    match ExportFormat::from_path(file).unwrap_or(ExportFormat::Csv) {
        ExportFormat::Csv => {
            let service = ImportService::new(storage).with_default_currency(&settings.default_currency);
            let result = service.import_file(file)?;

            println!("Imported {} subscription(s).", result.imported);
            if result.duplicates_skipped > 0 {
                println!("Skipped {} duplicate(s).", result.duplicates_skipped);
            }
            if result.has_errors() {
                println!("{} row(s) could not be imported:", result.errors.len());
                for error in &result.errors {
                    println!("  line {}: {}", error.line, error.message);
                }
            }
        }
        format => {
            let contents = std::fs::read_to_string(file)
                .map_err(|e| SubtrackError::Import(format!("Failed to read {}: {}", file.display(), e)))?;
            let export = if format == ExportFormat::Json {
                import_from_json(&contents)?
            } else {
                import_from_yaml(&contents)?
            };

            let restored = export.restore_into(storage)?;
            println!("Restored {} subscription(s) from {}.", restored, file.display());
        }
    }

    Ok(())
}

/// Export data to a file
pub fn handle_export_command(
    storage: &Storage,
    output: &Path,
    format: Option<ExportFormat>,
) -> SubtrackResult<()> {
    let format = format
        .or_else(|| ExportFormat::from_path(output))
        .unwrap_or(ExportFormat::Json);

    let file = File::create(output).map_err(|e| {
        SubtrackError::Export(format!("Failed to create {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => export_subscriptions_csv(storage, &mut writer)?,
        ExportFormat::Json => export_full_json(storage, &mut writer, true)?,
        ExportFormat::Yaml => export_full_yaml(storage, &mut writer)?,
    }

    writer
        .flush()
        .map_err(|e| SubtrackError::Export(e.to_string()))?;

    println!(
        "Exported {} subscription(s) to {}",
        storage.subscriptions.count()?,
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("subs.CSV")), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_path(Path::new("backup.yml")), Some(ExportFormat::Yaml));
        assert_eq!(ExportFormat::from_path(Path::new("backup.json")), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(ExportFormat::from_path(Path::new("noext")), None);
    }
}
