//! CSV export of scraped records.

use crate::catalog::dates::format_release_date;
use crate::catalog::models::ComicRecord;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 9] = [
    "Nombre",
    "Autor",
    "Editorial",
    "ISBN",
    "Precio",
    "Fecha de lanzamiento",
    "Formato",
    "Páginas",
    "Disponibilidad",
];

/// Writes records to a UTF-8 CSV file: one header row, one row per
/// record in input order, no index column.
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    /// Creates an exporter targeting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Serializes all records and flushes the file.
    pub fn export(&self, records: &[ComicRecord]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create output file: {}", self.path.display()))?;

        writer.write_record(CSV_HEADERS).context("Failed to write CSV header")?;

        for record in records {
            let release = format_release_date(record.release_date);
            writer
                .write_record([
                    record.name.as_str(),
                    record.author.as_str(),
                    record.publisher.as_str(),
                    record.isbn.as_str(),
                    record.price.as_str(),
                    release.as_str(),
                    record.format.as_str(),
                    record.page_count.as_str(),
                    record.availability.as_spanish(),
                ])
                .with_context(|| format!("Failed to write record for {}", record.name))?;
        }

        writer.flush().context("Failed to flush CSV output")?;
        info!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// The output path this exporter writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
