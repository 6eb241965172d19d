use anyhow::{Context, Result};
use csv::{Writer, WriterBuilder};
use std::{fs::File, path::Path};
use tracing::debug;

use crate::model::WeatherRecord;

/// CSV output for one run. Holds the file open until dropped.
pub struct CsvSink {
    writer: Writer<File>,
}

impl CsvSink {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;

        writer
            .write_record(WeatherRecord::FIELDS)
            .context("Failed to write CSV header")?;
        writer.flush().context("Failed to flush CSV header")?;

        debug!(path = %path.display(), "Output file created");
        Ok(Self { writer })
    }

    /// Append one row and flush it to disk.
    pub fn write(&mut self, record: &WeatherRecord) -> Result<()> {
        self.writer
            .serialize(record)
            .with_context(|| format!("Failed to write row for {}", record.city))?;
        self.writer.flush().context("Failed to flush output file")?;
        Ok(())
    }
}
