//! CSV Report Writer
//!
//! Streams one census row per tick to a CSV file, header first, so a
//! partially completed run still leaves a readable report behind.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rebellion_events::TickRecord;

use super::{OutputError, TickSink};

/// Buffered CSV writer implementing `TickSink`.
#[derive(Debug)]
pub struct CsvReportWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    rows_written: u64,
}

impl CsvReportWriter {
    /// Creates the report file and writes the header row.
    pub fn new(path: &Path) -> Result<Self, OutputError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", TickRecord::csv_header())?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows_written: 0,
        })
    }

    /// Flushes buffered rows to disk.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of data rows written (header excluded).
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TickSink for CsvReportWriter {
    fn record_tick(&mut self, record: &TickRecord) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", record.to_csv_row())?;
        self.rows_written += 1;
        Ok(())
    }
}
