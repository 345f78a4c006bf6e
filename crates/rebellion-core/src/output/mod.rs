//! Output Sinks
//!
//! Per-tick census records flow through a `TickSink`, which decouples the
//! run loop from where the rows end up. The engine ships a CSV file writer
//! and an in-memory sink for tests and embedding.

use thiserror::Error;

use rebellion_events::TickRecord;

pub mod report;

pub use report::CsvReportWriter;

/// Failure while persisting a record.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Receives one census record per completed tick, in tick order.
pub trait TickSink {
    fn record_tick(&mut self, record: &TickRecord) -> Result<(), OutputError>;
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<TickRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSink for MemorySink {
    fn record_tick(&mut self, record: &TickRecord) -> Result<(), OutputError> {
        self.records.push(*record);
        Ok(())
    }
}
