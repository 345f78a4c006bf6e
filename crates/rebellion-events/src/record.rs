//! Per-tick Records
//!
//! The flat tabular output of a run: one `TickRecord` per tick, plus a
//! `RunSummary` emitted once when a run completes. The schema is stable
//! across runs so logs from different parameterizations line up.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregate citizen counts at the end of one tick.
///
/// `active + quiescent + jailed` always equals the citizen population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Tick this record describes (tick 0 is the post-setup baseline)
    pub tick: u64,
    /// Citizens in open rebellion
    pub active: u32,
    /// Passive citizens, including released citizens awaiting a free cell
    pub quiescent: u32,
    /// Citizens currently serving a jail term
    pub jailed: u32,
}

impl TickRecord {
    /// Creates a new record.
    pub fn new(tick: u64, active: u32, quiescent: u32, jailed: u32) -> Self {
        Self {
            tick,
            active,
            quiescent,
            jailed,
        }
    }

    /// Total citizen population covered by this record.
    pub fn total(&self) -> u32 {
        self.active + self.quiescent + self.jailed
    }

    /// Column header for the tabular log.
    pub fn csv_header() -> &'static str {
        "tick,active,quiescent,jailed"
    }

    /// One row of the tabular log, matching [`TickRecord::csv_header`].
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{}",
            self.tick, self.active, self.quiescent, self.jailed
        )
    }
}

/// Metadata describing a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique identifier for this run
    pub run_id: Uuid,
    /// Seed the run was started with
    pub seed: u64,
    /// Number of ticks advanced
    pub ticks_run: u64,
    /// Counts at the final tick
    pub final_counts: TickRecord,
}

impl RunSummary {
    /// Creates a summary with a fresh run id.
    pub fn new(seed: u64, ticks_run: u64, final_counts: TickRecord) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            seed,
            ticks_run,
            final_counts,
        }
    }

    /// Serializes the summary to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
