//! Rebellion Simulation Engine Library
//!
//! An agent-based model of civil unrest: citizens on a toroidal grid
//! weigh grievance against arrest risk and rebel, cops patrol and jail
//! them. A run is fully determined by its configuration and seed.

pub mod agents;
pub mod clock;
pub mod config;
pub mod error;
pub mod grid;
pub mod manager;
pub mod output;
pub mod rng;
pub mod vision;
pub mod world;

pub use config::SimConfig;
pub use error::{ConfigurationError, GridError, SimError};
pub use manager::{Phase, RebellionManager};
pub use output::{CsvReportWriter, MemorySink, TickSink};
pub use rng::SimRng;

pub use rebellion_events::{
    CitizenSnapshot, CitizenStatus, CopSnapshot, RunSummary, SimSnapshot, TickRecord,
};
