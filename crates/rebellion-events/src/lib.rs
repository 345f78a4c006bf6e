//! Shared record and snapshot types for the rebellion simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for the engine and for external report consumers.

pub mod record;
pub mod snapshot;

// Re-export record types
pub use record::{RunSummary, TickRecord};

// Re-export snapshot types
pub use snapshot::{CitizenSnapshot, CitizenStatus, CopSnapshot, SimSnapshot};
