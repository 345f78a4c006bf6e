//! Error Taxonomy
//!
//! Every failure in the engine is either a configuration defect or an
//! internal consistency fault. There is no transient or retryable class: a
//! run is a pure function of (config, seed, tick count), so any error is
//! surfaced immediately instead of recovered.

use thiserror::Error;

/// Invalid setup parameters. Raised by validation before any state mutation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Grid must have at least one cell in each dimension
    #[error("grid dimensions must be nonzero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    /// A bounded parameter fell outside its legal interval
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter that only has a lower bound went below it
    #[error("{name} must be nonnegative, got {value}")]
    Negative { name: &'static str, value: f64 },

    /// Jail terms are drawn from [1, max_jail_term]
    #[error("max_jail_term must be at least 1")]
    ZeroJailTerm,

    /// Every agent needs its own cell
    #[error("population of {agents} agents exceeds {cells} grid cells")]
    PopulationExceedsCells { agents: u64, cells: u64 },

    /// A sampling range with min above max
    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
}

/// Grid occupancy faults.
///
/// These never surface in normal operation; if one is returned, a placement
/// invariant was already broken and the run is aborted, not retried.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({x}, {y}) is already occupied")]
    OccupiedCell { x: u32, y: u32 },

    #[error("cell ({x}, {y}) is vacant")]
    VacantCell { x: u32, y: u32 },
}

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// `run` or `observe` invoked on a manager that was never set up
    #[error("simulation has not been set up")]
    NotSetUp,

    #[error("grid invariant violation: {0}")]
    Grid(#[from] GridError),

    #[error("output sink failure: {0}")]
    Output(#[from] crate::output::OutputError),
}
