//! Agents
//!
//! The two agent kinds and their per-tick step logic. Both step functions
//! share the same contract: invoked once per tick in the clock's shuffled
//! activation order, with exclusive access to the world and the run's
//! random source.

pub mod citizen;
pub mod cop;

pub use citizen::{step_citizen, Citizen};
pub use cop::{step_cop, Cop};
