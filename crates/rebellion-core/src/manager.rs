//! Run Manager
//!
//! `RebellionManager` is the public face of the engine: it owns the
//! lifecycle (setup, run, observe, reset), holds the configuration and
//! the seeded random source, and exposes the between-run parameter
//! setters. Library callers and the binary both drive the model through
//! this type only.

use tracing::info;

use rebellion_events::{CitizenSnapshot, CopSnapshot, RunSummary, SimSnapshot, TickRecord};

use crate::clock::SimulationClock;
use crate::config::SimConfig;
use crate::error::{ConfigurationError, SimError};
use crate::output::TickSink;
use crate::rng::SimRng;
use crate::world::SimWorld;

/// Lifecycle phase of a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No world exists yet
    Idle,
    /// Set up and accepting `run` calls
    Running,
    /// At least one `run` has finished; more ticks may still be run
    Completed,
}

/// Everything owned by one set-up run.
#[derive(Debug)]
struct RunState {
    config: SimConfig,
    world: SimWorld,
    clock: SimulationClock,
    rng: SimRng,
}

/// Owns one simulation at a time and drives it through its lifecycle.
#[derive(Debug, Default)]
pub struct RebellionManager {
    state: Option<RunState>,
    completed: bool,
}

impl RebellionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (&self.state, self.completed) {
            (None, _) => Phase::Idle,
            (Some(_), false) => Phase::Running,
            (Some(_), true) => Phase::Completed,
        }
    }

    /// Validates `config`, then builds and populates a fresh world seeded
    /// from `config.run.seed`. Replaces any previous run. On a validation
    /// error nothing changes.
    pub fn setup(&mut self, config: SimConfig) -> Result<(), SimError> {
        config.validate()?;

        let mut rng = SimRng::seed_from_u64(config.run.seed);
        let world = SimWorld::populate(&config, &mut rng)?;

        info!(seed = config.run.seed, "simulation set up");
        self.state = Some(RunState {
            config,
            world,
            clock: SimulationClock::new(),
            rng,
        });
        self.completed = false;
        Ok(())
    }

    /// Runs `num_ticks` ticks, handing each census record to `sink` as it
    /// completes. Runs may be chained; the tick counter carries across.
    pub fn run(&mut self, num_ticks: u64, sink: &mut dyn TickSink) -> Result<(), SimError> {
        let state = self.state.as_mut().ok_or(SimError::NotSetUp)?;

        for _ in 0..num_ticks {
            let record = state.clock.advance(&mut state.world, &mut state.rng)?;
            sink.record_tick(&record)?;
        }

        self.completed = true;
        info!(
            ticks = num_ticks,
            tick = self.current_tick(),
            "run complete"
        );
        Ok(())
    }

    /// Discards the current run and returns to `Idle`.
    pub fn reset(&mut self) {
        self.state = None;
        self.completed = false;
    }

    /// Ticks completed since setup; zero when idle.
    pub fn current_tick(&self) -> u64 {
        self.state.as_ref().map_or(0, |s| s.clock.tick())
    }

    /// Full point-in-time snapshot of the current world, taken at a tick
    /// boundary.
    pub fn observe(&self) -> Result<SimSnapshot, SimError> {
        let state = self.state.as_ref().ok_or(SimError::NotSetUp)?;

        let citizens = state
            .world
            .citizens
            .iter()
            .enumerate()
            .map(|(id, c)| CitizenSnapshot {
                id: id as u32,
                status: c.status,
                position: c.position.map(|p| (p.x, p.y)),
                hardship: c.hardship,
                risk_aversion: c.risk_aversion,
                jail_term_remaining: c.jail_term_remaining,
            })
            .collect();
        let cops = state
            .world
            .cops
            .iter()
            .enumerate()
            .map(|(id, p)| CopSnapshot {
                id: id as u32,
                position: (p.position.x, p.position.y),
            })
            .collect();

        let (active, quiescent, jailed) = state.world.tally();
        Ok(SimSnapshot {
            tick: state.clock.tick(),
            counts: TickRecord::new(state.clock.tick(), active, quiescent, jailed),
            citizens,
            cops,
        })
    }

    /// Summary of the current run for the sidecar metadata file.
    pub fn summary(&self) -> Result<RunSummary, SimError> {
        let state = self.state.as_ref().ok_or(SimError::NotSetUp)?;
        let (active, quiescent, jailed) = state.world.tally();
        Ok(RunSummary::new(
            state.config.run.seed,
            state.clock.tick(),
            TickRecord::new(state.clock.tick(), active, quiescent, jailed),
        ))
    }

    /// Changes perceived legitimacy for all subsequent ticks.
    pub fn set_legitimacy(&mut self, legitimacy: f64) -> Result<(), SimError> {
        if !(0.0..=1.0).contains(&legitimacy) {
            return Err(ConfigurationError::OutOfRange {
                name: "legitimacy",
                value: legitimacy,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        let state = self.state.as_mut().ok_or(SimError::NotSetUp)?;
        state.world.globals.legitimacy = legitimacy;
        state.config.rules.legitimacy = legitimacy;
        Ok(())
    }

    /// Changes the jail-term cap for subsequent arrests. Terms already
    /// being served are unaffected.
    pub fn set_max_jail_term(&mut self, max_jail_term: u32) -> Result<(), SimError> {
        if max_jail_term == 0 {
            return Err(ConfigurationError::ZeroJailTerm.into());
        }
        let state = self.state.as_mut().ok_or(SimError::NotSetUp)?;
        state.world.globals.max_jail_term = max_jail_term;
        state.config.rules.max_jail_term = max_jail_term;
        Ok(())
    }

    /// Toggles citizen movement for subsequent ticks.
    pub fn set_movement_enabled(&mut self, enabled: bool) -> Result<(), SimError> {
        let state = self.state.as_mut().ok_or(SimError::NotSetUp)?;
        state.world.globals.movement_enabled = enabled;
        state.config.rules.movement_enabled = enabled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;
    use rebellion_events::CitizenStatus;

    fn small_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.grid.width = 12;
        config.grid.height = 12;
        config.population.citizens = 40;
        config.population.cops = 6;
        config.vision.citizen = 3.0;
        config.vision.cop = 3.0;
        config.rules.legitimacy = 0.3;
        config
    }

    #[test]
    fn test_lifecycle_phases() {
        let mut manager = RebellionManager::new();
        assert_eq!(manager.phase(), Phase::Idle);

        manager.setup(small_config()).unwrap();
        assert_eq!(manager.phase(), Phase::Running);
        assert_eq!(manager.current_tick(), 0);

        let mut sink = MemorySink::new();
        manager.run(10, &mut sink).unwrap();
        assert_eq!(manager.phase(), Phase::Completed);
        assert_eq!(manager.current_tick(), 10);
        assert_eq!(sink.records.len(), 10);

        manager.reset();
        assert_eq!(manager.phase(), Phase::Idle);
        assert_eq!(manager.current_tick(), 0);
    }

    #[test]
    fn test_run_before_setup_fails() {
        let mut manager = RebellionManager::new();
        let mut sink = MemorySink::new();
        assert!(matches!(
            manager.run(5, &mut sink),
            Err(SimError::NotSetUp)
        ));
        assert!(matches!(manager.observe(), Err(SimError::NotSetUp)));
        assert!(matches!(manager.summary(), Err(SimError::NotSetUp)));
    }

    #[test]
    fn test_invalid_config_leaves_manager_untouched() {
        let mut manager = RebellionManager::new();
        manager.setup(small_config()).unwrap();
        let tick_before = manager.current_tick();

        let mut bad = small_config();
        bad.rules.legitimacy = 2.0;
        assert!(manager.setup(bad).is_err());

        // The earlier run is still live.
        assert_eq!(manager.phase(), Phase::Running);
        assert_eq!(manager.current_tick(), tick_before);
    }

    #[test]
    fn test_chained_runs_continue_the_tick_counter() {
        let mut manager = RebellionManager::new();
        manager.setup(small_config()).unwrap();

        let mut sink = MemorySink::new();
        manager.run(5, &mut sink).unwrap();
        manager.run(5, &mut sink).unwrap();

        let ticks: Vec<u64> = sink.records.iter().map(|r| r.tick).collect();
        assert_eq!(ticks, (1..=10).collect::<Vec<u64>>());
    }

    #[test]
    fn test_observe_reports_consistent_counts() {
        let mut manager = RebellionManager::new();
        manager.setup(small_config()).unwrap();
        let mut sink = MemorySink::new();
        manager.run(20, &mut sink).unwrap();

        let snapshot = manager.observe().unwrap();
        assert_eq!(snapshot.tick, 20);
        assert_eq!(snapshot.counts.total(), 40);
        assert_eq!(snapshot.counts, *sink.records.last().unwrap());

        // Jailed citizens hold no cell; everyone else holds exactly one.
        for citizen in &snapshot.citizens {
            if citizen.status == CitizenStatus::Jailed {
                assert!(citizen.position.is_none());
                assert!(citizen.jail_term_remaining > 0);
            } else {
                assert_eq!(citizen.jail_term_remaining, 0);
            }
        }
    }

    #[test]
    fn test_setters_require_setup_and_validate() {
        let mut manager = RebellionManager::new();
        assert!(manager.set_movement_enabled(false).is_err());

        manager.setup(small_config()).unwrap();
        manager.set_legitimacy(0.9).unwrap();
        manager.set_max_jail_term(5).unwrap();
        manager.set_movement_enabled(false).unwrap();

        assert!(manager.set_legitimacy(-0.1).is_err());
        assert!(manager.set_max_jail_term(0).is_err());
    }

    #[test]
    fn test_summary_matches_run() {
        let mut manager = RebellionManager::new();
        manager.setup(small_config()).unwrap();
        let mut sink = MemorySink::new();
        manager.run(15, &mut sink).unwrap();

        let summary = manager.summary().unwrap();
        assert_eq!(summary.seed, 42);
        assert_eq!(summary.ticks_run, 15);
        assert_eq!(summary.final_counts, *sink.records.last().unwrap());
    }
}
