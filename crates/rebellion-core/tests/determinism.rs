//! End-to-end behavior tests: reproducibility, the activation rule's
//! boundary cases, and the state invariants that must hold at every tick
//! boundary.

use std::collections::HashSet;

use rebellion_core::config::{SimConfig, UnitRange};
use rebellion_core::output::MemorySink;
use rebellion_core::{CitizenStatus, Phase, RebellionManager, SimError, TickRecord};

fn base_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.grid.width = 15;
    config.grid.height = 15;
    config.population.citizens = 110;
    config.population.cops = 8;
    config.vision.citizen = 3.0;
    config.vision.cop = 3.0;
    config.rules.legitimacy = 0.3;
    config.run.seed = 42;
    config
}

fn run_records(config: SimConfig, ticks: u64) -> Vec<TickRecord> {
    let mut manager = RebellionManager::new();
    manager.setup(config).unwrap();
    let mut sink = MemorySink::new();
    manager.run(ticks, &mut sink).unwrap();
    sink.records
}

#[test]
fn test_same_seed_reproduces_the_run_exactly() {
    let a = run_records(base_config(), 50);
    let b = run_records(base_config(), 50);
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_produce_different_setups() {
    let mut manager_a = RebellionManager::new();
    manager_a.setup(base_config()).unwrap();

    let mut other = base_config();
    other.run.seed = 43;
    let mut manager_b = RebellionManager::new();
    manager_b.setup(other).unwrap();

    let positions = |m: &RebellionManager| {
        m.observe()
            .unwrap()
            .citizens
            .iter()
            .map(|c| c.position)
            .collect::<Vec<_>>()
    };
    assert_ne!(positions(&manager_a), positions(&manager_b));
}

#[test]
fn test_no_cops_means_no_arrests() {
    let mut config = base_config();
    config.population.cops = 0;

    for record in run_records(config, 40) {
        assert_eq!(record.jailed, 0);
    }
}

#[test]
fn test_full_legitimacy_means_no_rebellion() {
    let mut config = base_config();
    config.rules.legitimacy = 1.0;

    for record in run_records(config, 40) {
        assert_eq!(record.active, 0);
        assert_eq!(record.jailed, 0);
    }
}

#[test]
fn test_fearless_population_with_no_legitimacy_all_rebel() {
    // Hardship pinned to 1, risk aversion to 0, legitimacy 0: grievance is
    // 1 and risk never bites, so every citizen is active from tick 1 on.
    let mut config = SimConfig::default();
    config.grid.width = 10;
    config.grid.height = 10;
    config.population.citizens = 5;
    config.population.cops = 0;
    config.vision.citizen = 3.0;
    config.vision.cop = 3.0;
    config.rules.legitimacy = 0.0;
    config.distributions.hardship = UnitRange { min: 1.0, max: 1.0 };
    config.distributions.risk_aversion = UnitRange { min: 0.0, max: 0.0 };
    config.run.seed = 42;

    for record in run_records(config, 20) {
        assert_eq!(record.active, 5);
        assert_eq!(record.quiescent, 0);
    }
}

#[test]
fn test_arrests_happen_under_harsh_conditions() {
    let mut config = base_config();
    config.rules.legitimacy = 0.1;
    config.population.cops = 20;

    let records = run_records(config, 50);
    assert!(records.iter().any(|r| r.jailed > 0));
}

#[test]
fn test_tick_boundary_invariants() {
    let mut config = base_config();
    config.rules.legitimacy = 0.1;

    let mut manager = RebellionManager::new();
    manager.setup(config).unwrap();
    let mut sink = MemorySink::new();

    for _ in 0..30 {
        manager.run(1, &mut sink).unwrap();
        let snapshot = manager.observe().unwrap();

        // Census covers the whole population.
        assert_eq!(snapshot.counts.total(), 110);

        // No two agents share a cell.
        let mut cells = HashSet::new();
        for citizen in &snapshot.citizens {
            if let Some(cell) = citizen.position {
                assert!(cells.insert(cell), "two agents share {:?}", cell);
            }
        }
        for cop in &snapshot.cops {
            assert!(cells.insert(cop.position), "two agents share a cop cell");
        }

        // Jail bookkeeping: a positive term exactly when jailed, and the
        // jailed hold no cell.
        for citizen in &snapshot.citizens {
            match citizen.status {
                CitizenStatus::Jailed => {
                    assert!(citizen.jail_term_remaining > 0);
                    assert!(citizen.position.is_none());
                }
                _ => assert_eq!(citizen.jail_term_remaining, 0),
            }
        }
    }
}

#[test]
fn test_run_requires_setup() {
    let mut manager = RebellionManager::new();
    let mut sink = MemorySink::new();
    assert!(matches!(manager.run(1, &mut sink), Err(SimError::NotSetUp)));
}

#[test]
fn test_reset_returns_to_idle() {
    let mut manager = RebellionManager::new();
    manager.setup(base_config()).unwrap();
    let mut sink = MemorySink::new();
    manager.run(5, &mut sink).unwrap();
    assert_eq!(manager.phase(), Phase::Completed);

    manager.reset();
    assert_eq!(manager.phase(), Phase::Idle);
    assert!(matches!(manager.observe(), Err(SimError::NotSetUp)));
}

#[test]
fn test_aggregate_grievance_matches_baseline_for_a_lone_citizen() {
    // With one citizen the neighborhood average is its own hardship, so
    // the extension cannot change the run.
    let mut config = SimConfig::default();
    config.grid.width = 8;
    config.grid.height = 8;
    config.population.citizens = 1;
    config.population.cops = 0;
    config.vision.citizen = 2.0;
    config.vision.cop = 2.0;
    config.rules.legitimacy = 0.4;

    let baseline = run_records(config.clone(), 30);
    config.extensions.aggregate_grievance = true;
    let aggregated = run_records(config, 30);

    assert_eq!(baseline, aggregated);
}

#[test]
fn test_disabling_movement_freezes_citizen_positions() {
    let mut config = base_config();
    config.population.cops = 0;
    config.rules.legitimacy = 1.0;

    let mut manager = RebellionManager::new();
    manager.setup(config).unwrap();
    let mut sink = MemorySink::new();

    manager.set_movement_enabled(false).unwrap();
    let before = manager.observe().unwrap();
    manager.run(10, &mut sink).unwrap();
    let after = manager.observe().unwrap();

    let positions = |s: &rebellion_core::SimSnapshot| {
        s.citizens.iter().map(|c| c.position).collect::<Vec<_>>()
    };
    assert_eq!(positions(&before), positions(&after));
}

#[test]
fn test_mid_run_legitimacy_drop_sparks_rebellion() {
    let mut config = base_config();
    config.population.cops = 0;
    config.rules.legitimacy = 1.0;

    let mut manager = RebellionManager::new();
    manager.setup(config).unwrap();
    let mut sink = MemorySink::new();
    manager.run(10, &mut sink).unwrap();
    assert!(sink.records.iter().all(|r| r.active == 0));

    manager.set_legitimacy(0.0).unwrap();
    let mut after = MemorySink::new();
    manager.run(10, &mut after).unwrap();
    assert!(after.records.iter().any(|r| r.active > 0));
}
