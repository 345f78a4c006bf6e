//! World State
//!
//! `SimWorld` bundles the grid, the precomputed vision tables, the agent
//! population, and the run-wide `GlobalState`. It is built once per setup
//! and mutated only by the clock and the agent step functions, strictly
//! sequentially.

use tracing::info;

use rebellion_events::CitizenStatus;

use crate::agents::{Citizen, Cop};
use crate::config::SimConfig;
use crate::error::GridError;
use crate::grid::{AgentRef, Coord, Grid};
use crate::rng::SimRng;
use crate::vision::VisionTable;

/// Run-wide parameters shared by every decision.
///
/// Legitimacy is a single global value read by reference from every
/// citizen's decision, never duplicated per agent. Fields are mutated only
/// at setup and, through the manager's setters, at tick boundaries.
#[derive(Debug, Clone, Copy)]
pub struct GlobalState {
    /// Perceived regime legitimacy in [0, 1]; dampens grievance uniformly
    pub legitimacy: f64,
    /// Upper bound (inclusive) for drawn jail terms
    pub max_jail_term: u32,
    /// Whether citizens move after their activation decision
    pub movement_enabled: bool,
    /// Activation threshold for `grievance - net_risk`
    pub active_threshold: f64,
    /// The k constant of the arrest-probability estimate
    pub arrest_constant: f64,
    /// Extension: hardship takes a bounded random walk each tick
    pub shift_perceived_hardship: bool,
    /// Extension: grievance uses neighborhood-averaged hardship
    pub aggregate_grievance: bool,
    /// Step bound of the hardship random walk
    pub hardship_drift: f64,
}

/// The complete mutable state of one simulation run.
#[derive(Debug, Clone)]
pub struct SimWorld {
    pub grid: Grid,
    pub citizen_vision: VisionTable,
    pub cop_vision: VisionTable,
    pub citizens: Vec<Citizen>,
    pub cops: Vec<Cop>,
    pub globals: GlobalState,
}

impl SimWorld {
    /// Builds and populates a world from a validated configuration.
    ///
    /// Cops are placed before citizens, each on a uniformly random distinct
    /// empty cell; each citizen then draws hardship and risk aversion from
    /// the configured ranges. This draw order is part of the reproducibility
    /// contract.
    pub fn populate(config: &SimConfig, rng: &mut SimRng) -> Result<Self, GridError> {
        let mut grid = Grid::new(config.grid.width, config.grid.height);
        let citizen_vision =
            VisionTable::new(config.grid.width, config.grid.height, config.vision.citizen);
        let cop_vision = VisionTable::new(config.grid.width, config.grid.height, config.vision.cop);

        let mut available: Vec<Coord> = grid.all_coords().collect();

        let mut cops = Vec::with_capacity(config.population.cops as usize);
        for i in 0..config.population.cops as usize {
            let cell = available.swap_remove(rng.pick_index(available.len()));
            grid.place(AgentRef::Cop(i), cell)?;
            cops.push(Cop::new(cell));
        }

        let mut citizens = Vec::with_capacity(config.population.citizens as usize);
        for i in 0..config.population.citizens as usize {
            let cell = available.swap_remove(rng.pick_index(available.len()));
            grid.place(AgentRef::Citizen(i), cell)?;
            let hardship = config.distributions.hardship.sample(rng);
            let risk_aversion = config.distributions.risk_aversion.sample(rng);
            citizens.push(Citizen::new(hardship, risk_aversion, cell));
        }

        info!(
            citizens = citizens.len(),
            cops = cops.len(),
            width = config.grid.width,
            height = config.grid.height,
            "world populated"
        );

        Ok(Self {
            grid,
            citizen_vision,
            cop_vision,
            citizens,
            cops,
            globals: GlobalState {
                legitimacy: config.rules.legitimacy,
                max_jail_term: config.rules.max_jail_term,
                movement_enabled: config.rules.movement_enabled,
                active_threshold: config.rules.active_threshold,
                arrest_constant: config.rules.arrest_constant,
                shift_perceived_hardship: config.extensions.shift_perceived_hardship,
                aggregate_grievance: config.extensions.aggregate_grievance,
                hardship_drift: config.extensions.hardship_drift,
            },
        })
    }

    /// Grievance of the citizen at `idx`, standing at `position`.
    ///
    /// Baseline is `hardship * (1 - legitimacy)`. Under the aggregation
    /// extension, hardship is averaged over every placed citizen in vision
    /// including the evaluating citizen, which smooths outliers and couples
    /// neighborhoods; over a singleton neighborhood it equals the baseline.
    pub fn grievance(&self, idx: usize, position: Coord) -> f64 {
        let hardship = if self.globals.aggregate_grievance {
            let mut sum = self.citizens[idx].hardship;
            let mut count = 1u32;
            for &cell in self.citizen_vision.neighbors(position) {
                if let Some(AgentRef::Citizen(other)) = self.grid.occupant(cell) {
                    sum += self.citizens[other].hardship;
                    count += 1;
                }
            }
            sum / f64::from(count)
        } else {
            self.citizens[idx].hardship
        };
        hardship * (1.0 - self.globals.legitimacy)
    }

    /// Estimated arrest probability seen from `position`:
    /// `1 - exp(-k * cops_in_vision / active_citizens_in_vision)`.
    ///
    /// Both the zero-active and the zero-citizen neighborhood give 0; the
    /// evaluating citizen sits at the excluded center and is not counted
    /// in its own denominator.
    pub fn arrest_probability(&self, position: Coord) -> f64 {
        let mut cops = 0u32;
        let mut actives = 0u32;
        for &cell in self.citizen_vision.neighbors(position) {
            match self.grid.occupant(cell) {
                Some(AgentRef::Cop(_)) => cops += 1,
                Some(AgentRef::Citizen(i)) => {
                    if self.citizens[i].status == CitizenStatus::Active {
                        actives += 1;
                    }
                }
                None => {}
            }
        }
        if actives == 0 {
            return 0.0;
        }
        1.0 - (-self.globals.arrest_constant * f64::from(cops) / f64::from(actives)).exp()
    }

    /// Counts of (active, quiescent, jailed) citizens. Released citizens
    /// still awaiting a free cell count as quiescent.
    pub fn tally(&self) -> (u32, u32, u32) {
        let mut active = 0;
        let mut quiescent = 0;
        let mut jailed = 0;
        for citizen in &self.citizens {
            match citizen.status {
                CitizenStatus::Active => active += 1,
                CitizenStatus::Quiescent => quiescent += 1,
                CitizenStatus::Jailed => jailed += 1,
            }
        }
        (active, quiescent, jailed)
    }

    /// Number of agents currently holding a grid cell.
    pub fn placed_agent_count(&self) -> usize {
        self.citizens.iter().filter(|c| c.position.is_some()).count() + self.cops.len()
    }
}
