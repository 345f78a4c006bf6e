//! Simulation Clock
//!
//! `SimulationClock` owns the tick counter and drives the per-tick
//! pipeline: hardship drift, jail-term bookkeeping, then one activation
//! of every placed agent in a freshly shuffled order. Agents activate
//! strictly sequentially, each seeing the world as left by the previous
//! one.

use tracing::debug;

use rebellion_events::{CitizenStatus, TickRecord};

use crate::agents::{step_citizen, step_cop};
use crate::error::GridError;
use crate::grid::AgentRef;
use crate::rng::SimRng;
use crate::world::SimWorld;

/// One entry of the per-tick activation order.
#[derive(Debug, Clone, Copy)]
enum Activation {
    Citizen(usize),
    Cop(usize),
}

/// Tick counter plus the advance logic.
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    tick: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    /// Ticks completed so far. Zero until the first `advance`.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Runs one full tick and returns its census.
    ///
    /// Pipeline order is fixed: hardship drift, jail pass, shuffled agent
    /// activations, then the tick counter increments and the census is
    /// taken. Citizens jailed earlier in the same tick are skipped by
    /// their own activation and first serve jail time on the next tick.
    pub fn advance(&mut self, world: &mut SimWorld, rng: &mut SimRng) -> Result<TickRecord, GridError> {
        if world.globals.shift_perceived_hardship {
            self.shift_hardship(world, rng);
        }
        self.process_jail_terms(world, rng)?;

        let mut order = self.activation_order(world);
        rng.shuffle(&mut order);

        for entry in order {
            match entry {
                Activation::Citizen(idx) => step_citizen(idx, world, rng)?,
                Activation::Cop(idx) => step_cop(idx, world, rng)?,
            }
        }

        self.tick += 1;
        let (active, quiescent, jailed) = world.tally();
        let record = TickRecord::new(self.tick, active, quiescent, jailed);
        debug!(
            tick = record.tick,
            active = record.active,
            quiescent = record.quiescent,
            jailed = record.jailed,
            "tick complete"
        );
        Ok(record)
    }

    /// Bounded random walk on every citizen's hardship, in id order,
    /// clamped to [0, 1]. Jailed citizens drift too.
    fn shift_hardship(&self, world: &mut SimWorld, rng: &mut SimRng) {
        let drift = world.globals.hardship_drift;
        for citizen in &mut world.citizens {
            let step = rng.uniform(-drift, drift);
            citizen.hardship = (citizen.hardship + step).clamp(0.0, 1.0);
        }
    }

    /// Decrements every jail term in citizen id order and releases
    /// citizens whose term hits zero.
    ///
    /// A released citizen re-enters on a random empty cell within vision
    /// of where it was arrested; if that neighborhood is full it stays
    /// off-grid as quiescent and retries here next tick.
    fn process_jail_terms(&self, world: &mut SimWorld, rng: &mut SimRng) -> Result<(), GridError> {
        for idx in 0..world.citizens.len() {
            if world.citizens[idx].is_jailed() {
                world.citizens[idx].jail_term_remaining -= 1;
                if world.citizens[idx].jail_term_remaining == 0 {
                    world.citizens[idx].status = CitizenStatus::Quiescent;
                    debug!(citizen = idx, "released from jail");
                }
            }

            // Covers both fresh releases and citizens still waiting for
            // a free cell from an earlier tick.
            if world.citizens[idx].status != CitizenStatus::Jailed
                && world.citizens[idx].position.is_none()
            {
                let around = world
                    .citizen_vision
                    .empty_neighbors(world.citizens[idx].last_cell, &world.grid);
                if !around.is_empty() {
                    let cell = around[rng.pick_index(around.len())];
                    world.grid.place(AgentRef::Citizen(idx), cell)?;
                    let citizen = &mut world.citizens[idx];
                    citizen.position = Some(cell);
                    citizen.last_cell = cell;
                }
            }
        }
        Ok(())
    }

    /// Every placed, non-jailed citizen (id order) followed by every cop.
    /// The caller shuffles.
    fn activation_order(&self, world: &SimWorld) -> Vec<Activation> {
        let mut order = Vec::with_capacity(world.citizens.len() + world.cops.len());
        for (idx, citizen) in world.citizens.iter().enumerate() {
            if !citizen.is_jailed() && citizen.position.is_some() {
                order.push(Activation::Citizen(idx));
            }
        }
        for idx in 0..world.cops.len() {
            order.push(Activation::Cop(idx));
        }
        order
    }
}
