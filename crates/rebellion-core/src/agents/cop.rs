//! Cop Logic
//!
//! Cops carry no persistent state beyond a position: every tick they scan
//! their vision for active citizens and either arrest one or patrol to a
//! random empty cell. Unlike citizens, cop patrol is not gated by the
//! movement flag.

use tracing::debug;

use rebellion_events::CitizenStatus;

use crate::error::GridError;
use crate::grid::{AgentRef, Coord};
use crate::rng::SimRng;
use crate::world::SimWorld;

/// Per-cop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cop {
    pub position: Coord,
}

impl Cop {
    pub fn new(cell: Coord) -> Self {
        Self { position: cell }
    }
}

/// Executes one cop activation: arrest a uniformly chosen active citizen
/// in vision, or patrol if none is in range.
///
/// An arrest jails the citizen with a term drawn from [1, max_jail_term],
/// frees its cell, and moves the cop into the vacated cell.
pub fn step_cop(idx: usize, world: &mut SimWorld, rng: &mut SimRng) -> Result<(), GridError> {
    let position = world.cops[idx].position;

    // Suspects are collected in neighborhood table order so the uniform
    // pick below is reproducible.
    let mut suspects: Vec<(usize, Coord)> = Vec::new();
    for &cell in world.cop_vision.neighbors(position) {
        if let Some(AgentRef::Citizen(citizen)) = world.grid.occupant(cell) {
            if world.citizens[citizen].status == CitizenStatus::Active {
                suspects.push((citizen, cell));
            }
        }
    }

    if !suspects.is_empty() {
        let (target, cell) = suspects[rng.pick_index(suspects.len())];
        let term = rng.jail_term(world.globals.max_jail_term);

        let citizen = &mut world.citizens[target];
        citizen.status = CitizenStatus::Jailed;
        citizen.jail_term_remaining = term;
        citizen.position = None;
        citizen.last_cell = cell;

        world.grid.remove(cell)?;
        world.grid.move_occupant(position, cell)?;
        world.cops[idx].position = cell;

        debug!(cop = idx, citizen = target, term, "arrest");
    } else {
        let empties = world.cop_vision.empty_neighbors(position, &world.grid);
        if !empties.is_empty() {
            let destination = empties[rng.pick_index(empties.len())];
            world.grid.move_occupant(position, destination)?;
            world.cops[idx].position = destination;
        }
    }

    Ok(())
}
