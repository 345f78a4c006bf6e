//! Citizen Logic
//!
//! A citizen weighs grievance against the estimated risk of arrest each
//! tick and turns Active when the difference clears the activation
//! threshold. Jail terms and release re-placement are handled by the
//! clock's jail pass, not here.

use rebellion_events::CitizenStatus;

use crate::error::GridError;
use crate::grid::Coord;
use crate::rng::SimRng;
use crate::world::SimWorld;

/// Per-citizen state.
///
/// `position` is `None` while the citizen is jailed or released but still
/// waiting for a free cell; `last_cell` remembers where it last stood so
/// release re-placement can search that vicinity.
#[derive(Debug, Clone, PartialEq)]
pub struct Citizen {
    /// Perceived hardship in [0, 1]; fixed unless the shift extension is on
    pub hardship: f64,
    /// Risk aversion in [0, 1], fixed at setup
    pub risk_aversion: f64,
    pub status: CitizenStatus,
    /// Nonzero exactly when status is Jailed
    pub jail_term_remaining: u32,
    pub position: Option<Coord>,
    pub last_cell: Coord,
}

impl Citizen {
    /// Creates a quiescent citizen standing at `cell`.
    pub fn new(hardship: f64, risk_aversion: f64, cell: Coord) -> Self {
        Self {
            hardship,
            risk_aversion,
            status: CitizenStatus::Quiescent,
            jail_term_remaining: 0,
            position: Some(cell),
            last_cell: cell,
        }
    }

    pub fn is_jailed(&self) -> bool {
        self.status == CitizenStatus::Jailed
    }
}

/// Executes one citizen activation: recompute grievance, estimate arrest
/// risk, apply the activation rule, then move if movement is enabled.
///
/// A citizen arrested earlier in the same tick is skipped entirely, so
/// arrest and movement stay mutually exclusive within a tick.
pub fn step_citizen(idx: usize, world: &mut SimWorld, rng: &mut SimRng) -> Result<(), GridError> {
    if world.citizens[idx].is_jailed() {
        return Ok(());
    }
    let Some(position) = world.citizens[idx].position else {
        return Ok(());
    };

    let grievance = world.grievance(idx, position);
    let net_risk = world.citizens[idx].risk_aversion * world.arrest_probability(position);

    world.citizens[idx].status = if grievance - net_risk > world.globals.active_threshold {
        CitizenStatus::Active
    } else {
        CitizenStatus::Quiescent
    };

    if world.globals.movement_enabled {
        let empties = world.citizen_vision.empty_neighbors(position, &world.grid);
        if !empties.is_empty() {
            let destination = empties[rng.pick_index(empties.len())];
            world.grid.move_occupant(position, destination)?;
            let citizen = &mut world.citizens[idx];
            citizen.position = Some(destination);
            citizen.last_cell = destination;
        }
    }

    Ok(())
}
