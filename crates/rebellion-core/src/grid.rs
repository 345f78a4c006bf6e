//! Toroidal Occupancy Grid
//!
//! A fixed-size wraparound lattice where each cell holds at most one agent.
//! The grid only tracks occupancy; vision queries live in
//! [`crate::vision::VisionTable`] and agent state lives in the agent vectors.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// A cell coordinate on the torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Reference to an agent stored in a cell: an index into the owning
/// world's citizen or cop vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentRef {
    Citizen(usize),
    Cop(usize),
}

/// The occupancy lattice.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Option<AgentRef>>,
}

impl Grid {
    /// Creates an empty grid. Dimensions are validated by configuration
    /// before a grid is ever built.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, cell: Coord) -> usize {
        (cell.y as usize) * (self.width as usize) + (cell.x as usize)
    }

    /// The agent occupying `cell`, if any.
    pub fn occupant(&self, cell: Coord) -> Option<AgentRef> {
        self.cells[self.index(cell)]
    }

    pub fn is_empty(&self, cell: Coord) -> bool {
        self.occupant(cell).is_none()
    }

    /// Places an agent on an empty cell.
    pub fn place(&mut self, agent: AgentRef, cell: Coord) -> Result<(), GridError> {
        let idx = self.index(cell);
        if self.cells[idx].is_some() {
            return Err(GridError::OccupiedCell {
                x: cell.x,
                y: cell.y,
            });
        }
        self.cells[idx] = Some(agent);
        Ok(())
    }

    /// Removes and returns the agent occupying `cell`.
    pub fn remove(&mut self, cell: Coord) -> Result<AgentRef, GridError> {
        let idx = self.index(cell);
        self.cells[idx].take().ok_or(GridError::VacantCell {
            x: cell.x,
            y: cell.y,
        })
    }

    /// Moves an occupant onto an empty destination cell.
    pub fn move_occupant(&mut self, from: Coord, to: Coord) -> Result<(), GridError> {
        if !self.is_empty(to) {
            return Err(GridError::OccupiedCell { x: to.x, y: to.y });
        }
        let agent = self.remove(from)?;
        self.place(agent, to)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// All cell coordinates in row-major order.
    pub fn all_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }
}
