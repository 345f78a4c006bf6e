//! Vision Neighborhoods
//!
//! Precomputed per-cell neighbor lists under wrapped Euclidean distance,
//! the NetLogo-style `in-radius` metric: the distance between two cells is
//! taken over the shortest wraparound delta in each axis, so there are no
//! edge effects. The center cell is excluded from its own neighborhood.
//!
//! Neighborhoods are enumerated once at setup (radii are fixed for a run)
//! in row-major order, which also fixes the iteration order behind every
//! uniform tie-break drawn from a neighborhood.

use crate::grid::{Coord, Grid};

/// Neighbor lists for one vision radius on a fixed-size torus.
#[derive(Debug, Clone)]
pub struct VisionTable {
    width: u32,
    neighbors: Vec<Vec<Coord>>,
}

/// Shortest wraparound delta between two coordinates on an axis of `size`.
fn wrap_delta(a: u32, b: u32, size: u32) -> u32 {
    let d = a.abs_diff(b);
    d.min(size - d)
}

impl VisionTable {
    /// Builds the neighbor table for every cell of a `width` x `height`
    /// torus. Enumerating distinct cells (rather than coordinate offsets)
    /// means wraparound on small grids can never produce duplicates.
    pub fn new(width: u32, height: u32, radius: f64) -> Self {
        let mut neighbors = Vec::with_capacity((width as usize) * (height as usize));

        for y in 0..height {
            for x in 0..width {
                let mut list = Vec::new();
                for oy in 0..height {
                    for ox in 0..width {
                        if ox == x && oy == y {
                            continue;
                        }
                        let dx = f64::from(wrap_delta(x, ox, width));
                        let dy = f64::from(wrap_delta(y, oy, height));
                        if (dx * dx + dy * dy).sqrt() <= radius {
                            list.push(Coord::new(ox, oy));
                        }
                    }
                }
                neighbors.push(list);
            }
        }

        Self { width, neighbors }
    }

    /// Cells within the vision radius of `cell`, center excluded,
    /// in row-major order.
    pub fn neighbors(&self, cell: Coord) -> &[Coord] {
        &self.neighbors[(cell.y as usize) * (self.width as usize) + (cell.x as usize)]
    }

    /// Neighbor cells currently unoccupied on `grid`.
    pub fn empty_neighbors(&self, cell: Coord, grid: &Grid) -> Vec<Coord> {
        self.neighbors(cell)
            .iter()
            .copied()
            .filter(|&c| grid.is_empty(c))
            .collect()
    }
}
