use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// A single grid position.
///
/// Neighbors are stored as coordinates into the owning board's grid rather than as
/// references, so the adjacency graph can be cyclic while the board stays the only
/// owner of cell storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    is_mine: bool,
    revealed: bool,
    flagged: bool,
    neighbors: SmallVec<[Coord2; 8]>,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn neighbors(&self) -> &[Coord2] {
        &self.neighbors
    }

    pub(crate) fn add_neighbor(&mut self, coords: Coord2) {
        self.neighbors.push(coords);
    }

    /// Number of mined neighbors, recomputed from `grid` on every call.
    pub fn bomb_count(&self, grid: &Array2<Cell>) -> u8 {
        self.neighbors
            .iter()
            .filter(|&&pos| grid[pos.to_nd_index()].is_mine)
            .count() as u8
    }

    pub fn set_mine(&mut self) {
        self.is_mine = true;
    }

    /// Unconditional negation, gating happens at the board level.
    pub fn toggle_flag(&mut self) {
        self.flagged = !self.flagged;
    }

    /// Reveals this cell unless it is already revealed or protected by a flag.
    ///
    /// Returns whether the cell changed. Propagation to neighbors is driven by the board,
    /// this guard is what keeps every cell from being visited twice.
    pub fn reveal(&mut self) -> bool {
        if self.revealed || self.flagged {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn view(&self, grid: &Array2<Cell>) -> CellView {
        CellView {
            is_mine: self.is_mine,
            revealed: self.revealed,
            flagged: self.flagged,
            bomb_count: self.bomb_count(grid),
        }
    }
}

/// Player-independent snapshot of a cell, everything a renderer needs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub is_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub bomb_count: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x3 strip: [0] - [1] - [2], wired by hand
    fn strip() -> Array2<Cell> {
        let mut grid = Array2::from_shape_fn((1, 3), |_| Cell::new());
        grid[[0, 0]].add_neighbor((0, 1));
        grid[[0, 1]].add_neighbor((0, 0));
        grid[[0, 1]].add_neighbor((0, 2));
        grid[[0, 2]].add_neighbor((0, 1));
        grid
    }

    #[test]
    fn new_cell_is_empty() {
        let cell = Cell::new();
        assert!(!cell.is_mine());
        assert!(!cell.is_revealed());
        assert!(!cell.is_flagged());
        assert!(cell.neighbors().is_empty());
    }

    #[test]
    fn set_mine_is_idempotent() {
        let mut cell = Cell::new();
        cell.set_mine();
        cell.set_mine();
        assert!(cell.is_mine());
    }

    #[test]
    fn bomb_count_follows_neighbor_state() {
        let mut grid = strip();
        assert_eq!(grid[[0, 0]].bomb_count(&grid), 0);

        grid[[0, 1]].set_mine();
        assert_eq!(grid[[0, 0]].bomb_count(&grid), 1);
        assert_eq!(grid[[0, 2]].bomb_count(&grid), 1);
        // a cell never counts itself
        assert_eq!(grid[[0, 1]].bomb_count(&grid), 0);
    }

    #[test]
    fn toggle_flag_flips_back_and_forth() {
        let mut cell = Cell::new();
        cell.toggle_flag();
        assert!(cell.is_flagged());
        cell.toggle_flag();
        assert!(!cell.is_flagged());
    }

    #[test]
    fn reveal_is_guarded_by_flag_and_previous_reveal() {
        let mut cell = Cell::new();
        cell.toggle_flag();
        assert!(!cell.reveal());
        assert!(!cell.is_revealed());

        cell.toggle_flag();
        assert!(cell.reveal());
        assert!(!cell.reveal());
        assert!(cell.is_revealed());
    }

    #[test]
    fn view_reports_snapshot() {
        let mut grid = strip();
        grid[[0, 2]].set_mine();
        grid[[0, 1]].reveal();

        let view = grid[[0, 1]].view(&grid);
        assert_eq!(
            view,
            CellView {
                is_mine: false,
                revealed: true,
                flagged: false,
                bomb_count: 1,
            }
        );
    }
}
