use ndarray::Array2;
use rand::prelude::*;
use std::collections::VecDeque;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Target was already revealed or is protected by a flag.
    NoChange,
    /// Number of cells newly revealed, flood fill included.
    Revealed(CellCount),
    /// Target holds a mine, the board was left untouched.
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed(_) => true,
            HitMine => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
}

/// The full grid of cells with its adjacency graph and mine layout.
///
/// Mines are placed exactly once, at construction. The board itself never ends a
/// game: losing and winning are decided by whoever drives it, see [`Session`].
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    width: Coord,
    height: Coord,
    mine_count: CellCount,
    seed: Option<u64>,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    /// Builds a `width` x `height` board with `mine_count` mines placed from `seed`.
    pub fn new(width: Coord, height: Coord, mine_count: CellCount, seed: u64) -> Result<Self> {
        BoardConfig::new(width, height, mine_count).validate()?;

        let mut board = Self::empty(width, height);
        board.seed = Some(seed);
        board.place_mines(&mut StdRng::seed_from_u64(seed), mine_count);
        log::debug!(
            "Built {}x{} board with {} mines from seed {}",
            width,
            height,
            board.mine_count,
            seed
        );
        Ok(board)
    }

    /// Builds a board from `config`, drawing a fresh seed when none is set.
    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::new(config.width, config.height, config.mines, seed)
    }

    /// Builds a board with mines at exactly `mine_coords`, duplicates collapse.
    pub fn from_mine_coords(width: Coord, height: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        BoardConfig::new(width, height, 0).validate()?;

        let mut board = Self::empty(width, height);
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            let cell = &mut board.cells[coords.to_nd_index()];
            if !cell.is_mine() {
                cell.set_mine();
                board.mine_count += 1;
            }
        }
        Ok(board)
    }

    fn empty(width: Coord, height: Coord) -> Self {
        let shape = (usize::from(height), usize::from(width));
        let mut board = Self {
            width,
            height,
            mine_count: 0,
            seed: None,
            cells: Array2::from_shape_fn(shape, |_| Cell::new()),
            revealed_count: 0,
            flagged_count: 0,
        };
        board.build_adjacency();
        board
    }

    /// Links every cell to its up-to-8 grid-adjacent cells.
    fn build_adjacency(&mut self) {
        let bounds = self.bounds();
        for coords in iter_coords(bounds) {
            let cell = &mut self.cells[coords.to_nd_index()];
            for neighbor in NeighborIter::new(coords, bounds) {
                cell.add_neighbor(neighbor);
            }
        }
    }

    /// Samples `mine_count` distinct cells without replacement.
    ///
    /// Every draw removes its pick from the candidate pool, so the result is exact and
    /// depends only on the state of `rng`.
    fn place_mines(&mut self, rng: &mut StdRng, mine_count: CellCount) {
        let mut candidates: Vec<Coord2> = iter_coords(self.bounds()).collect();

        for _ in 0..mine_count {
            if candidates.is_empty() {
                break;
            }
            let index = rng.random_range(0..candidates.len());
            let coords = candidates.swap_remove(index);
            self.cells[coords.to_nd_index()].set_mine();
            self.mine_count += 1;
            log::trace!("Placed mine at {:?}", coords);
        }
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    /// Grid extent as `(rows, cols)`.
    pub fn bounds(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Seed the mines were placed from, `None` for fixed layouts.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> i64 {
        i64::from(self.mine_count) - i64::from(self.flagged_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (row, col) = coords;
        if row < self.height && col < self.width {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()].view(&self.cells))
    }

    pub fn is_mine_at(&self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()].is_mine())
    }

    pub fn neighbors(&self, coords: Coord2) -> Result<&[Coord2]> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()].neighbors())
    }

    /// All cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        iter_coords(self.bounds())
            .map(move |coords| (coords, self.cells[coords.to_nd_index()].view(&self.cells)))
    }

    /// Reveals the cell at `coords`, flooding through zero-count regions.
    ///
    /// A mined target is reported as [`RevealOutcome::HitMine`] without being revealed.
    pub fn reveal_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.cells[coords.to_nd_index()].is_mine() {
            log::debug!("Reveal at {:?} hit a mine", coords);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Reveal at {:?} opened {} cells", coords, opened);
        Ok(match opened {
            0 => RevealOutcome::NoChange,
            n => RevealOutcome::Revealed(n),
        })
    }

    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            // revealed and flagged cells stop here, which also breaks graph cycles
            if !self.cells[visit_coords.to_nd_index()].reveal() {
                continue;
            }
            opened += 1;

            let cell = &self.cells[visit_coords.to_nd_index()];
            let count = cell.bomb_count(&self.cells);
            log::trace!("Flood opened cell at {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                to_visit.extend(cell.neighbors().iter().copied().filter(|&pos| {
                    let neighbor = &self.cells[pos.to_nd_index()];
                    !neighbor.is_revealed() && !neighbor.is_flagged()
                }));
            }
        }

        self.revealed_count += opened;
        opened
    }

    /// Toggles the flag at `coords`, revealed cells included.
    pub fn flag_at(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;

        let cell = &mut self.cells[coords.to_nd_index()];
        cell.toggle_flag();
        let outcome = if cell.is_flagged() {
            self.flagged_count += 1;
            FlagOutcome::Flagged
        } else {
            self.flagged_count -= 1;
            FlagOutcome::Unflagged
        };
        log::debug!("Flag at {:?}: {:?}", coords, outcome);
        Ok(outcome)
    }

    /// Every mine is flagged and every other cell is revealed.
    ///
    /// Mines only ever count as done through a flag, revealing is never how they finish.
    pub fn is_finished(&self) -> bool {
        self.cells.iter().all(|cell| {
            if cell.is_mine() {
                cell.is_flagged()
            } else {
                cell.is_revealed()
            }
        })
    }
}

/// Row-major coordinates of a grid with `(rows, cols)` bounds.
fn iter_coords((rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}
