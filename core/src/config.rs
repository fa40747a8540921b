use serde::{Deserialize, Serialize};

use crate::*;

/// The three knobs a board is built from, plus an optional seed for replays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub seed: Option<u64>,
}

impl BoardConfig {
    pub const BEGINNER: Self = Self::new(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new(16, 16, 40);
    pub const EXPERT: Self = Self::new(30, 16, 99);

    /// Not validated, see [`BoardConfig::validate`].
    pub const fn new(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
            seed: None,
        }
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    /// Checks the construction invariants without building anything.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let capacity = self.total_cells();
        if self.mines > capacity {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                capacity,
            });
        }

        Ok(())
    }

    /// Looks up a named preset, case-insensitive.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::BEGINNER),
            "intermediate" => Some(Self::INTERMEDIATE),
            "expert" => Some(Self::EXPERT),
            _ => None,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(20, 20, 50)
    }
}
