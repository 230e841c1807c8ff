use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use minefield::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod game;
mod generator;
mod minefield;
mod tile;
mod types;

/// Board dimensions and the exact number of mines to place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a config from a mine density, placing `round(width * height * density)` mines.
    pub fn new(size: Coord2, density: f64) -> Result<Self> {
        check_size(size)?;
        if !(0.0..=1.0).contains(&density) {
            return Err(GameError::InvalidDensity);
        }
        let total_cells = mult(size.0, size.1);
        let mines = (f64::from(total_cells) * density).round() as CellCount;
        Ok(Self::new_unchecked(size, mines.min(total_cells)))
    }

    pub fn with_mine_count(size: Coord2, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(size, mines).validate()
    }

    /// Checks a config that may have been built unchecked or deserialized.
    pub fn validate(self) -> Result<Self> {
        check_size(self.size)?;
        if self.mines > self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(self)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Fraction of cells holding a mine.
    pub fn density(&self) -> f64 {
        match self.total_cells() {
            0 => 0.0,
            total => f64::from(self.mines) / f64::from(total),
        }
    }
}

fn check_size((size_x, size_y): Coord2) -> Result<()> {
    if size_x == 0 || size_y == 0 {
        Err(GameError::InvalidSize)
    } else {
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// New flag state of the cell, or `None` when nothing changed.
    pub const fn flagged(self) -> Option<bool> {
        match self {
            Self::NoChange => None,
            Self::Flagged => Some(true),
            Self::Unflagged => Some(false),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
