#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use light::*;
pub use timer::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod light;
mod timer;
mod types;

/// Board settings for one puzzle: the side length of the square grid.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
}

impl GameConfig {
    pub const MIN_SIZE: Coord = 4;
    pub const MAX_SIZE: Coord = 8;

    pub const fn new_unchecked(size: Coord) -> Self {
        Self { size }
    }

    /// Clamps `size` into the supported range instead of failing.
    pub fn new(size: Coord) -> Self {
        Self::new_unchecked(size.clamp(Self::MIN_SIZE, Self::MAX_SIZE))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(5)
    }
}

/// Square board of lights, always fully populated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightGrid {
    cells: Array2<Light>,
}

impl LightGrid {
    /// Board with every light in the same state.
    pub fn filled(config: GameConfig, fill: Light) -> Self {
        let side = usize::from(config.size);
        Self {
            cells: Array2::from_elem((side, side), fill),
        }
    }

    /// Builds a board from an explicit cell matrix.
    pub fn from_cells(cells: Array2<Light>) -> Result<Self> {
        let (rows, columns) = cells.dim();
        if rows != columns
            || rows < usize::from(GameConfig::MIN_SIZE)
            || rows > usize::from(GameConfig::MAX_SIZE)
        {
            return Err(GameError::InvalidSize);
        }
        Ok(Self { cells })
    }

    /// Builds a board from a lit/dark mask.
    pub fn from_lit_mask(mask: Array2<bool>) -> Result<Self> {
        Self::from_cells(mask.mapv(Light::from))
    }

    pub fn lit_mask(&self) -> Array2<bool> {
        self.cells.mapv(Light::is_lit)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size())
    }

    pub fn size(&self) -> Coord {
        self.cells.dim().0.try_into().unwrap()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn lit_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|light| light.is_lit())
            .count()
            .try_into()
            .unwrap()
    }

    pub fn light_at(&self, coords: Coord2) -> Light {
        self.cells[coords.to_nd_index()]
    }

    /// Round status implied by the current lights: every light lit is a
    /// loss, every light dark is a win, anything in between is still play.
    /// The all-lit check comes first; both cannot hold on a populated board.
    pub fn status(&self) -> GameStatus {
        let lit = self.lit_count();
        if lit == self.total_cells() {
            GameStatus::Lose
        } else if lit == 0 {
            GameStatus::Win
        } else {
            GameStatus::During
        }
    }

    /// Flips the light at `coords` together with its in-bounds orthogonal
    /// neighbors, as one atomic step. Each affected light flips exactly once.
    pub fn toggle_with_neighbors(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].toggle();
        for pos in self.cells.iter_neighbors(coords) {
            self.cells[pos.to_nd_index()].toggle();
        }
    }
}

impl Index<Coord2> for LightGrid {
    type Output = Light;

    fn index(&self, (row, column): Coord2) -> &Self::Output {
        &self.cells[(row as usize, column as usize)]
    }
}

impl IndexMut<Coord2> for LightGrid {
    fn index_mut(&mut self, (row, column): Coord2) -> &mut Self::Output {
        &mut self.cells[(row as usize, column as usize)]
    }
}

/// Outcome of a toggle request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ToggleOutcome {
    NoChange,
    Toggled,
    Won,
    Lost,
}

impl ToggleOutcome {
    /// Whether this outcome could have caused an update to the board.
    pub const fn has_update(self) -> bool {
        use ToggleOutcome::*;
        match self {
            NoChange => false,
            Toggled => true,
            Won => true,
            Lost => true,
        }
    }
}
