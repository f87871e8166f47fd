use crate::*;
pub use random::*;

mod random;

/// Strategy that produces the board a round begins from, before any seed
/// replay runs over it.
pub trait GridGenerator {
    fn generate(self, config: GameConfig) -> LightGrid;
}

/// Fills every light with the same state. Handy for fixtures and for rounds
/// whose whole starting pattern comes from the seed replay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformGridGenerator {
    fill: Light,
}

impl UniformGridGenerator {
    pub fn new(fill: Light) -> Self {
        Self { fill }
    }
}

impl GridGenerator for UniformGridGenerator {
    fn generate(self, config: GameConfig) -> LightGrid {
        LightGrid::filled(config, self.fill)
    }
}
