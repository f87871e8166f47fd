use ndarray::Array2;

use super::*;

/// Purely random fill: every light is independently lit or dark with equal
/// probability, drawn from a caller-supplied entropy seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: GameConfig) -> LightGrid {
        use rand::prelude::*;

        if !(GameConfig::MIN_SIZE..=GameConfig::MAX_SIZE).contains(&config.size) {
            log::warn!(
                "Unusual board side {}, generated anyway, supported range is {} to {}",
                config.size,
                GameConfig::MIN_SIZE,
                GameConfig::MAX_SIZE
            );
        }

        let side = usize::from(config.size);
        let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(self.seed);

        let mut cells: Array2<Light> = Array2::default((side, side));
        {
            let lights = cells.as_slice_mut().expect("layout should be standard");
            for light in lights {
                *light = Light::from(rng.random::<bool>());
            }
        }
        LightGrid { cells }
    }
}
