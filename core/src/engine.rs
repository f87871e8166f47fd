use alloc::string::String;
use alloc::vec::Vec;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    During,
    Win,
    Lose,
}

impl GameStatus {
    pub const fn is_during(self) -> bool {
        matches!(self, Self::During)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::During
    }
}

/// One playable round: a board plus click count, elapsed-time clock, and the
/// latched round status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridEngine {
    grid: LightGrid,
    click_count: Saturating<ClickCount>,
    status: GameStatus,
    timer: RoundTimer,
}

impl GridEngine {
    /// Round over a randomly filled board, then `seed` replayed on top.
    pub fn new(config: GameConfig, rng_seed: u64, seed: &[SeedIndex]) -> Result<Self> {
        Self::with_generator(config, RandomGridGenerator::new(rng_seed), seed)
    }

    pub fn with_generator(
        config: GameConfig,
        generator: impl GridGenerator,
        seed: &[SeedIndex],
    ) -> Result<Self> {
        Self::from_grid(generator.generate(config), seed)
    }

    /// Round over an exact starting board.
    pub fn from_grid(grid: LightGrid, seed: &[SeedIndex]) -> Result<Self> {
        let mut engine = Self {
            grid,
            click_count: Saturating(0),
            status: Default::default(),
            timer: Default::default(),
        };
        engine.start(seed)?;
        Ok(engine)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn grid(&self) -> &LightGrid {
        &self.grid
    }

    pub fn config(&self) -> GameConfig {
        self.grid.config()
    }

    pub fn size(&self) -> Coord {
        self.grid.size()
    }

    pub fn click_count(&self) -> ClickCount {
        self.click_count.0
    }

    pub fn lit_count(&self) -> CellCount {
        self.grid.lit_count()
    }

    pub fn light_at(&self, coords: Coord2) -> Light {
        self.grid.light_at(coords)
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub fn formatted_time(&self) -> String {
        self.timer.formatted()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn can_toggle_at(&self, coords: Coord2) -> bool {
        !self.status.is_finished() && self.grid.validate_coords(coords).is_ok()
    }

    /// Begins a fresh round by replaying `seed` over whatever the grid
    /// currently holds. The click count and the clock reset; the grid does
    /// not. The whole sequence is address-checked up front, so a bad entry
    /// fails the call without changing anything.
    pub fn start(&mut self, seed: &[SeedIndex]) -> Result<()> {
        let size = self.grid.size();
        let replay = seed_replay(seed, size)?;

        self.click_count = Saturating(0);
        self.status = GameStatus::During;
        self.timer.restart();
        log::debug!(
            "round started: {}x{} board, {} seed toggles",
            size,
            size,
            replay.len()
        );

        for coords in replay {
            self.apply_toggle(coords);
        }
        self.refresh_status();
        Ok(())
    }

    /// A player click: counts once, then cascades like `toggle_at`.
    pub fn player_toggle(&mut self, coords: Coord2) -> Result<ToggleOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(ToggleOutcome::NoChange);
        }

        self.click_count += 1;
        Ok(self.apply_toggle(coords))
    }

    /// Flips the light at `coords` and its in-bounds orthogonal neighbors,
    /// without touching the click count. Refused once the round is over.
    pub fn toggle_at(&mut self, coords: Coord2) -> Result<ToggleOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(ToggleOutcome::NoChange);
        }

        Ok(self.apply_toggle(coords))
    }

    /// Advances the clock by one second. Driven by the caller, once per
    /// second, for as long as the caller keeps the round scheduled.
    pub fn tick(&mut self) {
        self.timer.tick();
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    fn apply_toggle(&mut self, coords: Coord2) -> ToggleOutcome {
        self.grid.toggle_with_neighbors(coords);
        log::trace!(
            "toggled {:?}, {} of {} lights lit",
            coords,
            self.grid.lit_count(),
            self.grid.total_cells()
        );
        self.refresh_status();

        match self.status {
            GameStatus::During => ToggleOutcome::Toggled,
            GameStatus::Win => ToggleOutcome::Won,
            GameStatus::Lose => ToggleOutcome::Lost,
        }
    }

    /// Latches a terminal status once the board turns uniform. One-directional
    /// per round; the clock freezes the moment the round ends.
    fn refresh_status(&mut self) {
        if self.status.is_finished() {
            return;
        }

        let status = self.grid.status();
        if status.is_finished() {
            self.status = status;
            self.timer.stop();
            log::debug!(
                "round ended: {:?} after {} clicks, {}",
                status,
                self.click_count.0,
                self.timer.formatted()
            );
        }
    }
}

/// Resolves a whole seed sequence to board coordinates before anything is
/// applied, so a bad entry cannot leave a half-replayed board behind.
fn seed_replay(seed: &[SeedIndex], size: Coord) -> Result<Vec<Coord2>> {
    seed.iter()
        .map(|&index| seed_cell_coords(index, size))
        .collect()
}

/// Maps one seed entry to board coordinates: `row = index / size`, `column =
/// index % size`, the row bumped by one whenever the column is nonzero, then
/// both axes shifted down by one. Recorded seed sequences depend on this
/// exact arithmetic, so it stays as is; entries that land outside the board
/// (zero, multiples of `size`, anything past the last cell) surface as
/// `OutOfBounds` instead of wrapping.
fn seed_cell_coords(index: SeedIndex, size: Coord) -> Result<Coord2> {
    let size = SeedIndex::from(size);
    let mut row = index / size;
    let column = index % size;
    if column > 0 {
        row += 1;
    }

    let row = row.checked_sub(1).ok_or(GameError::OutOfBounds)?;
    let column = column.checked_sub(1).ok_or(GameError::OutOfBounds)?;
    if row >= size {
        return Err(GameError::OutOfBounds);
    }

    Ok((row as Coord, column as Coord))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn dark_engine(seed: &[SeedIndex]) -> GridEngine {
        let grid = LightGrid::filled(GameConfig::new(4), Light::Dark);
        GridEngine::from_grid(grid, seed).unwrap()
    }

    #[test]
    fn seed_replay_produces_the_recorded_pattern() {
        let engine = dark_engine(&[1, 2, 3]);

        let expected = arr2(&[
            [false, true, false, true],
            [true, true, true, false],
            [false, false, false, false],
            [false, false, false, false],
        ]);
        assert_eq!(engine.grid().lit_mask(), expected);
        assert_eq!(engine.status(), GameStatus::During);
        assert_eq!(engine.click_count(), 0);
    }

    #[test]
    fn seed_mapping_keeps_the_recorded_arithmetic() {
        assert_eq!(seed_cell_coords(1, 4), Ok((0, 0)));
        assert_eq!(seed_cell_coords(2, 4), Ok((0, 1)));
        assert_eq!(seed_cell_coords(3, 4), Ok((0, 2)));
        assert_eq!(seed_cell_coords(5, 4), Ok((1, 0)));
        assert_eq!(seed_cell_coords(15, 4), Ok((3, 2)));
        assert_eq!(seed_cell_coords(6, 5), Ok((1, 0)));
    }

    #[test]
    fn seed_entries_off_the_board_are_rejected() {
        for index in [0, 4, 8, 12, 16, 17, 100] {
            assert_eq!(seed_cell_coords(index, 4), Err(GameError::OutOfBounds));
        }

        let grid = LightGrid::filled(GameConfig::new(4), Light::Dark);
        assert_eq!(
            GridEngine::from_grid(grid, &[0]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn player_toggle_increments_the_click_count() {
        let mut engine = dark_engine(&[1, 2, 3]);

        assert_eq!(engine.player_toggle((3, 3)).unwrap(), ToggleOutcome::Toggled);
        assert_eq!(engine.player_toggle((3, 3)).unwrap(), ToggleOutcome::Toggled);
        assert_eq!(engine.click_count(), 2);
    }

    #[test]
    fn toggle_at_skips_click_bookkeeping() {
        let mut engine = dark_engine(&[1, 2, 3]);

        assert_eq!(engine.toggle_at((3, 3)).unwrap(), ToggleOutcome::Toggled);
        assert_eq!(engine.click_count(), 0);
    }

    #[test]
    fn out_of_bounds_requests_leave_the_round_untouched() {
        let mut engine = dark_engine(&[1, 2, 3]);
        let snapshot = engine.clone();

        assert_eq!(engine.player_toggle((4, 0)), Err(GameError::OutOfBounds));
        assert_eq!(engine.player_toggle((0, 9)), Err(GameError::OutOfBounds));
        assert_eq!(engine, snapshot);
    }

    #[test]
    fn clearing_the_board_wins_and_freezes_the_clock() {
        let mut engine = dark_engine(&[1]);
        engine.tick();
        engine.tick();

        assert_eq!(engine.player_toggle((0, 0)).unwrap(), ToggleOutcome::Won);
        assert_eq!(engine.status(), GameStatus::Win);
        assert!(engine.is_finished());
        assert_eq!(engine.click_count(), 1);
        assert_eq!(engine.lit_count(), 0);
        assert!(!engine.is_running());

        engine.tick();
        assert_eq!(engine.elapsed_secs(), 2);
    }

    #[test]
    fn finished_rounds_refuse_further_toggles() {
        let mut engine = dark_engine(&[1]);
        engine.player_toggle((0, 0)).unwrap();
        let snapshot = engine.clone();

        assert_eq!(engine.player_toggle((2, 2)).unwrap(), ToggleOutcome::NoChange);
        assert!(!ToggleOutcome::NoChange.has_update());
        assert_eq!(engine, snapshot);
    }

    #[test]
    fn filling_the_board_loses_the_round() {
        let mut grid = LightGrid::filled(GameConfig::new(4), Light::Lit);
        grid.toggle_with_neighbors((1, 1));
        let mut engine = GridEngine::from_grid(grid, &[]).unwrap();
        assert_eq!(engine.status(), GameStatus::During);
        assert_eq!(engine.lit_count(), 11);
        engine.tick();

        assert_eq!(engine.player_toggle((1, 1)).unwrap(), ToggleOutcome::Lost);
        assert_eq!(engine.status(), GameStatus::Lose);
        assert_eq!(engine.lit_count(), engine.grid().total_cells());
        assert!(!engine.is_running());

        engine.tick();
        assert_eq!(engine.elapsed_secs(), 1);
    }

    #[test]
    fn uniform_boards_latch_before_any_click() {
        let dark = LightGrid::filled(GameConfig::new(4), Light::Dark);
        let engine = GridEngine::from_grid(dark, &[]).unwrap();
        assert_eq!(engine.status(), GameStatus::Win);
        assert!(!engine.is_running());
        assert_eq!(engine.elapsed_secs(), 0);

        let generator = UniformGridGenerator::new(Light::Lit);
        let engine = GridEngine::with_generator(GameConfig::new(4), generator, &[]).unwrap();
        assert_eq!(engine.status(), GameStatus::Lose);
    }

    #[test]
    fn mid_seed_terminal_latch_sticks() {
        let engine = dark_engine(&[1, 1, 1]);

        assert_eq!(engine.status(), GameStatus::Win);
        assert_eq!(engine.lit_count(), 3);
        assert!(!engine.is_running());
    }

    #[test]
    fn tick_accrues_while_the_round_runs() {
        let mut engine = dark_engine(&[1, 2, 3]);
        assert!(engine.is_running());

        for _ in 0..65 {
            engine.tick();
        }
        assert_eq!(engine.elapsed_secs(), 65);
        assert_eq!(engine.formatted_time(), "01:05");

        engine.stop();
        engine.tick();
        assert_eq!(engine.elapsed_secs(), 65);
    }

    #[test]
    fn restart_replays_the_seed_over_the_current_board() {
        let mut engine = dark_engine(&[1]);
        engine.player_toggle((3, 3)).unwrap();
        engine.tick();

        engine.start(&[1]).unwrap();

        let expected = arr2(&[
            [false, false, false, false],
            [false, false, false, false],
            [false, false, false, true],
            [false, false, true, true],
        ]);
        assert_eq!(engine.grid().lit_mask(), expected);
        assert_eq!(engine.status(), GameStatus::During);
        assert_eq!(engine.click_count(), 0);
        assert_eq!(engine.elapsed_secs(), 0);
        assert!(engine.is_running());
    }

    #[test]
    fn restart_revives_a_finished_round() {
        let mut engine = dark_engine(&[1]);
        engine.player_toggle((0, 0)).unwrap();
        assert!(engine.is_finished());

        engine.start(&[1, 2, 3]).unwrap();

        assert_eq!(engine.status(), GameStatus::During);
        assert_eq!(engine.lit_count(), 5);
        assert_eq!(engine.click_count(), 0);
        assert!(engine.is_running());
    }

    #[test]
    fn failed_restart_changes_nothing() {
        let mut engine = dark_engine(&[1]);
        engine.player_toggle((3, 3)).unwrap();
        engine.tick();
        let snapshot = engine.clone();

        assert_eq!(engine.start(&[1, 0]), Err(GameError::OutOfBounds));
        assert_eq!(engine, snapshot);
    }

    #[test]
    fn can_toggle_at_tracks_bounds_and_round_state() {
        let mut engine = dark_engine(&[1]);
        assert!(engine.can_toggle_at((0, 0)));
        assert!(!engine.can_toggle_at((4, 0)));

        engine.player_toggle((0, 0)).unwrap();
        assert!(!engine.can_toggle_at((0, 0)));
    }

    #[test]
    fn same_entropy_seed_builds_identical_rounds() {
        let config = GameConfig::new(5);

        let first = GridEngine::new(config, 77, &[]).unwrap();
        let second = GridEngine::new(config, 77, &[]).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.size(), 5);
        assert_eq!(first.click_count(), 0);
    }

    #[test]
    fn engine_state_serializes_and_restores() {
        let mut engine = dark_engine(&[1, 2, 3]);
        engine.player_toggle((2, 2)).unwrap();
        engine.tick();

        let encoded = serde_json::to_string(&engine).unwrap();
        let restored: GridEngine = serde_json::from_str(&encoded).unwrap();

        assert_eq!(restored, engine);
        assert_eq!(restored.click_count(), 1);
        assert_eq!(restored.elapsed_secs(), 1);
    }
}
