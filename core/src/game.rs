use serde::{Deserialize, Serialize};

use crate::*;

/// One game session: the current minefield and its reveal engine.
///
/// Starting a new game replaces both together; nothing from the previous game survives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    seed: Option<u64>,
    engine: RevealEngine,
}

impl Game {
    /// Generates a fresh minefield for `config` from `seed`; configs that do not fit their board are rejected.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = config.validate()?;
        let minefield = RandomMinefieldGenerator::new(seed).generate(config);
        log::debug!(
            "New game {}x{} with {} mines",
            config.size.0,
            config.size.1,
            minefield.mine_count()
        );
        Ok(Self {
            config,
            seed: Some(seed),
            engine: RevealEngine::new(minefield),
        })
    }

    /// Binds a game to a fixed, already placed minefield.
    pub fn from_minefield(minefield: Minefield) -> Self {
        Self {
            config: minefield.game_config(),
            seed: None,
            engine: RevealEngine::new(minefield),
        }
    }

    /// Discards the current game and starts another; returns the new mine count.
    ///
    /// An invalid config leaves the current game untouched.
    pub fn new_game(&mut self, config: GameConfig, seed: u64) -> Result<CellCount> {
        *self = Self::new(config, seed)?;
        Ok(self.total_mines())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Seed the minefield was generated from, `None` for fixed layouts.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn engine(&self) -> &RevealEngine {
        &self.engine
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn is_won(&self) -> bool {
        self.engine.is_won()
    }

    pub fn is_lost(&self) -> bool {
        self.engine.is_lost()
    }

    pub fn size(&self) -> Coord2 {
        self.engine.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.engine.total_mines()
    }

    pub fn mines_left(&self) -> isize {
        self.engine.mines_left()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<EngineCell> {
        self.engine.cell_at(coords)
    }

    pub fn has_mine(&self, coords: Coord2) -> Result<bool> {
        let minefield = self.engine.minefield();
        Ok(minefield.has_mine(minefield.validate_coords(coords)?))
    }

    pub fn neighbor_count(&self, coords: Coord2) -> Result<u8> {
        let minefield = self.engine.minefield();
        Ok(minefield.neighbor_count(minefield.validate_coords(coords)?))
    }

    pub fn primary_click(&mut self, coords: Coord2) -> Result<RevealResult> {
        self.engine.primary_click(coords)
    }

    pub fn secondary_click(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.engine.secondary_click(coords)
    }
}
