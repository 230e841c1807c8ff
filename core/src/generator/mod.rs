use crate::*;
pub use random::*;

mod random;

/// Mine placement strategy, consumed once per game.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Minefield;
}
