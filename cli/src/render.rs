use std::fmt::Write;

use flipsweep_core::{EngineCell, EngineState, Game, iter_row_major};

const HIDDEN: char = '#';
const FLAG: char = 'F';
const EMPTY: char = '.';
const MINE: char = '*';
const TRIGGERED: char = '@';

/// Draws the board with column numbers on top and row numbers on the left.
pub fn board(game: &Game) -> String {
    let (size_x, size_y) = game.size();
    let minefield = game.engine().minefield();
    let triggered = game.engine().triggered_mine();
    let mut out = String::new();

    out.push_str("    ");
    for x in 0..size_x {
        let _ = write!(out, "{}", x % 10);
    }
    out.push('\n');

    for y in 0..size_y {
        let _ = write!(out, "{y:>3} ");
        for x in 0..size_x {
            let coords = (x, y);
            let glyph = match game.engine().cell_at(coords) {
                Ok(EngineCell::Hidden) | Err(_) => HIDDEN,
                Ok(EngineCell::Flagged) => FLAG,
                Ok(EngineCell::Revealed) if Some(coords) == triggered => TRIGGERED,
                Ok(EngineCell::Revealed) if minefield.has_mine(coords) => MINE,
                Ok(EngineCell::Revealed) => match minefield.neighbor_count(coords) {
                    0 => EMPTY,
                    count => char::from(b'0' + count),
                },
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// One-line status shown under the board.
pub fn status(game: &Game) -> String {
    match game.state() {
        EngineState::Won => "You Win!".to_string(),
        EngineState::Lost => "Boom! Press n for a new game.".to_string(),
        EngineState::InProgress if untouched(game) => {
            format!("There are {} mines.", game.total_mines())
        }
        EngineState::InProgress => match game.mines_left() {
            1 => "1 mine remains.".to_string(),
            left => format!("{left} mines remain."),
        },
    }
}

fn untouched(game: &Game) -> bool {
    iter_row_major(game.size()).all(|coords| matches!(game.cell_at(coords), Ok(EngineCell::Hidden)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipsweep_core::Minefield;

    fn game() -> Game {
        Game::from_minefield(Minefield::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap())
    }

    #[test]
    fn fresh_board_is_hidden() {
        let game = game();
        assert_eq!(board(&game), "    012\n  0 ###\n  1 ###\n  2 ###\n");
        assert_eq!(status(&game), "There are 2 mines.");
    }

    #[test]
    fn shows_counts_flags_and_remaining_mines() {
        let mut game = game();
        game.primary_click((2, 0)).unwrap();
        game.secondary_click((0, 0)).unwrap();

        assert_eq!(board(&game), "    012\n  0 F1.\n  1 #21\n  2 ###\n");
        assert_eq!(status(&game), "1 mine remains.");

        game.secondary_click((1, 2)).unwrap();
        assert_eq!(status(&game), "0 mines remain.");
        game.secondary_click((0, 2)).unwrap();
        assert_eq!(status(&game), "-1 mines remain.");
    }

    #[test]
    fn loss_shows_every_mine() {
        let mut game = game();
        game.primary_click((2, 2)).unwrap();

        assert_eq!(board(&game), "    012\n  0 *1.\n  1 121\n  2 .1@\n");
        assert_eq!(status(&game), "Boom! Press n for a new game.");
    }

    #[test]
    fn win_message() {
        let mut game = game();
        for coords in [(1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (0, 2), (1, 2)] {
            game.primary_click(coords).unwrap();
        }
        assert_eq!(status(&game), "You Win!");
    }
}
