use std::str::FromStr;

use flipsweep_core::{Coord, Coord2};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  r X Y        reveal the cell at column X, row Y
  f X Y        flag or unflag the cell at X, Y
  n            new game with the current options
  o W H PCT    set width, height and mine percentage, then start a new game
  p            print the board
  h            show this help
  q            quit";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Options {
        width: Coord,
        height: Coord,
        mine_percent: f64,
    },
    Print,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, type h for help")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    #[error("unexpected argument `{0}`")]
    TrailingArgument(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(coords(&mut words)?),
            "f" | "flag" => Command::Flag(coords(&mut words)?),
            "n" | "new" => Command::NewGame,
            "o" | "options" => Command::Options {
                width: number(&mut words, "width")?,
                height: number(&mut words, "height")?,
                mine_percent: number(&mut words, "mine percentage")?,
            },
            "p" | "print" => Command::Print,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    Ok((number(words, "x")?, number(words, "y")?))
}

fn number<'a, T: FromStr>(
    words: &mut impl Iterator<Item = &'a str>,
    what: &'static str,
) -> Result<T, CommandError> {
    let word = words.next().ok_or(CommandError::MissingArgument(what))?;
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clicks() {
        assert_eq!("r 3 4".parse(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  FLAG 0 19 ".parse(), Ok(Command::Flag((0, 19))));
    }

    #[test]
    fn parses_options() {
        assert_eq!(
            "o 30 16 20.5".parse(),
            Ok(Command::Options {
                width: 30,
                height: 16,
                mine_percent: 20.5
            })
        );
    }

    #[test]
    fn parses_single_word_commands() {
        assert_eq!("n".parse(), Ok(Command::NewGame));
        assert_eq!("p".parse(), Ok(Command::Print));
        assert_eq!("?".parse(), Ok(Command::Help));
        assert_eq!("quit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "x 1 1".parse::<Command>(),
            Err(CommandError::Unknown("x".to_string()))
        );
        assert_eq!(
            "r 1".parse::<Command>(),
            Err(CommandError::MissingArgument("y"))
        );
        assert_eq!(
            "r -1 2".parse::<Command>(),
            Err(CommandError::InvalidNumber("-1".to_string()))
        );
        assert_eq!(
            "n now".parse::<Command>(),
            Err(CommandError::TrailingArgument("now".to_string()))
        );
    }
}
