use std::fmt::Display;
use std::io::{BufRead, Write};

use flipsweep_core::{Game, GameConfig, MarkOutcome};
use serde_json::json;

use crate::command::{Command, HELP};
use crate::config::Settings;
use crate::render;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive game session; one command per input line.
pub struct Session {
    settings: Settings,
    game: Game,
    json: bool,
}

impl Session {
    pub fn new(settings: Settings, config: GameConfig, json: bool) -> anyhow::Result<Self> {
        let game = Game::new(config, settings.seed)?;
        Ok(Self {
            settings,
            game,
            json,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reads commands until `q` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        self.show(out)?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.handle(command, out)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => self.report(out, err)?,
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
        log::trace!("Command: {:?}", command);
        match command {
            Command::Reveal(coords) => match self.game.primary_click(coords) {
                Ok(result) if self.json => writeln!(out, "{}", serde_json::to_string(&result)?)?,
                Ok(result) => {
                    if !result.outcome.has_update() {
                        writeln!(out, "nothing to reveal at {} {}", coords.0, coords.1)?;
                    }
                    self.show(out)?;
                }
                Err(err) => self.report(out, err)?,
            },
            Command::Flag(coords) => match self.game.secondary_click(coords) {
                Ok(outcome) if self.json => {
                    let line = json!({ "coords": coords, "flagged": outcome.flagged() });
                    writeln!(out, "{line}")?;
                }
                Ok(MarkOutcome::NoChange) => {
                    writeln!(out, "cannot flag {} {}", coords.0, coords.1)?;
                }
                Ok(_) => self.show(out)?,
                Err(err) => self.report(out, err)?,
            },
            Command::NewGame => self.restart(out)?,
            Command::Options {
                width,
                height,
                mine_percent,
            } => {
                let updated = Settings {
                    width,
                    height,
                    mine_percent,
                    ..self.settings.clone()
                };
                match updated.game_config() {
                    Ok(_) => {
                        self.settings = updated;
                        self.restart(out)?;
                    }
                    Err(err) => self.report(out, err)?,
                }
            }
            Command::Print => self.show(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Starts the next game; the seed advances so a fixed starting seed still gives a repeatable sequence.
    fn restart(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        let config = self.settings.game_config()?;
        self.settings.seed = self.settings.seed.wrapping_add(1);
        let mines = self.game.new_game(config, self.settings.seed)?;
        log::info!(
            "New game {}x{}, {} mines, seed {}",
            config.size.0,
            config.size.1,
            mines,
            self.settings.seed
        );
        self.show(out)
    }

    /// Rejected input is reported on the output stream and the session carries on.
    fn report(&self, out: &mut impl Write, err: impl Display) -> anyhow::Result<()> {
        if self.json {
            writeln!(out, "{}", json!({ "error": err.to_string() }))?;
        } else {
            writeln!(out, "error: {err}")?;
        }
        Ok(())
    }

    fn show(&self, out: &mut impl Write) -> anyhow::Result<()> {
        if self.json {
            let line = json!({
                "size": self.game.size(),
                "mines": self.game.total_mines(),
                "state": self.game.state(),
            });
            writeln!(out, "{line}")?;
        } else {
            write!(out, "{}", render::board(&self.game))?;
            writeln!(out, "{}", render::status(&self.game))?;
        }
        Ok(())
    }
}
