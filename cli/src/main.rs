use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use flipsweep_core::Coord;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

mod command;
mod config;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long)]
    width: Option<Coord>,

    /// Board height in cells
    #[arg(long)]
    height: Option<Coord>,

    /// Percentage of cells holding a mine
    #[arg(short, long)]
    mine_percent: Option<f64>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Config file to use instead of ~/.flipsweep/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON lines instead of drawing the board
    #[arg(long)]
    json: bool,
}

impl Args {
    fn overrides(&self) -> config::Overrides {
        config::Overrides {
            width: self.width,
            height: self.height,
            mine_percent: self.mine_percent,
            seed: self.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let file = config::load(args.config.as_deref())?;
    let settings = config::Settings::resolve(&file, &args.overrides(), config::time_seed());

    // the more verbose of the flags and the config file wins
    let level = settings
        .log_level
        .map_or(args.verbose.log_level_filter(), |level| {
            level.max(args.verbose.log_level_filter())
        });
    let log_config = ConfigBuilder::new().build();
    if let Err(err) = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Error initializing logger: {err}");
    }
    log::debug!("Settings: {:?}", settings);

    let game_config = settings
        .game_config()
        .context("invalid board options")?;
    let mut session = session::Session::new(settings, game_config, args.json)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_map_to_overrides() {
        let args = Args::try_parse_from([
            "flipsweep",
            "--width",
            "30",
            "-m",
            "15.5",
            "--seed",
            "4",
            "--json",
        ])
        .unwrap();

        let overrides = args.overrides();

        assert_eq!(overrides.width, Some(30));
        assert_eq!(overrides.height, None);
        assert_eq!(overrides.mine_percent, Some(15.5));
        assert_eq!(overrides.seed, Some(4));
        assert!(args.json);
    }

    #[test]
    fn rejects_oversized_board() {
        assert!(Args::try_parse_from(["flipsweep", "--width", "256"]).is_err());
    }
}
