use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use snakegame::error::{ConfigError, GameError};
use snakegame::input::KeyboardInput;
use snakegame::logging::init_file_logging;
use snakegame::renderer::TerminalDisplay;
use snakegame::session::{Game, GameSummary};
use snakegame::settings::{load_settings, settings_path, Settings};
use snakegame::terminal::{install_panic_hook, TerminalSession};

#[derive(Debug, Parser)]
#[command(version, about = "Snake in the terminal. Arrow keys steer, Esc quits.")]
struct Cli {
    /// Board height in cells (1-100).
    #[arg(long)]
    height: Option<u16>,

    /// Board width in cells (1-100).
    #[arg(long)]
    width: Option<u16>,

    /// Die on the board edge instead of wrapping around.
    #[arg(long = "border-kill")]
    border_kill: bool,

    /// Wrap around the board edge even if the settings file enables border kill.
    #[arg(long = "no-border-kill", conflicts_with = "border_kill")]
    no_border_kill: bool,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to read instead of the default location.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write tracing output to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Board options given on the command line, layered over the settings file.
    fn overrides(&self) -> Settings {
        let border_kill = if self.border_kill {
            Some(true)
        } else if self.no_border_kill {
            Some(false)
        } else {
            None
        };

        Settings {
            height: self.height,
            width: self.width,
            border_kill,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(summary) => {
            println!("<< Score: {} >>", summary.score);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("snakegame: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<GameSummary, GameError> {
    if let Some(path) = &cli.log_file {
        init_file_logging(path).map_err(|source| ConfigError::LogFile {
            path: path.clone(),
            source,
        })?;
    }

    let path = cli.settings.clone().unwrap_or_else(settings_path);
    let config = load_settings(&path)?
        .overlay(cli.overrides())
        .to_config(cli.seed)?;

    install_panic_hook();
    let session = TerminalSession::enter().map_err(GameError::Display)?;

    // The session lives inside the display and is restored when `run` returns.
    Game::builder(config)
        .display(TerminalDisplay::new(session, config.border_policy))
        .input(KeyboardInput)
        .build()?
        .run()
}
