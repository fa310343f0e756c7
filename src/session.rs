use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::{GameConfig, TICK_INTERVAL_MS, TURN_QUEUE_CAPACITY};
use crate::error::{ConfigError, GameError};
use crate::game::{DeathReason, GameState, GameStatus};
use crate::input::InputSource;
use crate::queue::{quit_signal, turn_queue, QuitSender, QuitSignal, TurnSender};
use crate::renderer::BoardDisplay;
use crate::snake::Snake;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    GameOver(DeathReason),
    BoardFilled,
    Quit,
}

/// Final report of one run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameSummary {
    /// Snake length minus one.
    pub score: usize,
    pub outcome: Outcome,
    pub ticks: u64,
}

/// Collects configuration and collaborators for a [`Game`].
pub struct GameBuilder {
    config: GameConfig,
    display: Option<Box<dyn BoardDisplay>>,
    input: Option<Box<dyn InputSource>>,
    initial_snake: Option<Snake>,
    tick_interval: Duration,
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            display: None,
            input: None,
            initial_snake: None,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }

    #[must_use]
    pub fn display(mut self, display: impl BoardDisplay + 'static) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    #[must_use]
    pub fn input(mut self, input: impl InputSource) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Replaces the default one-cell snake at the board center.
    #[must_use]
    pub fn initial_snake(mut self, snake: Snake) -> Self {
        self.initial_snake = Some(snake);
        self
    }

    /// Overrides the wall-clock pause between ticks.
    #[must_use]
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn build(self) -> Result<Game, ConfigError> {
        let display = self.display.ok_or(ConfigError::MissingDisplay)?;
        let input = self.input.ok_or(ConfigError::MissingInput)?;
        let state = match self.initial_snake {
            Some(snake) => GameState::with_snake(&self.config, snake)?,
            None => GameState::new(&self.config),
        };

        Ok(Game {
            state,
            display,
            input,
            tick_interval: self.tick_interval,
        })
    }
}

/// A fully assembled game, ready to run once.
pub struct Game {
    state: GameState,
    display: Box<dyn BoardDisplay>,
    input: Box<dyn InputSource>,
    tick_interval: Duration,
}

impl Game {
    #[must_use]
    pub fn builder(config: GameConfig) -> GameBuilder {
        GameBuilder::new(config)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs ticks until the snake dies, the board fills up or the player quits.
    ///
    /// The input collaborator is started on its own thread first. Each cycle
    /// ticks the simulation, polls the quit signal, then draws and sleeps. An
    /// input failure or display failure aborts the run.
    pub fn run(self) -> Result<GameSummary, GameError> {
        let Self {
            mut state,
            mut display,
            input,
            tick_interval,
        } = self;

        let (turn_sender, turns) = turn_queue(TURN_QUEUE_CAPACITY);
        let (quit_sender, quit) = quit_signal();
        spawn_input(input, turn_sender, quit_sender)?;

        info!(
            width = state.bounds().width(),
            height = state.bounds().height(),
            border = ?state.border_policy(),
            "game started"
        );

        loop {
            let status = state.tick(&turns);

            let outcome = match quit.poll() {
                Some(QuitSignal::Requested) => Some(Outcome::Quit),
                Some(QuitSignal::InputFailed(error)) => return Err(GameError::Input(error)),
                None => match status {
                    GameStatus::Playing => None,
                    GameStatus::GameOver(reason) => Some(Outcome::GameOver(reason)),
                    GameStatus::BoardFilled => Some(Outcome::BoardFilled),
                },
            };

            if let Some(outcome) = outcome {
                let summary = GameSummary {
                    score: state.score(),
                    outcome,
                    ticks: state.tick_count,
                };
                info!(?summary, "game ended");
                return Ok(summary);
            }

            state.refresh_grid();
            display
                .show(state.grid(), state.score())
                .map_err(GameError::Display)?;
            thread::sleep(tick_interval);
        }
    }
}

fn spawn_input(
    input: Box<dyn InputSource>,
    turns: TurnSender,
    quit: QuitSender,
) -> Result<(), GameError> {
    thread::Builder::new()
        .name("input".to_owned())
        .spawn(move || {
            let failure = quit.clone();
            match input.run(turns, quit) {
                Ok(()) => debug!("input source finished"),
                Err(error) => failure.signal(QuitSignal::InputFailed(error)),
            }
        })
        .map(drop)
        .map_err(GameError::Input)
}
