use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::queue::{QuitSender, TurnSender};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns whether `next` is a real turn from `self`: neither a repeat of
    /// the current direction nor an immediate 180° reversal.
    #[must_use]
    pub fn accepts_turn(self, next: Direction) -> bool {
        next != self && next != self.opposite()
    }
}

/// High-level input events produced from raw key presses.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Quit,
}

/// Translates one terminal key event into a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Esc => Some(GameInput::Quit),
        // Raw mode swallows SIGINT, so Ctrl+C has to be handled here.
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameInput::Quit)
        }
        _ => None,
    }
}

/// Producer of turn intents and the quit signal, run on its own thread.
///
/// An `Err` return is fatal to the game: the loop reports it as an input failure.
pub trait InputSource: Send + 'static {
    fn run(self: Box<Self>, turns: TurnSender, quit: QuitSender) -> io::Result<()>;
}

impl<F> InputSource for F
where
    F: FnOnce(TurnSender, QuitSender) -> io::Result<()> + Send + 'static,
{
    fn run(self: Box<Self>, turns: TurnSender, quit: QuitSender) -> io::Result<()> {
        (*self)(turns, quit)
    }
}

/// Reads key presses from the terminal until the player quits.
///
/// `event::read` blocks, so this never returns on its own while the game runs;
/// the thread ends with the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn run(self: Box<Self>, turns: TurnSender, quit: QuitSender) -> io::Result<()> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };

            match map_key(key) {
                Some(GameInput::Direction(direction)) => {
                    turns.push(direction);
                }
                Some(GameInput::Quit) => {
                    debug!("quit key pressed");
                    quit.request();
                    return Ok(());
                }
                None => {}
            }
        }
    }
}
