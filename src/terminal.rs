use std::io::{self, Stdout};
use std::panic;
use std::process;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// The ratatui terminal that [`crate::renderer::TerminalDisplay`] draws the board on.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

const PANIC_EXIT_CODE: i32 = 101;

/// Holds the player's terminal in game mode until it is dropped.
///
/// While a session is alive the terminal is raw (keys arrive one at a time,
/// without echo) and the board is drawn on the alternate screen with the
/// cursor hidden. Dropping it puts the shell back the way it was.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Switches the terminal into game mode.
    ///
    /// Whatever step fails, the steps already taken are undone before the
    /// error is returned.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let terminal =
            switch_screen().and_then(|stdout| Terminal::new(CrosstermBackend::new(stdout)));
        if terminal.is_err() {
            let _ = restore();
        }

        Ok(Self {
            terminal: terminal?,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore();
    }
}

fn switch_screen() -> io::Result<Stdout> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    Ok(stdout)
}

/// Puts the shell back: cooked mode, main screen, visible cursor.
///
/// Safe to call when the terminal was never switched.
pub fn restore() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    raw
}

/// Makes a panic on any thread fatal for the whole game.
///
/// The hook hands the screen back to the shell first so the panic message is
/// readable, then exits with status 101.
pub fn install_panic_hook() {
    let report = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        report(info);
        process::exit(PANIC_EXIT_CODE);
    }));
}
