use std::io;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::config::BorderPolicy;
use crate::grid::{Cell, Grid};
use crate::terminal::TerminalSession;

/// Receives the finished grid once per tick.
///
/// The grid is lent immutably; implementations own screen clearing and the
/// cell-to-character mapping.
pub trait BoardDisplay {
    fn show(&mut self, grid: &Grid, score: usize) -> io::Result<()>;
}

impl<F> BoardDisplay for F
where
    F: FnMut(&Grid, usize) -> io::Result<()>,
{
    fn show(&mut self, grid: &Grid, score: usize) -> io::Result<()> {
        self(grid, score)
    }
}

/// Values shown on the status line under the board.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub score: usize,
    pub border_policy: BorderPolicy,
}

/// Draws the board into the alternate screen through ratatui.
pub struct TerminalDisplay {
    session: TerminalSession,
    border_policy: BorderPolicy,
}

impl TerminalDisplay {
    #[must_use]
    pub fn new(session: TerminalSession, border_policy: BorderPolicy) -> Self {
        Self {
            session,
            border_policy,
        }
    }
}

impl BoardDisplay for TerminalDisplay {
    fn show(&mut self, grid: &Grid, score: usize) -> io::Result<()> {
        let hud = HudInfo {
            score,
            border_policy: self.border_policy,
        };
        self.session
            .terminal_mut()
            .draw(|frame| render(frame, grid, hud))?;
        Ok(())
    }
}

/// Renders the full game frame from an immutable grid.
pub fn render(frame: &mut Frame<'_>, grid: &Grid, hud: HudInfo) {
    let size = grid.size();
    let [board_area, hud_area, _] = Layout::vertical([
        Constraint::Length(size.height() + 2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(frame.area());
    let [board_area, _] =
        Layout::horizontal([Constraint::Length(size.width() + 2), Constraint::Min(0)])
            .areas(board_area);

    let rows: Vec<Line<'_>> = grid.rows().map(row_line).collect();
    frame.render_widget(
        Paragraph::new(rows).block(Block::bordered().title(" snake ")),
        board_area,
    );

    render_hud(frame, hud_area, size.width(), size.height(), hud);
}

fn row_line(row: &[Cell]) -> Line<'static> {
    Line::from(
        row.iter()
            .map(|cell| Span::styled(cell.glyph().to_string(), cell_style(*cell)))
            .collect::<Vec<_>>(),
    )
}

fn cell_style(cell: Cell) -> Style {
    match cell {
        Cell::Empty => Style::new().fg(Color::DarkGray),
        Cell::Food => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        Cell::SnakeHead => Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        Cell::SnakeTail => Style::new().fg(Color::Green),
    }
}

fn render_hud(frame: &mut Frame<'_>, area: Rect, width: u16, height: u16, hud: HudInfo) {
    let walls = match hud.border_policy {
        BorderPolicy::Wrap => "wrap",
        BorderPolicy::Kill => "kill",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" Score: {} ", hud.score),
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {height}x{width} | walls: {walls} | [Esc] quit"),
            Style::new().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
