use std::fmt;

use crate::config::GridSize;
use crate::error::ConfigError;
use crate::food::Food;
use crate::snake::{Position, Snake};

/// Rendered content of one board cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Food,
    SnakeHead,
    SnakeTail,
}

impl Cell {
    /// Character used for this cell in text output.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => '_',
            Self::Food => '$',
            Self::SnakeHead => '%',
            Self::SnakeTail => '*',
        }
    }
}

/// Row-major `height × width` cell buffer rebuilt from scratch every tick.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates an all-empty grid after validating the dimensions.
    pub fn new(height: u16, width: u16) -> Result<Self, ConfigError> {
        Ok(Self::with_size(GridSize::new(width, height)?))
    }

    /// Allocates an all-empty grid of already validated dimensions.
    #[must_use]
    pub fn with_size(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.total_cells()],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Resets every cell to [`Cell::Empty`].
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Writes one cell.
    ///
    /// # Panics
    ///
    /// Panics when `position` lies outside the grid. Snake and food positions
    /// are always in bounds, so reaching this is a bug.
    pub fn set(&mut self, position: Position, cell: Cell) {
        let index = self.index(position);
        self.cells[index] = cell;
    }

    /// Reads one cell.
    ///
    /// # Panics
    ///
    /// Panics when `position` lies outside the grid.
    #[must_use]
    pub fn get(&self, position: Position) -> Cell {
        self.cells[self.index(position)]
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.size.width()))
    }

    /// Redraws the grid from snake and food state.
    ///
    /// The result depends only on its inputs, so rebuilding twice from the
    /// same state yields identical grids.
    pub fn rebuild(&mut self, snake: &Snake, food: Option<&Food>) {
        self.clear();

        for segment in snake.segments().skip(1) {
            self.set(*segment, Cell::SnakeTail);
        }
        // A freshly grown tail can share the head's cell until the next move.
        self.set(snake.head(), Cell::SnakeHead);

        if let Some(food) = food {
            self.set(food.position, Cell::Food);
        }
    }

    fn index(&self, position: Position) -> usize {
        assert!(
            self.size.contains(position),
            "grid write out of bounds: ({}, {}) on {}x{}",
            position.x,
            position.y,
            self.size.width(),
            self.size.height(),
        );

        usize::from(position.y) * usize::from(self.size.width()) + usize::from(position.x)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
