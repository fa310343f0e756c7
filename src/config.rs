use crate::error::ConfigError;
use crate::snake::Position;

/// Default board height used when neither the CLI nor settings provide one.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default board width used when neither the CLI nor settings provide one.
pub const DEFAULT_GRID_WIDTH: u16 = 50;

/// Smallest accepted board dimension on either axis.
pub const MIN_BOARD_DIMENSION: u16 = 1;

/// Largest accepted board dimension on either axis.
pub const MAX_BOARD_DIMENSION: u16 = 100;

/// Fixed wall-clock interval between ticks in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 200;

/// Capacity of the pending-turn queue between the input task and the tick.
pub const TURN_QUEUE_CAPACITY: usize = 10;

/// Random samples tried before food placement scans for free cells.
pub const FOOD_SAMPLE_ATTEMPTS: usize = 256;

/// Board axis, used to label dimension errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Axis {
    Height,
    Width,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Height => f.write_str("height"),
            Self::Width => f.write_str("width"),
        }
    }
}

/// Logical grid dimensions passed through the game as a named type.
///
/// Only constructible through [`GridSize::new`], so every value in circulation
/// satisfies the `[1, 100]` range on both axes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    width: u16,
    height: u16,
}

impl GridSize {
    /// Validates and builds board dimensions.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        check_dimension(Axis::Width, width)?;
        check_dimension(Axis::Height, height)?;
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the spawn cell of a fresh snake.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: self.width / 2,
            y: self.height / 2,
        }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

fn check_dimension(axis: Axis, value: u16) -> Result<(), ConfigError> {
    if (MIN_BOARD_DIMENSION..=MAX_BOARD_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { axis, value })
    }
}

/// What happens when the head crosses an edge.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum BorderPolicy {
    /// Edges wrap to the opposite side (toroidal board).
    #[default]
    Wrap,
    /// Edges are lethal.
    Kill,
}

impl BorderPolicy {
    #[must_use]
    pub fn from_border_kill(border_kill: bool) -> Self {
        if border_kill { Self::Kill } else { Self::Wrap }
    }

    #[must_use]
    pub fn is_kill(self) -> bool {
        self == Self::Kill
    }
}

/// Everything needed to set up one game session apart from its collaborators.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct GameConfig {
    pub size: GridSize,
    pub border_policy: BorderPolicy,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::{Axis, BorderPolicy, GridSize};
    use crate::error::ConfigError;
    use crate::snake::Position;

    #[test]
    fn grid_size_accepts_inclusive_range() {
        assert!(GridSize::new(1, 1).is_ok());
        assert!(GridSize::new(100, 100).is_ok());
    }

    #[test]
    fn grid_size_rejects_zero_and_oversized_axes() {
        assert!(matches!(
            GridSize::new(0, 10),
            Err(ConfigError::InvalidDimension {
                axis: Axis::Width,
                value: 0
            })
        ));
        assert!(matches!(
            GridSize::new(10, 101),
            Err(ConfigError::InvalidDimension {
                axis: Axis::Height,
                value: 101
            })
        ));
    }

    #[test]
    fn default_board_is_twenty_by_fifty_with_center_spawn() {
        let size = GridSize::default();

        assert_eq!((size.height(), size.width()), (20, 50));
        assert_eq!(size.center(), Position { x: 25, y: 10 });
        assert_eq!(size.total_cells(), 1000);
    }

    #[test]
    fn border_policy_maps_from_flag() {
        assert_eq!(BorderPolicy::from_border_kill(true), BorderPolicy::Kill);
        assert_eq!(BorderPolicy::from_border_kill(false), BorderPolicy::Wrap);
        assert!(!BorderPolicy::default().is_kill());
    }
}
