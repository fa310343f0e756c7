use rand::Rng;
use tracing::debug;

use crate::config::{GridSize, FOOD_SAMPLE_ATTEMPTS};
use crate::snake::{Position, Snake};

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places food on a cell the snake does not occupy.
    ///
    /// Returns `None` when the snake covers the whole board.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        spawn_position(rng, bounds, snake).map(Self::new)
    }
}

/// Picks a uniformly random free cell.
///
/// Rejection sampling is tried first since the snake usually covers a small
/// part of the board. After [`FOOD_SAMPLE_ATTEMPTS`] misses the free cells are
/// enumerated instead, which bounds the work on a crowded board.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..bounds.width()),
            y: rng.gen_range(0..bounds.height()),
        };
        if !snake.occupies(candidate) {
            debug!(x = candidate.x, y = candidate.y, "food placed");
            return Some(candidate);
        }
    }

    let candidates: Vec<Position> = (0..bounds.height())
        .flat_map(|y| (0..bounds.width()).map(move |x| Position { x, y }))
        .filter(|position| !snake.occupies(*position))
        .collect();

    if candidates.is_empty() {
        debug!("no free cell left for food");
        return None;
    }

    let position = candidates[rng.gen_range(0..candidates.len())];
    debug!(
        x = position.x,
        y = position.y,
        free = candidates.len(),
        "food placed after scanning free cells"
    );
    Some(position)
}
