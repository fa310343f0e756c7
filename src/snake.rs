use std::collections::VecDeque;

use crate::config::{BorderPolicy, GridSize};
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    /// Returns the neighbouring cell in `direction`.
    ///
    /// Crossing an edge wraps to the opposite side under [`BorderPolicy::Wrap`]
    /// and yields `None` under [`BorderPolicy::Kill`].
    #[must_use]
    pub fn step(
        self,
        direction: Direction,
        bounds: GridSize,
        policy: BorderPolicy,
    ) -> Option<Self> {
        let last_x = bounds.width() - 1;
        let last_y = bounds.height() - 1;

        let (x, y) = match direction {
            Direction::Up if self.y == 0 => (self.x, edge(policy, last_y)?),
            Direction::Up => (self.x, self.y - 1),
            Direction::Right if self.x == last_x => (edge(policy, 0)?, self.y),
            Direction::Right => (self.x + 1, self.y),
            Direction::Down if self.y == last_y => (self.x, edge(policy, 0)?),
            Direction::Down => (self.x, self.y + 1),
            Direction::Left if self.x == 0 => (edge(policy, last_x)?, self.y),
            Direction::Left => (self.x - 1, self.y),
        };

        Some(Self { x, y })
    }
}

fn edge(policy: BorderPolicy, wrapped: u16) -> Option<u16> {
    match policy {
        BorderPolicy::Wrap => Some(wrapped),
        BorderPolicy::Kill => None,
    }
}

/// Snake body (front is head) and its committed movement direction.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self { body, direction }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
        }
    }

    /// Commits a new movement direction.
    pub fn turn(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Moves every segment one place toward the head.
    ///
    /// Afterwards the head and the first body segment share a cell until
    /// [`Snake::advance_head`] moves the head on.
    pub fn shift(&mut self) {
        let head = self.head();
        self.body.push_front(head);
        let _ = self.body.pop_back();
    }

    /// Places the head on `position`.
    pub fn advance_head(&mut self, position: Position) {
        if let Some(head) = self.body.front_mut() {
            *head = position;
        }
    }

    /// Appends a copy of the tail segment.
    ///
    /// The copy stays put on the next shift while the rest of the body moves,
    /// which nets exactly one extra segment per call.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
