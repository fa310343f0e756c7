use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{BorderPolicy, GameConfig, GridSize};
use crate::error::ConfigError;
use crate::food::Food;
use crate::grid::Grid;
use crate::input::Direction;
use crate::queue::DirectionQueue;
use crate::snake::Snake;

/// Why the snake died.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Current high-level gameplay state. Only `Playing` ever changes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver(DeathReason),
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

impl GameStatus {
    #[must_use]
    pub fn is_finished(self) -> bool {
        self != Self::Playing
    }
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Food>,
    pub status: GameStatus,
    pub tick_count: u64,
    bounds: GridSize,
    border_policy: BorderPolicy,
    grid: Grid,
    rng: StdRng,
}

impl GameState {
    /// Creates a state with a one-cell snake at the board center heading up.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let snake = Snake::new(config.size.center(), Direction::Up);
        Self::assemble(config, snake)
    }

    /// Creates a state around a caller-supplied snake.
    pub fn with_snake(config: &GameConfig, snake: Snake) -> Result<Self, ConfigError> {
        if let Some(segment) = snake.segments().find(|s| !config.size.contains(**s)) {
            return Err(ConfigError::SnakeOutOfBounds {
                x: segment.x,
                y: segment.y,
            });
        }

        Ok(Self::assemble(config, snake))
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(size: GridSize, border_policy: BorderPolicy, seed: u64) -> Self {
        Self::new(&GameConfig {
            size,
            border_policy,
            seed: Some(seed),
        })
    }

    fn assemble(config: &GameConfig, snake: Snake) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let food = Food::spawn(&mut rng, config.size, &snake);
        let status = if food.is_some() {
            GameStatus::Playing
        } else {
            GameStatus::BoardFilled
        };

        Self {
            snake,
            food,
            status,
            tick_count: 0,
            bounds: config.size,
            border_policy: config.border_policy,
            grid: Grid::with_size(config.size),
            rng,
        }
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Applies at most one queued turn, shifts the body, moves the head under
    /// the border policy, then checks self-collision and food. A tick that
    /// ends the game leaves the rest of the state as it was at that point.
    pub fn tick(&mut self, turns: &DirectionQueue) -> GameStatus {
        if self.status.is_finished() {
            return self.status;
        }

        self.tick_count += 1;

        if let Some(direction) = turns.next_turn(self.snake.direction()) {
            self.snake.turn(direction);
        }

        let Some(next_head) =
            self.snake
                .head()
                .step(self.snake.direction(), self.bounds, self.border_policy)
        else {
            return self.finish(GameStatus::GameOver(DeathReason::WallCollision));
        };

        self.snake.shift();
        self.snake.advance_head(next_head);

        if self.snake.head_overlaps_body() {
            return self.finish(GameStatus::GameOver(DeathReason::SelfCollision));
        }

        if self.food.is_some_and(|food| food.position == next_head) {
            self.snake.grow();
            self.food = Food::spawn(&mut self.rng, self.bounds, &self.snake);
            debug!(length = self.snake.len(), "food eaten");

            if self.food.is_none() {
                return self.finish(GameStatus::BoardFilled);
            }
        }

        self.status
    }

    fn finish(&mut self, status: GameStatus) -> GameStatus {
        info!(
            ?status,
            ticks = self.tick_count,
            score = self.score(),
            "game finished"
        );
        self.status = status;
        status
    }

    /// Redraws the grid from the current snake and food.
    pub fn refresh_grid(&mut self) {
        self.grid.rebuild(&self.snake, self.food.as_ref());
    }

    /// Grid as of the last [`GameState::refresh_grid`].
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current score: every segment beyond the first.
    #[must_use]
    pub fn score(&self) -> usize {
        self.snake.len() - 1
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn border_policy(&self) -> BorderPolicy {
        self.border_policy
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{BorderPolicy, GameConfig, GridSize};
    use crate::error::ConfigError;
    use crate::food::Food;
    use crate::input::Direction;
    use crate::queue::turn_queue;
    use crate::snake::{Position, Snake};

    use super::{DeathReason, GameState, GameStatus};

    fn state(width: u16, height: u16, border_policy: BorderPolicy) -> GameState {
        let size = GridSize::new(width, height).expect("valid test bounds");
        GameState::new_with_seed(size, border_policy, 1)
    }

    #[test]
    fn fresh_state_starts_centered_heading_up_with_free_food() {
        let state = state(50, 20, BorderPolicy::Wrap);

        assert_eq!(state.snake.head(), Position { x: 25, y: 10 });
        assert_eq!(state.snake.direction(), Direction::Up);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score(), 0);

        let food = state.food.expect("food placed");
        assert!(!state.snake.occupies(food.position));
    }

    #[test]
    fn snake_grows_in_the_tick_it_eats() {
        let (_turns, queue) = turn_queue(10);
        let mut state = state(10, 10, BorderPolicy::Wrap);
        state.snake = Snake::new(Position { x: 1, y: 1 }, Direction::Right);
        state.food = Some(Food::new(Position { x: 2, y: 1 }));

        state.tick(&queue);

        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score(), 1);
        let food = state.food.expect("food replaced");
        assert!(!state.snake.occupies(food.position));

        // The duplicated tail separates on the following move.
        state.food = Some(Food::new(Position { x: 9, y: 9 }));
        state.tick(&queue);
        let segments: Vec<_> = state.snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![Position { x: 3, y: 1 }, Position { x: 2, y: 1 }]
        );
    }

    #[test]
    fn border_kill_sets_game_over_and_keeps_head() {
        let (_turns, queue) = turn_queue(10);
        let mut state = state(4, 4, BorderPolicy::Kill);
        state.snake = Snake::new(Position { x: 3, y: 1 }, Direction::Right);
        state.food = Some(Food::new(Position { x: 0, y: 0 }));

        let status = state.tick(&queue);

        assert_eq!(status, GameStatus::GameOver(DeathReason::WallCollision));
        assert_eq!(state.snake.head(), Position { x: 3, y: 1 });
    }

    #[test]
    fn wrap_policy_moves_head_to_opposite_edge() {
        let (_turns, queue) = turn_queue(10);
        let mut state = state(4, 4, BorderPolicy::Wrap);
        state.snake = Snake::new(Position { x: 3, y: 1 }, Direction::Right);
        state.food = Some(Food::new(Position { x: 2, y: 3 }));

        let status = state.tick(&queue);

        assert_eq!(status, GameStatus::Playing);
        assert_eq!(state.snake.head(), Position { x: 0, y: 1 });
    }

    #[test]
    fn snake_collision_with_self_sets_game_over_without_eating() {
        let (_turns, queue) = turn_queue(10);
        let mut state = state(6, 6, BorderPolicy::Kill);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 1 },
                Position { x: 2, y: 1 },
                Position { x: 3, y: 1 },
            ],
            Direction::Up,
        );
        state.food = Some(Food::new(Position { x: 2, y: 1 }));

        let status = state.tick(&queue);

        assert_eq!(status, GameStatus::GameOver(DeathReason::SelfCollision));
        assert_eq!(state.snake.len(), 7);
        assert_eq!(state.food, Some(Food::new(Position { x: 2, y: 1 })));
    }

    #[test]
    fn moving_into_vacated_tail_cell_is_safe() {
        let (_turns, queue) = turn_queue(10);
        let mut state = state(6, 6, BorderPolicy::Kill);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
            ],
            Direction::Left,
        );
        state.food = Some(Food::new(Position { x: 5, y: 5 }));

        assert_eq!(state.tick(&queue), GameStatus::Playing);
        assert_eq!(state.snake.head(), Position { x: 1, y: 2 });
    }

    #[test]
    fn queued_reversal_is_ignored() {
        let (turns, queue) = turn_queue(10);
        let mut state = state(10, 10, BorderPolicy::Wrap);
        state.snake = Snake::from_segments(
            vec![
                Position { x: 4, y: 4 },
                Position { x: 3, y: 4 },
                Position { x: 2, y: 4 },
            ],
            Direction::Right,
        );
        state.food = Some(Food::new(Position { x: 0, y: 0 }));

        turns.push(Direction::Left);
        state.tick(&queue);

        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.snake.head(), Position { x: 5, y: 4 });
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn one_turn_per_tick_keeps_later_intents_queued() {
        let (turns, queue) = turn_queue(10);
        let mut state = state(10, 10, BorderPolicy::Wrap);
        state.snake = Snake::new(Position { x: 5, y: 5 }, Direction::Up);
        state.food = Some(Food::new(Position { x: 0, y: 0 }));

        turns.push(Direction::Right);
        turns.push(Direction::Down);

        state.tick(&queue);
        assert_eq!(state.snake.head(), Position { x: 6, y: 5 });

        state.tick(&queue);
        assert_eq!(state.snake.head(), Position { x: 6, y: 6 });
    }

    #[test]
    fn finished_state_is_never_revived() {
        let (turns, queue) = turn_queue(10);
        let mut state = state(4, 4, BorderPolicy::Kill);
        state.snake = Snake::new(Position { x: 0, y: 0 }, Direction::Up);
        state.food = Some(Food::new(Position { x: 3, y: 3 }));

        state.tick(&queue);
        turns.push(Direction::Right);
        let status = state.tick(&queue);

        assert_eq!(status, GameStatus::GameOver(DeathReason::WallCollision));
        assert_eq!(state.tick_count, 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn eating_the_last_free_cell_fills_the_board() {
        let (_turns, queue) = turn_queue(10);
        let mut state = state(3, 1, BorderPolicy::Wrap);
        state.snake = Snake::from_segments(
            vec![Position { x: 1, y: 0 }, Position { x: 0, y: 0 }],
            Direction::Right,
        );
        state.food = Some(Food::new(Position { x: 2, y: 0 }));

        // The grown tail still shares a cell, so the vacated one gets the food.
        assert_eq!(state.tick(&queue), GameStatus::Playing);
        assert_eq!(state.food, Some(Food::new(Position { x: 0, y: 0 })));

        // Wrapping onto that cell leaves nothing free.
        assert_eq!(state.tick(&queue), GameStatus::BoardFilled);
        assert_eq!(state.snake.head(), Position { x: 0, y: 0 });
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.score(), 3);
        assert!(state.food.is_none());
    }

    #[test]
    fn one_cell_board_starts_filled() {
        let state = state(1, 1, BorderPolicy::Wrap);

        assert_eq!(state.status, GameStatus::BoardFilled);
        assert!(state.food.is_none());
    }

    #[test]
    fn out_of_bounds_initial_snake_is_rejected() {
        let config = GameConfig {
            size: GridSize::new(5, 5).expect("valid test bounds"),
            ..GameConfig::default()
        };
        let snake = Snake::new(Position { x: 5, y: 0 }, Direction::Up);

        assert!(matches!(
            GameState::with_snake(&config, snake),
            Err(ConfigError::SnakeOutOfBounds { x: 5, y: 0 })
        ));
    }

    #[test]
    fn refresh_grid_renders_current_state() {
        let mut state = state(3, 2, BorderPolicy::Wrap);
        state.snake = Snake::new(Position { x: 0, y: 0 }, Direction::Up);
        state.food = Some(Food::new(Position { x: 2, y: 1 }));

        state.refresh_grid();

        assert_eq!(state.grid().to_string(), "%__\n__$\n");
    }
}
