use crossterm::event::KeyCode;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GameConfig, GridSize};
use crate::error::SpawnError;
use crate::food::spawn_position;
use crate::input::{Direction, direction_change_is_valid, direction_for_key};
use crate::snake::{Position, Snake};

/// Snapshot of one game between ticks.
///
/// `direction` is the direction applied on the most recent tick and is what
/// the reversal guard compares against. `pending_direction` is the last
/// accepted input and takes effect on the next tick. `food` is `None` only
/// once the snake covers the whole board.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub direction: Direction,
    pub pending_direction: Direction,
    pub food: Option<Position>,
    pub running: bool,
    pub snake: Snake,
}

impl GameState {
    /// Queues the direction bound to `key`, subject to the reversal guard.
    ///
    /// Unmapped keys select the committed direction, which also clears any
    /// earlier queued turn. Reversals of the committed direction queue the
    /// committed direction instead.
    pub fn apply_direction_input(&mut self, key: KeyCode) -> bool {
        let selected = direction_for_key(key).unwrap_or(self.direction);
        self.queue_direction(selected)
    }

    /// Queues `selected` for the next tick. Returns false when it was
    /// discarded as a reversal.
    pub fn queue_direction(&mut self, selected: Direction) -> bool {
        if direction_change_is_valid(self.direction, selected) {
            self.pending_direction = selected;
            true
        } else {
            self.pending_direction = self.direction;
            false
        }
    }
}

/// What happened to the food during a tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodEvent {
    None,
    Eaten { at: Position },
    /// Food was eaten on the last free cell; nothing was respawned.
    BoardFilled { at: Position },
}

/// Owns the board rules and the random source for food placement.
#[derive(Debug, Clone)]
pub struct Simulator {
    bounds: GridSize,
    start_length: usize,
    rng: StdRng,
}

impl Simulator {
    /// Creates a simulator with an entropy-seeded random source.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic simulator for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            bounds: config.grid(),
            start_length: config.start_length(),
            rng,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Builds a fresh game: centred snake heading up, food on a free cell.
    pub fn init_state(&mut self) -> Result<GameState, SpawnError> {
        let snake = Snake::new(
            i32::from(self.bounds.width / 2),
            i32::from(self.bounds.height / 2),
            self.start_length,
        );
        let food = self.spawn_food(&snake)?;

        Ok(GameState {
            direction: Direction::Up,
            pending_direction: Direction::Up,
            food: Some(food),
            running: true,
            snake,
        })
    }

    /// Advances `state` by one tick.
    ///
    /// The head always moves first. Landing on food respawns it against the
    /// lengthened body and keeps the tail; otherwise the tail is dropped.
    /// Death is not evaluated here and `running` is carried over untouched.
    pub fn tick(&mut self, state: &mut GameState) -> FoodEvent {
        let direction = state.pending_direction;
        state.direction = direction;
        state.snake.grow(direction);

        let Some(food) = state.food.filter(|food| state.snake.collides_with(*food)) else {
            state.snake.shrink();
            return FoodEvent::None;
        };

        match self.spawn_food(&state.snake) {
            Ok(next) => {
                state.food = Some(next);
                FoodEvent::Eaten { at: food }
            }
            Err(SpawnError::BoardFull { .. }) => {
                state.food = None;
                FoodEvent::BoardFilled { at: food }
            }
        }
    }

    /// Places food on a random free cell of this simulator's board.
    pub fn spawn_food(&mut self, snake: &Snake) -> Result<Position, SpawnError> {
        spawn_position(&mut self.rng, self.bounds, snake)
    }

    /// Points earned so far: segments gained over the starting length.
    #[must_use]
    pub fn score(&self, state: &GameState) -> usize {
        state.snake.len().saturating_sub(self.start_length)
    }
}
