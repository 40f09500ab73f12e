use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }
}

/// Why a snake is considered dead.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Ordered body segments, head first.
///
/// Growth and shrinking are separate steps: a tick always pushes a new head
/// and then decides whether to drop the tail.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Lays out `length` segments downwards from the head at `(start_x, start_y)`.
    ///
    /// # Panics
    ///
    /// Panics when `length` is zero.
    #[must_use]
    pub fn new(start_x: i32, start_y: i32, length: usize) -> Self {
        assert!(length >= 1, "snake needs at least one segment");

        let body = (0..length)
            .map(|offset| Position::new(start_x, start_y + offset as i32))
            .collect();

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
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

    /// Returns true if any segment, head included, occupies `position`.
    #[must_use]
    pub fn collides_with(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Classifies the current body against the board; walls are checked first.
    #[must_use]
    pub fn death_reason(&self, bounds: GridSize) -> Option<DeathReason> {
        if !self.head().is_within_bounds(bounds) {
            return Some(DeathReason::WallCollision);
        }

        if self.head_overlaps_body() {
            return Some(DeathReason::SelfCollision);
        }

        None
    }

    /// Returns true when the head is off the board or on its own body.
    #[must_use]
    pub fn died_from(&self, bounds: GridSize) -> bool {
        self.death_reason(bounds).is_some()
    }

    /// Pushes a new head one cell towards `direction`; the tail stays.
    pub fn grow(&mut self, direction: Direction) {
        let next_head = self.head().stepped(direction);
        self.body.push_front(next_head);
    }

    /// Drops the tail segment.
    pub fn shrink(&mut self) {
        debug_assert!(self.body.len() > 1, "shrink would empty the snake");
        let _ = self.body.pop_back();
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
