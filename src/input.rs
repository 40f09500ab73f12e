use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
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
}

/// Key symbols accepted for each direction, checked in table order.
pub const DIRECTION_KEYS: &[(Direction, &[KeyCode])] = &[
    (
        Direction::Up,
        &[KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Up],
    ),
    (
        Direction::Left,
        &[KeyCode::Char('a'), KeyCode::Char('A'), KeyCode::Left],
    ),
    (
        Direction::Down,
        &[KeyCode::Char('s'), KeyCode::Char('S'), KeyCode::Down],
    ),
    (
        Direction::Right,
        &[KeyCode::Char('d'), KeyCode::Char('D'), KeyCode::Right],
    ),
];

/// Looks up the direction bound to `key`, if any.
#[must_use]
pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    DIRECTION_KEYS
        .iter()
        .find(|(_, keys)| keys.contains(&key))
        .map(|(direction, _)| *direction)
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// High-level input events consumed by the session loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    /// Raw key forwarded to the direction handler; unmapped keys are ignored there.
    Key(KeyCode),
    Restart,
    Quit,
}

/// Translates a terminal key event into a session input.
#[must_use]
pub fn translate_key_event(event: KeyEvent) -> GameInput {
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return GameInput::Quit;
    }

    match event.code {
        KeyCode::Char('r' | 'R') => GameInput::Restart,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        other => GameInput::Key(other),
    }
}
