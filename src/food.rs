use std::collections::HashSet;

use rand::Rng;

use crate::config::GridSize;
use crate::error::SpawnError;
use crate::snake::{Position, Snake};

/// Picks a uniformly random cell the snake does not occupy.
///
/// Candidates are resampled until one is free. A snake covering every cell
/// would make that loop endless, so that case is reported as
/// [`SpawnError::BoardFull`] up front.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Result<Position, SpawnError> {
    let cells = bounds.total_cells();
    if occupied_cells(bounds, snake) >= cells {
        return Err(SpawnError::BoardFull { cells });
    }

    loop {
        let candidate = Position::new(
            rng.gen_range(0..i32::from(bounds.width)),
            rng.gen_range(0..i32::from(bounds.height)),
        );

        if !snake.collides_with(candidate) {
            return Ok(candidate);
        }
    }
}

/// Counts distinct in-bounds cells covered by the snake.
fn occupied_cells(bounds: GridSize, snake: &Snake) -> usize {
    snake
        .segments()
        .filter(|segment| segment.is_within_bounds(bounds))
        .collect::<HashSet<_>>()
        .len()
}
