use std::time::Duration;

use ratatui::style::Color;

use crate::error::ConfigError;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Side length of one grid cell in configured pixel units.
pub const CELL_SIZE: u32 = 10;

/// Default board width in pixel units.
pub const DEFAULT_PIXEL_WIDTH: u32 = 500;

/// Default board height in pixel units.
pub const DEFAULT_PIXEL_HEIGHT: u32 = 280;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 75;

/// Minimum accepted tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Number of segments a fresh snake starts with.
pub const SNAKE_START_LENGTH: usize = 3;

/// Terminal columns used to draw one grid cell.
pub const CELL_COLUMNS: u16 = 2;

/// Colors used for board entities and overlay text.
#[derive(Debug)]
pub struct Palette {
    pub snake: Color,
    pub food: Color,
    pub border: Color,
    pub score: Color,
    pub game_over: Color,
    pub hint: Color,
}

pub const PALETTE: Palette = Palette {
    snake: Color::Green,
    food: Color::Red,
    border: Color::DarkGray,
    score: Color::White,
    game_over: Color::Red,
    hint: Color::Gray,
};

pub const GLYPH_SNAKE: &str = "██";
pub const GLYPH_FOOD: &str = "()";

/// Construction-time game settings.
///
/// Pixel dimensions mirror a drawing surface that is divided into square
/// cells of [`CELL_SIZE`] units; both must divide evenly.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pixel_width: u32,
    pixel_height: u32,
    tick_interval_ms: u64,
    start_length: usize,
}

impl GameConfig {
    /// Validates pixel dimensions and tick period.
    pub fn new(
        pixel_width: u32,
        pixel_height: u32,
        tick_interval_ms: u64,
    ) -> Result<Self, ConfigError> {
        check_cell_aligned("width", pixel_width)?;
        check_cell_aligned("height", pixel_height)?;

        if pixel_width == 0 || pixel_height == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        if tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(ConfigError::TickTooFast {
                ms: tick_interval_ms,
                min: MIN_TICK_INTERVAL_MS,
            });
        }

        let width = u16::try_from(pixel_width / CELL_SIZE)
            .map_err(|_| ConfigError::GridTooLarge { axis: "width" })?;
        let height = u16::try_from(pixel_height / CELL_SIZE)
            .map_err(|_| ConfigError::GridTooLarge { axis: "height" })?;

        let config = Self {
            pixel_width,
            pixel_height,
            tick_interval_ms,
            start_length: SNAKE_START_LENGTH,
        };

        // The start snake hangs down from the grid centre and needs one free
        // cell left over for the first food.
        let grid = GridSize { width, height };
        let needed = SNAKE_START_LENGTH + 1;
        if grid.total_cells() < needed || usize::from(height - height / 2) < SNAKE_START_LENGTH {
            return Err(ConfigError::GridTooSmall {
                width,
                height,
                needed,
            });
        }

        Ok(config)
    }

    /// Returns the grid dimensions in cells.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        // Bounds were checked in `new`.
        GridSize {
            width: (self.pixel_width / CELL_SIZE) as u16,
            height: (self.pixel_height / CELL_SIZE) as u16,
        }
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn start_length(&self) -> usize {
        self.start_length
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pixel_width: DEFAULT_PIXEL_WIDTH,
            pixel_height: DEFAULT_PIXEL_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            start_length: SNAKE_START_LENGTH,
        }
    }
}

fn check_cell_aligned(axis: &'static str, pixels: u32) -> Result<(), ConfigError> {
    if pixels % CELL_SIZE != 0 {
        return Err(ConfigError::NotCellAligned {
            axis,
            pixels,
            cell: CELL_SIZE,
        });
    }
    Ok(())
}
