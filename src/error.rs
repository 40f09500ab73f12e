use std::io;

use thiserror::Error;

/// Invalid construction-time settings; no game state is created.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("{axis} of {pixels} is not a multiple of the cell size {cell}")]
    NotCellAligned {
        axis: &'static str,
        pixels: u32,
        cell: u32,
    },
    #[error("width and height must both be non-zero")]
    EmptyGrid,
    #[error("{axis} exceeds the largest supported grid")]
    GridTooLarge { axis: &'static str },
    #[error("a {width}x{height} grid cannot hold the starting snake ({needed} cells needed)")]
    GridTooSmall {
        width: u16,
        height: u16,
        needed: usize,
    },
    #[error("tick interval of {ms}ms is below the minimum of {min}ms")]
    TickTooFast { ms: u64, min: u64 },
}

/// Food could not be placed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("snake covers all {cells} cells; no room for food")]
    BoardFull { cells: usize },
}

/// Top-level failure surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not place food: {0}")]
    Spawn(#[from] SpawnError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}
