use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::error::AppError;

/// Routes `log` output to `path`. The terminal belongs to the game, so
/// without a path nothing is logged.
pub fn init(path: Option<&Path>, verbose: bool) -> Result<(), AppError> {
    let Some(path) = path else {
        return Ok(());
    };

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, File::create(path)?)?;
    Ok(())
}
