use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use grid_snake::config::{
    DEFAULT_PIXEL_HEIGHT, DEFAULT_PIXEL_WIDTH, DEFAULT_TICK_INTERVAL_MS, GameConfig,
};
use grid_snake::error::AppError;
use grid_snake::input::translate_key_event;
use grid_snake::logging;
use grid_snake::renderer;
use grid_snake::session::{Control, Session};
use grid_snake::terminal_runtime::TerminalSession;
use log::{error, info};

/// Longest wait for input while no tick is scheduled (after game over).
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in pixel units; must be a multiple of 10.
    #[arg(long, default_value_t = DEFAULT_PIXEL_WIDTH)]
    width: u32,

    /// Board height in pixel units; must be a multiple of 10.
    #[arg(long, default_value_t = DEFAULT_PIXEL_HEIGHT)]
    height: u32,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Write log output to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Include debug-level events in the log file.
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    // Validate before touching the terminal so errors stay readable.
    let config = GameConfig::new(cli.width, cli.height, cli.tick_ms)?;
    logging::init(cli.log_file.as_deref(), cli.verbose)?;

    let mut session = Session::new(&config, cli.seed, Instant::now())?;

    let mut terminal_session = TerminalSession::enter()?;
    game_loop(&mut terminal_session, &mut session)?;

    info!("exiting after {} game(s)", session.games_started());
    Ok(())
}

fn game_loop(
    terminal_session: &mut TerminalSession,
    session: &mut Session,
) -> Result<(), AppError> {
    loop {
        terminal_session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, session))?;

        let timeout = session
            .ticker()
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL_INTERVAL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let control =
                        session.handle_input(translate_key_event(key), Instant::now())?;
                    if control == Control::Quit {
                        return Ok(());
                    }
                }
            }
        }

        session.poll_tick(Instant::now());
    }
}
