use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::{GameConfig, GridSize};
use crate::error::SpawnError;
use crate::game::{FoodEvent, GameState, Simulator};
use crate::input::GameInput;
use crate::snake::DeathReason;

/// Single cancellable fixed-period schedule.
///
/// There is at most one pending due time; `start` replaces it and `stop`
/// clears it, so a restarted game can never see a stale tick.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Arms the ticker so the first tick fires one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true at most once per call when a tick is due and re-arms
    /// relative to the missed due time.
    ///
    /// A caller that fell several periods behind is re-anchored to `now`
    /// instead of receiving a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };

        if now < due {
            return false;
        }

        let next = due + self.period;
        self.next_due = Some(if next <= now { now + self.period } else { next });
        true
    }

    /// Time left before the next tick; `None` while stopped.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Died(DeathReason),
    BoardCleared,
}

/// Result of handling one input event.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Control {
    Continue,
    Quit,
}

/// Summary of one executed tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickReport {
    pub food: FoodEvent,
    pub outcome: Option<Outcome>,
}

/// One independent game session: simulator, live state, and its ticker.
///
/// Input handlers and the tick loop both go through this object; several
/// sessions can coexist without sharing anything.
#[derive(Debug)]
pub struct Session {
    simulator: Simulator,
    state: GameState,
    ticker: Ticker,
    outcome: Option<Outcome>,
    games_started: u64,
}

impl Session {
    /// Creates a session and starts its first game at `now`.
    ///
    /// A `seed` makes food placement reproducible.
    pub fn new(config: &GameConfig, seed: Option<u64>, now: Instant) -> Result<Self, SpawnError> {
        let mut simulator = match seed {
            Some(seed) => Simulator::with_seed(config, seed),
            None => Simulator::new(config),
        };
        let state = simulator.init_state()?;
        let mut session = Self {
            simulator,
            state,
            ticker: Ticker::new(config.tick_interval()),
            outcome: None,
            games_started: 1,
        };
        session.ticker.start(now);
        session.log_start();

        Ok(session)
    }

    /// Stops the current schedule, installs a fresh game, then re-arms.
    pub fn restart(&mut self, now: Instant) -> Result<(), SpawnError> {
        self.ticker.stop();
        self.state = self.simulator.init_state()?;
        self.outcome = None;
        self.games_started += 1;
        self.ticker.start(now);
        self.log_start();

        Ok(())
    }

    /// Routes one input event. Direction keys only touch the pending
    /// direction; they are ignored once the game has ended.
    pub fn handle_input(
        &mut self,
        input: GameInput,
        now: Instant,
    ) -> Result<Control, SpawnError> {
        match input {
            GameInput::Quit => return Ok(Control::Quit),
            GameInput::Restart => {
                info!("restart requested");
                self.restart(now)?;
            }
            GameInput::Key(key) => {
                if self.state.running && !self.state.apply_direction_input(key) {
                    debug!(
                        "discarded reversal {key:?} against committed {:?}",
                        self.state.direction
                    );
                }
            }
        }

        Ok(Control::Continue)
    }

    /// Runs a tick if the ticker is due at `now`.
    pub fn poll_tick(&mut self, now: Instant) -> Option<TickReport> {
        if !self.ticker.poll(now) {
            return None;
        }

        Some(self.advance())
    }

    /// Executes one tick and evaluates death afterwards.
    ///
    /// An ended game is left untouched; it only resumes through `restart`.
    pub fn advance(&mut self) -> TickReport {
        if !self.state.running {
            return TickReport {
                food: FoodEvent::None,
                outcome: self.outcome,
            };
        }

        let food = self.simulator.tick(&mut self.state);

        match food {
            FoodEvent::None => {}
            FoodEvent::Eaten { at } => {
                if let Some(next) = self.state.food {
                    debug!(
                        "food eaten at ({}, {}); next food at ({}, {})",
                        at.x, at.y, next.x, next.y
                    );
                }
            }
            FoodEvent::BoardFilled { .. } => {
                info!(
                    "board cleared: snake covers all {} cells",
                    self.state.snake.len()
                );
                self.finish(Outcome::BoardCleared);
            }
        }

        if self.outcome.is_none() {
            if let Some(reason) = self.state.snake.death_reason(self.bounds()) {
                info!(
                    "game over: {reason:?} at ({}, {}) with score {}",
                    self.state.snake.head().x,
                    self.state.snake.head().y,
                    self.score()
                );
                self.finish(Outcome::Died(reason));
            }
        }

        TickReport {
            food,
            outcome: self.outcome,
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state.running = false;
        self.outcome = Some(outcome);
        self.ticker.stop();
    }

    fn log_start(&self) {
        let bounds = self.bounds();
        info!(
            "game {} started on {}x{} grid, tick every {}ms",
            self.games_started,
            bounds.width,
            bounds.height,
            self.ticker.period().as_millis()
        );
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for scripted scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.simulator.score(&self.state)
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.simulator.bounds()
    }

    #[must_use]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    #[must_use]
    pub fn games_started(&self) -> u64 {
        self.games_started
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crossterm::event::KeyCode;

    use crate::config::GameConfig;
    use crate::game::FoodEvent;
    use crate::input::{Direction, GameInput};
    use crate::snake::{DeathReason, Position, Snake};

    use super::{Control, Outcome, Session, Ticker};

    const PERIOD: Duration = Duration::from_millis(75);

    fn session(seed: u64, now: Instant) -> Session {
        let config = GameConfig::new(100, 100, 75).expect("test config should validate");
        Session::new(&config, Some(seed), now).expect("session should start")
    }

    #[test]
    fn grid_and_period_come_from_the_one_config() {
        let start = Instant::now();
        let config = GameConfig::new(200, 120, 40).expect("test config should validate");

        let session = Session::new(&config, Some(9), start).expect("session should start");

        assert_eq!(session.bounds(), config.grid());
        assert_eq!(session.ticker().period(), Duration::from_millis(40));
        assert_eq!(session.state().snake.head(), Position::new(10, 6));
        assert_eq!(session.games_started(), 1);
    }

    #[test]
    fn same_seed_places_the_same_first_food() {
        let start = Instant::now();

        let first = session(17, start);
        let second = session(17, start);

        assert_eq!(first.state().food, second.state().food);
    }

    #[test]
    fn ticker_fires_once_per_period() {
        let start = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.start(start);

        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(74)));
        assert!(ticker.poll(start + PERIOD));
        assert!(!ticker.poll(start + PERIOD));
        assert!(ticker.poll(start + PERIOD * 2));
    }

    #[test]
    fn ticker_does_not_burst_after_a_stall() {
        let start = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.start(start);

        let late = start + PERIOD * 10;
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert_eq!(ticker.time_until_due(late), Some(PERIOD));
    }

    #[test]
    fn stopped_ticker_never_fires() {
        let start = Instant::now();
        let mut ticker = Ticker::new(PERIOD);
        ticker.start(start);
        ticker.stop();

        assert!(!ticker.is_running());
        assert!(!ticker.poll(start + PERIOD * 5));
        assert_eq!(ticker.time_until_due(start), None);
    }

    #[test]
    fn session_ticks_only_when_due() {
        let start = Instant::now();
        let mut session = session(1, start);
        session.state_mut().food = Some(Position::new(0, 0));

        assert_eq!(session.poll_tick(start), None);

        let report = session
            .poll_tick(start + PERIOD)
            .expect("tick should be due");
        assert_eq!(report.food, FoodEvent::None);
        assert_eq!(report.outcome, None);
        assert_eq!(session.state().snake.head(), Position::new(5, 4));
    }

    #[test]
    fn direction_input_applies_on_next_tick() {
        let start = Instant::now();
        let mut session = session(2, start);
        session.state_mut().food = Some(Position::new(0, 0));

        let control = session
            .handle_input(GameInput::Key(KeyCode::Right), start)
            .expect("input should be handled");
        assert_eq!(control, Control::Continue);
        assert_eq!(session.state().direction, Direction::Up);
        assert_eq!(session.state().pending_direction, Direction::Right);

        session.advance();
        assert_eq!(session.state().direction, Direction::Right);
        assert_eq!(session.state().snake.head(), Position::new(6, 5));
    }

    #[test]
    fn hitting_a_wall_ends_the_game_and_stops_ticking() {
        let start = Instant::now();
        let mut session = session(3, start);
        session.state_mut().snake = Snake::new(4, 0, 3);
        session.state_mut().food = Some(Position::new(9, 9));

        let report = session.advance();

        assert_eq!(
            report.outcome,
            Some(Outcome::Died(DeathReason::WallCollision))
        );
        assert!(!session.state().running);
        assert!(!session.ticker().is_running());
        assert_eq!(session.poll_tick(start + PERIOD * 3), None);

        let frozen = session.state().clone();
        session.advance();
        assert_eq!(session.state(), &frozen);
    }

    #[test]
    fn running_into_own_body_ends_the_game() {
        let start = Instant::now();
        let mut session = session(4, start);
        session.state_mut().snake = Snake::from_segments(vec![
            Position::new(2, 2),
            Position::new(3, 2),
            Position::new(3, 3),
            Position::new(2, 3),
            Position::new(1, 3),
        ]);
        session.state_mut().food = Some(Position::new(9, 9));
        session.state_mut().direction = Direction::Left;
        session.state_mut().pending_direction = Direction::Down;

        let report = session.advance();

        assert_eq!(
            report.outcome,
            Some(Outcome::Died(DeathReason::SelfCollision))
        );
    }

    #[test]
    fn taking_the_last_free_cell_clears_the_board() {
        let start = Instant::now();
        let config = GameConfig::new(10, 60, 75).expect("test config should validate");
        let mut session = Session::new(&config, Some(12), start).expect("session should start");
        session.state_mut().snake = Snake::new(0, 1, 5);
        session.state_mut().food = Some(Position::new(0, 0));

        let report = session.advance();

        assert_eq!(
            report.food,
            FoodEvent::BoardFilled {
                at: Position::new(0, 0)
            }
        );
        assert_eq!(report.outcome, Some(Outcome::BoardCleared));
        assert_eq!(session.state().snake.len(), 6);
        assert_eq!(session.state().snake.head(), Position::new(0, 0));
        assert_eq!(session.state().food, None);
        assert!(!session.state().running);
        assert!(!session.ticker().is_running());
        assert_eq!(session.poll_tick(start + PERIOD * 2), None);
    }

    #[test]
    fn restart_after_clearing_the_board_places_food_again() {
        let start = Instant::now();
        let config = GameConfig::new(10, 60, 75).expect("test config should validate");
        let mut session = Session::new(&config, Some(13), start).expect("session should start");
        session.state_mut().snake = Snake::new(0, 1, 5);
        session.state_mut().food = Some(Position::new(0, 0));
        session.advance();

        session.restart(start).expect("restart should succeed");

        let food = session.state().food.expect("fresh game should have food");
        assert!(!session.state().snake.collides_with(food));
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn input_after_game_over_is_ignored() {
        let start = Instant::now();
        let mut session = session(5, start);
        session.state_mut().snake = Snake::new(4, 0, 3);
        session.state_mut().food = Some(Position::new(9, 9));
        session.advance();

        session
            .handle_input(GameInput::Key(KeyCode::Left), start)
            .expect("input should be handled");

        assert_eq!(session.state().pending_direction, Direction::Up);
    }

    #[test]
    fn restart_installs_fresh_game_with_one_live_schedule() {
        let start = Instant::now();
        let mut session = session(6, start);
        session.state_mut().snake = Snake::new(4, 0, 3);
        session.state_mut().food = Some(Position::new(9, 9));
        session.advance();
        assert!(session.outcome().is_some());

        let later = start + PERIOD * 4;
        let control = session
            .handle_input(GameInput::Restart, later)
            .expect("restart should succeed");

        assert_eq!(control, Control::Continue);
        assert_eq!(session.outcome(), None);
        assert!(session.state().running);
        assert_eq!(session.state().snake.head(), Position::new(5, 5));
        assert_eq!(session.games_started(), 2);
        assert_eq!(session.ticker().time_until_due(later), Some(PERIOD));
        assert_eq!(session.poll_tick(later), None);
    }

    #[test]
    fn restart_mid_game_cancels_pending_tick() {
        let start = Instant::now();
        let mut session = session(7, start);

        let almost_due = start + Duration::from_millis(70);
        session.restart(almost_due).expect("restart should succeed");

        assert_eq!(session.poll_tick(start + PERIOD), None);
        assert!(session.poll_tick(almost_due + PERIOD).is_some());
    }

    #[test]
    fn quit_is_reported_to_the_caller() {
        let start = Instant::now();
        let mut session = session(8, start);

        assert_eq!(
            session.handle_input(GameInput::Quit, start),
            Ok(Control::Quit)
        );
    }

    #[test]
    fn sessions_are_independent() {
        let start = Instant::now();
        let mut first = session(9, start);
        let second = session(9, start);
        first.state_mut().food = Some(Position::new(0, 0));

        first.advance();

        assert_eq!(first.state().snake.head(), Position::new(5, 4));
        assert_eq!(second.state().snake.head(), Position::new(5, 5));
    }

    #[test]
    fn score_counts_segments_over_start_length() {
        let start = Instant::now();
        let mut session = session(10, start);
        session.state_mut().food = Some(Position::new(5, 4));

        session.advance();

        assert_eq!(session.score(), 1);
    }
}
