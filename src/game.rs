//! Game driver
//!
//! Wraps a [`GameState`] with the menu/playing state machine, a fixed-step
//! accumulator and an event queue. Hosts feed it commands and frame times,
//! then draw [`Game::snapshot`].

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};
use crate::highscores::ScoreRecord;
use crate::input::Command;
use crate::nickname::Nickname;
use crate::platform::Clock;
use crate::sim::{self, GameState, RandomSource, SimEvent, Snapshot};
use crate::tuning::Tuning;

pub use crate::sim::GamePhase;

/// Something the host may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Sim(SimEvent),
    TurboActivated,
    TurboEnded,
    /// A finished game's score, to hand to a [`crate::persistence::ScoreStore`]
    ScoreRecorded(ScoreRecord),
    /// The snake ran into itself
    GameOver { score: u32 },
}

/// A playable game session
pub struct Game<C: Clock, R: RandomSource> {
    state: GameState,
    phase: GamePhase,
    player: Option<Nickname>,
    clock: C,
    rng: R,
    accumulator_ms: f64,
    last_frame_ms: Option<f64>,
    events: Vec<GameEvent>,
}

impl<C: Clock, R: RandomSource> Game<C, R> {
    /// New session sitting in the menu with a freshly reset board
    pub fn new(tuning: Tuning, clock: C, mut rng: R) -> Self {
        let state = sim::new_game(&tuning, &mut rng);
        Self {
            state,
            phase: GamePhase::Menu,
            player: None,
            clock,
            rng,
            accumulator_ms: 0.0,
            last_frame_ms: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts that script positions (tests, demos)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn player(&self) -> Option<&Nickname> {
        self.player.as_ref()
    }

    /// Name attached to score records from now on
    pub fn set_player(&mut self, player: Option<Nickname>) {
        self.player = player;
    }

    /// Apply a command. Returns whether it had any effect.
    pub fn handle(&mut self, command: Command) -> bool {
        let now = self.clock.now_ms();
        match (self.phase, command) {
            (GamePhase::Menu, Command::Start) => {
                self.start();
                true
            }
            (GamePhase::Playing, Command::Steer(dir)) => self.state.snake.steer(dir),
            (GamePhase::Playing, Command::Turbo) => {
                let activated = self.state.turbo.try_activate(now);
                if activated {
                    log::debug!("Turbo on");
                    self.events.push(GameEvent::TurboActivated);
                }
                activated
            }
            (GamePhase::Playing, Command::Restart) => {
                self.record_score();
                self.start();
                true
            }
            (GamePhase::Playing, Command::MenuReturn) => {
                self.record_score();
                self.phase = GamePhase::Menu;
                log::info!("Returned to menu");
                true
            }
            _ => false,
        }
    }

    fn start(&mut self) {
        sim::reset(&mut self.state, &mut self.rng);
        self.phase = GamePhase::Playing;
        self.accumulator_ms = 0.0;
        self.events.push(GameEvent::Started);
        log::info!(
            "Game started ({})",
            self.player.as_ref().map_or("anonymous", |p| p.as_str())
        );
    }

    fn record_score(&mut self) {
        let record = ScoreRecord::new(
            self.state.score,
            self.player.as_ref().map(|p| p.to_string()),
            self.clock.unix_ms(),
        );
        self.events.push(GameEvent::ScoreRecorded(record));
    }

    /// Read the clock and advance by the time since the previous frame
    pub fn frame(&mut self) -> u32 {
        let now = self.clock.now_ms();
        let delta = self.last_frame_ms.map_or(0.0, |last| now - last);
        self.last_frame_ms = Some(now);
        self.advance(delta)
    }

    /// Advance by `delta_ms` of elapsed time. Returns the number of ticks run.
    ///
    /// Turbo expiry is checked on every call, whether or not a tick is due.
    pub fn advance(&mut self, delta_ms: f64) -> u32 {
        let now = self.clock.now_ms();
        if self.state.turbo.poll(now) {
            log::debug!("Turbo off");
            self.events.push(GameEvent::TurboEnded);
        }

        if self.phase != GamePhase::Playing {
            return 0;
        }

        self.accumulator_ms = (self.accumulator_ms + delta_ms.max(0.0)).min(MAX_FRAME_MS);

        let mut steps = 0;
        while steps < MAX_SUBSTEPS {
            let interval = self.state.tick_interval_ms();
            if self.accumulator_ms < interval {
                break;
            }
            self.accumulator_ms -= interval;
            steps += 1;

            let over = sim::step(&mut self.state, &mut self.rng, now);
            self.events
                .extend(self.state.drain_events().into_iter().map(GameEvent::Sim));
            if over {
                self.finish();
                break;
            }
        }
        steps
    }

    fn finish(&mut self) {
        self.phase = GamePhase::GameOver;
        let score = self.state.score;
        log::info!("Game over with score {}", score);
        self.events.push(GameEvent::GameOver { score });
        self.record_score();
        self.accumulator_ms = 0.0;
        self.phase = GamePhase::Menu;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.phase, self.clock.now_ms())
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
