//! Browser bindings (wasm32 only)
//!
//! JS owns the canvas and the `requestAnimationFrame` loop; it forwards key
//! names here, calls `frame()` once per animation frame and draws from the
//! JSON snapshot.

use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;

use crate::game::{Game, GameEvent};
use crate::input::map_key;
use crate::nickname::Nickname;
use crate::persistence::{self, LocalStorageStore};
use crate::platform::BrowserClock;
use crate::sim::{autopilot, seeded};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("snake32 starting...");
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    game: Game<BrowserClock, Pcg32>,
    store: LocalStorageStore,
    demo: bool,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebGame {
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            game: Game::new(Tuning::default(), BrowserClock, seeded(u64::from(seed))),
            store: LocalStorageStore::default(),
            demo: false,
        }
    }

    /// Set the nickname; returns false if it is blank or too long
    pub fn set_nickname(&mut self, name: &str) -> bool {
        match Nickname::parse(name) {
            Some(nick) => {
                self.game.set_player(Some(nick));
                true
            }
            None => false,
        }
    }

    pub fn has_nickname(&self) -> bool {
        self.game.player().is_some()
    }

    /// Forward a `KeyboardEvent.key`; returns whether it was consumed
    pub fn key_down(&mut self, key: &str) -> bool {
        let consumed = match map_key(key, self.game.phase()) {
            Some(command) => self.game.handle(command),
            None => false,
        };
        self.persist_records();
        consumed
    }

    /// Let the autopilot drive
    pub fn set_demo(&mut self, on: bool) {
        self.demo = on;
        log::info!("Demo mode: {}", on);
    }

    /// Run due ticks; returns how many ran
    pub fn frame(&mut self) -> u32 {
        if self.demo {
            let dir = autopilot::choose_direction(self.game.state());
            self.game.handle(crate::input::Command::Steer(dir));
        }
        let steps = self.game.frame();
        self.persist_records();
        steps
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }

    /// The displayed slice of the leaderboard as JSON
    pub fn leaderboard_json(&self) -> String {
        let scores = persistence::load_or_empty(&self.store);
        serde_json::to_string(scores.displayed()).unwrap_or_default()
    }

    fn persist_records(&mut self) {
        for event in self.game.drain_events() {
            if let GameEvent::ScoreRecorded(record) = event {
                if let Err(e) = persistence::record_score(&mut self.store, record) {
                    log::warn!("Score not saved: {}", e);
                }
            }
        }
    }
}
