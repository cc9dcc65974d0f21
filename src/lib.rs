//! snake32 - A wrapped-grid snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring, spawning)
//! - `game`: Menu/playing state machine and fixed-step driver
//! - `input`: Player commands and keymap
//! - `highscores` / `persistence`: Leaderboard and its storage backends
//! - `platform`: Clocks and browser bindings
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod highscores;
pub mod input;
pub mod nickname;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use game::{Game, GameEvent, GamePhase};
pub use highscores::{HighScores, ScoreRecord};
pub use input::Command;
pub use nickname::{Nickname, NicknameEntry};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Board is GRID_SIZE x GRID_SIZE cells
    pub const GRID_SIZE: i32 = 32;
    /// Upper bound accepted from tuning files
    pub const MAX_GRID_SIZE: i32 = 1024;
    /// Base simulation rate
    pub const TICK_RATE_HZ: f64 = 12.0;

    /// Turbo shortens the tick period by this factor
    pub const TURBO_MULTIPLIER: f64 = 0.45;
    pub const TURBO_DURATION_MS: f64 = 1200.0;
    pub const TURBO_COOLDOWN_MS: f64 = 12_000.0;

    /// Bonus block
    pub const SPECIAL_POINTS: u32 = 10;
    pub const SPECIAL_DURATION_MS: f64 = 5000.0;
    pub const SPECIAL_SPAWN_CHANCE: f64 = 0.025;
    pub const SPECIAL_PLACEMENT_ATTEMPTS: u32 = 100;
    /// Snake glow after eating the bonus
    pub const GLOW_DURATION_MS: f64 = 2000.0;

    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator
    pub const MAX_FRAME_MS: f64 = 250.0;
}

/// Wrap a coordinate onto `[0, n)`
#[inline]
pub fn wrap_coord(v: i32, n: i32) -> i32 {
    v.rem_euclid(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_coord() {
        assert_eq!(wrap_coord(32, 32), 0);
        assert_eq!(wrap_coord(-1, 32), 31);
        assert_eq!(wrap_coord(17, 32), 17);
    }
}
