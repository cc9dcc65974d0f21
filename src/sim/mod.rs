//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Randomness and time come in as arguments
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod rng;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use rng::{RandomSource, seeded};
pub use snapshot::Snapshot;
pub use spawn::{random_free_cell, roll_fruit, roll_fruit_kind, spawn_special};
pub use state::{
    Cell, Direction, Fruit, FruitKind, GamePhase, GameState, SimEvent, Snake, Special, Turbo,
    TurboGauge,
};
pub use tick::{new_game, reset, step};
