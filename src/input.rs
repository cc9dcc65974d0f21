//! Input commands and keymap
//!
//! Hosts translate their own events into [`Command`]s. [`map_key`] covers the
//! usual keyboard layout using DOM-style key names.

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, GamePhase};

/// A discrete player intent, applied immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Begin a new game from the menu
    Start,
    Steer(Direction),
    Turbo,
    /// Record the current game and start over
    Restart,
    /// Record the current game and go back to the menu
    MenuReturn,
}

/// Map a key name (`"w"`, `"ArrowUp"`, `"Shift"`, ...) to a command.
///
/// Menu navigation keys beyond starting a game belong to the host's menu.
pub fn map_key(key: &str, phase: GamePhase) -> Option<Command> {
    match phase {
        GamePhase::Playing => match key {
            "Escape" | "Enter" => Some(Command::MenuReturn),
            "Shift" => Some(Command::Turbo),
            "ArrowUp" => Some(Command::Steer(Direction::Up)),
            "ArrowDown" => Some(Command::Steer(Direction::Down)),
            "ArrowLeft" => Some(Command::Steer(Direction::Left)),
            "ArrowRight" => Some(Command::Steer(Direction::Right)),
            k if k.eq_ignore_ascii_case("w") => Some(Command::Steer(Direction::Up)),
            k if k.eq_ignore_ascii_case("s") => Some(Command::Steer(Direction::Down)),
            k if k.eq_ignore_ascii_case("a") => Some(Command::Steer(Direction::Left)),
            k if k.eq_ignore_ascii_case("d") => Some(Command::Steer(Direction::Right)),
            k if k.eq_ignore_ascii_case("r") => Some(Command::Restart),
            _ => None,
        },
        GamePhase::Menu | GamePhase::GameOver => match key {
            "Enter" | " " => Some(Command::Start),
            _ => None,
        },
    }
}
