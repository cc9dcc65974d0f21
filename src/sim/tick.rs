//! Fixed timestep simulation tick
//!
//! One call to [`step`] moves the snake exactly one cell.

use super::rng::RandomSource;
use super::spawn::{roll_fruit, spawn_special};
use super::state::{Cell, Fruit, FruitKind, GameState, SimEvent, Snake, Turbo};
use crate::tuning::Tuning;

/// Build a fresh game: centered length-3 snake moving right, new fruit
pub fn new_game(tuning: &Tuning, rng: &mut impl RandomSource) -> GameState {
    let center = tuning.grid_size / 2;
    let mut state = GameState {
        tuning: tuning.clone(),
        snake: Snake::new(Cell::new(center, center)),
        // Placeholder, replaced by roll_fruit below
        fruit: Fruit {
            cell: Cell::new(0, 0),
            kind: FruitKind::Apple,
        },
        special: None,
        score: 0,
        glow_until_ms: 0.0,
        turbo: Turbo::new(tuning),
        ticks: 0,
        events: Vec::new(),
    };
    roll_fruit(&mut state, rng);
    state
}

/// Reset `state` in place for a new game with the same tuning.
///
/// Turbo timing carries over, so restarting never skips the cooldown.
pub fn reset(state: &mut GameState, rng: &mut impl RandomSource) {
    let turbo = state.turbo.clone();
    *state = new_game(&state.tuning, rng);
    state.turbo = turbo;
}

/// Advance the game by one tick.
///
/// Returns `true` when the snake ran into itself. In that case the state is
/// left exactly as it was at the moment of collision.
pub fn step(state: &mut GameState, rng: &mut impl RandomSource, now_ms: f64) -> bool {
    let n = state.grid_size();
    state.ticks += 1;

    // Commit the buffered direction
    let snake = &mut state.snake;
    snake.direction = snake.pending;

    let head = snake.head().step(snake.direction, n);
    snake.body.push_back(head);
    if snake.growth_pending > 0 {
        snake.growth_pending -= 1;
    } else {
        snake.body.pop_front();
    }

    if snake.hits_self() {
        state.events.push(SimEvent::SelfCollision { at: head });
        log::debug!("Self collision at ({}, {})", head.x, head.y);
        return true;
    }

    // Bonus block takes priority and ends the tick
    if state.special.as_ref().is_some_and(|s| s.contains(head)) {
        let points = state.tuning.special_points;
        state.score += points;
        state.snake.growth_pending += points;
        state.special = None;
        state.glow_until_ms = now_ms + state.tuning.glow_duration_ms;
        state.events.push(SimEvent::SpecialEaten { points });
        roll_fruit(state, rng);
        return false;
    }

    if head == state.fruit.cell {
        let kind = state.fruit.kind;
        state.score += kind.points();
        state.snake.growth_pending += kind.points();
        state.events.push(SimEvent::FruitEaten { kind });
        roll_fruit(state, rng);
        if state.special.is_none() && rng.next_f64() < state.tuning.special_spawn_chance {
            spawn_special(state, rng, now_ms);
        }
    }

    if state.special.as_ref().is_some_and(|s| s.is_expired(now_ms)) {
        state.special = None;
        state.events.push(SimEvent::SpecialExpired);
    }

    false
}
