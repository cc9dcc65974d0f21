//! Idle/demo mode: a simple AI that plays the game
//!
//! Greedy: heads for the bonus block if there is one, otherwise the fruit,
//! and never steps onto its own body if another move exists.

use super::state::{Cell, Direction, GameState};

/// Signed shortest offset from `from` to `to` on an axis of length `n`
fn torus_delta(from: i32, to: i32, n: i32) -> i32 {
    let d = (to - from).rem_euclid(n);
    if d > n / 2 { d - n } else { d }
}

/// Shortest wrapped Manhattan distance
pub fn torus_distance(a: Cell, b: Cell, n: i32) -> i32 {
    torus_delta(a.x, b.x, n).abs() + torus_delta(a.y, b.y, n).abs()
}

/// Whether moving the head onto `cell` next tick is safe
fn is_safe(state: &GameState, cell: Cell) -> bool {
    let snake = &state.snake;
    let tail_moves = snake.growth_pending == 0;
    !snake
        .body
        .iter()
        .enumerate()
        .any(|(i, &c)| c == cell && !(i == 0 && tail_moves))
}

/// The cell the autopilot is heading for
pub fn target(state: &GameState) -> Cell {
    let head = state.snake.head();
    let n = state.grid_size();
    match &state.special {
        Some(special) => special
            .cells
            .iter()
            .copied()
            .min_by_key(|&c| torus_distance(head, c, n))
            .unwrap_or(state.fruit.cell),
        None => state.fruit.cell,
    }
}

/// Pick a direction for the next tick
pub fn choose_direction(state: &GameState) -> Direction {
    let snake = &state.snake;
    let head = snake.head();
    let n = state.grid_size();
    let goal = target(state);

    Direction::ALL
        .iter()
        .copied()
        .filter(|&d| d != snake.direction.opposite())
        .filter(|&d| is_safe(state, head.step(d, n)))
        .min_by_key(|&d| {
            // Prefer keeping course on ties to avoid wiggling
            let turn_penalty = i32::from(d != snake.direction);
            (torus_distance(head.step(d, n), goal, n), turn_penalty)
        })
        .unwrap_or(snake.direction)
}

/// Whether it is worth spending turbo now
pub fn wants_turbo(state: &GameState) -> bool {
    torus_distance(state.snake.head(), target(state), state.grid_size()) > 8
}
