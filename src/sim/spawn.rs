//! Fruit and bonus placement

use super::rng::{RandomSource, below};
use super::state::{Cell, Fruit, FruitKind, GameState, SimEvent, Snake, Special};

/// Weighted draw over [`FruitKind::ALL`].
///
/// Draws `r` in `[0, total)` and subtracts each weight in table order until
/// the remainder is `<= 0`.
pub fn roll_fruit_kind(rng: &mut impl RandomSource) -> FruitKind {
    let mut r = rng.next_f64() * FruitKind::total_weight() as f64;
    for kind in FruitKind::ALL {
        r -= kind.weight() as f64;
        if r <= 0.0 {
            return kind;
        }
    }
    FruitKind::ALL[0]
}

/// Rejection-sample a cell the snake does not occupy.
///
/// Loops forever on a completely full board; a 32x32 board is never filled
/// in practice.
pub fn random_free_cell(rng: &mut impl RandomSource, snake: &Snake, n: i32) -> Cell {
    loop {
        let x = below(rng, n);
        let y = below(rng, n);
        let cell = Cell::new(x, y);
        if !snake.occupies(cell) {
            return cell;
        }
    }
}

/// Replace the active fruit with a freshly rolled one
pub fn roll_fruit(state: &mut GameState, rng: &mut impl RandomSource) {
    let kind = roll_fruit_kind(rng);
    let cell = random_free_cell(rng, &state.snake, state.grid_size());
    state.fruit = Fruit { cell, kind };
}

/// Try to place a 2x2 bonus block at a random snake-free spot.
///
/// Does nothing if a bonus is already active. Gives up silently after the
/// configured number of attempts. Returns whether a block was placed.
pub fn spawn_special(state: &mut GameState, rng: &mut impl RandomSource, now_ms: f64) -> bool {
    if state.special.is_some() {
        return false;
    }
    // Top-left stays within [0, N-2] so the block never wraps
    let span = state.grid_size() - 1;
    for _ in 0..state.tuning.special_placement_attempts {
        let origin = Cell::new(below(rng, span), below(rng, span));
        let cells = Special::footprint(origin);
        if cells.iter().any(|&c| state.snake.occupies(c)) {
            continue;
        }
        state.special = Some(Special::at(
            origin,
            now_ms,
            state.tuning.special_duration_ms,
        ));
        state.events.push(SimEvent::SpecialSpawned { origin });
        log::debug!("Bonus spawned at ({}, {})", origin.x, origin.y);
        return true;
    }
    log::debug!("No room for bonus this time");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::seeded;
    use crate::sim::rng::testing::{Scripted, cell_draw};
    use crate::sim::tick::new_game;
    use crate::tuning::Tuning;

    #[test]
    fn test_roll_fruit_kind_boundaries() {
        // r = draw * 100; boundaries at 50, 80, 95, 99
        let cases = [
            (0.0, FruitKind::Apple),
            (0.50, FruitKind::Apple),
            (0.505, FruitKind::Orange),
            (0.79, FruitKind::Orange),
            (0.81, FruitKind::Banana),
            (0.96, FruitKind::Berry),
            (0.995, FruitKind::Starfruit),
        ];
        for (draw, expected) in cases {
            let mut rng = Scripted::new(&[draw]);
            assert_eq!(roll_fruit_kind(&mut rng), expected, "draw {draw}");
        }
    }

    #[test]
    fn test_weighted_draw_converges() {
        let mut rng = seeded(2024);
        let draws = 100_000;
        let mut counts = [0u32; 5];
        for _ in 0..draws {
            let kind = roll_fruit_kind(&mut rng);
            let idx = FruitKind::ALL.iter().position(|&k| k == kind).unwrap();
            counts[idx] += 1;
        }
        for (kind, count) in FruitKind::ALL.iter().zip(counts) {
            let observed = count as f64 / draws as f64;
            let expected = kind.weight() as f64 / FruitKind::total_weight() as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "{}: observed {observed}, expected {expected}",
                kind.name()
            );
        }
    }

    #[test]
    fn test_random_free_cell_rejects_snake() {
        let snake = Snake::new(Cell::new(16, 16));
        // First sample hits the head, second is free
        let mut rng = Scripted::new(&[
            cell_draw(16, 32),
            cell_draw(16, 32),
            cell_draw(3, 32),
            cell_draw(4, 32),
        ]);
        assert_eq!(random_free_cell(&mut rng, &snake, 32), Cell::new(3, 4));
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_spawn_special_skips_snake() {
        let mut rng = seeded(1);
        let mut state = new_game(&Tuning::default(), &mut rng);
        // Origin (14, 15) overlaps the snake at (14, 16); (2, 3) is free
        let mut rng = Scripted::new(&[
            cell_draw(14, 31),
            cell_draw(15, 31),
            cell_draw(2, 31),
            cell_draw(3, 31),
        ]);
        assert!(spawn_special(&mut state, &mut rng, 500.0));
        let special = state.special.as_ref().unwrap();
        assert_eq!(special.cells[0], Cell::new(2, 3));
        assert_eq!(special.expires_at_ms, 5500.0);
        assert_eq!(
            state.drain_events(),
            vec![SimEvent::SpecialSpawned {
                origin: Cell::new(2, 3)
            }]
        );
    }

    #[test]
    fn test_spawn_special_gives_up() {
        let mut rng = seeded(1);
        let mut state = new_game(&Tuning::default(), &mut rng);
        // Every attempt lands on the snake
        let mut rng = Scripted::new(&[cell_draw(15, 31), cell_draw(15, 31)]);
        assert!(!spawn_special(&mut state, &mut rng, 0.0));
        assert!(state.special.is_none());
    }

    #[test]
    fn test_spawn_special_noop_when_active() {
        let mut rng = seeded(1);
        let mut state = new_game(&Tuning::default(), &mut rng);
        state.special = Some(Special::at(Cell::new(0, 0), 0.0, 5000.0));
        assert!(!spawn_special(&mut state, &mut rng, 10.0));
        assert_eq!(state.special.as_ref().unwrap().cells[0], Cell::new(0, 0));
    }
}
