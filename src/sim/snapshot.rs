//! Read-only view of the game for renderers

use serde::{Deserialize, Serialize};

use super::state::{Cell, FruitKind, GamePhase, GameState, TurboGauge};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid_size: i32,
    /// Tail first, head last
    pub snake: Vec<Cell>,
    pub fruit: Cell,
    pub fruit_kind: FruitKind,
    /// Empty when no bonus is active
    pub special: Vec<Cell>,
    pub special_active: bool,
    pub score: u32,
    pub turbo_active: bool,
    pub turbo_since_ms: Option<f64>,
    pub turbo_gauge: TurboGauge,
    pub glowing: bool,
    pub phase: GamePhase,
}

impl Snapshot {
    pub fn capture(state: &GameState, phase: GamePhase, now_ms: f64) -> Self {
        let special: Vec<Cell> = state
            .special
            .as_ref()
            .map(|s| s.cells.to_vec())
            .unwrap_or_default();
        Self {
            grid_size: state.grid_size(),
            snake: state.snake.body.iter().copied().collect(),
            fruit: state.fruit.cell,
            fruit_kind: state.fruit.kind,
            special_active: !special.is_empty(),
            special,
            score: state.score,
            turbo_active: state.turbo.active,
            turbo_since_ms: state.turbo.since_activation(now_ms),
            turbo_gauge: state.turbo.gauge(now_ms),
            glowing: state.is_glowing(now_ms),
            phase,
        }
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::seeded;
    use crate::sim::state::Special;
    use crate::sim::tick::new_game;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture() {
        let mut rng = seeded(11);
        let mut state = new_game(&Tuning::default(), &mut rng);
        state.special = Some(Special::at(Cell::new(1, 1), 0.0, 5000.0));
        state.score = 42;
        state.turbo.try_activate(100.0);

        let snap = Snapshot::capture(&state, GamePhase::Playing, 400.0);
        assert_eq!(snap.grid_size, 32);
        assert_eq!(snap.head(), Some(Cell::new(16, 16)));
        assert_eq!(snap.snake.len(), 3);
        assert!(snap.special_active);
        assert_eq!(snap.special.len(), 4);
        assert_eq!(snap.score, 42);
        assert!(snap.turbo_active);
        assert_eq!(snap.turbo_since_ms, Some(300.0));
        assert!(!snap.glowing);
        assert_eq!(snap.phase, GamePhase::Playing);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut rng = seeded(11);
        let state = new_game(&Tuning::default(), &mut rng);
        let snap = Snapshot::capture(&state, GamePhase::Menu, 0.0);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"special_active\":false"));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
