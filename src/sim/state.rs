//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; there is no
//! module-level mutable state.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::wrap_coord;

/// Top-level phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle: nothing ticks
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; only observable while the final record is emitted
    GameOver,
}

/// A grid cell (x grows right, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in `dir` on an `n`×`n` torus
    pub fn step(self, dir: Direction, n: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: wrap_coord(self.x + dx, n),
            y: wrap_coord(self.y + dy, n),
        }
    }
}

/// Movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Fruit types, rarer ones worth more
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Orange,
    Banana,
    Berry,
    Starfruit,
}

impl FruitKind {
    /// Draw table, in draw order
    pub const ALL: [FruitKind; 5] = [
        FruitKind::Apple,
        FruitKind::Orange,
        FruitKind::Banana,
        FruitKind::Berry,
        FruitKind::Starfruit,
    ];

    pub fn points(self) -> u32 {
        match self {
            FruitKind::Apple => 1,
            FruitKind::Orange => 2,
            FruitKind::Banana => 3,
            FruitKind::Berry => 4,
            FruitKind::Starfruit => 5,
        }
    }

    /// Relative draw weight
    pub fn weight(self) -> u32 {
        match self {
            FruitKind::Apple => 50,
            FruitKind::Orange => 30,
            FruitKind::Banana => 15,
            FruitKind::Berry => 4,
            FruitKind::Starfruit => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FruitKind::Apple => "Apple",
            FruitKind::Orange => "Orange",
            FruitKind::Banana => "Banana",
            FruitKind::Berry => "Berry",
            FruitKind::Starfruit => "Starfruit",
        }
    }

    /// Sum of all weights in the table
    pub fn total_weight() -> u32 {
        Self::ALL.iter().map(|k| k.weight()).sum()
    }
}

/// The active fruit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fruit {
    pub cell: Cell,
    pub kind: FruitKind,
}

/// A 2x2 bonus block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Special {
    /// Top-left, top-right, bottom-left, bottom-right
    pub cells: [Cell; 4],
    pub spawned_at_ms: f64,
    pub expires_at_ms: f64,
}

impl Special {
    /// Block whose top-left corner is `origin`
    pub fn at(origin: Cell, now_ms: f64, duration_ms: f64) -> Self {
        Self {
            cells: Self::footprint(origin),
            spawned_at_ms: now_ms,
            expires_at_ms: now_ms + duration_ms,
        }
    }

    pub fn footprint(origin: Cell) -> [Cell; 4] {
        [
            origin,
            Cell::new(origin.x + 1, origin.y),
            Cell::new(origin.x, origin.y + 1),
            Cell::new(origin.x + 1, origin.y + 1),
        ]
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// The snake body, tail first and head last
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    pub body: VecDeque<Cell>,
    /// Direction used by the last tick
    pub direction: Direction,
    /// Direction the next tick will commit
    pub pending: Direction,
    /// Segments still to be added, one per tick
    pub growth_pending: u32,
}

impl Snake {
    /// Horizontal snake of length 3 ending at `head`, moving right
    pub fn new(head: Cell) -> Self {
        let body = (0..3)
            .rev()
            .map(|i| Cell::new(head.x - i, head.y))
            .collect();
        Self {
            body,
            direction: Direction::Right,
            pending: Direction::Right,
            growth_pending: 0,
        }
    }

    pub fn head(&self) -> Cell {
        // A snake is never shorter than its starting length
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Request a direction for the next tick.
    ///
    /// Returns `false` and leaves `pending` untouched when `dir` reverses the
    /// committed direction.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir == self.direction.opposite() {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Whether the head shares a cell with any other segment
    pub fn hits_self(&self) -> bool {
        let head = self.head();
        self.body.iter().take(self.body.len() - 1).any(|&c| c == head)
    }
}

/// Turbo speed boost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turbo {
    pub active: bool,
    /// Monotonic time of the last activation, `None` if never used
    pub last_activated_ms: Option<f64>,
    pub duration_ms: f64,
    pub cooldown_ms: f64,
}

/// Turbo meter state for HUD display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TurboGauge {
    /// Running; fraction of the duration left (1 → 0)
    Active { remaining: f64 },
    /// Cooling down; fraction of the cooldown elapsed (0 → 1)
    Charging { progress: f64 },
    Ready,
}

impl Turbo {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            active: false,
            last_activated_ms: None,
            duration_ms: tuning.turbo_duration_ms,
            cooldown_ms: tuning.turbo_cooldown_ms,
        }
    }

    /// Time since the last activation
    pub fn since_activation(&self, now_ms: f64) -> Option<f64> {
        self.last_activated_ms.map(|t| now_ms - t)
    }

    /// Whether an activation request would succeed at `now_ms`
    pub fn can_activate(&self, now_ms: f64) -> bool {
        !self.active
            && self
                .since_activation(now_ms)
                .is_none_or(|since| since >= self.cooldown_ms)
    }

    /// Activate if allowed; returns whether it took effect
    pub fn try_activate(&mut self, now_ms: f64) -> bool {
        if !self.can_activate(now_ms) {
            return false;
        }
        self.active = true;
        self.last_activated_ms = Some(now_ms);
        true
    }

    /// Turn off once the duration has elapsed. Idempotent; returns `true`
    /// only on the call that switched it off.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if !self.active {
            return false;
        }
        match self.since_activation(now_ms) {
            Some(since) if since >= self.duration_ms => {
                self.active = false;
                true
            }
            _ => false,
        }
    }

    pub fn gauge(&self, now_ms: f64) -> TurboGauge {
        let Some(since) = self.since_activation(now_ms) else {
            return TurboGauge::Ready;
        };
        if self.active {
            let remaining = if self.duration_ms > 0.0 {
                (1.0 - since / self.duration_ms).clamp(0.0, 1.0)
            } else {
                0.0
            };
            TurboGauge::Active { remaining }
        } else if since < self.cooldown_ms {
            TurboGauge::Charging {
                progress: (since / self.cooldown_ms).clamp(0.0, 1.0),
            }
        } else {
            TurboGauge::Ready
        }
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    FruitEaten { kind: FruitKind },
    SpecialEaten { points: u32 },
    SpecialSpawned { origin: Cell },
    SpecialExpired,
    SelfCollision { at: Cell },
}

/// Complete simulation state for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub snake: Snake,
    pub fruit: Fruit,
    pub special: Option<Special>,
    pub score: u32,
    /// Glow effect after eating the bonus ends at this time
    pub glow_until_ms: f64,
    pub turbo: Turbo,
    /// Ticks executed since reset
    pub ticks: u64,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<SimEvent>,
}

impl GameState {
    pub fn grid_size(&self) -> i32 {
        self.tuning.grid_size
    }

    pub fn is_glowing(&self, now_ms: f64) -> bool {
        now_ms < self.glow_until_ms
    }

    /// Current tick period, accounting for turbo
    pub fn tick_interval_ms(&self) -> f64 {
        self.tuning.tick_interval_ms(self.turbo.active)
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_new_layout() {
        let snake = Snake::new(Cell::new(16, 16));
        let cells: Vec<Cell> = snake.body.iter().copied().collect();
        assert_eq!(
            cells,
            vec![Cell::new(14, 16), Cell::new(15, 16), Cell::new(16, 16)]
        );
        assert_eq!(snake.head(), Cell::new(16, 16));
        assert_eq!(snake.direction, Direction::Right);
    }

    #[test]
    fn test_steer_rejects_reversal() {
        let mut snake = Snake::new(Cell::new(16, 16));
        assert!(!snake.steer(Direction::Left));
        assert_eq!(snake.pending, Direction::Right);
        assert!(snake.steer(Direction::Right));
        assert!(snake.steer(Direction::Up));
        assert_eq!(snake.pending, Direction::Up);
        // Guard is against the committed direction, not the pending one
        assert!(snake.steer(Direction::Down));
        assert!(!snake.steer(Direction::Left));
        assert_eq!(snake.pending, Direction::Down);
    }

    #[test]
    fn test_cell_step_wraps() {
        assert_eq!(Cell::new(31, 5).step(Direction::Right, 32), Cell::new(0, 5));
        assert_eq!(Cell::new(0, 5).step(Direction::Left, 32), Cell::new(31, 5));
        assert_eq!(Cell::new(3, 0).step(Direction::Up, 32), Cell::new(3, 31));
        assert_eq!(Cell::new(3, 31).step(Direction::Down, 32), Cell::new(3, 0));
    }

    #[test]
    fn test_fruit_table() {
        assert_eq!(FruitKind::total_weight(), 100);
        let points: Vec<u32> = FruitKind::ALL.iter().map(|k| k.points()).collect();
        assert_eq!(points, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_turbo_cooldown() {
        let mut turbo = Turbo::new(&Tuning::default());
        assert_eq!(turbo.gauge(0.0), TurboGauge::Ready);
        assert!(turbo.try_activate(1000.0));
        assert!(turbo.active);
        // Already active
        assert!(!turbo.try_activate(1100.0));

        assert!(!turbo.poll(2199.0));
        assert!(turbo.poll(2200.0));
        assert!(!turbo.poll(2300.0));
        assert!(!turbo.active);

        // Cooldown counts from activation
        assert!(!turbo.try_activate(12_999.0));
        assert!(!turbo.active);
        assert!(matches!(turbo.gauge(7000.0), TurboGauge::Charging { .. }));
        assert!(turbo.try_activate(13_000.0));
    }

    #[test]
    fn test_turbo_gauge_active_remaining() {
        let mut turbo = Turbo::new(&Tuning::default());
        turbo.try_activate(0.0);
        match turbo.gauge(600.0) {
            TurboGauge::Active { remaining } => assert!((remaining - 0.5).abs() < 1e-9),
            other => panic!("unexpected gauge {other:?}"),
        }
    }

    #[test]
    fn test_special_footprint_and_expiry() {
        let special = Special::at(Cell::new(4, 7), 100.0, 5000.0);
        assert!(special.contains(Cell::new(5, 8)));
        assert!(!special.contains(Cell::new(6, 8)));
        assert!(!special.is_expired(5099.0));
        assert!(special.is_expired(5100.0));
    }
}
