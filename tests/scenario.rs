use snake32::persistence::{self, FileStore, MemoryStore, ScoreStore};
use snake32::platform::ManualClock;
use snake32::sim::{Cell, Direction, Special, autopilot, seeded};
use snake32::{Command, Game, GameEvent, GamePhase, Nickname, ScoreRecord, Tuning};

const TICK: f64 = 1000.0 / 12.0;
const EPOCH: f64 = 1_700_000_000_000.0;

type TestGame = Game<ManualClock, rand_pcg::Pcg32>;

fn new_game(seed: u64) -> (TestGame, ManualClock) {
    let clock = ManualClock::with_epoch(EPOCH);
    let game = Game::new(Tuning::default(), clock.clone(), seeded(seed));
    (game, clock)
}

fn records(events: Vec<GameEvent>) -> Vec<ScoreRecord> {
    events
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::ScoreRecorded(r) => Some(r),
            _ => None,
        })
        .collect()
}

/// Play `frames` autopilot frames of `frame_ms` each
fn autoplay(game: &mut TestGame, clock: &ManualClock, frames: usize, frame_ms: f64) {
    for _ in 0..frames {
        if game.phase() != GamePhase::Playing {
            return;
        }
        let dir = autopilot::choose_direction(game.state());
        game.handle(Command::Steer(dir));
        if autopilot::wants_turbo(game.state()) {
            game.handle(Command::Turbo);
        }
        clock.advance(frame_ms);
        game.advance(frame_ms);
    }
}

#[test]
fn same_seed_same_game() {
    let (mut a, clock_a) = new_game(7);
    let (mut b, clock_b) = new_game(7);
    a.handle(Command::Start);
    b.handle(Command::Start);

    autoplay(&mut a, &clock_a, 600, 16.0);
    autoplay(&mut b, &clock_b, 600, 16.0);

    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.drain_events(), b.drain_events());
}

#[test]
fn head_wraps_across_the_edge() {
    let (mut game, _clock) = new_game(3);
    game.handle(Command::Start);
    assert_eq!(game.state().snake.head(), Cell::new(16, 16));

    for _ in 0..16 {
        assert_eq!(game.advance(TICK), 1);
    }
    assert_eq!(game.state().snake.head(), Cell::new(0, 16));

    game.handle(Command::Steer(Direction::Up));
    for _ in 0..17 {
        game.advance(TICK);
    }
    assert_eq!(game.state().snake.head(), Cell::new(0, 31));
}

#[test]
fn bonus_block_scores_grows_and_glows() {
    let (mut game, clock) = new_game(11);
    game.handle(Command::Start);
    let state = game.state_mut();
    state.fruit.cell = Cell::new(0, 0);
    state.special = Some(Special::at(Cell::new(17, 15), 0.0, 5000.0));

    assert_eq!(game.advance(TICK), 1);
    assert_eq!(game.state().score, 10);
    assert!(game.state().special.is_none());
    assert!(game.snapshot().glowing);
    assert_eq!(game.state().snake.len(), 3);

    // Keep the replacement fruit out of the way
    game.state_mut().fruit.cell = Cell::new(0, 0);
    for _ in 0..12 {
        game.advance(TICK);
    }
    assert_eq!(game.state().snake.len(), 13);
    assert_eq!(game.state().score, 10);

    clock.advance(2000.0);
    assert!(!game.snapshot().glowing);
}

#[test]
fn finished_games_land_on_the_leaderboard() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    let mut store = FileStore::new(&path);

    let (mut game, clock) = new_game(5);
    game.set_player(Nickname::parse("ada"));

    for score in [12, 30, 0, 12] {
        game.handle(Command::Start);
        game.state_mut().score = score;
        clock.advance(1000.0);
        game.handle(Command::MenuReturn);
        for record in records(game.drain_events()) {
            persistence::record_score(&mut store, record).unwrap();
        }
    }

    let board = FileStore::new(&path).load().unwrap();
    let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![30, 12, 12, 0]);
    assert!(board.entries().iter().all(|e| e.display_name() == "ada"));
    // Equal scores keep the earlier game first
    assert!(board.entries()[1].timestamp < board.entries()[2].timestamp);
}

#[test]
fn self_collision_ends_the_game() {
    let (mut game, _clock) = new_game(9);
    game.handle(Command::Start);
    let state = game.state_mut();
    state.fruit.cell = Cell::new(0, 0);
    state.score = 21;
    state.snake.body = [(5, 6), (6, 6), (7, 6), (7, 5), (6, 5)]
        .iter()
        .map(|&(x, y)| Cell::new(x, y))
        .collect();
    state.snake.direction = Direction::Left;
    state.snake.pending = Direction::Left;
    game.drain_events();

    game.handle(Command::Steer(Direction::Down));
    game.advance(TICK);
    assert_eq!(game.phase(), GamePhase::Menu);
    assert_eq!(game.state().score, 21);

    let recs = records(game.drain_events());
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].score, 21);
    assert_eq!(recs[0].display_name(), "Anonymous");
}

#[test]
fn legacy_scores_are_upgraded_on_save() {
    let mut store = MemoryStore::with_raw("[5, 12, 0]");
    let rank = persistence::record_score(&mut store, ScoreRecord::new(8, None, EPOCH)).unwrap();
    assert_eq!(rank, Some(2));

    let raw = store.raw().unwrap();
    assert!(raw.starts_with(r#"{"version":1"#));
    let scores: Vec<u32> = store
        .load()
        .unwrap()
        .entries()
        .iter()
        .map(|e| e.score)
        .collect();
    assert_eq!(scores, vec![12, 8, 5, 0]);
}

#[test]
fn corrupt_storage_starts_fresh() {
    let mut store = MemoryStore::with_raw("{not json");
    assert!(persistence::load_or_empty(&store).is_empty());
    let rank = persistence::record_score(&mut store, ScoreRecord::new(3, None, EPOCH)).unwrap();
    assert_eq!(rank, Some(1));
}
