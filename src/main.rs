//! snake32 entry point
//!
//! Native builds run headless autopilot games on simulated time and keep the
//! leaderboard in a JSON file. The browser build starts from the library's
//! `wasm_start`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use snake32::persistence::{self, FileStore};
    use snake32::platform::{Clock, ManualClock, SystemClock};
    use snake32::sim::{autopilot, seeded};
    use snake32::{Command, Game, GameEvent, GamePhase, Nickname, Tuning};

    /// Simulated frame length
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Debug, Parser)]
    #[command(name = "snake32", about = "Play snake32 games with the autopilot")]
    struct Args {
        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Leaderboard file
        #[arg(long, default_value = "scores.json")]
        scores: PathBuf,
        /// Optional tuning JSON
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Nickname stamped on the records
        #[arg(long, default_value = "autopilot")]
        player: String,
        /// Give up on a game after this many ticks
        #[arg(long, default_value_t = 20_000)]
        max_ticks: u64,
    }

    pub fn run() {
        let args = Args::parse();

        let tuning = args
            .tuning
            .as_deref()
            .map(Tuning::load_or_default)
            .unwrap_or_default();
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("Seed: {}", seed);

        let clock = ManualClock::with_epoch(SystemClock::new().unix_ms());
        let mut game = Game::new(tuning, clock.clone(), seeded(seed));
        match Nickname::parse(&args.player) {
            Some(nick) => game.set_player(Some(nick)),
            None => log::warn!("Ignoring invalid nickname {:?}", args.player),
        }

        let mut store = FileStore::new(&args.scores);

        for round in 1..=args.games {
            game.handle(Command::Start);
            let mut ticks = 0u64;
            while game.phase() == GamePhase::Playing {
                if ticks >= args.max_ticks {
                    log::info!("Tick limit reached, ending game {}", round);
                    game.handle(Command::MenuReturn);
                    break;
                }
                let dir = autopilot::choose_direction(game.state());
                let turbo = autopilot::wants_turbo(game.state());
                game.handle(Command::Steer(dir));
                if turbo {
                    game.handle(Command::Turbo);
                }
                clock.advance(FRAME_MS);
                ticks += u64::from(game.advance(FRAME_MS));
            }

            for event in game.drain_events() {
                if let GameEvent::ScoreRecorded(record) = event {
                    let score = record.score;
                    match persistence::record_score(&mut store, record) {
                        Ok(Some(rank)) => println!("Game {round}: {score} points (rank #{rank})"),
                        Ok(None) => println!("Game {round}: {score} points"),
                        Err(e) => log::warn!("Could not save score: {}", e),
                    }
                }
            }
        }

        let board = persistence::load_or_empty(&store);
        if board.is_empty() {
            println!("No scores yet");
            return;
        }
        println!("\nLeaderboard ({})", store.path().display());
        for (i, entry) in board.displayed().iter().enumerate() {
            println!("{:2}. {} - {}", i + 1, entry.display_name(), entry.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("snake32 (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is snake32::platform::web::wasm_start
}
