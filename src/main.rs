//! Swipe Sort headless runner
//!
//! Plays levels with a simple auto-player at the fixed timestep and prints
//! the final board as JSON.
//!
//! Usage: `swipe-sort [seed] [difficulty] [seconds]`

use swipe_sort::consts::*;
use swipe_sort::sim::{Board, Direction, GameEvent, Piece, TickInput, tick};
use swipe_sort::{Difficulty, Session, SessionPhase, Spawner, Tuning};

/// Pick a command for the current board
fn auto_play(board: &Board) -> TickInput {
    let mut input = TickInput::default();
    if !board.input_enabled() {
        return input;
    }

    // Break frozen residents first
    if let Some(frozen) = board
        .zones()
        .iter()
        .flat_map(|z| z.occupants())
        .find(|p| p.frozen)
    {
        input.tap = Some(frozen.id);
        return input;
    }

    let Some(piece) = board.current_piece() else {
        return input;
    };
    if piece.fake {
        input.tap = Some(piece.id);
        return input;
    }
    input.route = choose_zone(board, piece);
    input
}

/// Zone that already collects this key, else the emptiest usable zone
fn choose_zone(board: &Board, piece: &Piece) -> Option<Direction> {
    let zones = board.zones();
    let target = if piece.special {
        zones.iter().find(|z| z.frozen_count() > 0)
    } else {
        zones
            .iter()
            .filter(|z| z.empty_count() > 0)
            .find(|z| z.occupants().all(|p| p.key == piece.key) && z.occupied_count() > 0)
            .or_else(|| {
                zones
                    .iter()
                    .filter(|z| z.empty_count() > 0)
                    .max_by_key(|z| z.empty_count())
            })
    };
    // Route commands are inverted by the board, so pre-invert the choice
    target.map(|z| board.inversion().apply(z.direction()))
}

/// Host frame length the runner simulates (60 Hz display)
const FRAME_DT: f32 = 1.0 / 60.0;

/// Board, session and spawner stepped together at the fixed timestep
struct Runner {
    board: Board,
    session: Session,
    spawner: Spawner,
    accumulator: f32,
    cooldown: u32,
}

impl Runner {
    fn new(seed: u64, difficulty: Difficulty) -> Self {
        let mut board = Board::new(seed, Tuning::from_preset(difficulty));
        let session = Session::start(1, &mut board);
        let config = session.config();
        let spawner = Spawner::new(seed ^ 0x5eed, config.key_count)
            .with_chances(config.fake_chance, config.special_chance);
        log::info!("Level 1 uses {} keys", spawner.keys().len());
        Self {
            board,
            session,
            spawner,
            accumulator: 0.0,
            cooldown: 0,
        }
    }

    /// Feed one host frame into the accumulator and run the due ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    fn step(&mut self) {
        // Act a few times per second, like a fast human
        let input = if self.cooldown == 0 {
            self.cooldown = 30;
            auto_play(&self.board)
        } else {
            self.cooldown -= 1;
            TickInput::default()
        };
        tick(&mut self.board, &input, SIM_DT);

        for event in self.board.drain_events() {
            if event == GameEvent::ArrivalRequested {
                self.board.on_piece_arrived(self.spawner.spawn());
            }
            self.session.handle(&event, &mut self.board);
        }

        match self.session.phase {
            SessionPhase::Running => {}
            SessionPhase::Won => {
                let next = self.session.level + 1;
                self.session.start_level(next, &mut self.board);
                let config = self.session.config();
                self.spawner.set_key_count(config.key_count);
                self.spawner.fake_chance = config.fake_chance;
                self.spawner.special_chance = config.special_chance;
                log::info!("Level {} uses {} keys", next, self.spawner.keys().len());
            }
            SessionPhase::Lost => {
                let level = self.session.level;
                self.session.start_level(level, &mut self.board);
            }
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(20260101);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or_default();
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

    log::info!(
        "Swipe Sort starting: seed={}, difficulty={}, {}s",
        seed,
        difficulty.as_str(),
        seconds
    );

    let mut runner = Runner::new(seed, difficulty);
    let frames = (seconds.max(0.0) / FRAME_DT) as u64;
    for _ in 0..frames {
        runner.update(FRAME_DT);
    }

    let session = &runner.session;
    log::info!(
        "Finished at level {} with {} lives, {}/{} matches",
        session.level,
        session.lives,
        session.matches_done,
        session.target_matches
    );

    match serde_json::to_string_pretty(&runner.board.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
}
