//! Hostile Dash headless runner
//!
//! Plays one autopiloted attempt and prints the result the sign-up flow
//! would submit. Environment:
//! - `DASH_SEED`: seed for a reproducible run
//! - `DASH_DIFFICULTY`: gentle / standard / brutal
//! - `DASH_TUNING`: JSON tuning file (overrides the difficulty preset)
//! - `DASH_HIGHSCORES`: JSON leaderboard to read and update

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use hostile_dash::sim::{GameOverReport, Session, SessionEvent, Snapshot, TickInput, tick};
use hostile_dash::tuning::Difficulty;
use hostile_dash::{HighScores, Tuning};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn load_tuning() -> Tuning {
    if let Some(path) = std::env::var_os("DASH_TUNING") {
        return Tuning::load(&PathBuf::from(path));
    }
    let preset = std::env::var("DASH_DIFFICULTY")
        .ok()
        .and_then(|s| {
            let parsed = Difficulty::parse(&s);
            if parsed.is_none() {
                log::warn!("Unknown difficulty '{}', using Standard", s);
            }
            parsed
        })
        .unwrap_or_default();
    log::info!("Difficulty: {}", preset.as_str());
    Tuning::from_preset(preset)
}

fn session_rng() -> Pcg32 {
    match std::env::var("DASH_SEED").ok().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => {
            log::info!("Seed: {}", seed);
            Pcg32::seed_from_u64(seed)
        }
        Some(Err(e)) => {
            log::warn!("Ignoring DASH_SEED: {}", e);
            Pcg32::from_rng(&mut rand::rng())
        }
        None => Pcg32::from_rng(&mut rand::rng()),
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Hostile Dash (headless) starting...");

    let scores_path = std::env::var_os("DASH_HIGHSCORES").map(PathBuf::from);
    let mut scores = scores_path
        .as_deref()
        .map(HighScores::load)
        .unwrap_or_default();

    let tuning = load_tuning();
    let mut session = Session::with_rng(tuning, scores.top_score().unwrap_or(0), session_rng());

    let finished: Rc<RefCell<Option<GameOverReport>>> = Rc::new(RefCell::new(None));
    let sink = finished.clone();
    session.set_on_complete(move |report| {
        *sink.borrow_mut() = Some(*report);
    });

    tick(
        &mut session,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    while !session.phase().is_terminal() {
        tick(&mut session, &input);
        for event in session.events() {
            match event {
                SessionEvent::Spawned(kind) => log::debug!("Spawned {:?}", kind),
                SessionEvent::Collided => log::info!("Hit at score {}", session.score()),
                SessionEvent::TimeUp => log::info!("Time up at score {}", session.score()),
                _ => {}
            }
        }
    }

    let snapshot = Snapshot::capture(&session);
    log::info!(
        "{:?} after {:.1}s, score {} / {}",
        snapshot.phase,
        snapshot.elapsed_secs,
        snapshot.score,
        snapshot.score_target
    );

    let report = *finished.borrow();
    if let (Some(report), Some(result)) = (report, session.result()) {
        if report.is_new_high_score {
            println!("New high score: {}", report.score);
        }
        if let Some(rank) = scores.record(&report, result.survived, now_ms()) {
            log::info!("Leaderboard rank {}", rank);
        }
        if let Some(path) = scores_path.as_deref() {
            if let Err(e) = scores.save(path) {
                log::warn!("Could not save high scores: {}", e);
            }
        }

        match result.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not encode result: {}", e),
        }
    }
}
