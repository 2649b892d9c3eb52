//! Whole-session behaviour through the public API

use std::cell::RefCell;
use std::rc::Rc;

use hostile_dash::Tuning;
use hostile_dash::consts::*;
use hostile_dash::sim::{
    CollisionDetector, GameOverReport, Obstacle, ObstacleKind, ObstacleSpawner, PlayerCharacter,
    Posture, Session, SessionEvent, SessionPhase, Snapshot, SpawnerConfig, TickInput, tick,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn start() -> TickInput {
    TickInput {
        start: true,
        ..Default::default()
    }
}

fn run_until_over(session: &mut Session, input: &TickInput) -> u32 {
    let mut ticks = 0;
    while !session.phase().is_terminal() {
        tick(session, input);
        ticks += 1;
        assert!(ticks <= SESSION_TIME_LIMIT_SECS * TICK_RATE + 1);
    }
    ticks
}

#[test]
fn scenario_a_no_double_jump() {
    let mut player = PlayerCharacter::new();
    assert!(player.jump());
    assert!(player.is_airborne());
    assert_eq!(player.posture(), Posture::Airborne);
    player.update();
    assert!(!player.jump());
}

#[test]
fn scenario_b_speed_follows_score() {
    let spawner = ObstacleSpawner::new(SpawnerConfig {
        base_speed: 5.0,
        speed_growth_rate: 0.001,
        ..Default::default()
    });
    assert_eq!(spawner.speed(0), 5.0);
    assert!((spawner.speed(2000) - 7.0).abs() < 1e-5);
}

#[test]
fn scenario_c_obstacle_retires_once_off_screen() {
    let mut obstacle = Obstacle::ground(ObstacleKind::SmallGround, 800.0, 5.0);
    let width = obstacle.size.x;
    let mut ticks = 0;
    while obstacle.is_active() {
        obstacle.update();
        ticks += 1;
    }
    assert!(800.0 - 5.0 * ticks as f32 + width < 0.0);
    assert!(800.0 - 5.0 * (ticks - 1) as f32 + width >= 0.0);
}

#[test]
fn scenario_d_high_score_and_latch() {
    let mut detector = CollisionDetector::new(100);
    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    detector.set_on_complete(move |_| *counter.borrow_mut() += 1);

    let report = detector.trigger_game_over(150, 60.0).unwrap();
    assert!(report.is_new_high_score);
    assert_eq!(detector.high_score(), 150);
    assert!(detector.trigger_game_over(150, 60.0).is_none());
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn idle_player_is_knocked_out_and_callback_fires_once() {
    let mut session = Session::with_seed(21, 0);
    let reports: Rc<RefCell<Vec<GameOverReport>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = reports.clone();
    session.set_on_complete(move |r| sink.borrow_mut().push(*r));

    tick(&mut session, &start());
    run_until_over(&mut session, &TickInput::default());

    assert_eq!(session.phase(), SessionPhase::GameOver);
    assert_eq!(reports.borrow().len(), 1);
    let report = reports.borrow()[0];
    assert_eq!(Some(report.score), session.detector().final_score());

    // More ticks after the end change nothing
    for _ in 0..30 {
        tick(&mut session, &TickInput::default());
    }
    assert_eq!(reports.borrow().len(), 1);

    let snapshot = Snapshot::capture(&session);
    assert!(snapshot.is_game_over);
    assert_eq!(snapshot.final_score, Some(report.score));
}

#[test]
fn reset_starts_a_clean_attempt_and_keeps_high_score() {
    let mut tuning = Tuning::default();
    tuning.limits.score_target = 20;
    let mut session = Session::with_rng(tuning, 0, Pcg32::seed_from_u64(22));
    tick(&mut session, &start());
    tick(
        &mut session,
        &TickInput {
            jump: true,
            ..Default::default()
        },
    );
    run_until_over(&mut session, &TickInput::default());
    assert_eq!(session.phase(), SessionPhase::Cleared);
    assert_eq!(session.high_score(), 20);

    session.reset();
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert_eq!(session.high_score(), 20);
    assert_eq!(session.score(), 0);
    assert_eq!(session.clock().ticks(), 0);
    assert!(session.spawner().obstacles().is_empty());
    assert!(!session.player().is_airborne());
    assert_eq!(session.player().posture(), Posture::Running);
    assert!(!session.detector().is_game_over());
    assert!(session.result().is_none());

    tick(&mut session, &start());
    assert_eq!(session.phase(), SessionPhase::Running);
}

#[test]
fn autopilot_runs_to_a_terminal_phase() {
    let mut session = Session::with_seed(23, 0);
    tick(&mut session, &start());
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    run_until_over(&mut session, &input);
    let result = session.result().unwrap();
    assert_eq!(result.survived, session.phase() == SessionPhase::Cleared);
}

#[test]
fn difficulty_ramps_during_a_run() {
    let mut session = Session::with_seed(24, 0);
    tick(&mut session, &start());
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut last_speed = 0.0;
    let mut spawns = 0;
    while !session.phase().is_terminal() {
        tick(&mut session, &input);
        let speed = session.spawner().current_speed();
        assert!(speed >= last_speed);
        last_speed = speed;
        spawns += session
            .events()
            .iter()
            .filter(|e| matches!(e, SessionEvent::Spawned(_)))
            .count();
        assert!(
            session
                .spawner()
                .obstacles()
                .iter()
                .all(|o| o.is_active() && o.speed == speed)
        );
    }
    assert!(spawns >= 1);
}
