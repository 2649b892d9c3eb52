//! Session state: every component of one attempt plus the phase machine
//!
//! Only the high score and the completion callback outlive `reset`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::ScoreClock;
use super::collision::{CollisionDetector, GameOverReport};
use super::obstacle::ObstacleKind;
use super::player::PlayerCharacter;
use super::spawner::ObstacleSpawner;
use crate::tuning::Tuning;

/// Phase of the current attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the start command
    #[default]
    Ready,
    /// Active gameplay
    Running,
    /// Frozen by the host
    Paused,
    /// Hit a hazard or ran out of time
    GameOver,
    /// Reached the score target in time
    Cleared,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::GameOver | SessionPhase::Cleared)
    }
}

/// Things that happened during a tick (sound cues, UI flashes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started,
    Jumped,
    Landed,
    Spawned(ObstacleKind),
    Collided,
    TimeUp,
    Cleared,
    Paused,
    Resumed,
}

/// What the surrounding app submits to the result endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: u32,
    pub survived: bool,
}

impl SessionResult {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One player's gauntlet
#[derive(Debug)]
pub struct Session {
    pub(super) phase: SessionPhase,
    pub(super) tuning: Tuning,
    pub(super) player: PlayerCharacter,
    pub(super) spawner: ObstacleSpawner,
    pub(super) detector: CollisionDetector,
    pub(super) clock: ScoreClock,
    pub(super) rng: Pcg32,
    /// Events raised by the most recent tick
    pub(super) events: Vec<SessionEvent>,
    pub(super) result: Option<SessionResult>,
}

impl Session {
    /// New session with default tuning and an unseeded RNG
    pub fn new(high_score: u32) -> Self {
        Self::with_rng(Tuning::default(), high_score, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Seeded session, for tests and reproducible demos
    pub fn with_seed(seed: u64, high_score: u32) -> Self {
        Self::with_rng(Tuning::default(), high_score, Pcg32::seed_from_u64(seed))
    }

    pub fn with_tuning(tuning: Tuning, high_score: u32) -> Self {
        Self::with_rng(tuning, high_score, Pcg32::from_rng(&mut rand::rng()))
    }

    pub fn with_rng(tuning: Tuning, high_score: u32, rng: Pcg32) -> Self {
        Self {
            phase: SessionPhase::Ready,
            tuning,
            player: PlayerCharacter::new(),
            spawner: ObstacleSpawner::new(tuning.spawner),
            detector: CollisionDetector::new(high_score),
            clock: ScoreClock::new(tuning.limits),
            rng,
            events: Vec::new(),
            result: None,
        }
    }

    /// Register the callback fired once when an attempt ends
    pub fn set_on_complete(&mut self, callback: impl FnMut(&GameOverReport) + 'static) {
        self.detector.set_on_complete(callback);
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &PlayerCharacter {
        &self.player
    }

    pub fn spawner(&self) -> &ObstacleSpawner {
        &self.spawner
    }

    pub fn detector(&self) -> &CollisionDetector {
        &self.detector
    }

    pub fn clock(&self) -> &ScoreClock {
        &self.clock
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Set once the attempt reaches a terminal phase
    pub fn result(&self) -> Option<SessionResult> {
        self.result
    }

    pub fn high_score(&self) -> u32 {
        self.detector.high_score()
    }

    pub fn score(&self) -> u32 {
        self.clock.score()
    }

    /// Ready -> Running. Ignored in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::Ready {
            return false;
        }
        self.phase = SessionPhase::Running;
        self.events.push(SessionEvent::Started);
        log::info!(
            "Session started: {}s limit, target {}",
            self.clock.limits.time_limit_secs,
            self.clock.limits.score_target
        );
        true
    }

    /// Toggle Running <-> Paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Running => {
                self.phase = SessionPhase::Paused;
                self.events.push(SessionEvent::Paused);
            }
            SessionPhase::Paused => {
                self.phase = SessionPhase::Running;
                self.events.push(SessionEvent::Resumed);
            }
            _ => {}
        }
    }

    /// Fresh attempt. Player, obstacles, detector and clock go back together.
    pub fn reset(&mut self) {
        self.player.reset();
        self.spawner.reset();
        self.detector.reset();
        self.clock.reset();
        self.events.clear();
        self.result = None;
        self.phase = SessionPhase::Ready;
        log::info!("Session reset (high score {})", self.detector.high_score());
    }

    /// Move to a terminal phase and record the result
    pub(super) fn finish(&mut self, phase: SessionPhase) {
        let survived = phase == SessionPhase::Cleared;
        let score = self.detector.final_score().unwrap_or(self.clock.score());
        self.phase = phase;
        self.result = Some(SessionResult { score, survived });
        log::info!(
            "Session over: {:?}, score {}, {:.1}s",
            phase,
            score,
            self.detector.final_time().unwrap_or(self.clock.elapsed_secs())
        );
    }
}
