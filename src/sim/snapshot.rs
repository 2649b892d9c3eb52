//! Read-only view of a session for the presentation layer

use serde::{Deserialize, Serialize};

use super::hitbox::RectHitbox;
use super::obstacle::{Obstacle, ObstacleKind};
use super::player::{PlayerCharacter, Posture};
use super::state::{Session, SessionEvent, SessionPhase};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub posture: Posture,
    pub frame: u32,
}

impl From<&PlayerCharacter> for PlayerView {
    fn from(player: &PlayerCharacter) -> Self {
        Self {
            x: player.x(),
            y: player.y(),
            width: player.width(),
            height: player.height(),
            posture: player.posture(),
            frame: player.anim_frame(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub variant: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_active: bool,
    pub frame: u32,
}

impl From<&Obstacle> for ObstacleView {
    fn from(o: &Obstacle) -> Self {
        Self {
            variant: o.kind,
            x: o.pos.x,
            y: o.pos.y,
            width: o.size.x,
            height: o.size.y,
            is_active: o.is_active(),
            frame: o.anim_frame,
        }
    }
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub is_game_over: bool,
    /// Set once the attempt is over
    pub final_score: Option<u32>,
    pub final_time: Option<f32>,
    pub score: u32,
    pub elapsed_secs: f32,
    pub high_score: u32,
    pub time_limit_secs: u32,
    pub score_target: u32,
    pub events: Vec<SessionEvent>,
    /// Player hitbox followed by obstacle hitboxes, when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub debug_hitboxes: Vec<RectHitbox>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let detector = session.detector();
        let clock = session.clock();
        Self {
            phase: session.phase(),
            player: session.player().into(),
            obstacles: session
                .spawner()
                .obstacles()
                .iter()
                .filter(|o| o.is_active())
                .map(ObstacleView::from)
                .collect(),
            is_game_over: detector.is_game_over(),
            final_score: detector.final_score(),
            final_time: detector.final_time(),
            score: clock.score(),
            elapsed_secs: clock.elapsed_secs(),
            high_score: detector.high_score(),
            time_limit_secs: clock.limits.time_limit_secs,
            score_target: clock.limits.score_target,
            events: session.events().to_vec(),
            debug_hitboxes: Vec::new(),
        }
    }

    /// Capture with hitboxes for a debug overlay
    pub fn capture_with_hitboxes(session: &Session) -> Self {
        let mut snapshot = Self::capture(session);
        snapshot.debug_hitboxes = std::iter::once(session.player().hitbox())
            .chain(session.spawner().hitboxes())
            .collect();
        snapshot
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
