//! Per-frame simulation tick
//!
//! Fixed order: player physics -> obstacles -> collision -> clock.

use super::obstacle::{AltitudeBand, Obstacle};
use super::state::{Session, SessionEvent, SessionPhase};

/// Ticks of warning the autopilot leaves before a jump
const AUTOPILOT_JUMP_LEAD: f32 = 6.0;
/// Ticks of warning the autopilot leaves before ducking
const AUTOPILOT_CROUCH_LEAD: f32 = 10.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Leave the Ready phase
    pub start: bool,
    /// Jump (edge-triggered by the host)
    pub jump: bool,
    /// Crouch key/touch is held
    pub crouch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the autopilot plays
    pub autopilot: bool,
}

/// Advance the session by one tick
pub fn tick(session: &mut Session, input: &TickInput) {
    session.events.clear();

    if input.pause {
        session.toggle_pause();
    }

    match session.phase {
        SessionPhase::Ready => {
            if input.start {
                session.start();
            }
            return;
        }
        SessionPhase::Running => {}
        SessionPhase::Paused | SessionPhase::GameOver | SessionPhase::Cleared => return,
    }

    let mut input = input.clone();
    if input.autopilot {
        let decision = autopilot(session);
        input.jump = decision.jump;
        input.crouch = decision.crouch;
    }

    // Commands
    let player = &mut session.player;
    if input.jump && player.jump() {
        session.events.push(SessionEvent::Jumped);
    }
    if input.crouch && !player.is_crouching() {
        player.crouch();
    } else if !input.crouch && player.is_crouching() {
        player.stand_up();
    }

    // 1. Player physics
    if session.player.update() {
        session.events.push(SessionEvent::Landed);
    }

    // 2. Obstacles
    let score = session.clock.score();
    if let Some(kind) = session.spawner.update(score, &mut session.rng) {
        session.events.push(SessionEvent::Spawned(kind));
    }

    // 3. Collision
    let time = session.clock.elapsed_secs();
    let hit = session.detector.check_player_obstacle_collision(
        session.player.hitbox(),
        session.spawner.hitboxes(),
        score,
        time,
    );
    if hit {
        session.events.push(SessionEvent::Collided);
        session.finish(SessionPhase::GameOver);
        return;
    }

    // 4. Clock
    session.clock.advance(session.spawner.current_speed());
    let score = session.clock.score();
    let time = session.clock.elapsed_secs();

    if session.clock.target_reached() {
        session.detector.record_clear(score, time);
        session.events.push(SessionEvent::Cleared);
        session.finish(SessionPhase::Cleared);
    } else if session.clock.time_up() {
        session.detector.trigger_game_over(score, time);
        session.events.push(SessionEvent::TimeUp);
        session.finish(SessionPhase::GameOver);
    }
}

/// What the autopilot wants to do this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutopilotDecision {
    pub jump: bool,
    pub crouch: bool,
}

/// Simple demo player: duck under high flyers, jump everything else
pub fn autopilot(session: &Session) -> AutopilotDecision {
    let hitbox = session.player.hitbox();
    let player_left = hitbox.x;
    let player_right = hitbox.x + hitbox.width;
    let speed = session.spawner.current_speed().max(0.1);

    // Nearest hazard that has not fully passed the player
    let nearest: Option<&Obstacle> = session
        .spawner
        .obstacles()
        .iter()
        .filter(|o| o.is_active() && o.right() > player_left)
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(obstacle) = nearest else {
        return AutopilotDecision::default();
    };

    let gap = obstacle.pos.x - player_right;
    if obstacle.band == Some(AltitudeBand::High) {
        AutopilotDecision {
            jump: false,
            crouch: gap <= speed * AUTOPILOT_CROUCH_LEAD,
        }
    } else {
        AutopilotDecision {
            jump: gap <= speed * AUTOPILOT_JUMP_LEAD,
            crouch: false,
        }
    }
}
