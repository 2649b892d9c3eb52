//! Player vs. hazard collision and the game-over latch
//!
//! Once an attempt ends the detector stays latched until `reset`, and the
//! completion callback fires exactly once per attempt.

use serde::{Deserialize, Serialize};

use super::hitbox::RectHitbox;

/// What the completion callback receives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub score: u32,
    /// Seconds survived
    pub time: f32,
    pub is_new_high_score: bool,
}

/// Completion callback
pub type CompletionCallback = Box<dyn FnMut(&GameOverReport)>;

/// Detects the first hit and settles the attempt
pub struct CollisionDetector {
    is_game_over: bool,
    /// Settled either by a hit/timeout or by clearing the course
    completed: bool,
    final_score: Option<u32>,
    final_time: Option<f32>,
    high_score: u32,
    on_complete: Option<CompletionCallback>,
}

impl std::fmt::Debug for CollisionDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionDetector")
            .field("is_game_over", &self.is_game_over)
            .field("completed", &self.completed)
            .field("final_score", &self.final_score)
            .field("final_time", &self.final_time)
            .field("high_score", &self.high_score)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl CollisionDetector {
    /// Create with the best score carried in from earlier attempts
    pub fn new(high_score: u32) -> Self {
        Self {
            is_game_over: false,
            completed: false,
            final_score: None,
            final_time: None,
            high_score,
            on_complete: None,
        }
    }

    /// Register the callback fired when an attempt is settled
    pub fn set_on_complete(&mut self, callback: impl FnMut(&GameOverReport) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn final_time(&self) -> Option<f32> {
        self.final_time
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Test the player against every hazard, latching on the first overlap
    ///
    /// Already over: returns true without looking at geometry. Degenerate
    /// boxes on either side never collide.
    pub fn check_player_obstacle_collision<I>(
        &mut self,
        player: RectHitbox,
        obstacles: I,
        score: u32,
        time: f32,
    ) -> bool
    where
        I: IntoIterator<Item = RectHitbox>,
    {
        if self.is_game_over {
            return true;
        }
        if player.is_degenerate() {
            return false;
        }

        let hit = obstacles
            .into_iter()
            .filter(|o| !o.is_degenerate())
            .any(|o| player.intersects(&o));

        if hit {
            self.trigger_game_over(score, time);
        }
        hit
    }

    /// Latch game over. A no-op once the attempt is settled.
    pub fn trigger_game_over(&mut self, score: u32, time: f32) -> Option<GameOverReport> {
        if self.is_game_over || self.completed {
            return None;
        }
        self.is_game_over = true;
        Some(self.settle(score, time))
    }

    /// Settle a cleared attempt: same bookkeeping as game over, no latch.
    pub fn record_clear(&mut self, score: u32, time: f32) -> Option<GameOverReport> {
        if self.is_game_over || self.completed {
            return None;
        }
        Some(self.settle(score, time))
    }

    fn settle(&mut self, score: u32, time: f32) -> GameOverReport {
        self.completed = true;
        self.final_score = Some(score);
        self.final_time = Some(time);

        let is_new_high_score = score > self.high_score;
        if is_new_high_score {
            log::info!("New high score: {} (was {})", score, self.high_score);
            self.high_score = score;
        }

        let report = GameOverReport {
            score,
            time,
            is_new_high_score,
        };
        if let Some(callback) = self.on_complete.as_mut() {
            callback(&report);
        }
        report
    }

    /// Clear the attempt. The high score and callback survive.
    pub fn reset(&mut self) {
        self.is_game_over = false;
        self.completed = false;
        self.final_score = None;
        self.final_time = None;
    }
}
