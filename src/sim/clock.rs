//! Session clock and distance counter

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Fixed limits of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionLimits {
    pub time_limit_secs: u32,
    pub score_target: u32,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            time_limit_secs: SESSION_TIME_LIMIT_SECS,
            score_target: SCORE_TARGET,
        }
    }
}

impl SessionLimits {
    pub fn time_limit_ticks(&self) -> u64 {
        self.time_limit_secs as u64 * TICK_RATE as u64
    }
}

/// Tracks elapsed ticks and distance run
#[derive(Debug, Clone, Default)]
pub struct ScoreClock {
    pub limits: SessionLimits,
    ticks: u64,
    distance: f32,
}

impl ScoreClock {
    pub fn new(limits: SessionLimits) -> Self {
        Self {
            limits,
            ticks: 0,
            distance: 0.0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.ticks as f32 * TICK_DT
    }

    /// Seconds left before time runs out
    pub fn remaining_secs(&self) -> f32 {
        (self.limits.time_limit_secs as f32 - self.elapsed_secs()).max(0.0)
    }

    pub fn score(&self) -> u32 {
        self.distance as u32
    }

    /// Fraction of the score target reached, 0..=1
    pub fn progress(&self) -> f32 {
        if self.limits.score_target == 0 {
            return 1.0;
        }
        (self.score() as f32 / self.limits.score_target as f32).min(1.0)
    }

    pub fn target_reached(&self) -> bool {
        self.score() >= self.limits.score_target
    }

    pub fn time_up(&self) -> bool {
        self.ticks >= self.limits.time_limit_ticks()
    }

    /// One tick at the current hazard speed
    pub fn advance(&mut self, speed: f32) {
        self.ticks += 1;
        self.distance += speed * DISTANCE_PER_SPEED;
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
        self.distance = 0.0;
    }
}
