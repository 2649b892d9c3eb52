//! The runner: gravity, jumping, crouching and its hitbox

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hitbox::RectHitbox;
use crate::consts::*;

/// Discrete movement state of the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Posture {
    #[default]
    Running,
    Airborne,
    Crouching,
}

/// The player character
///
/// Fields are private: posture only changes through `jump`, `crouch`,
/// `stand_up`, `update` and `reset`.
#[derive(Debug, Clone)]
pub struct PlayerCharacter {
    /// Top-left corner
    pos: Vec2,
    width: f32,
    height: f32,
    full_height: f32,
    velocity_y: f32,
    is_airborne: bool,
    is_crouching: bool,
    posture: Posture,
    anim_ticks: u32,
    anim_frame: u32,
}

impl Default for PlayerCharacter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerCharacter {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_HEIGHT),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            full_height: PLAYER_HEIGHT,
            velocity_y: 0.0,
            is_airborne: false,
            is_crouching: false,
            posture: Posture::Running,
            anim_ticks: 0,
            anim_frame: 0,
        }
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn full_height(&self) -> f32 {
        self.full_height
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    pub fn is_airborne(&self) -> bool {
        self.is_airborne
    }

    pub fn is_crouching(&self) -> bool {
        self.is_crouching
    }

    pub fn posture(&self) -> Posture {
        self.posture
    }

    pub fn anim_frame(&self) -> u32 {
        self.anim_frame
    }

    /// Top edge when standing on the ground with the current height
    #[inline]
    fn ground_top(&self) -> f32 {
        GROUND_Y - self.height
    }

    /// Start a jump. Returns false (and changes nothing) when already airborne.
    pub fn jump(&mut self) -> bool {
        if self.is_airborne {
            return false;
        }
        self.is_airborne = true;
        self.velocity_y = JUMP_VELOCITY;
        self.posture = Posture::Airborne;
        true
    }

    /// Duck. Ignored mid-air.
    pub fn crouch(&mut self) {
        if self.is_airborne || self.is_crouching {
            return;
        }
        self.is_crouching = true;
        self.posture = Posture::Crouching;
        self.height = self.full_height / 2.0;
        self.pos.y = self.ground_top();
    }

    /// Leave the crouch and restore full height
    pub fn stand_up(&mut self) {
        if !self.is_crouching {
            return;
        }
        self.is_crouching = false;
        if self.is_airborne {
            // Keep the feet where they are mid-air
            let bottom = self.pos.y + self.height;
            self.height = self.full_height;
            self.pos.y = bottom - self.height;
        } else {
            self.height = self.full_height;
            self.pos.y = self.ground_top();
            self.posture = Posture::Running;
        }
    }

    /// Advance one tick of physics and animation
    ///
    /// Returns true on the tick the player lands.
    pub fn update(&mut self) -> bool {
        let mut landed = false;

        if self.is_airborne {
            self.velocity_y += GRAVITY;
            self.pos.y += self.velocity_y;

            if self.pos.y >= self.ground_top() {
                self.pos.y = self.ground_top();
                self.velocity_y = 0.0;
                self.is_airborne = false;
                self.posture = if self.is_crouching {
                    Posture::Crouching
                } else {
                    Posture::Running
                };
                landed = true;
            }
        }

        self.anim_ticks += 1;
        if self.anim_ticks >= ANIMATION_TICKS {
            self.anim_ticks = 0;
            self.anim_frame = (self.anim_frame + 1) % RUN_FRAMES;
        }

        landed
    }

    /// Full sprite bounds
    pub fn bounds(&self) -> RectHitbox {
        RectHitbox::from_min_size(self.pos, Vec2::new(self.width, self.height))
    }

    /// Collision box, inset from the sprite bounds
    pub fn hitbox(&self) -> RectHitbox {
        let pad = if self.is_crouching {
            HITBOX_PAD_CROUCH
        } else {
            HITBOX_PAD_UPRIGHT
        };
        self.bounds().inset(pad)
    }

    /// Back to the starting line
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
