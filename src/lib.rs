//! Hostile Dash - the obstacle gauntlet in front of the sign-up form
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (player physics, obstacles, collisions, session)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best scores carried between attempts

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
///
/// All values are per tick; the host is expected to tick at `TICK_RATE`.
pub mod consts {
    /// Host frame rate the per-tick constants are tuned for
    pub const TICK_RATE: u32 = 60;
    /// Seconds per tick
    pub const TICK_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Width of the visible area
    pub const VIEW_WIDTH: f32 = 800.0;
    /// Feet of grounded entities rest on this line
    pub const GROUND_Y: f32 = 260.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 44.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    /// Upward launch velocity (negative is up)
    pub const JUMP_VELOCITY: f32 = -12.0;
    pub const GRAVITY: f32 = 0.6;
    /// Hitbox inset while standing or airborne
    pub const HITBOX_PAD_UPRIGHT: f32 = 6.0;
    /// Hitbox inset while crouching (smaller than upright)
    pub const HITBOX_PAD_CROUCH: f32 = 3.0;
    /// Ticks per animation frame
    pub const ANIMATION_TICKS: u32 = 6;
    /// Frames in the run cycle
    pub const RUN_FRAMES: u32 = 2;

    /// Obstacles always enter here, whatever the host canvas size
    pub const SPAWN_X: f32 = VIEW_WIDTH;
    pub const SMALL_GROUND_SIZE: (f32, f32) = (17.0, 35.0);
    pub const LARGE_GROUND_SIZE: (f32, f32) = (25.0, 50.0);
    pub const AERIAL_SIZE: (f32, f32) = (46.0, 20.0);
    /// Vertical bob of aerial hazards
    pub const AERIAL_AMPLITUDE: f32 = 5.0;
    /// Horizontal distance per radian of bob phase
    pub const AERIAL_PERIOD: f32 = 30.0;
    /// Top edge of each aerial altitude band, measured up from the ground line
    pub const AERIAL_LOW_LIFT: f32 = 28.0;
    pub const AERIAL_MID_LIFT: f32 = 40.0;
    pub const AERIAL_HIGH_LIFT: f32 = 55.0;

    /// Spawner defaults
    pub const BASE_SPEED: f32 = 5.0;
    pub const SPEED_GROWTH_RATE: f32 = 0.001;
    /// Ticks between spawns at score 0
    pub const SPAWN_INTERVAL_BASE: u32 = 90;
    /// Shortest spawn interval difficulty can reach
    pub const SPAWN_INTERVAL_FLOOR: u32 = 40;
    /// Score needed to shave one tick off the spawn interval
    pub const SCORE_PER_INTERVAL_STEP: u32 = 500;
    /// Upper bound (inclusive) of the per-spawn random delay
    pub const SPAWN_JITTER_MAX: u32 = 30;

    /// Session limits
    pub const SESSION_TIME_LIMIT_SECS: u32 = 60;
    pub const SCORE_TARGET: u32 = 1500;
    /// Distance gained per tick per unit of obstacle speed
    pub const DISTANCE_PER_SPEED: f32 = 0.1;
}
