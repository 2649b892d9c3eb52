//! Obstacle spawning and the difficulty curve
//!
//! Speed grows linearly with score and the spawn interval shrinks toward a
//! floor. Which hazard appears is a table-driven weighted pick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::hitbox::RectHitbox;
use super::obstacle::{Obstacle, ObstacleKind};
use crate::consts::*;

/// Relative odds of each hazard variant
pub const SPAWN_WEIGHTS: [(ObstacleKind, f32); 3] = [
    (ObstacleKind::SmallGround, 0.4),
    (ObstacleKind::LargeGround, 0.4),
    (ObstacleKind::Aerial, 0.2),
];

/// Walk cumulative weights until one exceeds `roll`
///
/// `roll` is expected in `[0, 1)`. A roll sitting exactly on a boundary goes
/// to the later entry, and a roll past the total (float drift) falls back to
/// the last entry. Panics on an empty table.
pub fn pick_weighted<T: Copy>(table: &[(T, f32)], roll: f32) -> T {
    let mut cumulative = 0.0;
    for &(item, weight) in table {
        cumulative += weight;
        if roll < cumulative {
            return item;
        }
    }
    table[table.len() - 1].0
}

/// Difficulty knobs for the spawner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub base_speed: f32,
    pub speed_growth_rate: f32,
    pub interval_base: u32,
    pub interval_floor: u32,
    pub score_per_interval_step: u32,
    pub jitter_max: u32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            speed_growth_rate: SPEED_GROWTH_RATE,
            interval_base: SPAWN_INTERVAL_BASE,
            interval_floor: SPAWN_INTERVAL_FLOOR,
            score_per_interval_step: SCORE_PER_INTERVAL_STEP,
            jitter_max: SPAWN_JITTER_MAX,
        }
    }
}

/// Owns every live obstacle
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    pub config: SpawnerConfig,
    /// Live obstacles in spawn order
    obstacles: Vec<Obstacle>,
    /// Ticks since the last spawn
    spawn_timer: u32,
    /// Extra delay before the next spawn, drawn when the previous one happened
    jitter: u32,
    /// Speed assigned on the most recent update
    current_speed: f32,
}

impl Default for ObstacleSpawner {
    fn default() -> Self {
        Self::new(SpawnerConfig::default())
    }
}

impl ObstacleSpawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            config,
            obstacles: Vec::new(),
            spawn_timer: 0,
            jitter: 0,
            current_speed: config.base_speed,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Hazard speed at `score`
    pub fn speed(&self, score: u32) -> f32 {
        self.config.base_speed + score as f32 * self.config.speed_growth_rate
    }

    /// Spawn interval at `score`, before jitter
    pub fn base_interval(&self, score: u32) -> u32 {
        let step = score / self.config.score_per_interval_step.max(1);
        self.config
            .interval_base
            .saturating_sub(step)
            .max(self.config.interval_floor)
    }

    /// Ticks the timer must reach before the next spawn
    pub fn spawn_threshold(&self, score: u32) -> u32 {
        self.base_interval(score) + self.jitter
    }

    /// Hitboxes of every active obstacle
    pub fn hitboxes(&self) -> impl Iterator<Item = RectHitbox> + '_ {
        self.obstacles
            .iter()
            .filter(|o| o.is_active())
            .map(|o| o.hitbox())
    }

    /// Advance one tick at the given score
    ///
    /// Returns the kind of obstacle spawned this tick, if any.
    pub fn update<R: Rng>(&mut self, score: u32, rng: &mut R) -> Option<ObstacleKind> {
        // Every hazard moves at the current speed, not its spawn-time speed
        let speed = self.speed(score);
        self.current_speed = speed;
        for obstacle in &mut self.obstacles {
            obstacle.speed = speed;
        }

        self.spawn_timer += 1;

        let mut spawned = None;
        if self.spawn_timer >= self.spawn_threshold(score) {
            let kind = pick_weighted(&SPAWN_WEIGHTS, rng.random::<f32>());
            self.obstacles.push(Obstacle::spawn(kind, speed, rng));
            self.spawn_timer = 0;
            self.jitter = rng.random_range(0..=self.config.jitter_max);
            log::debug!(
                "Spawned {:?} at speed {:.2}, next in {}+{} ticks",
                kind,
                speed,
                self.base_interval(score),
                self.jitter
            );
            spawned = Some(kind);
        }

        for obstacle in &mut self.obstacles {
            obstacle.update();
        }
        self.obstacles.retain(|o| o.is_active());

        spawned
    }

    /// Drop every obstacle and restart the spawn cadence
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0;
        self.jitter = 0;
        self.current_speed = self.config.base_speed;
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}
