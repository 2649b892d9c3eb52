//! Gauntlet simulation
//!
//! Pure and tick-driven:
//! - No I/O, no wall-clock time
//! - All randomness comes from the session RNG
//! - Fixed update order inside a tick

pub mod clock;
pub mod collision;
pub mod hitbox;
pub mod obstacle;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::{ScoreClock, SessionLimits};
pub use collision::{CollisionDetector, CompletionCallback, GameOverReport};
pub use hitbox::RectHitbox;
pub use obstacle::{AltitudeBand, Obstacle, ObstacleKind};
pub use player::{PlayerCharacter, Posture};
pub use snapshot::{ObstacleView, PlayerView, Snapshot};
pub use spawner::{ObstacleSpawner, SPAWN_WEIGHTS, SpawnerConfig, pick_weighted};
pub use state::{Session, SessionEvent, SessionPhase, SessionResult};
pub use tick::{AutopilotDecision, TickInput, autopilot, tick};
