//! Hazards that scroll toward the player

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::hitbox::RectHitbox;
use crate::consts::*;

/// Hazard variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    SmallGround,
    LargeGround,
    Aerial,
}

impl ObstacleKind {
    /// Sprite size, fixed per variant
    pub fn size(&self) -> Vec2 {
        let (w, h) = match self {
            ObstacleKind::SmallGround => SMALL_GROUND_SIZE,
            ObstacleKind::LargeGround => LARGE_GROUND_SIZE,
            ObstacleKind::Aerial => AERIAL_SIZE,
        };
        Vec2::new(w, h)
    }
}

/// Altitude bands for aerial hazards
///
/// Low clears by jumping, High clears by crouching, Mid could go either way
/// depending on where the bob catches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AltitudeBand {
    Low,
    Mid,
    High,
}

impl AltitudeBand {
    pub const ALL: [AltitudeBand; 3] = [AltitudeBand::Low, AltitudeBand::Mid, AltitudeBand::High];

    /// Top edge of the bob centre line
    pub fn base_y(&self) -> f32 {
        let lift = match self {
            AltitudeBand::Low => AERIAL_LOW_LIFT,
            AltitudeBand::Mid => AERIAL_MID_LIFT,
            AltitudeBand::High => AERIAL_HIGH_LIFT,
        };
        GROUND_Y - lift
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A single spawned hazard
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick, overwritten by the spawner every tick
    pub speed: f32,
    /// Bob centre line (aerial only)
    pub band: Option<AltitudeBand>,
    pub anim_frame: u32,
    anim_ticks: u32,
    active: bool,
}

impl Obstacle {
    /// Ground hazard at `x`, feet on the ground line
    pub fn ground(kind: ObstacleKind, x: f32, speed: f32) -> Self {
        let size = kind.size();
        Self {
            kind,
            pos: Vec2::new(x, GROUND_Y - size.y),
            size,
            speed,
            band: None,
            anim_frame: 0,
            anim_ticks: 0,
            active: true,
        }
    }

    /// Aerial hazard at `x` in the given band
    pub fn aerial(band: AltitudeBand, x: f32, speed: f32) -> Self {
        let mut obstacle = Self {
            kind: ObstacleKind::Aerial,
            pos: Vec2::new(x, band.base_y()),
            size: ObstacleKind::Aerial.size(),
            speed,
            band: Some(band),
            anim_frame: 0,
            anim_ticks: 0,
            active: true,
        };
        obstacle.apply_bob();
        obstacle
    }

    /// New hazard of `kind` at the spawn edge. Aerial hazards draw a band.
    pub fn spawn<R: Rng>(kind: ObstacleKind, speed: f32, rng: &mut R) -> Self {
        match kind {
            ObstacleKind::Aerial => Self::aerial(AltitudeBand::random(rng), SPAWN_X, speed),
            _ => Self::ground(kind, SPAWN_X, speed),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn base_y(&self) -> Option<f32> {
        self.band.map(|b| b.base_y())
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn hitbox(&self) -> RectHitbox {
        RectHitbox::from_min_size(self.pos, self.size)
    }

    /// Bob phase follows x, so a stalled hazard also stops bobbing
    fn apply_bob(&mut self) {
        if let Some(base_y) = self.base_y() {
            self.pos.y = base_y + AERIAL_AMPLITUDE * (self.pos.x / AERIAL_PERIOD).sin();
        }
    }

    /// Advance one tick. Inactive hazards stay frozen.
    pub fn update(&mut self) {
        if !self.active {
            return;
        }

        self.pos.x -= self.speed;
        self.apply_bob();

        self.anim_ticks += 1;
        if self.anim_ticks >= ANIMATION_TICKS * 2 {
            self.anim_ticks = 0;
            self.anim_frame = (self.anim_frame + 1) % 2;
        }

        if self.right() < 0.0 {
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::CollisionDetector;
    use crate::sim::player::PlayerCharacter;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[derive(Debug, Clone, Copy)]
    enum Dodge {
        Stand,
        Crouch,
        Jump,
    }

    /// Run one aerial hazard past the player, who dodges as it closes in
    fn runs_into(band: AltitudeBand, dodge: Dodge) -> bool {
        let mut player = PlayerCharacter::new();
        if let Dodge::Crouch = dodge {
            player.crouch();
        }
        let hitbox = player.hitbox();
        let mut obstacle = Obstacle::aerial(band, hitbox.x + hitbox.width + 30.0, 5.0);
        let mut detector = CollisionDetector::new(0);
        if let Dodge::Jump = dodge {
            assert!(player.jump());
        }

        for _ in 0..100 {
            player.update();
            obstacle.update();
            if detector.check_player_obstacle_collision(
                player.hitbox(),
                [obstacle.hitbox()],
                0,
                0.0,
            ) {
                return true;
            }
            if obstacle.right() < player.hitbox().x {
                break;
            }
        }
        false
    }

    fn ticks_until_inactive(mut o: Obstacle) -> u32 {
        let mut ticks = 0;
        while o.is_active() {
            o.update();
            ticks += 1;
            assert!(ticks < 10_000);
        }
        ticks
    }

    #[test]
    fn test_ground_hazard_rests_on_ground() {
        for kind in [ObstacleKind::SmallGround, ObstacleKind::LargeGround] {
            let mut o = Obstacle::ground(kind, SPAWN_X, 5.0);
            assert_eq!(o.pos.y + o.size.y, GROUND_Y);
            o.update();
            assert_eq!(o.pos.y + o.size.y, GROUND_Y);
            assert_eq!(o.pos.x, SPAWN_X - 5.0);
        }
    }

    #[test]
    fn test_narrow_hazard_retires_after_161_ticks() {
        let mut o = Obstacle::ground(ObstacleKind::SmallGround, 800.0, 5.0);
        o.size.x = 4.0;
        assert_eq!(ticks_until_inactive(o), 161);
    }

    #[test]
    fn test_retire_tick_matches_width() {
        // First tick n where 800 - 5n + w < 0
        let o = Obstacle::ground(ObstacleKind::SmallGround, 800.0, 5.0);
        let w = o.size.x;
        let expected = ((800.0 + w) / 5.0).floor() as u32 + 1;
        assert_eq!(ticks_until_inactive(o), expected);
    }

    #[test]
    fn test_inactive_is_permanent() {
        let mut o = Obstacle::ground(ObstacleKind::LargeGround, 10.0, 5.0);
        let mut flips = 0;
        let mut was_active = o.is_active();
        for _ in 0..50 {
            o.update();
            if was_active && !o.is_active() {
                flips += 1;
            }
            assert!(!(!was_active && o.is_active()));
            was_active = o.is_active();
        }
        assert_eq!(flips, 1);
        assert!(o.right() < 0.0);
    }

    #[test]
    fn test_aerial_bob_follows_x() {
        let mut o = Obstacle::aerial(AltitudeBand::Mid, 400.0, 5.0);
        let base = AltitudeBand::Mid.base_y();
        for _ in 0..100 {
            o.update();
            let expected = base + AERIAL_AMPLITUDE * (o.pos.x / AERIAL_PERIOD).sin();
            assert!((o.pos.y - expected).abs() < 1e-4);
            assert!((o.pos.y - base).abs() <= AERIAL_AMPLITUDE + 1e-4);
        }
    }

    #[test]
    fn test_stalled_aerial_does_not_bob() {
        let mut o = Obstacle::aerial(AltitudeBand::High, 400.0, 0.0);
        let y = o.pos.y;
        for _ in 0..30 {
            o.update();
        }
        assert_eq!(o.pos.y, y);
    }

    #[test]
    fn test_bands_are_ordered() {
        // Larger y is lower on screen
        assert!(AltitudeBand::Low.base_y() > AltitudeBand::Mid.base_y());
        assert!(AltitudeBand::Mid.base_y() > AltitudeBand::High.base_y());
    }

    #[test]
    fn test_low_band_is_cleared_by_jumping_only() {
        assert!(runs_into(AltitudeBand::Low, Dodge::Stand));
        assert!(runs_into(AltitudeBand::Low, Dodge::Crouch));
        assert!(!runs_into(AltitudeBand::Low, Dodge::Jump));
    }

    #[test]
    fn test_high_band_is_cleared_by_crouching() {
        assert!(runs_into(AltitudeBand::High, Dodge::Stand));
        assert!(!runs_into(AltitudeBand::High, Dodge::Crouch));
    }

    #[test]
    fn test_mid_band_catches_standing_player() {
        assert!(runs_into(AltitudeBand::Mid, Dodge::Stand));
        assert!(!runs_into(AltitudeBand::Mid, Dodge::Jump));
    }

    #[test]
    fn test_mid_band_vs_crouch_depends_on_bob_phase() {
        let mut player = PlayerCharacter::new();
        player.crouch();
        let crouched = player.hitbox();

        // One full bob cycle, lined up horizontally with the player
        let samples: Vec<bool> = (0..189)
            .map(|x| {
                let mut hit = Obstacle::aerial(AltitudeBand::Mid, x as f32, 0.0).hitbox();
                hit.x = crouched.x;
                crouched.intersects(&hit)
            })
            .collect();
        assert!(samples.iter().any(|&h| h));
        assert!(samples.iter().any(|&h| !h));
    }

    #[test]
    fn test_spawn_uses_only_three_bands() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let o = Obstacle::spawn(ObstacleKind::Aerial, 5.0, &mut rng);
            assert_eq!(o.pos.x, SPAWN_X);
            let band = o.band.unwrap();
            assert!(AltitudeBand::ALL.contains(&band));
        }
        let g = Obstacle::spawn(ObstacleKind::LargeGround, 5.0, &mut rng);
        assert!(g.band.is_none());
        assert_eq!(g.pos.x, SPAWN_X);
    }
}
