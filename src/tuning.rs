//! Data-driven game balance
//!
//! Defaults come from `crate::consts`; a JSON file can override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{SessionLimits, SpawnerConfig};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Gentle,
    #[default]
    Standard,
    Brutal,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Gentle => "Gentle",
            Difficulty::Standard => "Standard",
            Difficulty::Brutal => "Brutal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gentle" | "easy" => Some(Difficulty::Gentle),
            "standard" | "normal" => Some(Difficulty::Standard),
            "brutal" | "hard" => Some(Difficulty::Brutal),
            _ => None,
        }
    }

    /// Multiplier on base speed and speed growth
    pub fn speed_factor(&self) -> f32 {
        match self {
            Difficulty::Gentle => 0.8,
            Difficulty::Standard => 1.0,
            Difficulty::Brutal => 1.3,
        }
    }

    /// Ticks added to (or removed from) the spawn interval
    pub fn interval_offset(&self) -> i32 {
        match self {
            Difficulty::Gentle => 20,
            Difficulty::Standard => 0,
            Difficulty::Brutal => -25,
        }
    }
}

/// Balance knobs for one session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub spawner: SpawnerConfig,
    pub limits: SessionLimits,
}

impl Tuning {
    /// Defaults adjusted for a preset
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut tuning = Self::default();
        let spawner = &mut tuning.spawner;
        spawner.base_speed *= preset.speed_factor();
        spawner.speed_growth_rate *= preset.speed_factor();
        spawner.interval_base = spawner
            .interval_base
            .saturating_add_signed(preset.interval_offset());
        spawner.interval_floor = spawner
            .interval_floor
            .saturating_add_signed(preset.interval_offset() / 2);
        tuning.sanitized()
    }

    /// Parse JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    return tuning;
                }
                Err(e) => log::warn!("Bad tuning file {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Cannot read tuning file {}: {}", path.display(), e),
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Clamp values that would break the spawner or clock
    pub fn sanitized(mut self) -> Self {
        let spawner = &mut self.spawner;
        if !spawner.base_speed.is_finite() || spawner.base_speed < 0.0 {
            spawner.base_speed = 0.0;
        }
        if !spawner.speed_growth_rate.is_finite() || spawner.speed_growth_rate < 0.0 {
            spawner.speed_growth_rate = 0.0;
        }
        spawner.interval_floor = spawner.interval_floor.max(1);
        spawner.interval_base = spawner.interval_base.max(spawner.interval_floor);
        spawner.score_per_interval_step = spawner.score_per_interval_step.max(1);
        self.limits.time_limit_secs = self.limits.time_limit_secs.max(1);
        self
    }
}
