//! Run settings
//!
//! Persisted as JSON next to the binary (or wherever the caller points).
//! Missing fields fall back to their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};
use crate::sim::Arena;

/// Configuration for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena width in world units
    pub arena_width: f32,
    /// Arena height in world units
    pub arena_height: f32,
    /// Run seed for power-up rolls
    pub seed: u64,
    /// Gameplay time multiplier (1.0 = normal speed)
    pub time_scale: f32,
    /// Total boss lives for the match
    pub boss_lives: u32,
    /// Seconds before the first random power-up spawns (None disables it)
    pub initial_power_up_delay: Option<f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            seed: 0x5EED,
            time_scale: 1.0,
            boss_lives: BOSS_LIVES,
            initial_power_up_delay: Some(INITIAL_POWER_UP_DELAY),
        }
    }
}

impl Settings {
    /// Smallest arena that fits the boss at its spawn row and the player below it
    pub const MIN_ARENA_WIDTH: f32 = BOSS_SIZE;
    pub const MIN_ARENA_HEIGHT: f32 = BOSS_START_Y + BOSS_SIZE + PLAYER_SIZE;

    /// Check that the settings describe a playable match
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.arena_width), ("height", self.arena_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidArena { name, value });
            }
        }
        if self.arena_width < Self::MIN_ARENA_WIDTH || self.arena_height < Self::MIN_ARENA_HEIGHT {
            return Err(ConfigError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
                min_width: Self::MIN_ARENA_WIDTH,
                min_height: Self::MIN_ARENA_HEIGHT,
            });
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(ConfigError::InvalidTimeScale(self.time_scale));
        }
        if self.boss_lives == 0 {
            return Err(ConfigError::NoBossLives);
        }
        Ok(())
    }

    /// Arena described by these settings
    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Read settings from a JSON file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings)
    }

    /// Read settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Failed to load settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_arena() {
        let settings = Settings {
            arena_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidArena { name: "width", .. })
        ));

        let settings = Settings {
            arena_height: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidArena { name: "height", .. })
        ));

        let settings = Settings {
            arena_width: 100.0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::ArenaTooSmall { .. })));
    }

    #[test]
    fn test_rejects_bad_time_scale_and_lives() {
        let settings = Settings {
            time_scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::InvalidTimeScale(_))));

        let settings = Settings {
            boss_lives: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::NoBossLives)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "boss_lives": 2 }"#).unwrap();
        assert_eq!(settings.boss_lives, 2);
        assert_eq!(settings.arena_width, ARENA_WIDTH);
        assert_eq!(settings.initial_power_up_delay, Some(INITIAL_POWER_UP_DELAY));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("boss_arena_settings_{}.json", std::process::id()));
        let settings = Settings {
            seed: 42,
            time_scale: 0.5,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::try_load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let loaded = Settings::load("/nonexistent/boss_arena/settings.json");
        assert_eq!(loaded, Settings::default());
    }
}
