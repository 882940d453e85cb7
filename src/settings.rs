//! Game settings
//!
//! Everything the simulation reads from configuration lives here. Values are
//! immutable for a session; the ground speed and spawn period the session
//! derives from them change with difficulty, the settings themselves never do.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors from reading or writing a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {}", e),
            SettingsError::Parse(e) => write!(f, "settings parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,
    /// Frame rate the presentation loop paces itself to
    pub framerate: u32,

    // === Speeds ===
    /// Spawn interval at tier 0 (milliseconds)
    pub obstacle_interval_ms: f32,
    pub obstacle_speed: f32,
    pub ground_speed: f32,
    pub background_speed: f32,

    // === Glider ===
    pub gravity: f32,
    pub jump_height: f32,
    pub animation_fps: f32,
    /// Degrees of tilt per unit of vertical velocity
    pub rotation_factor: f32,

    // === Obstacles ===
    pub obstacle_scale_factor: f32,
    pub despawn_edge: f32,

    // === Difficulty ===
    /// Obstacle/ground speed multipliers per tier
    pub speed_factors: [f32; 3],
    /// Spawn interval divisors per tier
    pub timer_factors: [f32; 3],
    /// Highest score that still counts as easy
    pub easy_ceiling: u32,
    /// Scores at which tiers 1 and 2 begin
    pub tier_thresholds: [u32; 2],

    /// RNG seed for obstacle placement
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            framerate: FRAMERATE,

            obstacle_interval_ms: OBSTACLE_INTERVAL_MS,
            obstacle_speed: OBSTACLE_SPEED,
            ground_speed: GROUND_SPEED,
            background_speed: BACKGROUND_SPEED,

            gravity: GRAVITY,
            jump_height: JUMP_HEIGHT,
            animation_fps: GLIDER_ANIMATION_FPS,
            rotation_factor: ROTATION_FACTOR,

            obstacle_scale_factor: OBSTACLE_SCALE_FACTOR,
            despawn_edge: DESPAWN_EDGE,

            speed_factors: GAME_SPEED_FACTORS,
            timer_factors: TIMER_FACTORS,
            easy_ceiling: 15,
            tier_thresholds: [18, 35],

            seed: 0x5eed_f1a9,
        }
    }
}

impl Settings {
    /// Speed multiplier for a tier (out-of-range tiers use the hardest entry)
    pub fn speed_factor(&self, tier: usize) -> f32 {
        self.speed_factors[tier.min(self.speed_factors.len() - 1)]
    }

    /// Spawn interval divisor for a tier (out-of-range tiers use the hardest entry)
    pub fn timer_factor(&self, tier: usize) -> f32 {
        self.timer_factors[tier.min(self.timer_factors.len() - 1)]
    }

    /// Base spawn interval in seconds
    pub fn obstacle_interval_secs(&self) -> f32 {
        self.obstacle_interval_ms / 1000.0
    }

    /// Fixed frame delta matching the configured frame rate
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.framerate.max(1) as f32
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read settings from a JSON file
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.window_width, 500.0);
        assert_eq!(s.window_height, 800.0);
        assert_eq!(s.ground_speed, s.obstacle_speed);
        assert!((s.background_speed - 200.0).abs() < 0.001);
        assert!((s.obstacle_interval_secs() - 1.3).abs() < 0.0001);
    }

    #[test]
    fn test_factor_lookup_clamps_tier() {
        let s = Settings::default();
        assert_eq!(s.speed_factor(1), 1.5);
        assert_eq!(s.timer_factor(2), 1.4);
        assert_eq!(s.speed_factor(7), 2.0);
        assert_eq!(s.timer_factor(usize::MAX), 1.4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "gravity": 1000.0, "seed": 7 }"#).unwrap();
        assert_eq!(s.gravity, 1000.0);
        assert_eq!(s.seed, 7);
        assert_eq!(s.jump_height, JUMP_HEIGHT);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ gravity: }").is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("glider_run_settings_{}.json", std::process::id()));
        let mut s = Settings::default();
        s.jump_height = 420.0;
        s.save(&path).unwrap();
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, s);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let loaded = Settings::load("/nonexistent/glider_run/settings.json");
        assert_eq!(loaded, Settings::default());
    }
}
