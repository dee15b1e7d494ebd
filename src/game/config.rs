//=========================================================================
// Game Configuration
//=========================================================================
//
// Viewport and gameplay tunables, fixed at startup.
//
// Every field has a default equal to the reference game, and every
// struct is `#[serde(default)]`, so a JSON file only needs the values it
// changes:
//
// ```json
// { "tuning": { "plant_period_ms": 2000 } }
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

//=== ConfigError =========================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    /// Parsed, but a value would break the game (zero period, bad size).
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Could not read config: {}", e),
            Self::Parse(e) => write!(f, "Invalid config: {}", e),
            Self::Invalid(reason) => write!(f, "Invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport: ViewportConfig,
    pub tuning: Tuning,
}

impl GameConfig {
    /// Loads a (possibly partial) config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parses and validates a (possibly partial) JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the game loop cannot run with: zero periods and
    /// lifetimes, empty sizes, a zero tick rate, speed floors slower than
    /// the starting speed, and a background that is not `#RRGGBB`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let viewport = &self.viewport;
        let tuning = &self.tuning;

        if viewport.width == 0 || viewport.height == 0 {
            return Err(invalid("viewport width and height must be positive"));
        }
        if viewport.tps.is_nan() || viewport.tps <= 0.0 {
            return Err(invalid("viewport.tps must be positive"));
        }
        if viewport.background_rgb().is_none() {
            return Err(invalid(format!(
                "viewport.background {:?} is not a #RRGGBB colour",
                viewport.background
            )));
        }

        for (name, ms) in [
            ("score_period_ms", tuning.score_period_ms),
            ("bird_period_ms", tuning.bird_period_ms),
            ("bird_lifetime_ms", tuning.bird_lifetime_ms),
            ("plant_period_ms", tuning.plant_period_ms),
            ("plant_lifetime_ms", tuning.plant_lifetime_ms),
        ] {
            if ms == 0 {
                return Err(invalid(format!("tuning.{} must be positive", name)));
            }
        }

        for (name, [w, h]) in [
            ("tile", [tuning.tile_width, tuning.tile_height]),
            ("player_size", tuning.player_size),
            ("bird_size", tuning.bird_size),
            ("plant_size", tuning.plant_size),
        ] {
            if w <= 0.0 || h <= 0.0 {
                return Err(invalid(format!("tuning.{} must be positive, got {}x{}", name, w, h)));
            }
        }

        if tuning.ground_speed_floor > tuning.ground_speed {
            return Err(invalid("tuning.ground_speed_floor is above ground_speed"));
        }
        if tuning.bird_speed_floor > tuning.bird_speed {
            return Err(invalid("tuning.bird_speed_floor is above bird_speed"));
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(reason.into())
}

//=== ViewportConfig ======================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
    pub background: String,
    /// World gravity (px/s²), applied on top of per-body gravity.
    pub gravity_y: f32,
    /// Logic ticks per second.
    pub tps: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            background: "#18CCFF".to_string(),
            gravity_y: 0.0,
            tps: 60.0,
        }
    }
}

impl ViewportConfig {
    pub fn width(&self) -> f32 {
        self.width as f32
    }

    pub fn height(&self) -> f32 {
        self.height as f32
    }

    /// `background` as RGB bytes, if it is a `#RRGGBB` string.
    pub fn background_rgb(&self) -> Option<[u8; 3]> {
        let hex = self.background.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some([channel(0)?, channel(2)?, channel(4)?])
    }
}

//=== Tuning ==============================================================

/// Gameplay constants. Speeds are px/s (negative is leftward), times ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    //--- Ground -----------------------------------------------------------
    pub tile_width: f32,
    pub tile_height: f32,
    /// New strips start this far left of the anchor edge.
    pub tile_overlap: f32,
    pub ground_speed: f32,
    pub ground_speed_floor: f32,

    //--- Player -----------------------------------------------------------
    pub player_spawn: [f32; 2],
    pub player_size: [f32; 2],
    pub player_gravity: f32,
    pub jump_velocity: f32,

    //--- Birds ------------------------------------------------------------
    pub bird_period_ms: u64,
    pub bird_lifetime_ms: u64,
    pub bird_speed: f32,
    pub bird_speed_floor: f32,
    /// Centre y of the upper and lower lane.
    pub bird_lanes: [f32; 2],
    pub bird_min_x: f32,
    pub bird_x_range: f32,
    pub bird_size: [f32; 2],

    //--- Plants -----------------------------------------------------------
    pub plant_period_ms: u64,
    pub plant_lifetime_ms: u64,
    pub plant_gravity: f32,
    /// Spawn height above the ground surface.
    pub plant_drop: f32,
    pub plant_pair_offset: f32,
    /// Unscaled sprite size.
    pub plant_size: [f32; 2],
    /// Hitbox x offset inside the sprite, unscaled.
    pub plant_hitbox_offset: f32,

    //--- Score ------------------------------------------------------------
    pub score_period_ms: u64,
    pub ping_every: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_width: 64.0,
            tile_height: 64.0,
            tile_overlap: 10.0,
            ground_speed: -180.0,
            ground_speed_floor: -230.0,

            player_spawn: [250.0, 200.0],
            player_size: [60.0, 105.0],
            player_gravity: 850.0,
            jump_velocity: -500.0,

            bird_period_ms: 6000,
            bird_lifetime_ms: 4000,
            bird_speed: -350.0,
            bird_speed_floor: -400.0,
            bird_lanes: [280.0, 360.0],
            bird_min_x: 780.0,
            bird_x_range: 900.0,
            bird_size: [60.0, 60.0],

            plant_period_ms: 3000,
            plant_lifetime_ms: 3500,
            plant_gravity: 750.0,
            plant_drop: 110.0,
            plant_pair_offset: 10.0,
            plant_size: [64.0, 100.0],
            plant_hitbox_offset: 10.0,

            score_period_ms: 250,
            ping_every: 100,
        }
    }
}

impl Tuning {
    pub fn bird_period(&self) -> Duration {
        Duration::from_millis(self.bird_period_ms)
    }

    pub fn bird_lifetime(&self) -> Duration {
        Duration::from_millis(self.bird_lifetime_ms)
    }

    pub fn plant_period(&self) -> Duration {
        Duration::from_millis(self.plant_period_ms)
    }

    pub fn plant_lifetime(&self) -> Duration {
        Duration::from_millis(self.plant_lifetime_ms)
    }

    pub fn score_period(&self) -> Duration {
        Duration::from_millis(self.score_period_ms)
    }

    pub fn player_spawn(&self) -> Vec2 {
        Vec2::from(self.player_spawn)
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::from(self.player_size)
    }

    pub fn bird_size(&self) -> Vec2 {
        Vec2::from(self.bird_size)
    }

    pub fn plant_size(&self) -> Vec2 {
        Vec2::from(self.plant_size)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_game() {
        let config = GameConfig::default();
        assert_eq!((config.viewport.width, config.viewport.height), (800, 500));
        assert_eq!(config.viewport.background, "#18CCFF");
        assert_eq!(config.viewport.background_rgb(), Some([0x18, 0xCC, 0xFF]));
        assert_eq!(config.viewport.gravity_y, 0.0);
        assert_eq!(config.tuning.bird_period(), Duration::from_millis(6000));
        assert_eq!(config.tuning.plant_lifetime(), Duration::from_millis(3500));
        assert_eq!(config.tuning.score_period(), Duration::from_millis(250));
    }

    #[test]
    fn partial_json_overrides_selectively() {
        let config = GameConfig::from_json_str(
            r#"{ "viewport": { "width": 1024 }, "tuning": { "plant_period_ms": 2000 } }"#,
        )
        .expect("valid json");

        assert_eq!(config.viewport.width, 1024);
        assert_eq!(config.viewport.height, 500);
        assert_eq!(config.tuning.plant_period_ms, 2000);
        assert_eq!(config.tuning.bird_period_ms, 6000);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(GameConfig::from_json_str("{}").ok(), Some(GameConfig::default()));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(GameConfig::from_json_str("{ nope"), Err(ConfigError::Parse(_))));
    }

    //=== Validation =======================================================

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_score_period_is_rejected() {
        let result = GameConfig::from_json_str(r#"{ "tuning": { "score_period_ms": 0 } }"#);
        match result {
            Err(ConfigError::Invalid(reason)) => assert!(reason.contains("score_period_ms")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn zero_tile_width_is_rejected() {
        let result = GameConfig::from_json_str(r#"{ "tuning": { "tile_width": 0 } }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn floor_above_starting_speed_is_rejected() {
        let mut config = GameConfig::default();
        config.tuning.bird_speed_floor = -100.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn bad_background_is_rejected() {
        let result = GameConfig::from_json_str(r##"{ "viewport": { "background": "blue" } }"##);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let mut viewport = ViewportConfig::default();
        viewport.background = "#12345G".to_string();
        assert_eq!(viewport.background_rgb(), None);
    }

    #[test]
    fn invalid_display_names_the_field() {
        let error = invalid("tuning.tile must be positive");
        assert_eq!(error.to_string(), "Invalid config: tuning.tile must be positive");
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = GameConfig::from_json_file("/definitely/not/here/dash-runner.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
