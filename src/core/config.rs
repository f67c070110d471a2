//! Gameplay tuning loaded from an external RON file.
//!
//! Every tunable a level designer would set by hand lives here so it
//! can be adjusted without recompiling. Missing sections or fields fall back
//! to the defaults below.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// Default location of the gameplay config.
pub const GAMEPLAY_CONFIG_PATH: &str = "assets/data/gameplay.ron";

/// Session targets and time limit.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub total_bags: u32,
    pub total_rubbish: u32,
    /// Countdown in seconds
    pub time_limit: f32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            total_bags: 3,
            total_rubbish: 8,
            time_limit: 180.0,
        }
    }
}

/// Player locomotion and interaction tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Root motion speed at half animation magnitude
    pub walk_speed: f32,
    /// Root motion speed at full animation magnitude
    pub run_speed: f32,
    /// Turn rate in degrees per second
    pub rotation_speed: f32,
    pub jump_speed: f32,
    /// Coyote time and jump buffer window, in seconds
    pub jump_grace_period: f32,
    /// Horizontal speed while airborne
    pub jump_horizontal_speed: f32,
    pub gravity_y: f32,
    /// Vertical speed held while grounded so the controller hugs the floor
    pub ground_stick_speed: f32,
    /// Vertical speed below which the falling flag is raised
    pub falling_threshold: f32,
    pub pickup_range: f32,
    pub enter_range: f32,
    /// Normalized time in the pickup clip at which the item attaches
    pub pickup_attach_time: f32,
    /// Length of the pickup clip in seconds
    pub pickup_duration: f32,
    /// Damping time for the input magnitude animator parameter
    pub input_damp_time: f32,
    /// Maximum step height restored while grounded
    pub step_offset: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            walk_speed: 2.0,
            run_speed: 6.0,
            rotation_speed: 720.0,
            jump_speed: 5.0,
            jump_grace_period: 0.2,
            jump_horizontal_speed: 3.0,
            gravity_y: -9.81,
            ground_stick_speed: -0.5,
            falling_threshold: -2.0,
            pickup_range: 2.0,
            enter_range: 2.0,
            pickup_attach_time: 0.5,
            pickup_duration: 1.0,
            input_damp_time: 0.05,
            step_offset: 0.3,
        }
    }
}

/// Sweeper drive model and wheel solver tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    pub max_acceleration: f32,
    pub brake_acceleration: f32,
    pub turn_sensitivity: f32,
    /// Degrees
    pub max_steer_angle: f32,
    pub mass: f32,
    /// Local centre of mass of the chassis
    pub center_of_mass: (f32, f32, f32),
    pub wheel_radius: f32,
    /// Ray length below each wheel mount that still counts as ground contact
    pub suspension_length: f32,
    /// Lateral slip resistance, per wheel, in newtons per m/s
    pub lateral_grip: f32,
    /// Delay between a brush touching rubbish and the rubbish despawning
    pub cleanup_delay: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            max_acceleration: 30.0,
            brake_acceleration: 50.0,
            turn_sensitivity: 1.0,
            max_steer_angle: 30.0,
            mass: 800.0,
            center_of_mass: (0.0, -0.4, 0.0),
            wheel_radius: 0.35,
            suspension_length: 0.6,
            lateral_grip: 1200.0,
            cleanup_delay: 1.0,
        }
    }
}

/// Follow camera tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
    pub player_distance: f32,
    pub vehicle_distance: f32,
    /// How quickly the camera blends toward the live rig
    pub blend_speed: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.5,
            invert_y: false,
            player_distance: 5.0,
            vehicle_distance: 9.0,
            blend_speed: 6.0,
        }
    }
}

/// Sound cues.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioTuning {
    pub bag_collected: String,
    pub rubbish_cleaned: String,
    pub volume: f64,
}

impl Default for AudioTuning {
    fn default() -> Self {
        Self {
            bag_collected: "sounds/bag_collected.ogg".to_string(),
            rubbish_cleaned: "sounds/rubbish_cleaned.ogg".to_string(),
            volume: 0.6,
        }
    }
}

/// Level layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// Seed for scattering bags and rubbish
    pub seed: u64,
    /// Half size of the square play area
    pub area_half_extent: f32,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            seed: 7,
            area_half_extent: 30.0,
        }
    }
}

/// All gameplay tuning, loaded from assets/data/gameplay.ron.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub score: ScoreConfig,
    pub player: PlayerTuning,
    pub vehicle: VehicleTuning,
    pub camera: CameraTuning,
    pub audio: AudioTuning,
    pub level: LevelTuning,
}

impl GameplayConfig {
    /// Parse and validate config text.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron(&display, &contents)
    }

    /// Load from the default path, falling back to defaults on any error.
    pub fn load() -> Self {
        match Self::load_from(GAMEPLAY_CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded gameplay config from {}", GAMEPLAY_CONFIG_PATH);
                config
            }
            Err(e @ ConfigError::ReadError { .. }) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.score.time_limit >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "score.time_limit",
                reason: format!("must be non-negative, got {}", self.score.time_limit),
            });
        }
        let positive = [
            ("player.pickup_range", self.player.pickup_range),
            ("player.enter_range", self.player.enter_range),
            ("player.pickup_duration", self.player.pickup_duration),
            ("vehicle.wheel_radius", self.vehicle.wheel_radius),
            ("vehicle.mass", self.vehicle.mass),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {}", value),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.player.pickup_attach_time) {
            return Err(ConfigError::Invalid {
                field: "player.pickup_attach_time",
                reason: "must be a normalized time in 0..=1".to_string(),
            });
        }
        if self.vehicle.cleanup_delay < 0.0 {
            return Err(ConfigError::Invalid {
                field: "vehicle.cleanup_delay",
                reason: "must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = GameplayConfig::from_ron(
            "test.ron",
            "(score: (total_bags: 2, total_rubbish: 1, time_limit: 60.0))",
        )
        .unwrap();
        assert_eq!(config.score.total_bags, 2);
        assert_eq!(config.score.total_rubbish, 1);
        assert_eq!(config.player.pickup_range, 2.0);
        assert_eq!(config.vehicle.max_steer_angle, 30.0);
    }

    #[test]
    fn negative_time_limit_is_rejected() {
        let err = GameplayConfig::from_ron("test.ron", "(score: (time_limit: -1.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "score.time_limit", .. }));
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let err = GameplayConfig::from_ron("test.ron", "(score: (").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = GameplayConfig::load_from("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn shipped_config_parses() {
        let contents = include_str!("../../assets/data/gameplay.ron");
        GameplayConfig::from_ron(GAMEPLAY_CONFIG_PATH, contents).unwrap();
    }
}
