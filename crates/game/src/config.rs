use std::path::{Path, PathBuf};

use glam::Vec3;
use glowfield_camera::{Camera, DEFAULT_PITCH, DEFAULT_YAW};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything tunable about a run. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub world: WorldConfig,
    pub camera: CameraConfig,
    /// RNG seed for pickup placement; entropy when absent.
    pub seed: Option<u64>,
    /// Seconds of game time between status reports.
    pub report_interval: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of the square ground plane.
    pub size: f32,
    pub max_pickups: usize,
    /// Reach of the player added to a pickup's bounding radius.
    pub collision_radius: f32,
    pub points_per_pickup: u32,
    pub pickup_segments: u32,
    /// Height of the ground plane.
    pub ground_offset: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub speed: f32,
    pub sensitivity: f32,
    pub acceleration: f32,
    pub friction: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            world: WorldConfig::default(),
            camera: CameraConfig::default(),
            seed: None,
            report_interval: 5.0,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Glowfield".into(),
            vsync: true,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            max_pickups: 15,
            collision_radius: 0.8,
            points_per_pickup: 10,
            pickup_segments: 16,
            ground_offset: -0.5,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 5.0),
            speed: 8.0,
            sensitivity: 0.15,
            acceleration: 20.0,
            friction: 15.0,
        }
    }
}

impl CameraConfig {
    /// Camera at the configured position, looking down -Z.
    pub fn build(&self) -> Camera {
        Camera::new(self.position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
            .with_speed(self.speed)
            .with_sensitivity(self.sensitivity)
            .with_acceleration(self.acceleration)
            .with_friction(self.friction)
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_owned()));
        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window size must be non-zero");
        }
        if !(self.world.size > 0.0) {
            return invalid("world.size must be positive");
        }
        if self.world.max_pickups == 0 {
            return invalid("world.max_pickups must be at least 1");
        }
        if !(self.world.collision_radius > 0.0) {
            return invalid("world.collision_radius must be positive");
        }
        if self.world.pickup_segments == 0 {
            return invalid("world.pickup_segments must be at least 1");
        }
        if !(self.report_interval > 0.0) {
            return invalid("report_interval must be positive");
        }
        if !(self.camera.speed > 0.0) || !(self.camera.sensitivity > 0.0) {
            return invalid("camera speed and sensitivity must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = GameConfig::from_yaml_str(
            "seed: 7\nworld:\n  max_pickups: 3\ncamera:\n  position: [1.0, 1.5, -2.0]\n",
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.world.max_pickups, 3);
        assert_eq!(config.world.size, 20.0);
        assert_eq!(config.camera.position, Vec3::new(1.0, 1.5, -2.0));
        assert_eq!(config.camera.speed, 8.0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn empty_text_is_default() {
        assert_eq!(GameConfig::from_yaml_str("  \n").unwrap(), GameConfig::default());
    }

    #[test]
    fn rejects_invalid_values() {
        let err = GameConfig::from_yaml_str("world:\n  size: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(GameConfig::from_yaml_str("report_interval: -1\n").is_err());
        assert!(matches!(
            GameConfig::from_yaml_str("world: [1, 2]\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn yaml_round_trips() {
        let config = GameConfig {
            seed: Some(99),
            ..GameConfig::default()
        };
        let text = config.to_yaml().unwrap();
        assert_eq!(GameConfig::from_yaml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GameConfig::load("/nonexistent/glowfield.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/glowfield.yaml"));
    }

    #[test]
    fn camera_config_builds_tuned_camera() {
        let camera = CameraConfig::default().build();
        assert_eq!(camera.position(), Vec3::new(0.0, 2.0, 5.0));
        assert_eq!(camera.speed(), 8.0);
        assert_eq!(camera.sensitivity(), 0.15);
    }
}
