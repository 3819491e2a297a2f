use cardroom_render::CameraConfig;
use cardroom_scene::RoomLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or validating configuration.
///
/// An invalid configuration is fatal: the apps refuse to start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} = {value} is invalid: expected {expected}")]
    Invalid {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

fn open_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value,
            expected: "a value in (0, 1)",
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value,
            expected: "a positive finite value",
        })
    }
}

/// Tuning for the pose animator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Fraction of the remaining distance covered per tick.
    pub position_damping: f32,
    /// Fraction of the remaining rotation covered per tick.
    pub rotation_damping: f32,
    /// How fast the examine target follows the camera.
    pub target_damping: f32,
    /// Distance in front of the camera at which a raised card is held.
    pub standoff: f32,
    /// Positional arrival tolerance.
    pub arrival_distance: f32,
    /// Angular arrival tolerance, radians.
    pub arrival_angle: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            position_damping: 0.05,
            rotation_damping: 0.05,
            target_damping: 0.25,
            standoff: 0.7,
            arrival_distance: 0.01,
            arrival_angle: 0.01,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        open_unit("position_damping", self.position_damping)?;
        open_unit("rotation_damping", self.rotation_damping)?;
        open_unit("target_damping", self.target_damping)?;
        positive("standoff", self.standoff)?;
        positive("arrival_distance", self.arrival_distance)?;
        positive("arrival_angle", self.arrival_angle)?;
        Ok(())
    }
}

/// Everything a [`crate::Stage`] needs: animation tuning, camera and room.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub room: RoomLayout,
    /// Pointer travel in pixels after which a press becomes an orbit drag.
    pub drag_threshold: Option<f32>,
}

impl StageConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded stage config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.animation.validate()?;
        positive("camera.fov_degrees", self.camera.fov_degrees)?;
        positive("camera.near", self.camera.near)?;
        positive("camera.far", self.camera.far - self.camera.near)?;
        positive("camera.damping", self.camera.damping)?;
        if self.camera.damping > 1.0 {
            return Err(ConfigError::Invalid {
                field: "camera.damping",
                value: self.camera.damping,
                expected: "a value in (0, 1]",
            });
        }
        positive("camera.min_distance", self.camera.min_distance)?;
        positive("camera.max_distance", self.camera.max_distance)?;
        if self.camera.min_distance > self.camera.max_distance {
            return Err(ConfigError::Invalid {
                field: "camera.max_distance",
                value: self.camera.max_distance,
                expected: "a value no smaller than camera.min_distance",
            });
        }
        if !self.camera.rotate_speed.is_finite() {
            return Err(ConfigError::Invalid {
                field: "camera.rotate_speed",
                value: self.camera.rotate_speed,
                expected: "a finite value",
            });
        }
        if let Some(threshold) = self.drag_threshold {
            positive("drag_threshold", threshold)?;
        }
        Ok(())
    }
}
