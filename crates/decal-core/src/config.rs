//! Runtime configuration for decal manipulation.
//!
//! All fields have defaults, so a JSON document only needs the keys it wants
//! to override:
//!
//! ```json
//! { "interaction_mode": "drag_anywhere", "move_sensitivity": 0.8 }
//! ```

use std::f32::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::limits::{HostLimits, ScaleLimits};

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which input variant drives the decal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Click an empty slot on the surface to place; drag the decal body to move it.
    ClickToPlace,
    /// Discrete move/scale/rotate handles around the decal.
    #[default]
    Handles,
    /// Drag anywhere on the decal body; no handles.
    DragAnywhere,
}

/// Pose the decal starts from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultPose {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: f32,
}

impl Default for DefaultPose {
    fn default() -> Self {
        Self {
            position: [0.0, 0.04, 0.15],
            rotation: [0.0, 0.0, 0.0],
            scale: 0.15,
        }
    }
}

/// Decal manipulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecalConfig {
    pub interaction_mode: InteractionMode,
    /// Local units per normalized pointer unit while moving.
    pub move_sensitivity: f32,
    /// Scale units per normalized pointer unit (vertical) while scaling.
    pub scale_sensitivity: f32,
    /// Radians per normalized pointer unit (vertical) while rotating.
    pub rotate_sensitivity: f32,
    /// Radians per normalized pointer unit while orbiting the host object.
    pub host_rotate_sensitivity: f32,
    pub scale_limits: ScaleLimits,
    /// Half-extent of the normalized local bounds a position may occupy.
    pub position_bound: f32,
    /// Per-axis bound for rotations entered through direct edits.
    pub rotation_bound: f32,
    pub host_limits: HostLimits,
    /// Clicks arriving this soon after a drag release are dropped.
    pub click_suppression_ms: u64,
    pub default_pose: DefaultPose,
}

impl Default for DecalConfig {
    fn default() -> Self {
        Self {
            interaction_mode: InteractionMode::default(),
            move_sensitivity: 0.5,
            scale_sensitivity: 0.3,
            rotate_sensitivity: 3.0,
            host_rotate_sensitivity: 1.0,
            scale_limits: ScaleLimits::default(),
            position_bound: 1.0,
            rotation_bound: PI,
            host_limits: HostLimits::default(),
            click_suppression_ms: 100,
            default_pose: DefaultPose::default(),
        }
    }
}

impl DecalConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Click suppression window in seconds.
    pub fn click_suppression_secs(&self) -> f64 {
        self.click_suppression_ms as f64 / 1000.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = self.scale_limits;
        if !(limits.min.is_finite() && limits.max.is_finite()) || limits.min <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "scale limits must be finite and positive, got {}..{}",
                limits.min, limits.max
            )));
        }
        if limits.min > limits.max {
            return Err(ConfigError::Invalid(format!(
                "scale_limits.min ({}) exceeds scale_limits.max ({})",
                limits.min, limits.max
            )));
        }

        let sensitivities = [
            ("move_sensitivity", self.move_sensitivity),
            ("scale_sensitivity", self.scale_sensitivity),
            ("rotate_sensitivity", self.rotate_sensitivity),
            ("host_rotate_sensitivity", self.host_rotate_sensitivity),
        ];
        for (name, value) in sensitivities {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }

        let bounds = [
            ("position_bound", self.position_bound),
            ("rotation_bound", self.rotation_bound),
            ("host_limits.pitch", self.host_limits.pitch),
            ("host_limits.yaw", self.host_limits.yaw),
        ];
        for (name, value) in bounds {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        let pose = self.default_pose;
        if !(limits.min..=limits.max).contains(&pose.scale) {
            return Err(ConfigError::Invalid(format!(
                "default_pose.scale ({}) is outside the scale limits",
                pose.scale
            )));
        }
        if pose.position.iter().any(|c| !c.is_finite() || c.abs() > self.position_bound) {
            return Err(ConfigError::Invalid(
                "default_pose.position must lie within position_bound".to_string(),
            ));
        }
        if pose.rotation.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::Invalid(
                "default_pose.rotation must be finite".to_string(),
            ));
        }

        Ok(())
    }
}
