//! Session Configuration
//!
//! Every deployment-time choice of the session in one serde struct: which
//! locomotion mode and camera policy to use, probe distances, clip names,
//! interaction entries and per-environment coordinate fixes. `Default`
//! matches the original walking demo; JSON files may override any subset.

use std::f32::consts::PI;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{CameraError, CameraPolicy, CameraSocket, CameraSockets};
use crate::input::ActionRequest;
use crate::interaction::{self, InteractionError, InteractionSpec};
use crate::physics::{CollisionProbe, DEFAULT_BLOCK_DISTANCE, EnvironmentTransform};
use crate::player::{HEAD_OFFSET, LocomotionMode, LocomotionModel, TURN_SPEED};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Interaction(#[from] InteractionError),
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Collision probe distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// A hit closer than this blocks forward movement
    pub threshold: f32,
    /// Height of the foot ray above the player origin
    pub foot_offset: f32,
    /// Height of the head ray above the foot ray (cylindrical mode only)
    pub head_offset: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_BLOCK_DISTANCE,
            foot_offset: 0.0,
            head_offset: HEAD_OFFSET,
        }
    }
}

/// Clip names for the logical actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub idle: String,
    pub walk: String,
    pub secondary: String,
    /// Clips that stop at their end instead of looping
    pub play_once: Vec<String>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            idle: "standing".to_string(),
            walk: "walking".to_string(),
            secondary: "dancing".to_string(),
            play_once: vec!["sitting".to_string()],
        }
    }
}

impl AnimationConfig {
    pub fn clip_for(&self, request: ActionRequest) -> &str {
        match request {
            ActionRequest::Idle => &self.idle,
            ActionRequest::Walk => &self.walk,
            ActionRequest::Secondary => &self.secondary,
        }
    }
}

/// Uniform scale of the bundled room model
pub const ROOM_SCALE: f32 = 0.6;

/// Turn of the bundled room model about +Y
pub const ROOM_ROTATION_Y: f32 = PI / 1.5;

/// Vertical drop of the bundled room model so its floor meets y = 0
pub const ROOM_DROP: f32 = -20.0;

/// Per-environment placement and coordinate fixes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Component-wise sign applied to interaction target positions
    pub target_mirror: Vec3,
    /// Placement of the environment model
    pub transform: EnvironmentTransform,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            target_mirror: Vec3::ONE,
            transform: EnvironmentTransform {
                scale: ROOM_SCALE,
                rotation_y: ROOM_ROTATION_Y,
                translation: Vec3::new(0.0, ROOM_DROP, 0.0),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Fail a load still pending after this many seconds of ticks; `None` waits forever
    pub load_timeout_secs: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub position: Vec3,
    pub yaw: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub locomotion: LocomotionMode,
    pub probe: ProbeConfig,
    /// Turn speed in radians per second
    pub turn_rate: f32,
    pub camera: CameraPolicy,
    /// Sockets for the socket camera policy; empty selects the standard set
    pub camera_sockets: Vec<CameraSocket>,
    pub animation: AnimationConfig,
    /// Sound cue played while walking
    pub walk_cue: Option<String>,
    pub interactions: Vec<InteractionSpec>,
    pub environment: EnvironmentConfig,
    pub assets: AssetConfig,
    /// Upper clamp for a frame's elapsed time in seconds
    pub max_frame_delta: f32,
    pub spawn: SpawnConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionMode::default(),
            probe: ProbeConfig::default(),
            turn_rate: TURN_SPEED,
            camera: CameraPolicy::default(),
            camera_sockets: Vec::new(),
            animation: AnimationConfig::default(),
            walk_cue: Some("footsteps".to_string()),
            interactions: Vec::new(),
            environment: EnvironmentConfig::default(),
            assets: AssetConfig::default(),
            max_frame_delta: 0.25,
            spawn: SpawnConfig::default(),
        }
    }
}

fn require(ok: bool, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if ok { Ok(()) } else { Err(ConfigError::Invalid(message())) }
}

impl SessionConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value the session relies on, including interaction entries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require(self.probe.threshold > 0.0, || {
            format!("probe threshold must be positive, got {}", self.probe.threshold)
        })?;
        require(self.max_frame_delta > 0.0, || {
            format!("max_frame_delta must be positive, got {}", self.max_frame_delta)
        })?;
        require(self.turn_rate.is_finite(), || "turn_rate must be finite".to_string())?;

        match self.locomotion {
            LocomotionMode::Flat(flat) => {
                require(flat.speed.is_finite() && flat.speed >= 0.0, || {
                    format!("flat speed must be non-negative, got {}", flat.speed)
                })?;
            }
            LocomotionMode::Cylindrical(cylinder) => {
                require(cylinder.radius > 0.0, || {
                    format!("cylinder radius must be positive, got {}", cylinder.radius)
                })?;
                require(
                    cylinder.angular_speed.is_finite() && cylinder.linear_speed.is_finite(),
                    || "cylinder speeds must be finite".to_string(),
                )?;
            }
        }

        if let Some(timeout) = self.assets.load_timeout_secs {
            require(timeout > 0.0, || format!("load timeout must be positive, got {timeout}"))?;
        }

        if self.camera == CameraPolicy::Sockets {
            self.camera_sockets()?;
        }

        interaction::resolve_all(&self.interactions)?;
        Ok(())
    }

    /// Locomotion model for the configured mode and probe distances.
    pub fn locomotion_model(&self) -> LocomotionModel {
        let offsets = match self.locomotion {
            LocomotionMode::Flat(_) => vec![self.probe.foot_offset],
            LocomotionMode::Cylindrical(_) => vec![
                self.probe.foot_offset,
                self.probe.foot_offset + self.probe.head_offset,
            ],
        };
        LocomotionModel::new(self.locomotion, CollisionProbe::new(offsets, self.probe.threshold))
    }

    /// Socket set for the socket camera policy.
    pub fn camera_sockets(&self) -> Result<CameraSockets, ConfigError> {
        if self.camera_sockets.is_empty() {
            Ok(CameraSockets::standard())
        } else {
            Ok(CameraSockets::new(self.camera_sockets.clone())?)
        }
    }
}
