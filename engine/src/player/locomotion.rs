//! Locomotion Model
//!
//! Advances the player's transform once per tick. Two modes, chosen at
//! configuration time:
//!
//! - **Flat**: walk along the facing direction at a constant speed.
//! - **Cylindrical**: the player stands on a large cylinder whose axis runs
//!   along world X beneath them. Walking rotates the player about that axis
//!   by `cos(yaw)`-weighted degrees and slides along X by a `sin(yaw)`-weighted
//!   distance, so heading straight "up" the cylinder curves the player over it.
//!
//! In both modes turning is never blocked; only forward translation is gated
//! by the collision probe. There is no momentum: releasing and pressing
//! forward again resumes at full speed.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Player;
use crate::physics::{CollisionProbe, DEFAULT_BLOCK_DISTANCE, EnvironmentGeometry};

/// Flat-mode walk speed in world units per second
pub const WALK_SPEED: f32 = 100.0;

/// Cylindrical-mode rotation about the axis in degrees per second
pub const ARC_ANGULAR_SPEED: f32 = 5.0;

/// Cylindrical-mode slide along world X in units per second
pub const ARC_LINEAR_SPEED: f32 = 150.0;

/// Default cylinder radius in world units
pub const ARC_RADIUS: f32 = 2000.0;

/// Turn speed in radians per second
pub const TURN_SPEED: f32 = 3.0;

/// Height of the head probe above the foot probe
pub const HEAD_OFFSET: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatConfig {
    pub speed: f32,
}

impl Default for FlatConfig {
    fn default() -> Self {
        Self { speed: WALK_SPEED }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderConfig {
    /// Distance from the player's feet down to the cylinder axis
    pub radius: f32,
    /// Degrees per second about the axis at full `cos(yaw)`
    pub angular_speed: f32,
    /// Units per second along world X at full `sin(yaw)`
    pub linear_speed: f32,
}

impl Default for CylinderConfig {
    fn default() -> Self {
        Self {
            radius: ARC_RADIUS,
            angular_speed: ARC_ANGULAR_SPEED,
            linear_speed: ARC_LINEAR_SPEED,
        }
    }
}

/// Locomotion mode selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LocomotionMode {
    Flat(FlatConfig),
    Cylindrical(CylinderConfig),
}

impl Default for LocomotionMode {
    fn default() -> Self {
        Self::Flat(FlatConfig::default())
    }
}

/// What one locomotion step did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Forward movement was requested and the probe reported an obstacle
    pub blocked: bool,
    /// Forward movement was requested but no environment is loaded yet
    pub environment_missing: bool,
    /// World-space change in position
    pub displacement: Vec3,
}

#[derive(Debug, Clone)]
pub struct LocomotionModel {
    mode: LocomotionMode,
    probe: CollisionProbe,
}

impl LocomotionModel {
    pub fn new(mode: LocomotionMode, probe: CollisionProbe) -> Self {
        Self { mode, probe }
    }

    /// Flat mode with a single foot-height probe.
    pub fn flat(config: FlatConfig) -> Self {
        Self::new(LocomotionMode::Flat(config), CollisionProbe::foot(DEFAULT_BLOCK_DISTANCE))
    }

    /// Cylindrical mode probing at foot and head height.
    pub fn cylindrical(config: CylinderConfig) -> Self {
        Self::new(
            LocomotionMode::Cylindrical(config),
            CollisionProbe::foot_and_head(HEAD_OFFSET, DEFAULT_BLOCK_DISTANCE),
        )
    }

    pub fn mode(&self) -> &LocomotionMode {
        &self.mode
    }

    pub fn probe(&self) -> &CollisionProbe {
        &self.probe
    }

    /// Whether the probe reports an obstacle ahead of the player.
    pub fn is_blocked(&self, player: &Player, env: &EnvironmentGeometry) -> bool {
        self.probe
            .is_blocked(env, player.position, player.forward(), player.up())
    }

    /// Advance the player by `dt` seconds.
    ///
    /// Forward movement is skipped when `env` is `None`; turning still applies.
    /// Position is written only once the probe has cleared the move.
    pub fn step(&self, player: &mut Player, env: Option<&EnvironmentGeometry>, dt: f32) -> StepReport {
        let dt = dt.max(0.0);
        let mut report = StepReport::default();

        if player.move_forward {
            match env {
                None => report.environment_missing = true,
                Some(env) if self.is_blocked(player, env) => {
                    debug!(position = ?player.position, "forward movement blocked");
                    report.blocked = true;
                }
                Some(_) => {
                    let (position, pitch) = self.advance(player, dt);
                    report.displacement = position - player.position;
                    player.position = position;
                    player.pitch = pitch;
                }
            }
        }

        player.yaw += player.turn_rate * dt;
        report
    }

    /// Position and pitch after walking forward for `dt` seconds.
    fn advance(&self, player: &Player, dt: f32) -> (Vec3, f32) {
        match self.mode {
            LocomotionMode::Flat(config) => {
                (player.position + player.forward() * config.speed * dt, player.pitch)
            }
            LocomotionMode::Cylindrical(config) => {
                let rotation = player.yaw.cos();
                let translation = player.yaw.sin();

                let angle = (config.angular_speed * dt * rotation).to_radians();
                let pivot = player.position - player.up() * config.radius;
                let mut position = pivot + Quat::from_rotation_x(angle) * (player.position - pivot);
                position.x += config.linear_speed * dt * translation;

                (position, player.pitch + angle)
            }
        }
    }
}

impl Default for LocomotionModel {
    fn default() -> Self {
        Self::flat(FlatConfig::default())
    }
}
