//! Camera Rig
//!
//! Derives the render camera pose from the player's transform every tick.
//!
//! - **Follow**: a fixed world-space offset above and behind the player,
//!   looking at a point above the player's origin. With `arc` enabled the
//!   offset is swung about world X by the player's pitch so the camera keeps
//!   its place relative to a player walking over a cylinder.
//! - **Sockets**: the pose is read from the player's active camera socket.
//!
//! Poses snap instantly; smoothing belongs to whoever consumes the pose.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{CameraError, CameraPose, RenderCamera};
use crate::player::Player;

/// Camera height above the player in follow mode
pub const FOLLOW_HEIGHT: f32 = 200.0;

/// Camera distance behind the player (toward -Z) in follow mode
pub const FOLLOW_DISTANCE: f32 = 200.0;

/// Look target height above the player origin
pub const LOOK_HEIGHT: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    pub height: f32,
    pub distance: f32,
    pub look_height: f32,
    /// Swing the offset with the player's pitch (cylindrical locomotion)
    pub arc: bool,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            height: FOLLOW_HEIGHT,
            distance: FOLLOW_DISTANCE,
            look_height: LOOK_HEIGHT,
            arc: false,
        }
    }
}

impl FollowConfig {
    /// Camera offset from the player for a camera angle in radians.
    pub fn offset(&self, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(
            0.0,
            self.height * cos + self.distance * sin,
            self.height * sin - self.distance * cos,
        )
    }

    /// Look target offset from the player for a camera angle in radians.
    pub fn look_offset(&self, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(0.0, self.look_height * cos, self.look_height * sin)
    }
}

/// Camera policy, chosen at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum CameraPolicy {
    Follow(FollowConfig),
    /// Read the pose from the player's active camera socket
    Sockets,
}

impl Default for CameraPolicy {
    fn default() -> Self {
        Self::Follow(FollowConfig::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    policy: CameraPolicy,
    pose: Option<CameraPose>,
}

impl CameraRig {
    pub fn new(policy: CameraPolicy) -> Self {
        Self { policy, pose: None }
    }

    pub fn policy(&self) -> &CameraPolicy {
        &self.policy
    }

    /// Last computed pose.
    pub fn pose(&self) -> Option<CameraPose> {
        self.pose
    }

    /// Recompute the pose from the player's current transform.
    ///
    /// Fails with [`CameraError::NoSockets`] under the socket policy when the
    /// player carries no sockets; the previous pose is kept.
    pub fn update(&mut self, player: &Player) -> Result<CameraPose, CameraError> {
        let pose = match self.policy {
            CameraPolicy::Follow(config) => {
                let angle = if config.arc { player.pitch } else { 0.0 };
                CameraPose::new(
                    player.position + config.offset(angle),
                    player.position + config.look_offset(angle),
                )
            }
            CameraPolicy::Sockets => {
                let sockets = player.camera_sockets.as_ref().ok_or(CameraError::NoSockets)?;
                sockets.active().world_pose(&player.transform())
            }
        };
        self.pose = Some(pose);
        Ok(pose)
    }

    /// Push the last pose into a render camera. Returns false if none was computed yet.
    pub fn apply(&self, camera: &mut impl RenderCamera) -> bool {
        match self.pose {
            Some(pose) => {
                camera.set_position(pose.position);
                camera.look_at(pose.target);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_follow_offset_matches_fixed_rule() {
        let mut rig = CameraRig::default();
        let player = Player::new(Vec3::new(10.0, 0.0, 50.0));

        let pose = rig.update(&player).unwrap();
        assert_eq!(pose.position, Vec3::new(10.0, 200.0, -150.0));
        assert_eq!(pose.target, Vec3::new(10.0, 100.0, 50.0));
    }

    #[test]
    fn test_follow_ignores_yaw() {
        let mut rig = CameraRig::default();
        let player = Player::new(Vec3::ZERO).with_yaw(1.0);
        let pose = rig.update(&player).unwrap();
        assert_eq!(pose.position, Vec3::new(0.0, 200.0, -200.0));
    }

    #[test]
    fn test_arc_offset_is_rotation_about_x() {
        let config = FollowConfig {
            arc: true,
            ..Default::default()
        };
        let angle = 0.3;
        let expected = Quat::from_rotation_x(angle) * Vec3::new(0.0, config.height, -config.distance);
        assert!((config.offset(angle) - expected).length() < 1e-3);

        let expected_look = Quat::from_rotation_x(angle) * Vec3::new(0.0, config.look_height, 0.0);
        assert!((config.look_offset(angle) - expected_look).length() < 1e-3);
    }

    #[test]
    fn test_socket_policy_requires_sockets() {
        let mut rig = CameraRig::new(CameraPolicy::Sockets);
        let player = Player::new(Vec3::ZERO);
        assert_eq!(rig.update(&player), Err(CameraError::NoSockets));
        assert!(rig.pose().is_none());
    }

    #[test]
    fn test_apply_writes_render_camera() {
        let mut rig = CameraRig::default();
        let mut camera = CameraPose::new(Vec3::ZERO, Vec3::ZERO);
        assert!(!rig.apply(&mut camera));

        rig.update(&Player::new(Vec3::ZERO)).unwrap();
        assert!(rig.apply(&mut camera));
        assert_eq!(camera.position, Vec3::new(0.0, 200.0, -200.0));
        assert_eq!(camera.target, Vec3::new(0.0, 100.0, 0.0));
    }
}
