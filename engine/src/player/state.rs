//! Player state
//!
//! Owned exclusively by the game session and mutated once per tick.

use glam::{Mat4, Quat, Vec3};

use crate::camera::CameraSockets;

/// The player character's transform and intent.
///
/// Orientation is composed from two angles: `pitch` is the player's angular
/// position around the cylinder axis (always zero on flat ground) and `yaw`
/// is the heading about the player's own up axis. At zero yaw the player
/// faces +Z.
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub position: Vec3,
    /// Heading in radians, positive turns left (counter-clockwise seen from above)
    pub yaw: f32,
    /// Rotation about world X in radians accumulated by cylindrical locomotion
    pub pitch: f32,
    pub move_forward: bool,
    /// Signed yaw rate in radians per second
    pub turn_rate: f32,
    /// Name of the clip the character is playing
    pub current_action: Option<String>,
    /// Camera viewpoints parented to the player
    pub camera_sockets: Option<CameraSockets>,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_camera_sockets(mut self, sockets: CameraSockets) -> Self {
        self.camera_sockets = Some(sockets);
        self
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(self.yaw)
    }

    /// Facing direction in world space.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::Z
    }

    /// Local up axis in world space. Ignores yaw.
    pub fn up(&self) -> Vec3 {
        Quat::from_rotation_x(self.pitch) * Vec3::Y
    }

    /// Local-to-world transform.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_faces_positive_z() {
        let player = Player::new(Vec3::ZERO);
        assert!((player.forward() - Vec3::Z).length() < 1e-6);
        assert!((player.up() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_positive_yaw_turns_toward_positive_x() {
        let player = Player::new(Vec3::ZERO).with_yaw(FRAC_PI_2);
        assert!((player.forward() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_pitch_tilts_up_axis() {
        let mut player = Player::new(Vec3::ZERO);
        player.pitch = FRAC_PI_2;
        assert!((player.up() - Vec3::Z).length() < 1e-6);
        assert!((player.forward() - Vec3::NEG_Y).length() < 1e-6);
    }
}
