//! Camera sockets
//!
//! Named viewpoints fixed relative to the player. Exactly one socket is
//! active; switching is instantaneous.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CameraPose;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("no camera socket named '{0}'")]
    UnknownSocket(String),
    #[error("camera socket '{0}' is defined twice")]
    DuplicateSocket(String),
    #[error("socket camera policy requires at least one camera socket")]
    NoSockets,
}

/// A viewpoint in player-local space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSocket {
    pub name: String,
    /// Camera position relative to the player
    pub offset: Vec3,
    /// Point the camera looks at, relative to the player
    pub look_at: Vec3,
}

impl CameraSocket {
    pub fn new(name: impl Into<String>, offset: Vec3, look_at: Vec3) -> Self {
        Self {
            name: name.into(),
            offset,
            look_at,
        }
    }

    /// World pose given the player's local-to-world transform.
    pub fn world_pose(&self, player_transform: &Mat4) -> CameraPose {
        CameraPose::new(
            player_transform.transform_point3(self.offset),
            player_transform.transform_point3(self.look_at),
        )
    }
}

/// Ordered socket set with one active entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSockets {
    sockets: Vec<CameraSocket>,
    active: usize,
}

impl CameraSockets {
    /// Build a socket set; the first socket starts active.
    pub fn new(sockets: Vec<CameraSocket>) -> Result<Self, CameraError> {
        if sockets.is_empty() {
            return Err(CameraError::NoSockets);
        }
        for (i, socket) in sockets.iter().enumerate() {
            if sockets[..i].iter().any(|s| s.name == socket.name) {
                return Err(CameraError::DuplicateSocket(socket.name.clone()));
            }
        }
        Ok(Self { sockets, active: 0 })
    }

    /// Default viewpoints: behind the shoulder, in front, and overhead.
    pub fn standard() -> Self {
        Self {
            sockets: vec![
                CameraSocket::new("back", Vec3::new(0.0, 200.0, -200.0), Vec3::new(0.0, 100.0, 0.0)),
                CameraSocket::new("front", Vec3::new(0.0, 150.0, 300.0), Vec3::new(0.0, 100.0, 0.0)),
                CameraSocket::new("overhead", Vec3::new(0.0, 600.0, -50.0), Vec3::ZERO),
            ],
            active: 0,
        }
    }

    pub fn active(&self) -> &CameraSocket {
        &self.sockets[self.active]
    }

    pub fn set_active(&mut self, name: &str) -> Result<(), CameraError> {
        let index = self
            .sockets
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| CameraError::UnknownSocket(name.to_string()))?;
        self.active = index;
        Ok(())
    }

    /// Activate the next socket, wrapping around, and return it.
    pub fn cycle(&mut self) -> &CameraSocket {
        self.active = (self.active + 1) % self.sockets.len();
        self.active()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sockets.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sockets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sockets.is_empty()
    }
}
