//! Camera Module
//!
//! Derives the render camera pose from the player each tick. This module is
//! window-system agnostic - it only deals with camera state and math.

pub mod pose;
pub mod rig;
pub mod socket;

pub use pose::{CameraPose, RawCameraPose, RenderCamera};
pub use rig::{CameraPolicy, CameraRig, FollowConfig, FOLLOW_DISTANCE, FOLLOW_HEIGHT, LOOK_HEIGHT};
pub use socket::{CameraError, CameraSocket, CameraSockets};
