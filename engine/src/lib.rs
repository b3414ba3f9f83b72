//! Rambler Engine Library
//!
//! Player control for a small third-person exploration game: key-driven
//! locomotion over flat ground or a large cylinder, ray-probe collision
//! against static environment boxes, a follow or socket camera, and
//! proximity-triggered interactions that drive the character's clips.
//!
//! Rendering, audio and asset parsing belong to the host. The host hands
//! in a character rig and environment geometry through [`assets`] slots,
//! feeds key edges and frame time into [`game::GameSession`], and reads
//! back the camera pose and [`game::SessionEvent`]s.
//!
//! # Modules
//!
//! - [`input`] - Key codes, remappable bindings and forward/turn intent
//! - [`animation`] - Clip set and single-clip playback controller
//! - [`physics`] - Ray/AABB queries, environment geometry and the collision probe
//! - [`player`] - Player transform and the flat / cylindrical locomotion model
//! - [`interaction`] - Interaction registry and proximity evaluation
//! - [`camera`] - Camera pose, sockets and the follow / socket rig
//! - [`assets`] - Future-backed asset slots with a "not ready" state
//! - [`lifecycle`] - Session lifecycle states and legal transitions
//! - [`game`] - Session configuration and the per-frame session
//!
//! # Example
//!
//! ```ignore
//! use rambler_engine::game::{GameSession, SessionConfig};
//! use rambler_engine::input::KeyCode;
//!
//! let mut session = GameSession::new(SessionConfig::default())?;
//! session.handle_key(KeyCode::W, true);
//! session.tick(1.0 / 60.0);
//! let pose = session.camera_pose();
//! ```

pub mod animation;
pub mod assets;
pub mod camera;
pub mod input;
pub mod interaction;
pub mod lifecycle;
pub mod physics;
pub mod player;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types
pub use assets::{AssetError, AssetKind, AssetSlot, asset_promise};
pub use camera::{CameraPose, CameraRig, RenderCamera};
pub use input::{Control, InputState, KeyBindings, KeyCode};
pub use lifecycle::Lifecycle;
pub use physics::{CollisionProbe, EnvironmentGeometry};
pub use player::{LocomotionModel, Player};
