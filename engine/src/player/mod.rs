//! Player Module
//!
//! Player character state and per-tick locomotion.
//!
//! # Components
//!
//! - [`Player`] - Transform, intent and current action of the character
//! - [`LocomotionModel`] - Collision-gated forward movement and turning
//!   - Flat mode: straight-line walking on a plane
//!   - Cylindrical mode: walking curves over a large cylinder along world X
//! - [`LocomotionMode`] - Mode selection with per-mode configuration

pub mod locomotion;
pub mod state;

pub use locomotion::{
    CylinderConfig, FlatConfig, LocomotionMode, LocomotionModel, StepReport,
    ARC_ANGULAR_SPEED, ARC_LINEAR_SPEED, ARC_RADIUS, HEAD_OFFSET, TURN_SPEED, WALK_SPEED,
};
pub use state::Player;
