//! Animation Module
//!
//! Exclusive clip playback for the character rig.
//!
//! - [`CharacterRig`] - the named clips delivered by the character asset load
//! - [`AnimationController`] - one active clip at a time, play-once handling and
//!   "finished" notifications used to chain follow-up actions

pub mod clip;
pub mod controller;

pub use clip::{AnimationClip, CharacterRig};
pub use controller::{ActivePlayback, AnimationController, AnimationError, AnimationEvent};
