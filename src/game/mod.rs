//! Game Module
//!
//! Composes the engine components into a playable session.

pub mod config;
pub mod session;

pub use config::{ConfigError, SessionConfig};
pub use session::{GameSession, SessionError, SessionEvent, clamp_frame_delta};
