//! Config Module
//!
//! Centralized configuration for the walking session and host key translation.

pub mod input_config;
pub mod session_config;

pub use input_config::{engine_key, engine_key_from_physical};
pub use session_config::{
    AnimationConfig, AssetConfig, ConfigError, EnvironmentConfig, ProbeConfig, SessionConfig, SpawnConfig,
};
