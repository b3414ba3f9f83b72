//! Interaction kind registry
//!
//! Every interaction kind is a variant of [`InteractionKind`], tagged by the
//! `kind` field of its configuration entry. An unknown kind therefore fails
//! while the configuration deserializes, and each variant builds its own
//! effect when the entry is resolved at load time.
//!
//! # Example
//!
//! ```rust,ignore
//! use rambler_engine::interaction::InteractionSpec;
//!
//! let spec: InteractionSpec = serde_json::from_str(
//!     r#"{ "mesh_name": "chair", "kind": "sit", "facing_yaw": 3.14 }"#,
//! )?;
//! let interaction = spec.resolve()?;
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Interaction, InteractionEffect};

/// Default trigger radius in world units
pub const TRIGGER_RADIUS: f32 = 100.0;

/// Clip played by the `sit` kind unless overridden
pub const SIT_ACTION: &str = "sitting";

/// Clip chained after sitting unless overridden
pub const SIT_FOLLOW_UP: &str = "sit-look-around";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InteractionError {
    #[error("interaction '{mesh_name}' of kind '{kind}' needs an action")]
    MissingAction { mesh_name: String, kind: &'static str },
    #[error("interaction '{mesh_name}' has invalid trigger radius {radius}")]
    InvalidRadius { mesh_name: String, radius: f32 },
}

/// Kind-specific part of an interaction entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InteractionKind {
    /// Snap the player next to the target and play a sitting clip
    Sit {
        /// Player position relative to the target after snapping
        #[serde(default)]
        seat_offset: Vec3,
        /// Player yaw after snapping
        #[serde(default)]
        facing_yaw: f32,
        #[serde(default)]
        action: Option<String>,
        #[serde(default)]
        then: Option<String>,
    },
    /// Play a clip in place
    Play {
        action: String,
        #[serde(default)]
        then: Option<String>,
    },
}

impl InteractionKind {
    /// A `sit` kind with the default clips.
    pub fn sit(seat_offset: Vec3, facing_yaw: f32) -> Self {
        InteractionKind::Sit {
            seat_offset,
            facing_yaw,
            action: None,
            then: None,
        }
    }

    pub fn play(action: impl Into<String>) -> Self {
        InteractionKind::Play {
            action: action.into(),
            then: None,
        }
    }

    /// Tag as written in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            InteractionKind::Sit { .. } => "sit",
            InteractionKind::Play { .. } => "play",
        }
    }

    /// Build the effect for an entry anchored to `mesh_name`.
    pub fn effect(&self, mesh_name: &str) -> Result<InteractionEffect, InteractionError> {
        match self {
            InteractionKind::Sit {
                seat_offset,
                facing_yaw,
                action,
                then,
            } => Ok(InteractionEffect::Sit {
                seat_offset: *seat_offset,
                facing_yaw: *facing_yaw,
                action: action.clone().unwrap_or_else(|| SIT_ACTION.to_string()),
                then: then.clone().or_else(|| Some(SIT_FOLLOW_UP.to_string())),
            }),
            InteractionKind::Play { action, then } => {
                if action.trim().is_empty() {
                    return Err(InteractionError::MissingAction {
                        mesh_name: mesh_name.to_string(),
                        kind: self.name(),
                    });
                }
                Ok(InteractionEffect::Play {
                    action: action.clone(),
                    then: then.clone(),
                })
            }
        }
    }
}

/// Interaction entry as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionSpec {
    /// Environment mesh the interaction is anchored to
    pub mesh_name: String,
    #[serde(default = "default_trigger_radius")]
    pub trigger_radius: f32,
    /// Text for the UI prompt
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(flatten)]
    pub kind: InteractionKind,
}

fn default_trigger_radius() -> f32 {
    TRIGGER_RADIUS
}

impl InteractionSpec {
    pub fn new(mesh_name: impl Into<String>, kind: InteractionKind) -> Self {
        Self {
            mesh_name: mesh_name.into(),
            trigger_radius: TRIGGER_RADIUS,
            prompt: None,
            kind,
        }
    }

    /// Resolve this entry into an unbound interaction.
    pub fn resolve(&self) -> Result<Interaction, InteractionError> {
        if !(self.trigger_radius.is_finite() && self.trigger_radius >= 0.0) {
            return Err(InteractionError::InvalidRadius {
                mesh_name: self.mesh_name.clone(),
                radius: self.trigger_radius,
            });
        }

        let effect = self.kind.effect(&self.mesh_name)?;
        Ok(Interaction::new(
            self.mesh_name.clone(),
            self.trigger_radius,
            effect,
            self.prompt.clone(),
        ))
    }
}

/// Resolve every entry, failing on the first invalid one.
pub fn resolve_all(specs: &[InteractionSpec]) -> Result<Vec<Interaction>, InteractionError> {
    specs.iter().map(InteractionSpec::resolve).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_fails_to_parse() {
        let err = serde_json::from_str::<InteractionSpec>(r#"{ "mesh_name": "chair", "kind": "teleport" }"#)
            .unwrap_err();
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn test_sit_entry_from_json() {
        let spec: InteractionSpec = serde_json::from_str(
            r#"{ "mesh_name": "chair", "kind": "sit", "trigger_radius": 80.0, "seat_offset": [0.0, 0.0, -30.0] }"#,
        )
        .unwrap();

        assert_eq!(spec.trigger_radius, 80.0);
        assert_eq!(spec.kind, InteractionKind::sit(Vec3::new(0.0, 0.0, -30.0), 0.0));
    }

    #[test]
    fn test_sit_defaults() {
        let interaction = InteractionSpec::new("chair", InteractionKind::sit(Vec3::ZERO, 0.0))
            .resolve()
            .unwrap();

        match interaction.effect() {
            InteractionEffect::Sit { action, then, .. } => {
                assert_eq!(action, SIT_ACTION);
                assert_eq!(then.as_deref(), Some(SIT_FOLLOW_UP));
            }
            other => panic!("expected sit effect, got {:?}", other),
        }
    }

    #[test]
    fn test_play_requires_action() {
        let err = serde_json::from_str::<InteractionSpec>(r#"{ "mesh_name": "jukebox", "kind": "play" }"#);
        assert!(err.is_err());

        let spec = InteractionSpec::new("jukebox", InteractionKind::play(" "));
        assert!(matches!(
            spec.resolve(),
            Err(InteractionError::MissingAction { kind: "play", .. })
        ));

        let spec = InteractionSpec::new("jukebox", InteractionKind::play("dancing"));
        assert!(spec.resolve().is_ok());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let mut spec = InteractionSpec::new("chair", InteractionKind::sit(Vec3::ZERO, 0.0));
        spec.trigger_radius = -1.0;
        assert!(matches!(
            resolve_all(&[spec]),
            Err(InteractionError::InvalidRadius { .. })
        ));
    }
}
