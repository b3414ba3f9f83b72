//! Interaction Module
//!
//! Proximity-triggered interactions anchored to environment meshes.
//!
//! Every tick [`InteractionSystem::evaluate`] recomputes which interactions
//! are within their trigger radius (inclusive). Nothing latches: an
//! interaction is triggered only for the ticks the player is actually in
//! range. When the player presses interact, the first triggered interaction
//! in configuration order runs its effect.
//!
//! Target positions are multiplied component-wise by a per-environment
//! mirror vector before measuring distance, to match whatever axis flips the
//! environment model was exported with.

pub mod registry;

use glam::Vec3;
use tracing::{info, warn};

use crate::physics::EnvironmentGeometry;
use crate::player::Player;

pub use registry::{
    InteractionError, InteractionKind, InteractionSpec, SIT_ACTION, SIT_FOLLOW_UP, TRIGGER_RADIUS, resolve_all,
};

/// What happens when a triggered interaction is used.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEffect {
    /// Snap the player to a seat next to the target and play a sitting clip
    Sit {
        seat_offset: Vec3,
        facing_yaw: f32,
        action: String,
        then: Option<String>,
    },
    /// Play a clip in place
    Play { action: String, then: Option<String> },
}

/// Action sequence requested by an effect: `action` now, `then` once it finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedAction {
    pub action: String,
    pub then: Option<String>,
}

/// One interaction and its per-tick state.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    name: String,
    trigger_radius: f32,
    effect: InteractionEffect,
    prompt: Option<String>,
    /// Mirrored world position of the target mesh, once the environment is bound
    target: Option<Vec3>,
    triggered: bool,
}

impl Interaction {
    pub fn new(name: String, trigger_radius: f32, effect: InteractionEffect, prompt: Option<String>) -> Self {
        Self {
            name,
            trigger_radius,
            effect,
            prompt,
            target: None,
            triggered: false,
        }
    }

    /// Name of the environment mesh this interaction is anchored to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger_radius(&self) -> f32 {
        self.trigger_radius
    }

    pub fn effect(&self) -> &InteractionEffect {
        &self.effect
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Anchor to an explicit world position.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = Some(target);
    }

    fn update(&mut self, position: Vec3) -> bool {
        self.triggered = self
            .target
            .is_some_and(|target| position.distance(target) <= self.trigger_radius);
        self.triggered
    }

    /// Run the effect on the player and return the actions it requests.
    ///
    /// Returns `None` if the interaction has no target yet.
    pub fn apply(&self, player: &mut Player) -> Option<ChainedAction> {
        let target = self.target?;
        let chained = match &self.effect {
            InteractionEffect::Sit {
                seat_offset,
                facing_yaw,
                action,
                then,
            } => {
                player.position = target + *seat_offset;
                player.yaw = *facing_yaw;
                player.move_forward = false;
                ChainedAction {
                    action: action.clone(),
                    then: then.clone(),
                }
            }
            InteractionEffect::Play { action, then } => ChainedAction {
                action: action.clone(),
                then: then.clone(),
            },
        };
        Some(chained)
    }
}

/// Change in prompt visibility reported by [`InteractionSystem::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptChange {
    Shown { name: String, prompt: Option<String> },
    Hidden,
}

#[derive(Debug, Clone)]
pub struct InteractionSystem {
    interactions: Vec<Interaction>,
    mirror: Vec3,
    /// Name of the interaction the prompt is showing for
    prompt_for: Option<String>,
}

impl InteractionSystem {
    /// Create a system over resolved interactions; `mirror` multiplies target positions.
    pub fn new(interactions: Vec<Interaction>, mirror: Vec3) -> Self {
        Self {
            interactions,
            mirror,
            prompt_for: None,
        }
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Anchor every interaction to its mesh in `env`.
    ///
    /// Returns the names that have no matching mesh; those never trigger.
    pub fn bind(&mut self, env: &EnvironmentGeometry) -> Vec<String> {
        let mut unbound = Vec::new();
        for interaction in &mut self.interactions {
            match env.find(&interaction.name) {
                Some(mesh) => interaction.target = Some(mesh.position() * self.mirror),
                None => {
                    warn!(mesh = %interaction.name, "interaction target not found in environment");
                    interaction.target = None;
                    unbound.push(interaction.name.clone());
                }
            }
        }
        unbound
    }

    /// Recompute triggered state from the player's position.
    ///
    /// Returns a change when prompt visibility (or the interaction it shows for) changed.
    pub fn evaluate(&mut self, position: Vec3) -> Option<PromptChange> {
        for interaction in &mut self.interactions {
            interaction.update(position);
        }

        let current = self.triggered().map(|i| (i.name.clone(), i.prompt.clone()));
        match current {
            Some((name, _)) if self.prompt_for.as_deref() == Some(name.as_str()) => None,
            Some((name, prompt)) => {
                info!(interaction = %name, "interaction in range");
                self.prompt_for = Some(name.clone());
                Some(PromptChange::Shown { name, prompt })
            }
            None if self.prompt_for.is_some() => {
                self.prompt_for = None;
                Some(PromptChange::Hidden)
            }
            None => None,
        }
    }

    /// First triggered interaction in configuration order.
    pub fn triggered(&self) -> Option<&Interaction> {
        self.interactions.iter().find(|i| i.triggered)
    }

    pub fn prompt_visible(&self) -> bool {
        self.prompt_for.is_some()
    }
}
