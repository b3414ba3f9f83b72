//! Animation Controller
//!
//! Drives the character rig's mixer with exactly one active clip. Switching
//! clips stops everything else and restarts the new clip at time zero.
//! Clips named in the play-once set stop at their end and report
//! [`AnimationEvent::Finished`] exactly once.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use super::CharacterRig;
use crate::lifecycle::Lifecycle;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error("no clip named '{name}' in the character rig")]
    MissingClip { name: String },
}

/// Notification raised while advancing playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationEvent {
    /// A play-once clip reached its end
    Finished { name: String },
}

/// The clip currently playing.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePlayback {
    pub name: String,
    /// Playback time in seconds
    pub time: f32,
    pub duration: f32,
    pub play_once: bool,
    finished: bool,
}

impl ActivePlayback {
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[derive(Debug, Clone)]
pub struct AnimationController {
    rig: CharacterRig,
    play_once: HashSet<String>,
    active: Option<ActivePlayback>,
}

impl AnimationController {
    /// Create a controller over `rig`; clips named in `play_once` do not loop.
    pub fn new<I, S>(rig: CharacterRig, play_once: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rig,
            play_once: play_once.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    pub fn rig(&self) -> &CharacterRig {
        &self.rig
    }

    /// Switch to the clip named `name`, restarting it from zero.
    ///
    /// On [`AnimationError::MissingClip`] the previous clip keeps playing.
    pub fn set_action(&mut self, name: &str) -> Result<(), AnimationError> {
        let clip = self.rig.get(name).ok_or_else(|| AnimationError::MissingClip {
            name: name.to_string(),
        })?;

        let play_once = self.play_once.contains(name);
        debug!(clip = name, play_once, "switching animation clip");

        // Replacing the slot stops whatever was playing.
        self.active = Some(ActivePlayback {
            name: clip.name.clone(),
            time: 0.0,
            duration: clip.duration,
            play_once,
            finished: false,
        });
        Ok(())
    }

    /// Advance the active clip by `dt` seconds. No-op unless `lifecycle` is active.
    pub fn advance(&mut self, dt: f32, lifecycle: Lifecycle) -> Option<AnimationEvent> {
        if !lifecycle.is_active() {
            return None;
        }
        let playback = self.active.as_mut()?;

        if playback.play_once {
            if playback.finished {
                return None;
            }
            playback.time = (playback.time + dt).min(playback.duration);
            if playback.time >= playback.duration {
                playback.finished = true;
                return Some(AnimationEvent::Finished {
                    name: playback.name.clone(),
                });
            }
        } else if playback.duration > 0.0 {
            playback.time = (playback.time + dt).rem_euclid(playback.duration);
        }
        None
    }

    /// The clip currently playing, if any.
    pub fn active(&self) -> Option<&ActivePlayback> {
        self.active.as_ref()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_ref().map(|p| p.name.as_str())
    }

    /// Stop all playback.
    pub fn stop(&mut self) {
        self.active = None;
    }
}
