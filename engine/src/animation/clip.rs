//! Animation clips and the character rig that owns them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named, time-parameterized motion clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Logical name ("standing", "walking", ...)
    pub name: String,
    /// Length of one playback in seconds
    pub duration: f32,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Loaded character rig: the set of clips keyed by logical name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterRig {
    clips: HashMap<String, AnimationClip>,
}

impl CharacterRig {
    /// Build a rig from clips. A later clip with the same name replaces an earlier one.
    pub fn new(clips: impl IntoIterator<Item = AnimationClip>) -> Self {
        let clips = clips
            .into_iter()
            .map(|clip| (clip.name.clone(), clip))
            .collect();
        Self { clips }
    }

    /// Parse a JSON array of clips, as delivered by a browser host.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let clips: Vec<AnimationClip> = serde_json::from_str(json)?;
        Ok(Self::new(clips))
    }

    pub fn get(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
