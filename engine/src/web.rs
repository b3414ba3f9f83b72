//! Browser host bindings
//!
//! Thin wasm-bindgen facade over [`GameSession`] for a page that owns the
//! renderer and audio. The page forwards `KeyboardEvent.code` strings and
//! `requestAnimationFrame` deltas, completes asset loads from JSON once its
//! loaders finish, and reads back the camera and player each frame.

use wasm_bindgen::prelude::*;

use crate::animation::CharacterRig;
use crate::assets::{AssetKind, AssetResolver, asset_promise};
use crate::game::{GameSession, SessionConfig, SessionEvent};
use crate::input::KeyCode;
use crate::physics::EnvironmentGeometry;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Compact label for an event, e.g. `cue-start:footsteps`.
fn event_label(event: &SessionEvent) -> String {
    match event {
        SessionEvent::LifecycleChanged(state) => format!("lifecycle:{state}"),
        SessionEvent::ActionChanged(name) => format!("action:{name}"),
        SessionEvent::ActionRejected(name) => format!("action-rejected:{name}"),
        SessionEvent::CueStarted(name) => format!("cue-start:{name}"),
        SessionEvent::CueStopped(name) => format!("cue-stop:{name}"),
        SessionEvent::PromptShown { name, .. } => format!("prompt-show:{name}"),
        SessionEvent::PromptHidden => "prompt-hide".to_string(),
        SessionEvent::CameraSocketChanged(name) => format!("camera:{name}"),
        SessionEvent::EnvironmentReady { unbound } => format!("environment-ready:{}", unbound.join(",")),
        SessionEvent::AssetFailed { kind, error } => format!("asset-failed:{kind}:{error}"),
    }
}

#[wasm_bindgen]
pub struct WebSession {
    session: GameSession,
    character: Option<AssetResolver<CharacterRig>>,
    environment: Option<AssetResolver<EnvironmentGeometry>>,
}

#[wasm_bindgen]
impl WebSession {
    /// Create a session from an optional JSON config.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebSession, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(json) => SessionConfig::from_json_str(&json).map_err(js_error)?,
            None => SessionConfig::default(),
        };
        let session = GameSession::new(config).map_err(js_error)?;

        Ok(Self {
            session,
            character: None,
            environment: None,
        })
    }

    /// Request the character; complete with `resolve_character` or `reject_character`.
    pub fn begin_character_load(&mut self) -> Result<(), JsValue> {
        let (resolver, slot) = asset_promise(AssetKind::Character);
        self.session.begin_loading(slot).map_err(js_error)?;
        self.character = Some(resolver);
        Ok(())
    }

    /// Complete the character load from a JSON clip list (`[{"name": .., "duration": ..}]`).
    pub fn resolve_character(&mut self, clips_json: &str) -> Result<(), JsValue> {
        let resolver = self
            .character
            .take()
            .ok_or_else(|| JsValue::from_str("no character load in progress"))?;
        match CharacterRig::from_json(clips_json) {
            Ok(rig) => resolver.resolve(rig),
            Err(err) => resolver.reject(err.to_string()),
        }
        Ok(())
    }

    pub fn reject_character(&mut self, reason: &str) {
        if let Some(resolver) = self.character.take() {
            resolver.reject(reason);
        }
    }

    /// Request the environment; complete with `resolve_environment` or `reject_environment`.
    pub fn begin_environment_load(&mut self) {
        let (resolver, slot) = asset_promise(AssetKind::Environment);
        self.session.load_environment(slot);
        self.environment = Some(resolver);
    }

    /// Complete the environment load from a JSON mesh list in model space.
    pub fn resolve_environment(&mut self, meshes_json: &str) -> Result<(), JsValue> {
        let resolver = self
            .environment
            .take()
            .ok_or_else(|| JsValue::from_str("no environment load in progress"))?;
        let transform = self.session.config().environment.transform;
        match EnvironmentGeometry::from_json(meshes_json, &transform) {
            Ok(env) => resolver.resolve(env),
            Err(err) => resolver.reject(err.to_string()),
        }
        Ok(())
    }

    pub fn reject_environment(&mut self, reason: &str) {
        if let Some(resolver) = self.environment.take() {
            resolver.reject(reason);
        }
    }

    /// Forward a `keydown`; returns true if the key is bound.
    pub fn key_down(&mut self, code: &str) -> bool {
        self.session.handle_key(KeyCode::from_dom_code(code), true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.session.handle_key(KeyCode::from_dom_code(code), false)
    }

    /// Forward a window `blur`.
    pub fn blur(&mut self) {
        self.session.release_all();
    }

    /// Advance one frame; `dt` in seconds.
    pub fn tick(&mut self, dt: f32) {
        self.session.tick(dt);
    }

    pub fn set_action(&mut self, name: &str) -> Result<(), JsValue> {
        self.session.set_action(name).map_err(js_error)
    }

    pub fn lifecycle(&self) -> String {
        self.session.lifecycle().to_string()
    }

    /// `[x, y, z]`
    pub fn player_position(&self) -> Vec<f32> {
        self.session.player().position.to_array().to_vec()
    }

    pub fn player_yaw(&self) -> f32 {
        self.session.player().yaw
    }

    /// `[x, y, z]`, empty before the first pose.
    pub fn camera_position(&self) -> Vec<f32> {
        self.session
            .camera_pose()
            .map(|pose| pose.position.to_array().to_vec())
            .unwrap_or_default()
    }

    /// `[x, y, z]`, empty before the first pose.
    pub fn camera_target(&self) -> Vec<f32> {
        self.session
            .camera_pose()
            .map(|pose| pose.target.to_array().to_vec())
            .unwrap_or_default()
    }

    /// Events queued since the last call, as compact labels.
    pub fn drain_events(&mut self) -> Vec<String> {
        self.session.drain_events().iter().map(event_label).collect()
    }
}
