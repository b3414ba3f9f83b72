//! Game Session
//!
//! Owns every piece of per-player state and runs the per-frame tick. Each
//! component receives only the state it needs; nothing is reached through
//! globals.
//!
//! Order within one tick:
//!
//! 1. Poll asset loads (character resolution activates the session)
//! 2. Consume input edges latched since the last tick
//! 3. Advance animation, chaining follow-up clips
//! 4. Locomotion, gated by the collision probe
//! 5. Camera derivation
//! 6. Interaction evaluation; an effect may move the player, after which
//!    the camera is derived again so the frame shows the final transform
//!
//! # Example
//!
//! ```rust,ignore
//! use rambler_engine::assets::{AssetKind, AssetSlot};
//! use rambler_engine::game::{GameSession, SessionConfig};
//!
//! let mut session = GameSession::new(SessionConfig::default())?;
//! session.begin_loading(AssetSlot::ready(AssetKind::Character, rig))?;
//! session.load_environment(AssetSlot::ready(AssetKind::Environment, env));
//! loop {
//!     session.tick(frame_dt);
//!     for event in session.drain_events() { /* audio, prompt UI */ }
//! }
//! ```

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::animation::{AnimationController, AnimationError, AnimationEvent, CharacterRig};
use crate::assets::{AssetError, AssetKind, AssetSlot, AssetStatus};
use crate::camera::{CameraError, CameraPolicy, CameraPose, CameraRig, RenderCamera};
use crate::game::config::{ConfigError, SessionConfig};
use crate::input::{ActionRequest, Control, CueRequest, InputState, KeyBindings, KeyCode};
use crate::interaction::{self, ChainedAction, InteractionError, InteractionSystem, PromptChange};
use crate::lifecycle::{Lifecycle, LifecycleError};
use crate::physics::EnvironmentGeometry;
use crate::player::{LocomotionModel, Player, StepReport};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0} asset is not loaded yet")]
    AssetNotReady(AssetKind),
    #[error(transparent)]
    Animation(#[from] AnimationError),
    #[error(transparent)]
    Camera(#[from] CameraError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Interaction(#[from] InteractionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Notifications for the host: audio cues, prompt UI, diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LifecycleChanged(Lifecycle),
    /// A new clip started playing
    ActionChanged(String),
    /// A clip request failed; the previous clip keeps playing
    ActionRejected(String),
    CueStarted(String),
    CueStopped(String),
    PromptShown { name: String, prompt: Option<String> },
    PromptHidden,
    CameraSocketChanged(String),
    /// Environment bound; lists interactions whose mesh was not found
    EnvironmentReady { unbound: Vec<String> },
    AssetFailed { kind: AssetKind, error: AssetError },
}

/// Clamp a host frame delta into `[0, max]`. NaN becomes zero.
pub fn clamp_frame_delta(dt: f32, max: f32) -> f32 {
    if dt.is_nan() { 0.0 } else { dt.clamp(0.0, max) }
}

pub struct GameSession {
    config: SessionConfig,
    lifecycle: Lifecycle,

    // === Input ===
    bindings: KeyBindings,
    input: InputState,

    // === Simulation ===
    player: Player,
    locomotion: LocomotionModel,
    camera: CameraRig,
    interactions: InteractionSystem,
    /// Result of the last locomotion step
    last_step: StepReport,

    // === Assets ===
    character: AssetSlot<CharacterRig>,
    environment: AssetSlot<EnvironmentGeometry>,
    environment_bound: bool,

    // === Animation ===
    animation: Option<AnimationController>,
    /// Clip to start when the active play-once clip finishes
    pending_follow_up: Option<String>,

    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Build a session from a validated configuration.
    ///
    /// Interaction entries are resolved here, so an invalid entry fails
    /// before any asset is requested.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let interactions = interaction::resolve_all(&config.interactions)?;
        let interactions = InteractionSystem::new(interactions, config.environment.target_mirror);

        let mut player = Player::new(config.spawn.position).with_yaw(config.spawn.yaw);
        if config.camera == CameraPolicy::Sockets {
            player = player.with_camera_sockets(config.camera_sockets()?);
        }

        let mut camera = CameraRig::new(config.camera);
        camera.update(&player)?;

        Ok(Self {
            bindings: KeyBindings::new(),
            input: InputState::new(config.turn_rate),
            locomotion: config.locomotion_model(),
            player,
            camera,
            interactions,
            last_step: StepReport::default(),
            lifecycle: Lifecycle::Uninitialized,
            character: AssetSlot::empty(AssetKind::Character),
            environment: AssetSlot::empty(AssetKind::Environment),
            environment_bound: false,
            animation: None,
            pending_follow_up: None,
            events: Vec::new(),
            config,
        })
    }

    // ========================================================================
    // Assets and lifecycle
    // ========================================================================

    /// Start loading the character. Moves the lifecycle to `Initializing`.
    ///
    /// Allowed from `Uninitialized`, including after a failed load.
    pub fn begin_loading(&mut self, slot: AssetSlot<CharacterRig>) -> Result<(), SessionError> {
        self.set_lifecycle(Lifecycle::Initializing)?;
        self.character = self.with_configured_timeout(slot);
        self.animation = None;
        Ok(())
    }

    /// Start (or replace) the environment load. The environment is "not
    /// ready" until a tick observes the slot resolved.
    pub fn load_environment(&mut self, slot: AssetSlot<EnvironmentGeometry>) {
        self.environment = self.with_configured_timeout(slot);
        self.environment_bound = false;
    }

    fn with_configured_timeout<T>(&self, slot: AssetSlot<T>) -> AssetSlot<T> {
        match self.config.assets.load_timeout_secs {
            Some(secs) => slot.with_timeout(Some(secs)),
            None => slot,
        }
    }

    fn set_lifecycle(&mut self, to: Lifecycle) -> Result<(), LifecycleError> {
        let from = self.lifecycle;
        self.lifecycle.transition(to)?;
        info!(%from, %to, "lifecycle changed");
        self.events.push(SessionEvent::LifecycleChanged(to));
        Ok(())
    }

    fn poll_assets(&mut self, dt: f32) {
        match self.character.poll(dt) {
            AssetStatus::JustLoaded => self.on_character_loaded(),
            AssetStatus::Ready if self.animation.is_none() => self.on_character_loaded(),
            AssetStatus::JustFailed(error) => {
                warn!(%error, "character load failed");
                self.events.push(SessionEvent::AssetFailed {
                    kind: AssetKind::Character,
                    error,
                });
                if let Err(err) = self.set_lifecycle(Lifecycle::Uninitialized) {
                    warn!(%err, "could not reset lifecycle after failed load");
                }
            }
            _ => {}
        }

        match self.environment.poll(dt) {
            AssetStatus::JustLoaded => self.on_environment_loaded(),
            AssetStatus::Ready if !self.environment_bound => self.on_environment_loaded(),
            AssetStatus::JustFailed(error) => {
                warn!(%error, "environment load failed");
                self.events.push(SessionEvent::AssetFailed {
                    kind: AssetKind::Environment,
                    error,
                });
            }
            _ => {}
        }
    }

    fn on_character_loaded(&mut self) {
        let Some(rig) = self.character.get() else {
            return;
        };
        if self.lifecycle != Lifecycle::Initializing {
            debug!(lifecycle = %self.lifecycle, "character resolved outside a load; ignoring");
            return;
        }

        info!(clips = rig.len(), "character rig loaded");
        self.animation = Some(AnimationController::new(
            rig.clone(),
            self.config.animation.play_once.iter().cloned(),
        ));

        let idle = self.config.animation.idle.clone();
        self.play(&idle, None);

        if let Err(err) = self.set_lifecycle(Lifecycle::Active) {
            warn!(%err, "could not activate session");
        }
    }

    fn on_environment_loaded(&mut self) {
        let Some(env) = self.environment.get() else {
            return;
        };
        let unbound = self.interactions.bind(env);
        info!(meshes = env.len(), unbound = unbound.len(), "environment loaded");
        self.environment_bound = true;
        self.events.push(SessionEvent::EnvironmentReady { unbound });
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Feed a physical key edge. Returns false if the key is unbound.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match self.bindings.get_action(key) {
            Some(control) => {
                self.handle_control(control, pressed);
                true
            }
            None => false,
        }
    }

    /// Feed a logical control edge.
    pub fn handle_control(&mut self, control: Control, pressed: bool) {
        let outcome = self.input.handle(control, pressed);

        if let Some(cue) = outcome.cue {
            self.emit_cue(cue);
        }
        if outcome.cycle_camera {
            self.cycle_camera_socket();
        }
    }

    /// Release every held control, e.g. when the host window loses focus.
    pub fn release_all(&mut self) {
        if let Some(cue) = self.input.halt_forward() {
            self.emit_cue(cue);
        }
        self.input.reset();
    }

    fn emit_cue(&mut self, cue: CueRequest) {
        let Some(name) = self.config.walk_cue.clone() else {
            return;
        };
        self.events.push(match cue {
            CueRequest::Start => SessionEvent::CueStarted(name),
            CueRequest::Stop => SessionEvent::CueStopped(name),
        });
    }

    fn cycle_camera_socket(&mut self) {
        let Some(sockets) = self.player.camera_sockets.as_mut() else {
            debug!("camera cycle ignored; player has no sockets");
            return;
        };
        let name = sockets.cycle().name.clone();
        debug!(socket = %name, "camera socket changed");
        self.events.push(SessionEvent::CameraSocketChanged(name));
        self.update_camera();
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advance the session by one frame of `dt` seconds.
    ///
    /// Never fails: steps whose assets are not ready are skipped for this tick.
    pub fn tick(&mut self, dt: f32) {
        let dt = clamp_frame_delta(dt, self.config.max_frame_delta);

        self.poll_assets(dt);

        if let Some(request) = self.input.take_action() {
            let clip = self.config.animation.clip_for(request).to_string();
            self.play(&clip, None);
        }
        let interact = self.input.take_interact();
        self.player.move_forward = self.input.move_forward();
        self.player.turn_rate = self.input.turn_rate();

        if let Some(AnimationEvent::Finished { name }) = self
            .animation
            .as_mut()
            .and_then(|animation| animation.advance(dt, self.lifecycle))
        {
            if let Some(next) = self.pending_follow_up.take() {
                debug!(finished = %name, next = %next, "chaining follow-up clip");
                self.play(&next, None);
            }
        }

        self.last_step = if self.lifecycle.is_active() {
            self.locomotion.step(&mut self.player, self.environment.get(), dt)
        } else {
            StepReport::default()
        };

        self.update_camera();

        if self.environment_bound {
            match self.interactions.evaluate(self.player.position) {
                Some(PromptChange::Shown { name, prompt }) => {
                    self.events.push(SessionEvent::PromptShown { name, prompt })
                }
                Some(PromptChange::Hidden) => self.events.push(SessionEvent::PromptHidden),
                None => {}
            }
        }

        if interact {
            self.interact();
        }
    }

    fn interact(&mut self) {
        let chained = if self.environment_bound {
            self.interactions
                .triggered()
                .and_then(|interaction| interaction.apply(&mut self.player))
        } else {
            None
        };

        match chained {
            Some(ChainedAction { action, then }) => {
                // The effect stopped the player; drop the held forward key too
                if !self.player.move_forward {
                    if let Some(cue) = self.input.halt_forward() {
                        self.emit_cue(cue);
                    }
                }
                self.play(&action, then);
                self.update_camera();
            }
            None => {
                let clip = self.config.animation.clip_for(ActionRequest::Secondary).to_string();
                self.play(&clip, None);
            }
        }
    }

    fn update_camera(&mut self) {
        if let Err(err) = self.camera.update(&self.player) {
            warn!(%err, "camera update failed; keeping previous pose");
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Switch the character's clip. Clears any pending follow-up clip.
    ///
    /// Fails with [`SessionError::AssetNotReady`] before the character loads,
    /// and with [`AnimationError::MissingClip`] (previous clip kept) for an
    /// unknown name.
    pub fn set_action(&mut self, name: &str) -> Result<(), SessionError> {
        let animation = self
            .animation
            .as_mut()
            .ok_or(SessionError::AssetNotReady(AssetKind::Character))?;
        animation.set_action(name)?;

        self.pending_follow_up = None;
        self.player.current_action = Some(name.to_string());
        self.events.push(SessionEvent::ActionChanged(name.to_string()));
        Ok(())
    }

    /// Internal clip request: failures are logged and reported as events.
    fn play(&mut self, name: &str, follow_up: Option<String>) {
        match self.set_action(name) {
            Ok(()) => self.pending_follow_up = follow_up,
            Err(SessionError::AssetNotReady(_)) => {
                debug!(clip = name, "character not loaded; clip request dropped");
            }
            Err(err) => {
                warn!(%err, "clip request rejected");
                self.events.push(SessionEvent::ActionRejected(name.to_string()));
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether the probe currently reports an obstacle ahead.
    pub fn is_move_blocked(&self) -> Result<bool, SessionError> {
        let env = self
            .environment
            .get()
            .ok_or(SessionError::AssetNotReady(AssetKind::Environment))?;
        Ok(self.locomotion.is_blocked(&self.player, env))
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn camera_pose(&self) -> Option<CameraPose> {
        self.camera.pose()
    }

    /// Write the current camera pose into a render camera.
    pub fn apply_camera(&self, camera: &mut impl RenderCamera) -> bool {
        self.camera.apply(camera)
    }

    pub fn animation(&self) -> Option<&AnimationController> {
        self.animation.as_ref()
    }

    pub fn environment(&self) -> Option<&EnvironmentGeometry> {
        self.environment.get()
    }

    pub fn interactions(&self) -> &InteractionSystem {
        &self.interactions
    }

    pub fn last_step(&self) -> StepReport {
        self.last_step
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
