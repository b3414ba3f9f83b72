//! Session Tests - Lifecycle, Tick Ordering and Interactions
//!
//! End-to-end tests driving `GameSession` through key edges and ticks.

use glam::Vec3;
use rambler_engine::animation::{AnimationClip, AnimationController, AnimationError, CharacterRig};
use rambler_engine::assets::{AssetError, AssetKind, AssetSlot, asset_promise};
use rambler_engine::camera::CameraPolicy;
use rambler_engine::game::{GameSession, SessionConfig, SessionError, SessionEvent};
use rambler_engine::input::KeyCode;
use rambler_engine::interaction::{InteractionKind, InteractionSpec};
use rambler_engine::lifecycle::Lifecycle;
use rambler_engine::physics::{Aabb, EnvironmentGeometry, EnvironmentMesh};

const EPSILON: f32 = 1e-3;

fn rig() -> CharacterRig {
    CharacterRig::new([
        AnimationClip::new("standing", 2.0),
        AnimationClip::new("walking", 1.0),
        AnimationClip::new("dancing", 3.0),
        AnimationClip::new("sitting", 1.0),
        AnimationClip::new("sit-look-around", 4.0),
    ])
}

fn box_environment() -> EnvironmentGeometry {
    EnvironmentGeometry::new(vec![EnvironmentMesh::new(
        "box",
        Aabb::from_center_half_extents(Vec3::new(0.0, 75.0, 0.0), Vec3::splat(75.0)),
    )])
}

fn chair_environment(center: Vec3) -> EnvironmentGeometry {
    EnvironmentGeometry::new(vec![EnvironmentMesh::new(
        "chair",
        Aabb::from_center_half_extents(center, Vec3::splat(10.0)),
    )])
}

/// Session with both assets already resolved; the first tick activates it.
fn loaded_session(config: SessionConfig, env: EnvironmentGeometry) -> GameSession {
    let mut session = GameSession::new(config).unwrap();
    session.begin_loading(AssetSlot::ready(AssetKind::Character, rig())).unwrap();
    session.load_environment(AssetSlot::ready(AssetKind::Environment, env));
    session
}

fn sit_config(spawn: Vec3) -> SessionConfig {
    let mut config = SessionConfig::default();
    config.spawn.position = spawn;
    let mut chair = InteractionSpec::new(
        "chair",
        InteractionKind::sit(Vec3::new(0.0, 0.0, -20.0), std::f32::consts::PI),
    );
    chair.prompt = Some("Sit".to_string());
    config.interactions.push(chair);
    config
}

// ============================================================================
// Lifecycle and assets
// ============================================================================

#[test]
fn test_lifecycle_follows_character_load() {
    let mut session = GameSession::new(SessionConfig::default()).unwrap();
    assert_eq!(session.lifecycle(), Lifecycle::Uninitialized);

    let (resolver, slot) = asset_promise(AssetKind::Character);
    session.begin_loading(slot).unwrap();
    assert_eq!(session.lifecycle(), Lifecycle::Initializing);

    for _ in 0..5 {
        session.tick(0.1);
        assert_eq!(session.lifecycle(), Lifecycle::Initializing);
    }

    resolver.resolve(rig());
    session.tick(0.1);
    assert_eq!(session.lifecycle(), Lifecycle::Active);

    let events = session.drain_events();
    assert_eq!(events.first(), Some(&SessionEvent::LifecycleChanged(Lifecycle::Initializing)));
    assert!(events.contains(&SessionEvent::ActionChanged("standing".into())));
    assert_eq!(events.last(), Some(&SessionEvent::LifecycleChanged(Lifecycle::Active)));
}

#[test]
fn test_ticks_before_load_do_not_move_player() {
    let mut session = GameSession::new(SessionConfig::default()).unwrap();
    session.handle_key(KeyCode::W, true);
    session.handle_key(KeyCode::A, true);

    for _ in 0..10 {
        session.tick(0.1);
    }
    assert_eq!(session.player().position, Vec3::ZERO);
    assert_eq!(session.player().yaw, 0.0);
    assert!(session.player().current_action.is_none());
}

#[test]
fn test_missing_environment_skips_forward_but_turns() {
    let mut session = GameSession::new(SessionConfig::default()).unwrap();
    session.begin_loading(AssetSlot::ready(AssetKind::Character, rig())).unwrap();
    session.handle_key(KeyCode::W, true);
    session.handle_key(KeyCode::A, true);

    session.tick(0.1);

    assert_eq!(session.lifecycle(), Lifecycle::Active);
    assert!(session.last_step().environment_missing);
    assert_eq!(session.player().position, Vec3::ZERO);
    assert!((session.player().yaw - 0.3).abs() < 1e-6);
    assert!(matches!(
        session.is_move_blocked(),
        Err(SessionError::AssetNotReady(AssetKind::Environment))
    ));
}

#[test]
fn test_failed_character_load_can_retry() {
    let mut session = GameSession::new(SessionConfig::default()).unwrap();
    let (resolver, slot) = asset_promise(AssetKind::Character);
    session.begin_loading(slot).unwrap();
    resolver.reject("404 character.fbx");

    session.tick(0.1);
    assert_eq!(session.lifecycle(), Lifecycle::Uninitialized);
    assert!(session.drain_events().contains(&SessionEvent::AssetFailed {
        kind: AssetKind::Character,
        error: AssetError::Failed("404 character.fbx".into()),
    }));

    session.begin_loading(AssetSlot::ready(AssetKind::Character, rig())).unwrap();
    session.tick(0.1);
    assert_eq!(session.lifecycle(), Lifecycle::Active);
}

#[test]
fn test_character_load_timeout() {
    let mut config = SessionConfig::default();
    config.assets.load_timeout_secs = Some(0.5);
    let mut session = GameSession::new(config).unwrap();
    session
        .begin_loading(AssetSlot::pending(AssetKind::Character, std::future::pending()))
        .unwrap();

    for _ in 0..10 {
        session.tick(0.1);
    }

    assert_eq!(session.lifecycle(), Lifecycle::Uninitialized);
    assert!(session.drain_events().iter().any(|event| matches!(
        event,
        SessionEvent::AssetFailed {
            kind: AssetKind::Character,
            error: AssetError::TimedOut { .. },
        }
    )));
}

#[test]
fn test_failed_environment_leaves_session_running() {
    let mut session = GameSession::new(SessionConfig::default()).unwrap();
    session.begin_loading(AssetSlot::ready(AssetKind::Character, rig())).unwrap();
    let (resolver, slot) = asset_promise::<EnvironmentGeometry>(AssetKind::Environment);
    session.load_environment(slot);
    drop(resolver);

    session.tick(0.1);
    assert_eq!(session.lifecycle(), Lifecycle::Active);
    assert!(session.environment().is_none());
    assert!(session.drain_events().contains(&SessionEvent::AssetFailed {
        kind: AssetKind::Environment,
        error: AssetError::Dropped,
    }));

    // A replacement load recovers
    session.load_environment(AssetSlot::ready(AssetKind::Environment, box_environment()));
    session.tick(0.1);
    assert!(session.environment().is_some());
}

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn test_walk_into_box_until_blocked() {
    let mut config = SessionConfig::default();
    config.spawn.position = Vec3::new(0.0, 0.0, -500.0);
    let mut session = loaded_session(config, box_environment());

    session.handle_key(KeyCode::W, true);

    let mut ticks = 0;
    while !session.is_move_blocked().unwrap() {
        session.tick(0.1);
        ticks += 1;
        assert!(ticks < 100, "never became blocked");
    }
    assert_eq!(ticks, 38);
    assert_eq!(session.player().current_action.as_deref(), Some("walking"));

    let stopped_at = session.player().position;
    assert!((stopped_at.z + 120.0).abs() < EPSILON);
    for _ in 0..5 {
        session.tick(0.1);
        assert!(session.last_step().blocked);
        assert_eq!(session.player().position, stopped_at);
    }

    // Camera follows the final position
    let pose = session.camera_pose().unwrap();
    assert!((pose.position - (stopped_at + Vec3::new(0.0, 200.0, -200.0))).length() < EPSILON);
}

#[test]
fn test_frame_delta_is_clamped() {
    let mut session = loaded_session(SessionConfig::default(), EnvironmentGeometry::empty());
    session.handle_key(KeyCode::W, true);

    // A tab suspend reports a huge delta; movement is limited to max_frame_delta
    session.tick(30.0);
    assert!((session.player().position.z - 25.0).abs() < EPSILON);

    session.tick(f32::NAN);
    assert!((session.player().position.z - 25.0).abs() < EPSILON);
}

// ============================================================================
// Actions
// ============================================================================

#[test]
fn test_latest_action_wins_and_restarts() {
    let mut controller = AnimationController::new(rig(), ["sitting"]);
    controller.set_action("standing").unwrap();
    controller.advance(0.5, Lifecycle::Active);
    controller.set_action("walking").unwrap();

    let active = controller.active().unwrap();
    assert_eq!(active.name, "walking");
    assert_eq!(active.time, 0.0);
}

#[test]
fn test_missing_clip_keeps_previous() {
    let mut session = loaded_session(SessionConfig::default(), EnvironmentGeometry::empty());
    session.tick(0.1);

    let err = session.set_action("flying").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Animation(AnimationError::MissingClip { ref name }) if name == "flying"
    ));
    assert_eq!(session.player().current_action.as_deref(), Some("standing"));
    assert_eq!(session.animation().unwrap().active_name(), Some("standing"));
}

#[test]
fn test_missing_walk_clip_reported_as_event() {
    let mut config = SessionConfig::default();
    config.animation.walk = "jogging".to_string();
    let mut session = loaded_session(config, EnvironmentGeometry::empty());
    session.tick(0.1);
    session.drain_events();

    session.handle_key(KeyCode::W, true);
    session.tick(0.1);

    let events = session.drain_events();
    assert!(events.contains(&SessionEvent::ActionRejected("jogging".into())));
    assert_eq!(session.animation().unwrap().active_name(), Some("standing"));
    // Movement is independent of the clip
    assert!(session.player().position.z > 0.0);
}

#[test]
fn test_interact_without_target_plays_secondary() {
    let mut session = loaded_session(SessionConfig::default(), EnvironmentGeometry::empty());
    session.tick(0.1);

    session.handle_key(KeyCode::Space, true);
    session.tick(0.1);
    assert_eq!(session.player().current_action.as_deref(), Some("dancing"));
}

#[test]
fn test_held_interact_fires_once() {
    let mut session = loaded_session(SessionConfig::default(), EnvironmentGeometry::empty());
    session.tick(0.1);
    session.handle_key(KeyCode::Space, true);
    session.tick(0.1);
    session.drain_events();

    // Auto-repeat of a held key
    session.handle_key(KeyCode::Space, true);
    session.tick(0.1);
    assert!(session.drain_events().is_empty());
}

// ============================================================================
// Interactions
// ============================================================================

#[test]
fn test_prompt_follows_proximity() {
    let mut session = loaded_session(sit_config(Vec3::new(0.0, 0.0, 100.0)), chair_environment(Vec3::ZERO));

    session.tick(0.1);
    assert!(session.drain_events().contains(&SessionEvent::PromptShown {
        name: "chair".into(),
        prompt: Some("Sit".into()),
    }));
    assert!(session.interactions().prompt_visible());

    // Walk away (facing +Z, away from the chair)
    session.handle_key(KeyCode::W, true);
    session.tick(0.1);
    assert!(session.drain_events().contains(&SessionEvent::PromptHidden));
    assert!(session.interactions().triggered().is_none());
}

#[test]
fn test_sit_chains_follow_up_clip() {
    let chair = Vec3::new(0.0, 10.0, 200.0);
    let mut session = loaded_session(sit_config(Vec3::new(0.0, 0.0, 150.0)), chair_environment(chair));
    session.tick(0.1);
    session.drain_events();

    session.handle_key(KeyCode::Space, true);
    session.tick(0.1);

    let player = session.player();
    assert_eq!(player.position, chair + Vec3::new(0.0, 0.0, -20.0));
    assert_eq!(player.yaw, std::f32::consts::PI);
    assert_eq!(player.current_action.as_deref(), Some("sitting"));

    // Camera reflects the snapped position within the same tick
    let pose = session.camera_pose().unwrap();
    assert!((pose.position - (player.position + Vec3::new(0.0, 200.0, -200.0))).length() < EPSILON);

    for _ in 0..15 {
        session.tick(0.1);
    }
    assert_eq!(session.player().current_action.as_deref(), Some("sit-look-around"));

    let actions: Vec<_> = session
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            SessionEvent::ActionChanged(name) => Some(name),
            _ => None,
        })
        .collect();
    assert_eq!(actions, vec!["sitting".to_string(), "sit-look-around".to_string()]);
}

#[test]
fn test_sitting_stops_walking() {
    let chair = Vec3::new(0.0, 10.0, 240.0);
    let mut session = loaded_session(sit_config(Vec3::new(0.0, 0.0, 150.0)), chair_environment(chair));
    session.tick(0.1);
    session.handle_key(KeyCode::W, true);
    session.tick(0.1);
    session.drain_events();

    session.handle_key(KeyCode::Space, true);
    session.tick(0.1);
    assert!(session.drain_events().contains(&SessionEvent::CueStopped("footsteps".into())));

    let seated = session.player().position;
    session.tick(0.1);
    assert_eq!(session.player().position, seated);
    assert!(!session.player().move_forward);
}

#[test]
fn test_releasing_forward_after_sit_keeps_chain() {
    let chair = Vec3::new(0.0, 10.0, 240.0);
    let mut session = loaded_session(sit_config(Vec3::new(0.0, 0.0, 150.0)), chair_environment(chair));
    session.tick(0.1);
    session.handle_key(KeyCode::W, true);
    session.tick(0.1);
    session.handle_key(KeyCode::Space, true);
    session.tick(0.1);
    assert_eq!(session.player().current_action.as_deref(), Some("sitting"));
    session.drain_events();

    session.handle_key(KeyCode::W, false);
    session.tick(0.1);
    let events = session.drain_events();
    assert!(!events.contains(&SessionEvent::ActionChanged("standing".into())));
    assert!(!events.contains(&SessionEvent::CueStopped("footsteps".into())));
    assert_eq!(session.player().current_action.as_deref(), Some("sitting"));

    for _ in 0..15 {
        session.tick(0.1);
    }
    assert_eq!(session.player().current_action.as_deref(), Some("sit-look-around"));
}

#[test]
fn test_explicit_action_cancels_chain() {
    let chair = Vec3::new(0.0, 10.0, 200.0);
    let mut session = loaded_session(sit_config(Vec3::new(0.0, 0.0, 150.0)), chair_environment(chair));
    session.tick(0.1);
    session.handle_key(KeyCode::Space, true);
    session.tick(0.1);

    session.set_action("standing").unwrap();
    for _ in 0..15 {
        session.tick(0.1);
    }
    assert_eq!(session.player().current_action.as_deref(), Some("standing"));
}

#[test]
fn test_target_mirror_from_config() {
    let mut config = sit_config(Vec3::new(-100.0, 0.0, 0.0));
    config.environment.target_mirror = Vec3::new(-1.0, 1.0, 1.0);
    let mut session = loaded_session(config, chair_environment(Vec3::new(100.0, 0.0, 0.0)));

    session.tick(0.1);
    assert!(session.interactions().triggered().is_some());
}

#[test]
fn test_invalid_interaction_rejected_at_startup() {
    let mut config = SessionConfig::default();
    config
        .interactions
        .push(InteractionSpec::new("jukebox", InteractionKind::play("")));
    assert!(matches!(GameSession::new(config), Err(SessionError::Config(_))));
}

// ============================================================================
// Camera sockets
// ============================================================================

#[test]
fn test_cycle_camera_socket_with_key() {
    let mut config = SessionConfig::default();
    config.camera = CameraPolicy::Sockets;
    let mut session = loaded_session(config, EnvironmentGeometry::empty());
    session.tick(0.1);
    session.drain_events();

    let before = session.camera_pose().unwrap();
    session.handle_key(KeyCode::V, true);

    assert_eq!(
        session.drain_events(),
        vec![SessionEvent::CameraSocketChanged("front".into())]
    );
    let after = session.camera_pose().unwrap();
    assert_ne!(before, after);
    assert_eq!(after.position, Vec3::new(0.0, 150.0, 300.0));
}

#[test]
fn test_cycle_ignored_under_follow_policy() {
    let mut session = loaded_session(SessionConfig::default(), EnvironmentGeometry::empty());
    session.tick(0.1);
    session.drain_events();

    session.handle_key(KeyCode::V, true);
    assert!(session.drain_events().is_empty());
}
