//! Walkabout - headless session driver
//!
//! Runs a [`GameSession`] without a window: builds a small demo room, replays
//! a scripted key timeline at a fixed frame rate and logs the player and
//! camera trajectory plus every session event.
//!
//! Usage: `walkabout [config.json]`. Set `RUST_LOG=debug` to see blocked
//! movement and clip switches.

use glam::Vec3;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use rambler_engine::animation::{AnimationClip, CharacterRig};
use rambler_engine::assets::{AssetKind, AssetSlot, asset_promise};
use rambler_engine::game::{GameSession, SessionConfig};
use rambler_engine::input::KeyCode;
use rambler_engine::interaction::{InteractionKind, InteractionSpec};
use rambler_engine::physics::{Aabb, EnvironmentGeometry, EnvironmentMesh, EnvironmentTransform};

const FRAME_DT: f32 = 1.0 / 60.0;
const RUN_SECONDS: f32 = 9.0;
const LOG_INTERVAL: f32 = 0.5;

/// (time in seconds, key, pressed)
const TIMELINE: &[(f32, KeyCode, bool)] = &[
    (0.0, KeyCode::W, true),
    (2.0, KeyCode::A, true),
    (2.6, KeyCode::A, false),
    (4.0, KeyCode::W, false),
    (4.5, KeyCode::Space, true),
    (4.6, KeyCode::Space, false),
    (5.0, KeyCode::D, true),
    (5.5, KeyCode::D, false),
    (5.5, KeyCode::W, true),
    (8.0, KeyCode::W, false),
];

/// Clip set of the demo character.
fn demo_rig() -> CharacterRig {
    CharacterRig::new([
        AnimationClip::new("standing", 2.4),
        AnimationClip::new("walking", 1.1),
        AnimationClip::new("dancing", 4.0),
        AnimationClip::new("sitting", 1.5),
        AnimationClip::new("sit-look-around", 3.2),
    ])
}

/// Table, chair and back wall in model space, placed with the configured transform.
fn demo_room(transform: &EnvironmentTransform) -> EnvironmentGeometry {
    let local = vec![
        EnvironmentMesh::new("table", Aabb::from_center_half_extents(Vec3::new(0.0, 75.0, 600.0), Vec3::splat(75.0))),
        EnvironmentMesh::new("chair", Aabb::from_center_half_extents(Vec3::new(-250.0, 60.0, 300.0), Vec3::new(40.0, 60.0, 40.0))),
        EnvironmentMesh::new("wall", Aabb::new(Vec3::new(-1500.0, 0.0, 1400.0), Vec3::new(1500.0, 400.0, 1450.0))),
    ];
    EnvironmentGeometry::from_local(local, transform)
}

fn demo_config() -> SessionConfig {
    let mut config = SessionConfig::default();

    let mut chair = InteractionSpec::new("chair", InteractionKind::sit(Vec3::new(0.0, 0.0, -30.0), 0.0));
    chair.trigger_radius = 150.0;
    chair.prompt = Some("Press Space to sit".to_string());
    config.interactions.push(chair);
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading session config");
            SessionConfig::load(path)?
        }
        None => demo_config(),
    };
    let room = demo_room(&config.environment.transform);

    let mut session = GameSession::new(config)?;

    // Character resolves a few frames in, like an async loader would
    let (character, slot) = asset_promise(AssetKind::Character);
    session.begin_loading(slot)?;
    session.load_environment(AssetSlot::ready(AssetKind::Environment, room));
    let mut character = Some(character);

    let mut timeline = TIMELINE.iter().peekable();
    let mut was_blocked = false;
    let mut time = 0.0;
    let mut next_log = 0.0;
    let mut frame = 0u32;

    while time < RUN_SECONDS {
        if frame == 3 {
            if let Some(resolver) = character.take() {
                resolver.resolve(demo_rig());
            }
        }

        while let Some(&&(at, key, pressed)) = timeline.peek() {
            if at > time {
                break;
            }
            session.handle_key(key, pressed);
            timeline.next();
        }

        session.tick(FRAME_DT);

        for event in session.drain_events() {
            info!(t = time, ?event, "session event");
        }

        let blocked = session.last_step().blocked;
        if blocked != was_blocked {
            debug!(t = time, blocked, "forward movement blocked state changed");
            was_blocked = blocked;
        }

        if time >= next_log {
            let player = session.player();
            info!(
                t = time,
                lifecycle = %session.lifecycle(),
                position = ?player.position,
                yaw = player.yaw,
                action = player.current_action.as_deref().unwrap_or("-"),
                camera = ?session.camera_pose().map(|pose| pose.position),
                "player"
            );
            next_log += LOG_INTERVAL;
        }

        time += FRAME_DT;
        frame += 1;
    }

    info!(blocked = ?session.is_move_blocked().ok(), "walkabout finished");
    Ok(())
}
