//! Input Configuration
//!
//! Translates winit key codes into the engine's windowing-agnostic
//! [`KeyCode`]s so desktop hosts can feed [`GameSession::handle_key`]
//! straight from their event loop. Logical remapping lives in
//! [`crate::input::KeyBindings`]; this layer only names physical keys.
//!
//! [`GameSession::handle_key`]: crate::game::GameSession::handle_key

use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};

use crate::input::KeyCode;

/// Map a winit key code to the engine key code.
///
/// Keys the session never reads map to [`KeyCode::Unknown`].
pub fn engine_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::KeyQ => KeyCode::Q,
        WinitKey::KeyC => KeyCode::C,
        WinitKey::KeyV => KeyCode::V,
        WinitKey::Space => KeyCode::Space,
        WinitKey::ShiftLeft => KeyCode::ShiftLeft,
        WinitKey::ShiftRight => KeyCode::ShiftRight,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::Escape => KeyCode::Escape,
        WinitKey::Enter => KeyCode::Enter,
        WinitKey::Tab => KeyCode::Tab,
        _ => KeyCode::Unknown,
    }
}

/// Map a winit physical key, as carried by `KeyEvent::physical_key`.
pub fn engine_key_from_physical(key: PhysicalKey) -> KeyCode {
    match key {
        PhysicalKey::Code(code) => engine_key(code),
        PhysicalKey::Unidentified(_) => KeyCode::Unknown,
    }
}
