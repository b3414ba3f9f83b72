//! Keyboard Input Module
//!
//! Generic key codes, decoupled from any windowing system. Desktop hosts
//! translate from winit (see `game::config::input_config`), browser hosts
//! translate from DOM `KeyboardEvent.code` strings via [`KeyCode::from_dom_code`].

/// Generic key codes for player input, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letter keys
    W,
    A,
    S,
    D,
    E,
    Q,
    C,
    V,

    Space,
    ShiftLeft,
    ShiftRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Escape,
    Enter,
    Tab,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Translate a DOM `KeyboardEvent.code` value ("KeyW", "Space", ...).
    ///
    /// Unrecognized codes map to [`KeyCode::Unknown`].
    pub fn from_dom_code(code: &str) -> Self {
        match code {
            "KeyW" => KeyCode::W,
            "KeyA" => KeyCode::A,
            "KeyS" => KeyCode::S,
            "KeyD" => KeyCode::D,
            "KeyE" => KeyCode::E,
            "KeyQ" => KeyCode::Q,
            "KeyC" => KeyCode::C,
            "KeyV" => KeyCode::V,
            "Space" => KeyCode::Space,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "Escape" => KeyCode::Escape,
            "Enter" => KeyCode::Enter,
            "Tab" => KeyCode::Tab,
            _ => KeyCode::Unknown,
        }
    }
}
