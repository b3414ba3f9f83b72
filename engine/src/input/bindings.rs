//! Input Bindings Module
//!
//! Maps physical keys to the logical player controls, allowing remapping
//! without touching session logic.

use std::collections::HashMap;

use super::KeyCode;

/// Logical player controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Walk forward along the facing direction (default: W)
    MoveForward,
    /// Turn counter-clockwise (default: A)
    TurnLeft,
    /// Turn clockwise (default: D)
    TurnRight,
    /// Use a nearby interaction, or play the secondary action (default: Space)
    Interact,
    /// Switch to the next camera socket (default: V)
    CycleCamera,
}

/// Maps physical keys to logical controls, one key per control.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to control
    key_to_control: HashMap<KeyCode, Control>,
    /// Map from control to physical key (for reverse lookup and display)
    control_to_key: HashMap<Control, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create bindings with the default layout.
    ///
    /// - W = MoveForward
    /// - A = TurnLeft
    /// - D = TurnRight
    /// - Space = Interact
    /// - V = CycleCamera
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, Control::MoveForward);
        bindings.bind(KeyCode::A, Control::TurnLeft);
        bindings.bind(KeyCode::D, Control::TurnRight);
        bindings.bind(KeyCode::Space, Control::Interact);
        bindings.bind(KeyCode::V, Control::CycleCamera);

        bindings
    }

    /// Create bindings with nothing bound.
    pub fn empty() -> Self {
        Self {
            key_to_control: HashMap::new(),
            control_to_key: HashMap::new(),
        }
    }

    /// Bind a physical key to a control.
    ///
    /// Any previous binding of either the key or the control is removed.
    pub fn bind(&mut self, key: KeyCode, control: Control) {
        if let Some(old_control) = self.key_to_control.remove(&key) {
            self.control_to_key.remove(&old_control);
        }
        if let Some(old_key) = self.control_to_key.remove(&control) {
            self.key_to_control.remove(&old_key);
        }

        self.key_to_control.insert(key, control);
        self.control_to_key.insert(control, key);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(control) = self.key_to_control.remove(&key) {
            self.control_to_key.remove(&control);
        }
    }

    /// Get the control bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<Control> {
        self.key_to_control.get(&key).copied()
    }

    /// Get the key bound to a control, if any.
    pub fn get_key(&self, control: Control) -> Option<KeyCode> {
        self.control_to_key.get(&control).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::W), Some(Control::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::A), Some(Control::TurnLeft));
        assert_eq!(bindings.get_action(KeyCode::D), Some(Control::TurnRight));
        assert_eq!(bindings.get_action(KeyCode::Space), Some(Control::Interact));
        assert_eq!(bindings.get_action(KeyCode::V), Some(Control::CycleCamera));
        assert_eq!(bindings.get_action(KeyCode::S), None);
    }

    #[test]
    fn test_rebind_key() {
        let mut bindings = KeyBindings::new();

        bindings.bind(KeyCode::ArrowUp, Control::MoveForward);

        // W should no longer be bound
        assert_eq!(bindings.get_action(KeyCode::W), None);
        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(Control::MoveForward));
        assert_eq!(bindings.get_key(Control::MoveForward), Some(KeyCode::ArrowUp));
    }

    #[test]
    fn test_unbind_key() {
        let mut bindings = KeyBindings::new();

        bindings.unbind_key(KeyCode::Space);

        assert_eq!(bindings.get_action(KeyCode::Space), None);
        assert_eq!(bindings.get_key(Control::Interact), None);
    }
}
