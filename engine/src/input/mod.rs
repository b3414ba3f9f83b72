//! Input Module
//!
//! Turns discrete key edges into player intent. This module is decoupled
//! from any windowing system; hosts feed it generic [`KeyCode`]s or logical
//! [`Control`]s directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use rambler_engine::input::{Control, InputState};
//!
//! let mut input = InputState::new(3.0);
//! input.handle(Control::MoveForward, true);
//! assert!(input.move_forward());
//! ```

pub mod bindings;
pub mod keyboard;

pub use bindings::{Control, KeyBindings};
pub use keyboard::KeyCode;

/// Logical animation request raised by an input edge.
///
/// The session maps these onto concrete clip names from its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequest {
    /// Idle clip ("standing")
    Idle,
    /// Walk clip ("walking")
    Walk,
    /// Secondary clip played when nothing is in reach ("dancing")
    Secondary,
}

/// Walking sound cue request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueRequest {
    Start,
    Stop,
}

/// Immediate side requests produced by a single edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub cue: Option<CueRequest>,
    pub cycle_camera: bool,
}

/// Forward/turn intent tracked from key edges.
///
/// Animation requests and interact presses are latched until the next tick
/// consumes them with [`InputState::take_action`] / [`InputState::take_interact`],
/// so input is always read before locomotion within a tick.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    move_forward: bool,
    turn_rate: f32,
    /// Magnitude of the turn rate in radians per second
    turn_speed: f32,
    interact_held: bool,
    interact_pending: bool,
    pending_action: Option<ActionRequest>,
}

impl InputState {
    /// Create an input state turning at `turn_speed` radians per second.
    pub fn new(turn_speed: f32) -> Self {
        Self {
            turn_speed,
            ..Default::default()
        }
    }

    /// Apply a key-down (`pressed = true`) or key-up edge for a control.
    ///
    /// Auto-repeated key-downs of a control that is already held are ignored,
    /// as is a forward key-up once forward intent was halted.
    pub fn handle(&mut self, control: Control, pressed: bool) -> InputOutcome {
        let mut outcome = InputOutcome::default();

        match (control, pressed) {
            (Control::MoveForward, true) => {
                if !self.move_forward {
                    self.move_forward = true;
                    self.pending_action = Some(ActionRequest::Walk);
                    outcome.cue = Some(CueRequest::Start);
                }
            }
            (Control::MoveForward, false) => {
                // Forward may already be halted by an effect
                if std::mem::take(&mut self.move_forward) {
                    self.pending_action = Some(ActionRequest::Idle);
                    outcome.cue = Some(CueRequest::Stop);
                }
            }
            (Control::TurnLeft, true) => self.turn_rate = self.turn_speed,
            (Control::TurnRight, true) => self.turn_rate = -self.turn_speed,
            (Control::TurnLeft | Control::TurnRight, false) => self.turn_rate = 0.0,
            (Control::Interact, true) => {
                if !self.interact_held {
                    self.interact_held = true;
                    self.interact_pending = true;
                }
            }
            (Control::Interact, false) => self.interact_held = false,
            (Control::CycleCamera, true) => outcome.cycle_camera = true,
            (Control::CycleCamera, false) => {}
        }

        outcome
    }

    /// Whether forward movement is requested.
    pub fn move_forward(&self) -> bool {
        self.move_forward
    }

    /// Signed turn rate in radians per second (positive turns left).
    pub fn turn_rate(&self) -> f32 {
        self.turn_rate
    }

    /// Take the latest animation request, if any.
    pub fn take_action(&mut self) -> Option<ActionRequest> {
        self.pending_action.take()
    }

    /// Take a pending interact press.
    pub fn take_interact(&mut self) -> bool {
        std::mem::take(&mut self.interact_pending)
    }

    /// Drop forward intent without raising an action, e.g. when an effect seats the player.
    ///
    /// Returns the cue to stop walking sounds if forward was held.
    pub fn halt_forward(&mut self) -> Option<CueRequest> {
        if std::mem::take(&mut self.move_forward) {
            Some(CueRequest::Stop)
        } else {
            None
        }
    }

    /// Release everything, e.g. when the host window loses focus.
    pub fn reset(&mut self) {
        *self = Self::new(self.turn_speed);
    }
}
