//! Session lifecycle
//!
//! `Uninitialized -> Initializing -> Active`, with `Initializing -> Uninitialized`
//! allowed so a failed character load can be retried.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Nothing requested yet
    #[default]
    Uninitialized,
    /// Character asset requested, not resolved
    Initializing,
    /// Character asset resolved; animation and locomotion run
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal lifecycle transition {from} -> {to}")]
pub struct LifecycleError {
    pub from: Lifecycle,
    pub to: Lifecycle,
}

impl Lifecycle {
    /// Whether moving from `self` to `to` is allowed.
    pub fn can_transition(self, to: Lifecycle) -> bool {
        matches!(
            (self, to),
            (Lifecycle::Uninitialized, Lifecycle::Initializing)
                | (Lifecycle::Initializing, Lifecycle::Active)
                | (Lifecycle::Initializing, Lifecycle::Uninitialized)
        )
    }

    /// Move to `to`, or fail without changing anything.
    pub fn transition(&mut self, to: Lifecycle) -> Result<Lifecycle, LifecycleError> {
        if !self.can_transition(to) {
            return Err(LifecycleError { from: *self, to });
        }
        *self = to;
        Ok(to)
    }

    pub fn is_active(self) -> bool {
        self == Lifecycle::Active
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lifecycle::Uninitialized => "UNINITIALIZED",
            Lifecycle::Initializing => "INITIALIZING",
            Lifecycle::Active => "ACTIVE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path() {
        let mut state = Lifecycle::default();
        assert_eq!(state.transition(Lifecycle::Initializing), Ok(Lifecycle::Initializing));
        assert_eq!(state.transition(Lifecycle::Active), Ok(Lifecycle::Active));
        assert!(state.is_active());
    }

    #[test]
    fn test_cannot_skip_initializing() {
        let mut state = Lifecycle::Uninitialized;
        let err = state.transition(Lifecycle::Active).unwrap_err();
        assert_eq!(err.from, Lifecycle::Uninitialized);
        assert_eq!(state, Lifecycle::Uninitialized);
    }

    #[test]
    fn test_active_is_terminal() {
        let mut state = Lifecycle::Active;
        assert!(state.transition(Lifecycle::Uninitialized).is_err());
        assert!(state.transition(Lifecycle::Initializing).is_err());
        assert!(state.is_active());
    }

    #[test]
    fn test_failed_load_can_retry() {
        let mut state = Lifecycle::Initializing;
        assert!(state.transition(Lifecycle::Uninitialized).is_ok());
        assert!(state.transition(Lifecycle::Initializing).is_ok());
    }
}
