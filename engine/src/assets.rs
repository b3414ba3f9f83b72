//! Asynchronous asset slots
//!
//! Character and environment assets arrive as completions from the host. A
//! [`AssetSlot`] wraps that completion as a future and is polled once per
//! tick with a no-op waker: the frame loop is the only scheduler, so nothing
//! ever needs waking. Until it resolves the slot reports "not ready" and
//! dependent steps skip themselves.
//!
//! A host callback completes a load through the [`AssetResolver`] half of
//! [`asset_promise`]. Loads can optionally time out, measured in accumulated
//! tick time.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

/// Which asset a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Character,
    Environment,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Character => f.write_str("character"),
            AssetKind::Environment => f.write_str("environment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    #[error("asset load failed: {0}")]
    Failed(String),
    #[error("{kind} asset did not load within {after_secs}s")]
    TimedOut { kind: AssetKind, after_secs: f32 },
    #[error("asset resolver dropped before completing the load")]
    Dropped,
}

type LoadFuture<T> = Pin<Box<dyn Future<Output = Result<T, AssetError>>>>;

enum SlotState<T> {
    Empty,
    Pending { future: LoadFuture<T>, waited: f32 },
    Ready(T),
    Failed(AssetError),
}

/// Result of polling a slot for one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetStatus {
    /// No load was started
    Empty,
    /// Still loading
    Pending,
    /// Resolved during this poll
    JustLoaded,
    /// Resolved on an earlier poll
    Ready,
    /// Failed during this poll
    JustFailed(AssetError),
    /// Failed on an earlier poll
    Failed,
}

/// A single asset load and its outcome.
pub struct AssetSlot<T> {
    kind: AssetKind,
    timeout: Option<f32>,
    state: SlotState<T>,
}

impl<T> fmt::Debug for AssetSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            SlotState::Empty => "empty",
            SlotState::Pending { .. } => "pending",
            SlotState::Ready(_) => "ready",
            SlotState::Failed(_) => "failed",
        };
        f.debug_struct("AssetSlot")
            .field("kind", &self.kind)
            .field("timeout", &self.timeout)
            .field("state", &state)
            .finish()
    }
}

impl<T> AssetSlot<T> {
    /// A slot with no load started.
    pub fn empty(kind: AssetKind) -> Self {
        Self {
            kind,
            timeout: None,
            state: SlotState::Empty,
        }
    }

    /// A slot waiting on `future`.
    pub fn pending(kind: AssetKind, future: impl Future<Output = Result<T, AssetError>> + 'static) -> Self {
        Self {
            kind,
            timeout: None,
            state: SlotState::Pending {
                future: Box::pin(future),
                waited: 0.0,
            },
        }
    }

    /// A slot that is already resolved.
    pub fn ready(kind: AssetKind, value: T) -> Self {
        Self {
            kind,
            timeout: None,
            state: SlotState::Ready(value),
        }
    }

    /// Fail the load once it has been pending for `secs` of tick time.
    pub fn with_timeout(mut self, secs: Option<f32>) -> Self {
        self.timeout = secs;
        self
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Poll the load once, counting `dt` toward the timeout.
    pub fn poll(&mut self, dt: f32) -> AssetStatus {
        let (future, waited) = match &mut self.state {
            SlotState::Empty => return AssetStatus::Empty,
            SlotState::Ready(_) => return AssetStatus::Ready,
            SlotState::Failed(_) => return AssetStatus::Failed,
            SlotState::Pending { future, waited } => (future, waited),
        };

        let mut cx = Context::from_waker(Waker::noop());
        let outcome = match future.as_mut().poll(&mut cx) {
            Poll::Ready(outcome) => outcome,
            Poll::Pending => {
                *waited += dt.max(0.0);
                match self.timeout {
                    Some(limit) if *waited >= limit => Err(AssetError::TimedOut {
                        kind: self.kind,
                        after_secs: limit,
                    }),
                    _ => return AssetStatus::Pending,
                }
            }
        };

        match outcome {
            Ok(value) => {
                self.state = SlotState::Ready(value);
                AssetStatus::JustLoaded
            }
            Err(err) => {
                self.state = SlotState::Failed(err.clone());
                AssetStatus::JustFailed(err)
            }
        }
    }

    pub fn get(&self) -> Option<&T> {
        match &self.state {
            SlotState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            SlotState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SlotState::Ready(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SlotState::Pending { .. })
    }

    pub fn error(&self) -> Option<&AssetError> {
        match &self.state {
            SlotState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Completing half of [`asset_promise`].
///
/// Dropping it without completing fails the load with [`AssetError::Dropped`].
pub struct AssetResolver<T> {
    tx: oneshot::Sender<Result<T, AssetError>>,
}

impl<T> AssetResolver<T> {
    pub fn resolve(self, value: T) {
        self.complete(Ok(value));
    }

    pub fn reject(self, message: impl Into<String>) {
        self.complete(Err(AssetError::Failed(message.into())));
    }

    fn complete(self, outcome: Result<T, AssetError>) {
        // The slot is gone; nobody is waiting for the asset
        if self.tx.send(outcome).is_err() {
            debug!("asset slot dropped before its load completed");
        }
    }
}

/// A pending slot plus the resolver a host callback uses to complete it.
pub fn asset_promise<T: 'static>(kind: AssetKind) -> (AssetResolver<T>, AssetSlot<T>) {
    let (tx, rx) = oneshot::channel();
    let slot = AssetSlot::pending(kind, async move { rx.await.unwrap_or(Err(AssetError::Dropped)) });
    (AssetResolver { tx }, slot)
}
