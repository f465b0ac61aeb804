//! Observable mount register with automatic change notifications.
//!
//! Same rule as everywhere else state is shared with the UI: mutation =
//! notification. Every method that changes the register also broadcasts
//! the new snapshot.

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::watch;

/// Where the lifecycle currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing mounted.
    #[default]
    Idle,
    /// Mount hooks are running.
    Mounting,
    /// Waiting for the user to confirm or fill the form.
    AwaitingConfirmation,
    /// The action body is running.
    Calling,
}

/// What subscribers see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MountSnapshot {
    pub phase: Phase,
    /// Name of the mounted action.
    pub action: Option<String>,
}

/// Single-slot register holding the mounted action's name and phase.
///
/// ## Thread Safety
///
/// Uses `parking_lot::RwLock` for the register (never poisons) and
/// `tokio::sync::watch` for broadcasts.
pub struct ObservableMount {
    inner: RwLock<MountSnapshot>,
    tx: watch::Sender<MountSnapshot>,
    rx: watch::Receiver<MountSnapshot>,
}

impl ObservableMount {
    /// Create an idle register.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(MountSnapshot::default());
        Self {
            inner: RwLock::new(MountSnapshot::default()),
            tx,
            rx,
        }
    }

    // =========================================================================
    // Mutation Methods (all broadcast automatically)
    // =========================================================================

    /// Put `name` in the register and enter [`Phase::Mounting`].
    ///
    /// Returns the name it replaced, if any.
    pub fn begin(&self, name: &str) -> Option<String> {
        let (previous, snapshot) = {
            let mut inner = self.inner.write();
            let previous = inner.action.replace(name.to_string());
            inner.phase = Phase::Mounting;
            (previous, inner.clone())
        };
        tracing::debug!("Mounting bulk action '{}'", name);
        let _ = self.tx.send(snapshot);
        previous
    }

    /// Move to another phase. Ignored while nothing is mounted.
    pub fn set_phase(&self, phase: Phase) {
        let snapshot = {
            let mut inner = self.inner.write();
            if inner.action.is_none() {
                return;
            }
            inner.phase = phase;
            inner.clone()
        };
        let _ = self.tx.send(snapshot);
    }

    /// Empty the register and go back to [`Phase::Idle`].
    ///
    /// Returns the name that was mounted. Broadcasts only if something was.
    pub fn clear(&self) -> Option<String> {
        let previous = {
            let mut inner = self.inner.write();
            let previous = inner.action.take();
            inner.phase = Phase::Idle;
            previous
        };
        if let Some(name) = &previous {
            tracing::debug!("Unmounted bulk action '{}'", name);
            let _ = self.tx.send(MountSnapshot::default());
        }
        previous
    }

    // =========================================================================
    // Read Methods
    // =========================================================================

    pub fn mounted(&self) -> Option<String> {
        self.inner.read().action.clone()
    }

    pub fn phase(&self) -> Phase {
        self.inner.read().phase
    }

    pub fn snapshot(&self) -> MountSnapshot {
        self.inner.read().clone()
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribe to register changes.
    ///
    /// The receiver sees the current snapshot immediately and every later change.
    pub fn subscribe(&self) -> watch::Receiver<MountSnapshot> {
        self.rx.clone()
    }
}

impl Default for ObservableMount {
    fn default() -> Self {
        Self::new()
    }
}
