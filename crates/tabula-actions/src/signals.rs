//! Outgoing UI signal queue.
//!
//! The lifecycle never talks to a UI runtime directly. It pushes
//! [`UiSignal`]s here and the presentation layer drains them after each
//! operation.

use parking_lot::Mutex;

use tabula_core::UiSignal;

/// Accumulator for signals emitted by the lifecycle.
///
/// # Example
///
/// ```ignore
/// lifecycle.mount("export", [1, 2])?;
///
/// for signal in lifecycle.signals().drain() {
///     ui.apply(signal);
/// }
/// ```
#[derive(Debug, Default)]
pub struct SignalQueue {
    signals: Mutex<Vec<UiSignal>>,
}

impl SignalQueue {
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a signal onto the queue.
    pub fn push(&self, signal: UiSignal) {
        tracing::debug!("Queued signal: {:?}", signal);
        self.signals.lock().push(signal);
    }

    /// Take every queued signal, leaving the queue empty.
    pub fn drain(&self) -> Vec<UiSignal> {
        std::mem::take(&mut *self.signals.lock())
    }

    /// Copy of the queued signals without consuming them.
    pub fn pending(&self) -> Vec<UiSignal> {
        self.signals.lock().clone()
    }

    /// Check if any signals are queued.
    pub fn is_empty(&self) -> bool {
        self.signals.lock().is_empty()
    }

    /// Get the number of queued signals.
    pub fn len(&self) -> usize {
        self.signals.lock().len()
    }
}
