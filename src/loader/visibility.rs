//! Viewport visibility watching
//!
//! The deferred loader does not know how the host detects visibility; it
//! asks a [`VisibilityWatcher`] for a trigger-once callback and holds the
//! returned [`Subscription`] until triggered or disposed.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callback fired when a watched target becomes visible
pub type VisibilityCallback = Box<dyn FnOnce() + Send>;

/// A source of viewport-intersection signals
///
/// Implementations must fire each registered callback at most once
/// (trigger-once semantics): re-entering the viewport after the first
/// trigger never re-fires.
pub trait VisibilityWatcher: Send + Sync {
    /// Watch for visibility within `margin_px` of the viewport
    fn watch(&self, margin_px: u32, on_visible: VisibilityCallback) -> Subscription;
}

/// Handle to an active watch registration
///
/// Disposing (explicitly or on drop) unsubscribes; a disposed
/// subscription never fires its callback.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to cancel
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Unsubscribe from the watcher
    pub fn dispose(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Watcher that never reports visibility
///
/// Used where loading is unconditionally immediate and no observation is
/// wanted; the callback is dropped without firing.
pub struct NullWatcher;

impl VisibilityWatcher for NullWatcher {
    fn watch(&self, _margin_px: u32, _on_visible: VisibilityCallback) -> Subscription {
        Subscription::noop()
    }
}

/// A manually driven watcher for headless hosts and tests
///
/// Registered callbacks fire when [`ManualWatcher::fire_all`] is called,
/// simulating the targets entering the viewport.
#[derive(Default)]
pub struct ManualWatcher {
    pending: Arc<Mutex<HashMap<u64, VisibilityCallback>>>,
    next_id: AtomicU64,
}

impl ManualWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every pending callback, consuming the registrations
    pub fn fire_all(&self) {
        let callbacks: Vec<VisibilityCallback> = {
            let mut pending = self.pending.lock();
            pending.drain().map(|(_, cb)| cb).collect()
        };
        for callback in callbacks {
            callback();
        }
    }

    /// Number of registrations still waiting for a trigger
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

impl VisibilityWatcher for ManualWatcher {
    fn watch(&self, _margin_px: u32, on_visible: VisibilityCallback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.pending.lock().insert(id, on_visible);

        let pending = Arc::clone(&self.pending);
        Subscription::new(move || {
            pending.lock().remove(&id);
        })
    }
}
