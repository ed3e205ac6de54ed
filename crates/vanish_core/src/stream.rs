//! Scroll stream capability
//!
//! A scroll container exposes its position changes as a push-based stream.
//! Consumers depend only on [`ScrollStream`]; [`ScrollEmitter`] is the
//! concrete stream hosts use to feed events in.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::events::ScrollEvent;

new_key_type! {
    /// Unique identifier for a registered scroll handler
    pub struct HandlerId;
}

/// Scroll handler function type
pub type ScrollHandler = Arc<dyn Fn(&ScrollEvent) + Send + Sync>;

/// A push-based source of scroll events
pub trait ScrollStream: Send + Sync {
    /// Register a handler for every subsequent event
    ///
    /// The handler stays registered until the returned [`Subscription`] is
    /// released or dropped.
    fn subscribe(&self, handler: ScrollHandler) -> Subscription;
}

/// Handle to a registered scroll handler
///
/// Dropping the handle releases the handler.
#[must_use = "dropping a Subscription immediately unsubscribes the handler"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Create a subscription that runs `release` when unsubscribed
    pub fn new<F: FnOnce() + Send + 'static>(release: F) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Create a subscription for a stream that cannot unsubscribe
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Check if releasing this subscription is a no-op
    pub fn is_detached(&self) -> bool {
        self.release.is_none()
    }

    /// Release the handler
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("detached", &self.is_detached())
            .finish()
    }
}

#[derive(Default)]
struct EmitterInner {
    handlers: SlotMap<HandlerId, ScrollHandler>,
    /// Subscription order (slot keys are reused, so iteration order is not)
    order: Vec<HandlerId>,
    /// Last emitted offset, used by `scroll_to`
    last_offset: (f32, f32),
}

/// Dispatches scroll events to subscribed handlers
///
/// Clones share the same handler table. Handlers run serially, in
/// subscription order, and outside the table lock, so a handler may
/// subscribe or unsubscribe while an event is being delivered. A handler
/// released during delivery still receives the event in flight.
#[derive(Clone, Default)]
pub struct ScrollEmitter {
    inner: Arc<Mutex<EmitterInner>>,
}

impl ScrollEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, EmitterInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver an event to every registered handler
    pub fn emit(&self, event: ScrollEvent) {
        let handlers: SmallVec<[ScrollHandler; 4]> = {
            let mut inner = self.lock();
            inner.last_offset = (event.current_x, event.current_y);
            inner
                .order
                .iter()
                .filter_map(|id| inner.handlers.get(*id).cloned())
                .collect()
        };

        tracing::trace!(
            current_y = event.current_y,
            delta_y = event.delta_y,
            handlers = handlers.len(),
            "emit scroll event"
        );

        for handler in handlers {
            handler(&event);
        }
    }

    /// Move the vertical offset to `y` and emit the resulting event
    ///
    /// The delta is measured from the previously emitted offset.
    pub fn scroll_to(&self, y: f32) {
        let (x, last_y) = self.lock().last_offset;
        self.emit(ScrollEvent::new(x, y, 0.0, y - last_y));
    }

    /// Get the number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.lock().handlers.len()
    }

    fn remove(inner: &Weak<Mutex<EmitterInner>>, id: HandlerId) {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.handlers.remove(id).is_some() {
            inner.order.retain(|h| *h != id);
        }
    }
}

impl ScrollStream for ScrollEmitter {
    fn subscribe(&self, handler: ScrollHandler) -> Subscription {
        let id = {
            let mut inner = self.lock();
            let id = inner.handlers.insert(handler);
            inner.order.push(id);
            id
        };

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || ScrollEmitter::remove(&weak, id))
    }
}
