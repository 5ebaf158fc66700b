//! Listener registration handles.

use std::fmt;

/// A handle to an active subscription returned by every listen primitive.
///
/// Calling [`remove`](ListenerRegistration::remove) detaches the observer;
/// the backend stops delivering events and drops the observer closure.
/// Dropping the registration without calling `remove` leaves the
/// subscription attached for the lifetime of the client, matching the
/// explicit-removal contract of the SDKs this layer wraps.
pub struct ListenerRegistration {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl ListenerRegistration {
    /// Wrap a detach closure supplied by a backend.
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// A registration with nothing to detach.
    ///
    /// Returned by backends that reported an error instead of subscribing.
    pub fn inert() -> Self {
        Self { detach: None }
    }

    /// Detach the observer. Safe to call more than once.
    pub fn remove(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Whether the subscription is still attached via this handle.
    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }
}

impl fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("active", &self.is_active())
            .finish()
    }
}
