// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global input surface: where pointer-move and pointer-up listeners live while dragging.
//!
//! A drag must keep tracking the pointer after it leaves the grabbed element, so
//! the host listens on the document or window rather than on the element. The
//! session subscribes when a drag activates and drops the subscription on every
//! exit from dragging. Detaching is tied to `Drop` of the subscription, so it
//! still happens when a lifecycle callback fails or panics.
//!
//! Hosts that already route every pointer event to the session can use
//! [`NoSurface`].

use alloc::rc::Rc;
use core::cell::Cell;

/// A place pointer listeners can be attached to for the duration of a drag.
pub trait InputSurface {
    /// Guard that keeps the listeners attached; dropping it detaches them.
    type Subscription;

    /// Attaches pointer-move and pointer-up listeners.
    fn subscribe(&self) -> Self::Subscription;
}

/// Surface for hosts that forward pointer events to the session themselves.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoSurface;

impl InputSurface for NoSurface {
    type Subscription = ();

    fn subscribe(&self) -> Self::Subscription {}
}

/// Surface that only counts attached listeners.
///
/// Useful for tests and for hosts that poll the counter to decide whether to
/// forward global pointer events.
#[derive(Clone, Debug, Default)]
pub struct CountingSurface {
    attached: Rc<Cell<usize>>,
}

impl CountingSurface {
    /// Creates a surface with no listeners attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn attached(&self) -> usize {
        self.attached.get()
    }

    /// Returns `true` while any listener is attached.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.attached.get() > 0
    }
}

/// Subscription returned by [`CountingSurface::subscribe`].
#[derive(Debug)]
pub struct CountingSubscription {
    attached: Rc<Cell<usize>>,
}

impl Drop for CountingSubscription {
    fn drop(&mut self) {
        self.attached.set(self.attached.get() - 1);
        tracing::trace!(attached = self.attached.get(), "pointer listeners detached");
    }
}

impl InputSurface for CountingSurface {
    type Subscription = CountingSubscription;

    fn subscribe(&self) -> Self::Subscription {
        self.attached.set(self.attached.get() + 1);
        tracing::trace!(attached = self.attached.get(), "pointer listeners attached");
        CountingSubscription {
            attached: Rc::clone(&self.attached),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_detaches_on_drop() {
        let surface = CountingSurface::new();
        assert!(!surface.is_listening());
        let sub = surface.subscribe();
        assert_eq!(surface.attached(), 1);
        drop(sub);
        assert_eq!(surface.attached(), 0);
    }

    #[test]
    fn clones_observe_the_same_counter() {
        let surface = CountingSurface::new();
        let observer = surface.clone();
        let _sub = surface.subscribe();
        assert!(observer.is_listening());
    }
}
