// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host bindings: connect UI elements to a [`DragSession`].
//!
//! - [`bind_draggable`] wraps an element that can start a drag. The host forwards
//!   the element's press, and the global pointer moves and release, to the binding.
//!   The binding measures the element at grab time and applies the session's
//!   [`Activation`](crate::Activation) rule.
//! - [`bind_droppable`] registers a region and returns a guard that unregisters it
//!   when dropped, which maps onto mount/unmount in most toolkits.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::{
//!     DragSession, FixedBounds, Grab, RegionRegistry, bind_draggable, bind_droppable,
//! };
//!
//! let registry = RegionRegistry::<&str, usize>::new();
//! let mut session = DragSession::<&str, usize, usize>::new(registry.clone());
//!
//! let _slot = bind_droppable(&registry, "slot", 0, FixedBounds(Rect::new(0.0, 100.0, 50.0, 150.0)));
//! let mut card = bind_draggable("card", 7, || Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
//!
//! assert_eq!(card.press(&mut session, Point::new(5.0, 5.0), &mut ()).unwrap(), Grab::Activated);
//! card.pointer_move(&mut session, Point::new(5.0, 120.0), &mut ()).unwrap();
//! let outcome = card.release(&mut session, Point::new(5.0, 120.0), &mut ()).unwrap();
//! assert_eq!(outcome.and_then(|o| o.over().map(|over| over.id)), Some("slot"));
//! ```

use alloc::rc::Rc;
use core::fmt::{self, Debug};
use core::hash::Hash;

use kurbo::{Point, Rect};

use crate::dispatch::DragHandler;
use crate::error::DragError;
use crate::registry::{BoundsProvider, RegionRegistry};
use crate::session::{DragOutcome, DragSession};
use crate::surface::InputSurface;
use crate::types::Disposition;

/// Access to a draggable element's current bounds.
///
/// Returns `None` once the element is no longer displayed.
pub trait ElementHandle {
    /// Bounding rectangle of the element in viewport coordinates.
    fn bounding_rect(&self) -> Option<Rect>;
}

impl<F> ElementHandle for F
where
    F: Fn() -> Option<Rect>,
{
    fn bounding_rect(&self) -> Option<Rect> {
        self()
    }
}

/// Result of forwarding a press to a [`DraggableBinding`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Grab {
    /// The press started a drag.
    Activated,
    /// The press was recorded; a drag starts once the activation distance is crossed.
    Armed,
    /// The element could not be measured, so nothing happened.
    Ignored,
}

#[derive(Copy, Clone, Debug)]
struct Armed {
    press: Point,
    origin: Rect,
}

/// A draggable element bound to a session.
pub struct DraggableBinding<K, P, E> {
    id: K,
    payload: P,
    element: E,
    armed: Option<Armed>,
}

impl<K: Debug, P, E> Debug for DraggableBinding<K, P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableBinding")
            .field("id", &self.id)
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

/// Binds a draggable `element` carrying `id` and `payload`.
pub fn bind_draggable<K, P, E>(id: K, payload: P, element: E) -> DraggableBinding<K, P, E>
where
    E: ElementHandle,
{
    DraggableBinding {
        id,
        payload,
        element,
        armed: None,
    }
}

impl<K, P, E> DraggableBinding<K, P, E>
where
    K: Clone + Eq + Hash + Debug,
    P: Clone,
    E: ElementHandle,
{
    /// Identifier of the bound element.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Payload handed to the session on activation.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Replaces the payload used by future drags.
    pub fn set_payload(&mut self, payload: P) {
        self.payload = payload;
    }

    /// Returns `true` while a press is waiting for the activation distance.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Forwards a primary-button press on the element.
    ///
    /// A press while the session is already dragging is rejected with
    /// [`DragError::AlreadyDragging`].
    ///
    /// If `on_drag_start` fails, the error is returned but the drag stays
    /// active. Keep forwarding moves and the release to this binding so the
    /// gesture still ends; otherwise call [`DragSession::cancel`].
    pub fn press<D, S, H>(
        &mut self,
        session: &mut DragSession<K, P, D, S>,
        pointer: Point,
        handler: &mut H,
    ) -> Result<Grab, DragError<H::Error>>
    where
        D: Clone,
        S: InputSurface,
        H: DragHandler<K, P, D>,
    {
        if session.is_dragging() {
            tracing::warn!(id = ?self.id, "press while another drag is active");
            return Err(DragError::AlreadyDragging);
        }
        let Some(origin) = self.element.bounding_rect() else {
            tracing::debug!(id = ?self.id, "press on a detached draggable");
            return Ok(Grab::Ignored);
        };

        let activation = session.options().activation;
        if activation.is_satisfied(pointer, pointer) {
            self.armed = None;
            session.activate(pointer, self.id.clone(), origin, self.payload.clone(), handler)?;
            Ok(Grab::Activated)
        } else {
            tracing::trace!(id = ?self.id, "draggable armed");
            self.armed = Some(Armed {
                press: pointer,
                origin,
            });
            Ok(Grab::Armed)
        }
    }

    /// Forwards a global pointer move.
    ///
    /// An armed press activates once the pointer crosses the activation
    /// distance. The grab point is the original press, so the preview stays
    /// anchored where the element was grabbed.
    pub fn pointer_move<D, S, H>(
        &mut self,
        session: &mut DragSession<K, P, D, S>,
        pointer: Point,
        handler: &mut H,
    ) -> Result<Disposition, DragError<H::Error>>
    where
        D: Clone,
        S: InputSurface,
        H: DragHandler<K, P, D>,
    {
        if let Some(armed) = self.armed {
            if !session.options().activation.is_satisfied(armed.press, pointer) {
                return Ok(Disposition::Ignored);
            }
            self.armed = None;
            session.activate(
                armed.press,
                self.id.clone(),
                armed.origin,
                self.payload.clone(),
                handler,
            )?;
        }
        session.pointer_move(pointer, handler)
    }

    /// Forwards the global pointer release.
    ///
    /// Returns `None` when the press never turned into a drag (a click).
    pub fn release<D, S, H>(
        &mut self,
        session: &mut DragSession<K, P, D, S>,
        pointer: Point,
        handler: &mut H,
    ) -> Result<Option<DragOutcome<K, P, D>>, DragError<H::Error>>
    where
        D: Clone,
        S: InputSurface,
        H: DragHandler<K, P, D>,
    {
        if self.armed.take().is_some() {
            tracing::trace!(id = ?self.id, "released before activation");
            return Ok(None);
        }
        session.pointer_up(pointer, handler).map(Some)
    }
}

/// A registered droppable region; unregisters itself when dropped.
///
/// Unregistration is by id, so dropping a stale binding also removes a newer
/// registration that reused the same id.
pub struct DroppableBinding<K, D>
where
    K: Clone + Eq + Hash + Debug,
{
    registry: RegionRegistry<K, D>,
    id: K,
    provider: Rc<dyn BoundsProvider>,
    bound: bool,
}

impl<K, D> Debug for DroppableBinding<K, D>
where
    K: Clone + Eq + Hash + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DroppableBinding")
            .field("id", &self.id)
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

/// Registers a droppable region and returns its binding.
pub fn bind_droppable<K, D>(
    registry: &RegionRegistry<K, D>,
    id: K,
    payload: D,
    bounds: impl BoundsProvider + 'static,
) -> DroppableBinding<K, D>
where
    K: Clone + Eq + Hash + Debug,
{
    let provider: Rc<dyn BoundsProvider> = Rc::new(bounds);
    registry.register_shared(id.clone(), Rc::clone(&provider), payload);
    DroppableBinding {
        registry: registry.clone(),
        id,
        provider,
        bound: true,
    }
}

impl<K, D> DroppableBinding<K, D>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Identifier of the region.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Returns `true` until [`unbind`](Self::unbind) or [`forget`](Self::forget) is called.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Re-registers the region with a new payload, keeping its position in the registry.
    ///
    /// Typically called after a reorder changes the index a region stands for.
    pub fn set_payload(&mut self, payload: D) {
        self.registry
            .register_shared(self.id.clone(), Rc::clone(&self.provider), payload);
        self.bound = true;
    }

    /// Unregisters the region now.
    pub fn unbind(&mut self) {
        if self.bound {
            self.bound = false;
            self.registry.unregister(&self.id);
        }
    }

    /// Leaves the region registered after this binding is dropped.
    pub fn forget(mut self) -> K {
        self.bound = false;
        self.id.clone()
    }
}

impl<K, D> Drop for DroppableBinding<K, D>
where
    K: Clone + Eq + Hash + Debug,
{
    fn drop(&mut self) {
        self.unbind();
    }
}
