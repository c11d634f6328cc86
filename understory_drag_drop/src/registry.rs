// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region registry: the set of droppable regions a drag can land on.
//!
//! A [`RegionRegistry`] maps a region id to a [`BoundsProvider`] and a payload.
//! The registry is a cheap, cloneable handle so host bindings can register on
//! mount and unregister on unmount while a drag is in flight.
//!
//! - Registering an id that is already present replaces its provider and payload
//!   in place; the region keeps its original iteration position.
//! - Unregistering an absent id is a no-op.
//! - [`RegionRegistry::snapshot`] copies the current entries out so that callers
//!   iterate without holding a borrow. Bounds providers and lifecycle callbacks
//!   may therefore register or unregister regions while a hit test is running.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Rect;
//! use understory_drag_drop::registry::{FixedBounds, RegionRegistry};
//!
//! let registry = RegionRegistry::<&str, usize>::new();
//! registry.register("a", FixedBounds(Rect::new(0.0, 0.0, 10.0, 10.0)), 0);
//! registry.register("b", || Some(Rect::new(0.0, 20.0, 10.0, 30.0)), 1);
//!
//! let ids: Vec<_> = registry.snapshot().iter().map(|r| *r.id()).collect();
//! assert_eq!(ids, ["a", "b"]);
//!
//! registry.unregister(&"a");
//! assert_eq!(registry.len(), 1);
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt::{self, Debug};
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;
use smallvec::SmallVec;

/// Source of a region's current bounds in viewport coordinates.
///
/// Providers are called on every hit test and must reflect live layout.
/// Return `None` when the underlying element is no longer displayed; such a
/// region never overlaps the pointer.
pub trait BoundsProvider {
    /// Current bounds, or `None` if the region is detached.
    fn bounds(&self) -> Option<Rect>;
}

impl<F> BoundsProvider for F
where
    F: Fn() -> Option<Rect>,
{
    fn bounds(&self) -> Option<Rect> {
        self()
    }
}

/// A provider that always reports the same rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedBounds(pub Rect);

impl BoundsProvider for FixedBounds {
    fn bounds(&self) -> Option<Rect> {
        Some(self.0)
    }
}

/// One registered droppable region.
pub struct Registration<K, D> {
    id: K,
    payload: D,
    provider: Rc<dyn BoundsProvider>,
}

impl<K, D> Registration<K, D> {
    /// Region identifier.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Application data registered with the region.
    pub fn payload(&self) -> &D {
        &self.payload
    }

    /// Queries the provider for the region's live bounds.
    pub fn current_bounds(&self) -> Option<Rect> {
        self.provider.bounds()
    }

    /// The shared provider, for re-registering with a new payload.
    pub fn provider(&self) -> &Rc<dyn BoundsProvider> {
        &self.provider
    }
}

impl<K: Debug, D: Debug> Debug for Registration<K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

/// Registrations copied out of a [`RegionRegistry`] in iteration order.
pub type Snapshot<K, D> = SmallVec<[Rc<Registration<K, D>>; 8]>;

struct Slots<K, D> {
    order: Vec<Rc<Registration<K, D>>>,
    index: HashMap<K, usize>,
    revision: u64,
}

/// Shared, insertion-ordered map from region id to bounds provider and payload.
///
/// Cloning the handle shares the same underlying registry.
pub struct RegionRegistry<K, D> {
    slots: Rc<RefCell<Slots<K, D>>>,
}

impl<K, D> Clone for RegionRegistry<K, D> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<K, D> Default for RegionRegistry<K, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, D> Debug for RegionRegistry<K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.borrow();
        f.debug_struct("RegionRegistry")
            .field("len", &slots.order.len())
            .field("revision", &slots.revision)
            .finish_non_exhaustive()
    }
}

impl<K, D> RegionRegistry<K, D> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                order: Vec::new(),
                index: HashMap::new(),
                revision: 0,
            })),
        }
    }

    /// Number of registered regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.borrow().order.len()
    }

    /// Returns `true` if no regions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().order.is_empty()
    }

    /// Counter bumped by every register, unregister, or clear that changes the registry.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.slots.borrow().revision
    }

    /// Copies the current registrations out in iteration order.
    ///
    /// The returned snapshot does not borrow the registry.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<K, D> {
        self.slots.borrow().order.iter().cloned().collect()
    }

    /// Removes every registration.
    pub fn clear(&self) {
        let mut slots = self.slots.borrow_mut();
        if slots.order.is_empty() {
            return;
        }
        slots.order.clear();
        slots.index.clear();
        slots.revision = slots.revision.wrapping_add(1);
    }
}

impl<K, D> RegionRegistry<K, D>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Inserts or replaces the region registered under `id`.
    pub fn register(&self, id: K, provider: impl BoundsProvider + 'static, payload: D) {
        self.register_shared(id, Rc::new(provider), payload);
    }

    /// Like [`RegionRegistry::register`], reusing an already shared provider.
    pub fn register_shared(&self, id: K, provider: Rc<dyn BoundsProvider>, payload: D) {
        let mut slots = self.slots.borrow_mut();
        let entry = Rc::new(Registration {
            id: id.clone(),
            payload,
            provider,
        });
        if let Some(&slot) = slots.index.get(&id) {
            tracing::trace!(?id, slot, "droppable replaced");
            slots.order[slot] = entry;
        } else {
            let slot = slots.order.len();
            tracing::trace!(?id, slot, "droppable registered");
            slots.index.insert(id, slot);
            slots.order.push(entry);
        }
        slots.revision = slots.revision.wrapping_add(1);
    }

    /// Removes the region registered under `id`.
    ///
    /// Returns `true` if a region was removed. Removing an absent id does nothing.
    pub fn unregister(&self, id: &K) -> bool {
        let mut slots = self.slots.borrow_mut();
        let Some(slot) = slots.index.remove(id) else {
            return false;
        };
        slots.order.remove(slot);
        for later in slots.index.values_mut() {
            if *later > slot {
                *later -= 1;
            }
        }
        slots.revision = slots.revision.wrapping_add(1);
        tracing::trace!(?id, slot, "droppable unregistered");
        true
    }

    /// Returns `true` if a region is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &K) -> bool {
        self.slots.borrow().index.contains_key(id)
    }

    /// The current registration for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &K) -> Option<Rc<Registration<K, D>>> {
        let slots = self.slots.borrow();
        slots.index.get(id).map(|&slot| Rc::clone(&slots.order[slot]))
    }
}
