// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types shared by the registry, the session, and the reorder helpers.

use kurbo::{Point, Rect, Vec2};

/// The draggable that owns the current drag session.
///
/// Created when a press on a bound draggable activates a drag and dropped when
/// the drag ends or is canceled.
#[derive(Clone, Debug, PartialEq)]
pub struct Active<K, P> {
    /// Identifier of the dragged element.
    pub id: K,
    /// Application data carried by the dragged element.
    pub payload: P,
    /// Bounds of the dragged element at the instant it was grabbed.
    pub origin: Rect,
}

impl<K, P> Active<K, P> {
    /// Pointer offset from the top-left of [`Active::origin`] for a grab at `pointer`.
    #[must_use]
    pub fn grab_delta(&self, pointer: Point) -> Vec2 {
        pointer - self.origin.origin()
    }
}

/// A droppable region overlapped by the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct Over<K, D> {
    /// Identifier of the droppable region.
    pub id: K,
    /// Application data registered with the region.
    pub payload: D,
    /// Live bounds of the region when the overlap was computed.
    pub bounds: Rect,
}

/// Layout axis of a collection, used to pick the before/after half of a region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Items are stacked top to bottom; the vertical midpoint decides the side.
    #[default]
    Vertical,
    /// Items are laid out left to right; the horizontal midpoint decides the side.
    Horizontal,
}

/// Which half of a target region the pointer was over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropSide {
    /// Insert before the target item.
    Before,
    /// Insert after the target item.
    After,
}

/// Phase of a [`DragSession`](crate::DragSession).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No drag is active.
    #[default]
    Idle,
    /// Exactly one draggable is active.
    Dragging,
}

/// What the host should do with the input event it just forwarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// The event belongs to the drag: stop propagation and prevent the default action.
    Consumed,
    /// The event is not part of a drag; let it continue normally.
    Ignored,
}

impl Disposition {
    /// Returns `true` for [`Disposition::Consumed`].
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Inclusive point containment: a point on any edge of `rect` is inside.
///
/// The rectangle is normalized first, so flipped rectangles behave like their
/// positive-area equivalent. Any `NaN` coordinate is outside.
#[must_use]
pub fn contains_inclusive(rect: Rect, point: Point) -> bool {
    let r = rect.abs();
    r.x0 <= point.x && point.x <= r.x1 && r.y0 <= point.y && point.y <= r.y1
}
