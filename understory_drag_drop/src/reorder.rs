// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder helpers: turn a drop into a new ordering of the application's items.
//!
//! The session never reorders anything. Call these from your `on_drag_end`
//! handler with the indexes you stored in the draggable and droppable payloads.
//!
//! 1. Dropping an item on itself is a no-op.
//! 2. The pointer's position relative to the target's midpoint along the
//!    collection's [`Axis`] picks [`DropSide::Before`] or [`DropSide::After`].
//! 3. The item is removed from its source index and inserted at the
//!    [`insertion_index`], which compensates for the removal shifting later
//!    items down by one.
//!
//! All helpers leave their inputs untouched and return new sequences.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::{Axis, reorder};
//!
//! let items = ["A", "B", "C"];
//! let c_bounds = Rect::new(0.0, 40.0, 100.0, 60.0);
//!
//! // Drag A onto the lower half of C.
//! let below = reorder(&items, 0, 2, c_bounds, Point::new(50.0, 55.0), Axis::Vertical).unwrap();
//! assert_eq!(below, ["B", "C", "A"]);
//!
//! // Drag A onto the upper half of C.
//! let above = reorder(&items, 0, 2, c_bounds, Point::new(50.0, 45.0), Axis::Vertical).unwrap();
//! assert_eq!(above, ["B", "A", "C"]);
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::error::ReorderError;
use crate::types::{Axis, DropSide};

/// Which half of `bounds` the pointer is in along `axis`.
///
/// A pointer exactly on the midpoint counts as [`DropSide::After`].
#[must_use]
pub fn drop_side(bounds: Rect, pointer: Point, axis: Axis) -> DropSide {
    let center = bounds.center();
    let before = match axis {
        Axis::Vertical => pointer.y < center.y,
        Axis::Horizontal => pointer.x < center.x,
    };
    if before {
        DropSide::Before
    } else {
        DropSide::After
    }
}

/// Final index for an item moved from `source` onto `target`, measured after
/// the item has been removed from the sequence.
///
/// Dropping on the item itself returns `source`. The result is only meaningful
/// when both indexes are in range; an out-of-range `target` saturates instead
/// of overflowing.
#[must_use]
pub fn insertion_index(source: usize, target: usize, side: DropSide) -> usize {
    if source == target {
        return source;
    }
    let mut index = target;
    if side == DropSide::After {
        index = index.saturating_add(1);
    }
    if source < target {
        // Removing the source shifted everything after it down by one.
        index -= 1;
    }
    index
}

/// Moves `items[source]` before or after `items[target]` depending on where
/// `pointer` falls within `target_bounds`.
///
/// Returns a new sequence; `items` is not modified.
pub fn reorder<T: Clone>(
    items: &[T],
    source: usize,
    target: usize,
    target_bounds: Rect,
    pointer: Point,
    axis: Axis,
) -> Result<Vec<T>, ReorderError> {
    reorder_to_side(items, source, target, drop_side(target_bounds, pointer, axis))
}

/// Like [`reorder`] with the drop side already decided.
pub fn reorder_to_side<T: Clone>(
    items: &[T],
    source: usize,
    target: usize,
    side: DropSide,
) -> Result<Vec<T>, ReorderError> {
    let len = items.len();
    if source >= len {
        return Err(ReorderError::SourceOutOfRange { index: source, len });
    }
    if target >= len {
        return Err(ReorderError::TargetOutOfRange { index: target, len });
    }

    let mut out = items.to_vec();
    if source == target {
        return Ok(out);
    }
    let moved = out.remove(source);
    out.insert(insertion_index(source, target, side), moved);
    tracing::trace!(source, target, ?side, "reordered");
    Ok(out)
}

/// Moves `from[source]` into another collection, before or after `to[target]`.
///
/// `target` may equal `to.len()` with [`DropSide::Before`] to append, which is
/// how a drop on an empty column is expressed. Returns the new `(from, to)` pair.
pub fn transfer<T: Clone>(
    from: &[T],
    to: &[T],
    source: usize,
    target: usize,
    side: DropSide,
) -> Result<(Vec<T>, Vec<T>), ReorderError> {
    if source >= from.len() {
        return Err(ReorderError::SourceOutOfRange {
            index: source,
            len: from.len(),
        });
    }
    let at = match side {
        DropSide::Before => Some(target),
        DropSide::After => target.checked_add(1),
    };
    let Some(at) = at.filter(|&at| at <= to.len()) else {
        return Err(ReorderError::TargetOutOfRange {
            index: target,
            len: to.len(),
        });
    };

    let mut from = from.to_vec();
    let mut to = to.to_vec();
    let moved = from.remove(source);
    to.insert(at, moved);
    tracing::trace!(source, target, ?side, "transferred");
    Ok((from, to))
}
