// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Drag Drop: pointer drag-and-drop coordination for UI.
//!
//! This crate tracks a single pointer-driven drag gesture, works out which
//! droppable region the pointer is over, and tells the application about it
//! through lifecycle callbacks. It does not render anything and does not own
//! the application's data; reordering is a pure helper the application calls
//! when a drop lands.
//!
//! ## Pieces
//!
//! - [`RegionRegistry`]: droppable regions keyed by id, each with a live
//!   [`BoundsProvider`] and a payload. Safe to mutate mid-drag.
//! - [`hit_test`]: first region, in registration order, whose bounds contain
//!   the pointer (edges inclusive).
//! - [`DragSession`]: the `Idle` / `Dragging` state machine. It subscribes to an
//!   [`InputSurface`] while dragging and exposes presentation queries for an
//!   overlay renderer.
//! - [`DragHandler`] / [`Callbacks`]: `on_drag_start`, `on_drag_over`,
//!   `on_drag_end`, `on_drag_cancel`.
//! - [`reorder`], [`transfer`], [`insertion_index`]: compute new orderings
//!   from a source index, a target index, and the side of the target that was
//!   dropped on.
//! - [`bind_draggable`] / [`bind_droppable`]: glue for host UI elements,
//!   including the [`Activation`] rule that decides when a press becomes a drag.
//!
//! ## Event flow
//!
//! 1) A press on a bound draggable activates the session (`Idle → Dragging`)
//!    and fires `on_drag_start`.
//! 2) Each pointer move hit tests the registry; when the overlapped region id
//!    changes, `on_drag_over` fires (with `None` when the pointer left every region).
//! 3) The release hit tests once more. Over a region, `on_drag_end` fires;
//!    otherwise `on_drag_cancel`. The session is idle and listeners are
//!    detached before either callback runs.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::convert::Infallible;
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::{
//!     Axis, Callbacks, DragSession, FixedBounds, RegionRegistry, reorder,
//! };
//!
//! let mut items = vec!["A", "B", "C"];
//!
//! // One 20-unit row per item; the droppable payload is the row index.
//! let registry = RegionRegistry::<usize, usize>::new();
//! for i in 0..items.len() {
//!     let top = 20.0 * i as f64;
//!     registry.register(i, FixedBounds(Rect::new(0.0, top, 100.0, top + 20.0)), i);
//! }
//! let mut session = DragSession::<usize, usize, usize>::new(registry);
//!
//! {
//!     let mut handler = Callbacks::<usize, usize, usize, Infallible>::new().on_end(|end| {
//!         items = reorder(
//!             &items,
//!             end.active.payload,
//!             end.over.payload,
//!             end.over.bounds,
//!             end.pointer,
//!             Axis::Vertical,
//!         )
//!         .unwrap();
//!         Ok(())
//!     });
//!
//!     // Grab "A" and release it on the lower half of "C".
//!     session
//!         .activate(Point::new(5.0, 5.0), 0, Rect::new(0.0, 0.0, 100.0, 20.0), 0, &mut handler)
//!         .unwrap();
//!     session.pointer_move(Point::new(5.0, 55.0), &mut handler).unwrap();
//!     session.pointer_up(Point::new(5.0, 55.0), &mut handler).unwrap();
//! }
//!
//! assert_eq!(items, ["B", "C", "A"]);
//! ```
//!
//! ## Limitations
//!
//! - Overlapping regions resolve to the earliest registration; there is no
//!   nesting or area-based priority.
//! - One drag at a time per session; multi-pointer gestures are not modeled.
//! - No auto-scroll and no animation of reordered items.
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std` feature.
//! - `libm`: forwards to Kurbo's `libm` feature for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod activation;
pub mod bind;
pub mod dispatch;
pub mod error;
pub mod hit;
pub mod registry;
pub mod reorder;
pub mod session;
pub mod surface;
pub mod types;

pub use activation::{Activation, DragOptions};
pub use bind::{
    DraggableBinding, DroppableBinding, ElementHandle, Grab, bind_draggable, bind_droppable,
};
pub use dispatch::{Callbacks, DragCancel, DragEnd, DragHandler, DragOver, DragStart};
pub use error::{DragError, ReorderError};
pub use hit::hit_test;
pub use registry::{BoundsProvider, FixedBounds, RegionRegistry, Registration, Snapshot};
pub use reorder::{drop_side, insertion_index, reorder, reorder_to_side, transfer};
pub use session::{DragOutcome, DragSession};
pub use surface::{CountingSubscription, CountingSurface, InputSurface, NoSurface};
pub use types::{Active, Axis, Disposition, DropSide, Over, Phase, contains_inclusive};
