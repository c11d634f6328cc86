// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! When a press on a draggable turns into a drag.
//!
//! This is the single place that decides activation. The session itself only
//! knows `Idle` and `Dragging`; an armed press that has not yet crossed the
//! threshold lives in the [`DraggableBinding`](crate::DraggableBinding).

use kurbo::Point;

/// Activation rule for draggables.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Activation {
    /// The press itself starts the drag.
    #[default]
    Immediate,
    /// The drag starts once the pointer has moved strictly more than this many
    /// units from the press point along either axis. Releasing earlier is a click.
    Distance(f64),
}

impl Activation {
    /// Returns `true` if a press at `press` should be dragging with the pointer at `current`.
    #[must_use]
    pub fn is_satisfied(self, press: Point, current: Point) -> bool {
        match self {
            Self::Immediate => true,
            Self::Distance(threshold) => {
                let moved = current - press;
                moved.x > threshold
                    || moved.x < -threshold
                    || moved.y > threshold
                    || moved.y < -threshold
            }
        }
    }
}

/// Session-wide configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragOptions {
    /// Activation rule used by draggable bindings.
    pub activation: Activation,
    /// Axis used by [`DragSession::drop_side`](crate::DragSession::drop_side) queries
    /// that do not pass one explicitly.
    pub axis: crate::Axis,
}
