// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced to the host.
//!
//! A region whose element is gone is not an error: its bounds provider returns
//! `None` and it simply never overlaps.

use thiserror::Error;

/// A rejected transition or a failed lifecycle callback.
///
/// `E` is the error type of the [`DragHandler`](crate::DragHandler) in use.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DragError<E> {
    /// A drag was activated while another one is in flight. The active drag is untouched.
    #[error("a drag is already active")]
    AlreadyDragging,
    /// A release or cancel arrived while no drag is active.
    #[error("no drag is active")]
    NotDragging,
    /// A lifecycle callback failed. Teardown had already completed when this was returned.
    #[error("drag lifecycle callback failed")]
    Callback(#[source] E),
}

impl<E> DragError<E> {
    /// Returns `true` for errors caused by calling the session in the wrong phase.
    #[must_use]
    pub const fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::AlreadyDragging | Self::NotDragging)
    }

    /// The callback error, if this is [`DragError::Callback`].
    pub fn into_callback(self) -> Option<E> {
        match self {
            Self::Callback(err) => Some(err),
            _ => None,
        }
    }
}

/// An index handed to a reorder helper is outside its collection.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum ReorderError {
    /// The dragged item's index is not in the source collection.
    #[error("source index {index} is out of range for length {len}")]
    SourceOutOfRange {
        /// Offending index.
        index: usize,
        /// Length of the collection.
        len: usize,
    },
    /// The drop target's index is not in the target collection.
    #[error("target index {index} is out of range for length {len}")]
    TargetOutOfRange {
        /// Offending index.
        index: usize,
        /// Length of the collection.
        len: usize,
    },
}
