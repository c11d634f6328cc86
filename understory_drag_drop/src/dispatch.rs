// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle callbacks: what the session tells the application while a drag runs.
//!
//! The session invokes a [`DragHandler`] synchronously at each transition:
//!
//! - [`on_drag_start`](DragHandler::on_drag_start) once, when a drag activates.
//! - [`on_drag_over`](DragHandler::on_drag_over) whenever the overlapped region
//!   changes, including a change to "no region" (`over: None`).
//! - Exactly one of [`on_drag_end`](DragHandler::on_drag_end) (released over a
//!   region) or [`on_drag_cancel`](DragHandler::on_drag_cancel) (released over
//!   nothing, or canceled by the host).
//!
//! By the time `on_drag_end` or `on_drag_cancel` runs, the session is already
//! idle and its listeners are detached, so the handler is free to mutate the
//! application's collections and droppable registrations.
//!
//! Implement the trait on your own state, or use [`Callbacks`] to assemble one
//! from closures. `()` is a handler that ignores everything.
//!
//! ```
//! use core::convert::Infallible;
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::{Callbacks, DragSession, FixedBounds, RegionRegistry};
//!
//! let registry = RegionRegistry::<u32, ()>::new();
//! registry.register(7, FixedBounds(Rect::new(0.0, 0.0, 50.0, 50.0)), ());
//! let mut session = DragSession::<u32, &str, ()>::new(registry);
//!
//! let mut dropped = None;
//! {
//!     let mut handler = Callbacks::<u32, &str, (), Infallible>::new()
//!         .on_end(|end| {
//!             dropped = Some((end.active.id, end.over.id));
//!             Ok(())
//!         });
//!     session
//!         .activate(Point::new(5.0, 5.0), 1, Rect::new(0.0, 0.0, 10.0, 10.0), "card", &mut handler)
//!         .unwrap();
//!     session.pointer_up(Point::new(25.0, 25.0), &mut handler).unwrap();
//! }
//! assert_eq!(dropped, Some((1, 7)));
//! ```

use alloc::boxed::Box;
use core::convert::Infallible;
use core::fmt;

use kurbo::Point;

use crate::types::{Active, Over};

/// Payload of [`DragHandler::on_drag_start`].
#[derive(Debug)]
pub struct DragStart<'a, K, P> {
    /// The draggable that was grabbed.
    pub active: &'a Active<K, P>,
    /// Pointer position at the grab.
    pub pointer: Point,
}

/// Payload of [`DragHandler::on_drag_over`].
#[derive(Debug)]
pub struct DragOver<'a, K, P, D> {
    /// The dragged item.
    pub active: &'a Active<K, P>,
    /// The newly overlapped region, or `None` when the pointer left every region.
    pub over: Option<&'a Over<K, D>>,
    /// Pointer position of the sample that caused the change.
    pub pointer: Point,
}

/// Payload of [`DragHandler::on_drag_end`].
#[derive(Debug)]
pub struct DragEnd<'a, K, P, D> {
    /// The dragged item.
    pub active: &'a Active<K, P>,
    /// The region under the release point.
    pub over: &'a Over<K, D>,
    /// Pointer position at release.
    pub pointer: Point,
}

/// Payload of [`DragHandler::on_drag_cancel`].
#[derive(Debug)]
pub struct DragCancel<'a, K, P> {
    /// The dragged item.
    pub active: &'a Active<K, P>,
    /// Pointer position at release, or `None` when the host canceled the drag.
    pub pointer: Option<Point>,
}

/// Receives drag lifecycle notifications.
///
/// Every method defaults to doing nothing. Returning an error does not undo
/// the transition that triggered the call; the session surfaces it as
/// [`DragError::Callback`](crate::DragError::Callback).
pub trait DragHandler<K, P, D> {
    /// Error returned by the callbacks.
    type Error;

    /// A drag activated.
    fn on_drag_start(&mut self, _event: DragStart<'_, K, P>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// The overlapped region changed.
    fn on_drag_over(&mut self, _event: DragOver<'_, K, P, D>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// The drag was released over a region.
    fn on_drag_end(&mut self, _event: DragEnd<'_, K, P, D>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// The drag was released over nothing, or canceled by the host.
    fn on_drag_cancel(&mut self, _event: DragCancel<'_, K, P>) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<K, P, D> DragHandler<K, P, D> for () {
    type Error = Infallible;
}

impl<K, P, D, H> DragHandler<K, P, D> for &mut H
where
    H: DragHandler<K, P, D> + ?Sized,
{
    type Error = H::Error;

    fn on_drag_start(&mut self, event: DragStart<'_, K, P>) -> Result<(), Self::Error> {
        (**self).on_drag_start(event)
    }

    fn on_drag_over(&mut self, event: DragOver<'_, K, P, D>) -> Result<(), Self::Error> {
        (**self).on_drag_over(event)
    }

    fn on_drag_end(&mut self, event: DragEnd<'_, K, P, D>) -> Result<(), Self::Error> {
        (**self).on_drag_end(event)
    }

    fn on_drag_cancel(&mut self, event: DragCancel<'_, K, P>) -> Result<(), Self::Error> {
        (**self).on_drag_cancel(event)
    }
}

type StartFn<'f, K, P, E> = Box<dyn FnMut(DragStart<'_, K, P>) -> Result<(), E> + 'f>;
type OverFn<'f, K, P, D, E> = Box<dyn FnMut(DragOver<'_, K, P, D>) -> Result<(), E> + 'f>;
type EndFn<'f, K, P, D, E> = Box<dyn FnMut(DragEnd<'_, K, P, D>) -> Result<(), E> + 'f>;
type CancelFn<'f, K, P, E> = Box<dyn FnMut(DragCancel<'_, K, P>) -> Result<(), E> + 'f>;

/// A [`DragHandler`] assembled from optional closures.
pub struct Callbacks<'f, K, P, D, E = Infallible> {
    start: Option<StartFn<'f, K, P, E>>,
    over: Option<OverFn<'f, K, P, D, E>>,
    end: Option<EndFn<'f, K, P, D, E>>,
    cancel: Option<CancelFn<'f, K, P, E>>,
}

impl<K, P, D, E> Default for Callbacks<'_, K, P, D, E> {
    fn default() -> Self {
        Self {
            start: None,
            over: None,
            end: None,
            cancel: None,
        }
    }
}

impl<K, P, D, E> fmt::Debug for Callbacks<'_, K, P, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_drag_start", &self.start.is_some())
            .field("on_drag_over", &self.over.is_some())
            .field("on_drag_end", &self.end.is_some())
            .field("on_drag_cancel", &self.cancel.is_some())
            .finish()
    }
}

impl<'f, K, P, D, E> Callbacks<'f, K, P, D, E> {
    /// Creates a handler with no callbacks set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the closure run by [`DragHandler::on_drag_start`].
    #[must_use]
    pub fn on_start(
        mut self,
        f: impl FnMut(DragStart<'_, K, P>) -> Result<(), E> + 'f,
    ) -> Self {
        self.start = Some(Box::new(f));
        self
    }

    /// Sets the closure run by [`DragHandler::on_drag_over`].
    #[must_use]
    pub fn on_over(
        mut self,
        f: impl FnMut(DragOver<'_, K, P, D>) -> Result<(), E> + 'f,
    ) -> Self {
        self.over = Some(Box::new(f));
        self
    }

    /// Sets the closure run by [`DragHandler::on_drag_end`].
    #[must_use]
    pub fn on_end(mut self, f: impl FnMut(DragEnd<'_, K, P, D>) -> Result<(), E> + 'f) -> Self {
        self.end = Some(Box::new(f));
        self
    }

    /// Sets the closure run by [`DragHandler::on_drag_cancel`].
    #[must_use]
    pub fn on_cancel(
        mut self,
        f: impl FnMut(DragCancel<'_, K, P>) -> Result<(), E> + 'f,
    ) -> Self {
        self.cancel = Some(Box::new(f));
        self
    }
}

impl<K, P, D, E> DragHandler<K, P, D> for Callbacks<'_, K, P, D, E> {
    type Error = E;

    fn on_drag_start(&mut self, event: DragStart<'_, K, P>) -> Result<(), E> {
        self.start.as_mut().map_or(Ok(()), |f| f(event))
    }

    fn on_drag_over(&mut self, event: DragOver<'_, K, P, D>) -> Result<(), E> {
        self.over.as_mut().map_or(Ok(()), |f| f(event))
    }

    fn on_drag_end(&mut self, event: DragEnd<'_, K, P, D>) -> Result<(), E> {
        self.end.as_mut().map_or(Ok(()), |f| f(event))
    }

    fn on_drag_cancel(&mut self, event: DragCancel<'_, K, P>) -> Result<(), E> {
        self.cancel.as_mut().map_or(Ok(()), |f| f(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use kurbo::Rect;

    fn active() -> Active<u32, &'static str> {
        Active {
            id: 1,
            payload: "card",
            origin: Rect::new(0.0, 0.0, 10.0, 10.0),
        }
    }

    #[test]
    fn unset_callbacks_are_noops() {
        let mut handler = Callbacks::<u32, &str, (), Infallible>::new();
        let active = active();
        assert!(
            handler
                .on_drag_start(DragStart {
                    active: &active,
                    pointer: Point::ZERO,
                })
                .is_ok()
        );
        assert!(
            handler
                .on_drag_cancel(DragCancel {
                    active: &active,
                    pointer: None,
                })
                .is_ok()
        );
    }

    #[test]
    fn closures_receive_payloads_and_errors_pass_through() {
        let mut seen = Vec::new();
        {
            let mut handler = Callbacks::<u32, &str, usize, &'static str>::new()
                .on_over(|event| {
                    seen.push(event.over.map(|over| over.payload));
                    Ok(())
                })
                .on_end(|_| Err("rejected"));

            let active = active();
            let over = Over {
                id: 2,
                payload: 5_usize,
                bounds: Rect::ZERO,
            };
            handler
                .on_drag_over(DragOver {
                    active: &active,
                    over: Some(&over),
                    pointer: Point::ZERO,
                })
                .unwrap();
            handler
                .on_drag_over(DragOver {
                    active: &active,
                    over: None,
                    pointer: Point::ZERO,
                })
                .unwrap();
            let result = handler.on_drag_end(DragEnd {
                active: &active,
                over: &over,
                pointer: Point::ZERO,
            });
            assert_eq!(result, Err("rejected"));
        }
        assert_eq!(seen, [Some(5), None]);
    }

    #[test]
    fn mutable_reference_forwards() {
        struct Count(usize);
        impl DragHandler<u32, &'static str, ()> for Count {
            type Error = Infallible;
            fn on_drag_start(&mut self, _: DragStart<'_, u32, &'static str>) -> Result<(), Infallible> {
                self.0 += 1;
                Ok(())
            }
        }

        let mut count = Count(0);
        let mut forwarded = &mut count;
        let active = active();
        DragHandler::<u32, &str, ()>::on_drag_start(
            &mut forwarded,
            DragStart {
                active: &active,
                pointer: Point::ZERO,
            },
        )
        .unwrap();
        assert_eq!(count.0, 1);
    }
}
