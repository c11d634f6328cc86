// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: the `Idle` / `Dragging` state machine.
//!
//! ## Transitions
//!
//! - [`activate`](DragSession::activate): `Idle → Dragging`. Records the active
//!   draggable, the pointer, and the drag-start delta (pointer minus the grabbed
//!   element's top-left), subscribes to the input surface, and calls
//!   `on_drag_start`. Activating while dragging is rejected with
//!   [`DragError::AlreadyDragging`].
//! - [`pointer_move`](DragSession::pointer_move): `Dragging → Dragging`. Updates
//!   the pointer, hit tests the registry, and calls `on_drag_over` when the
//!   overlapped region id changes (including to `None`). Ignored while idle.
//! - [`pointer_up`](DragSession::pointer_up): `Dragging → Idle`. Tears down first
//!   (state cleared, listeners detached), then hit tests once more at the release
//!   point and calls exactly one of `on_drag_end` or `on_drag_cancel`.
//! - [`cancel`](DragSession::cancel): `Dragging → Idle` without a hit test; calls
//!   `on_drag_cancel`.
//!
//! Only one drag can be active per session. A session is meant to be the single
//! coordinator for a pointer device.
//!
//! ## Presentation
//!
//! While dragging, [`overlay_origin`](DragSession::overlay_origin) is where the
//! floating preview's top-left belongs (`pointer - drag_start_delta`), so the
//! preview stays anchored to the grab point instead of snapping to the cursor.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_drag_drop::{DragSession, FixedBounds, RegionRegistry};
//!
//! let registry = RegionRegistry::<u32, usize>::new();
//! registry.register(10, FixedBounds(Rect::new(0.0, 100.0, 200.0, 150.0)), 0);
//!
//! let mut session = DragSession::<u32, (), usize>::new(registry);
//! let origin = Rect::new(0.0, 0.0, 200.0, 50.0);
//!
//! session.activate(Point::new(20.0, 10.0), 1, origin, (), &mut ()).unwrap();
//! assert_eq!(session.overlay_origin(), Some(origin.origin()));
//!
//! session.pointer_move(Point::new(40.0, 120.0), &mut ()).unwrap();
//! assert_eq!(session.over().map(|o| o.id), Some(10));
//! assert_eq!(session.overlay_origin(), Some(Point::new(20.0, 110.0)));
//!
//! let outcome = session.pointer_up(Point::new(40.0, 120.0), &mut ()).unwrap();
//! assert!(outcome.is_dropped());
//! assert!(!session.is_dragging());
//! ```

use core::fmt::{self, Debug};
use core::hash::Hash;

use kurbo::{Point, Rect, Vec2};

use crate::activation::DragOptions;
use crate::dispatch::{DragCancel, DragEnd, DragHandler, DragOver, DragStart};
use crate::error::DragError;
use crate::registry::RegionRegistry;
use crate::reorder::drop_side;
use crate::surface::{InputSurface, NoSurface};
use crate::types::{Active, Axis, Disposition, DropSide, Over, Phase};

/// How a drag ended.
#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome<K, P, D> {
    /// Released over a region.
    Dropped {
        /// The dragged item.
        active: Active<K, P>,
        /// The region under the release point.
        over: Over<K, D>,
        /// Release position.
        pointer: Point,
    },
    /// Released over nothing, or canceled by the host.
    Canceled {
        /// The dragged item.
        active: Active<K, P>,
    },
}

impl<K, P, D> DragOutcome<K, P, D> {
    /// Returns `true` for [`DragOutcome::Dropped`].
    #[must_use]
    pub const fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped { .. })
    }

    /// The dragged item.
    pub fn active(&self) -> &Active<K, P> {
        match self {
            Self::Dropped { active, .. } | Self::Canceled { active } => active,
        }
    }

    /// The region dropped onto, if any.
    pub fn over(&self) -> Option<&Over<K, D>> {
        match self {
            Self::Dropped { over, .. } => Some(over),
            Self::Canceled { .. } => None,
        }
    }
}

struct Dragging<K, P, D, G> {
    active: Active<K, P>,
    over: Option<Over<K, D>>,
    pointer: Point,
    delta: Vec2,
    // Dropping this detaches the pointer listeners.
    listeners: G,
}

/// Coordinates one pointer-driven drag at a time over a [`RegionRegistry`].
pub struct DragSession<K, P, D, S = NoSurface>
where
    S: InputSurface,
{
    registry: RegionRegistry<K, D>,
    surface: S,
    options: DragOptions,
    dragging: Option<Dragging<K, P, D, S::Subscription>>,
}

impl<K, P, D, S> Debug for DragSession<K, P, D, S>
where
    K: Debug,
    S: InputSurface,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("phase", &self.phase())
            .field("active", &self.dragging.as_ref().map(|d| &d.active.id))
            .field(
                "over",
                &self.dragging.as_ref().and_then(|d| d.over.as_ref()).map(|o| &o.id),
            )
            .field("registry", &self.registry)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<K, P, D> DragSession<K, P, D, NoSurface> {
    /// Creates an idle session over `registry` with default options.
    ///
    /// The host is expected to forward pointer events itself.
    #[must_use]
    pub fn new(registry: RegionRegistry<K, D>) -> Self {
        Self::with_surface(registry, NoSurface, DragOptions::default())
    }
}

impl<K, P, D, S> DragSession<K, P, D, S>
where
    S: InputSurface,
{
    /// Creates an idle session that attaches listeners to `surface` while dragging.
    #[must_use]
    pub fn with_surface(registry: RegionRegistry<K, D>, surface: S, options: DragOptions) -> Self {
        Self {
            registry,
            surface,
            options,
            dragging: None,
        }
    }

    /// The registry this session hit tests against.
    pub fn registry(&self) -> &RegionRegistry<K, D> {
        &self.registry
    }

    /// The input surface listeners are attached to.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Session options.
    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Replaces the session options. Takes effect for the next press.
    pub fn set_options(&mut self, options: DragOptions) {
        self.options = options;
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.dragging.is_some() {
            Phase::Dragging
        } else {
            Phase::Idle
        }
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// The dragged item, while dragging.
    pub fn active(&self) -> Option<&Active<K, P>> {
        self.dragging.as_ref().map(|d| &d.active)
    }

    /// The currently overlapped region, while dragging.
    pub fn over(&self) -> Option<&Over<K, D>> {
        self.dragging.as_ref().and_then(|d| d.over.as_ref())
    }

    /// Latest pointer sample, while dragging.
    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.dragging.as_ref().map(|d| d.pointer)
    }

    /// Pointer offset from the dragged element's top-left at grab time.
    #[must_use]
    pub fn drag_start_delta(&self) -> Option<Vec2> {
        self.dragging.as_ref().map(|d| d.delta)
    }

    /// Where the floating preview's top-left belongs: `pointer - drag_start_delta`.
    #[must_use]
    pub fn overlay_origin(&self) -> Option<Point> {
        self.dragging.as_ref().map(|d| d.pointer - d.delta)
    }

    /// The grabbed element's bounds moved to [`overlay_origin`](Self::overlay_origin).
    #[must_use]
    pub fn overlay_rect(&self) -> Option<Rect> {
        self.dragging
            .as_ref()
            .map(|d| d.active.origin.with_origin(d.pointer - d.delta))
    }

    /// Side of the overlapped region the pointer is on, using the configured axis.
    #[must_use]
    pub fn drop_side(&self) -> Option<DropSide> {
        self.drop_side_on(self.options.axis)
    }

    /// Side of the overlapped region the pointer is on along `axis`.
    ///
    /// Hosts use this to place an insertion indicator.
    #[must_use]
    pub fn drop_side_on(&self, axis: Axis) -> Option<DropSide> {
        let dragging = self.dragging.as_ref()?;
        let over = dragging.over.as_ref()?;
        Some(drop_side(over.bounds, dragging.pointer, axis))
    }
}

impl<K, P, D, S> DragSession<K, P, D, S>
where
    K: Clone + Eq + Hash + Debug,
    D: Clone,
    S: InputSurface,
{
    /// `Idle → Dragging`: starts dragging `id`, grabbed at `pointer` with bounds `origin`.
    ///
    /// The overlapped region starts out as `None`; the first pointer move computes it.
    /// If `on_drag_start` fails the drag stays active and the error is returned.
    pub fn activate<H>(
        &mut self,
        pointer: Point,
        id: K,
        origin: Rect,
        payload: P,
        handler: &mut H,
    ) -> Result<(), DragError<H::Error>>
    where
        H: DragHandler<K, P, D>,
    {
        if let Some(current) = &self.dragging {
            tracing::warn!(active = ?current.active.id, rejected = ?id, "drag already active");
            return Err(DragError::AlreadyDragging);
        }

        let active = Active {
            id,
            payload,
            origin,
        };
        let delta = active.grab_delta(pointer);
        let listeners = self.surface.subscribe();
        tracing::debug!(id = ?active.id, x = pointer.x, y = pointer.y, "drag started");
        let dragging = self.dragging.insert(Dragging {
            active,
            over: None,
            pointer,
            delta,
            listeners,
        });

        handler
            .on_drag_start(DragStart {
                active: &dragging.active,
                pointer,
            })
            .map_err(DragError::Callback)
    }

    /// `Dragging → Dragging`: records a pointer sample and reports overlap changes.
    ///
    /// Returns [`Disposition::Consumed`] while dragging, so the host can stop
    /// propagation and suppress text selection; [`Disposition::Ignored`] while idle.
    pub fn pointer_move<H>(
        &mut self,
        pointer: Point,
        handler: &mut H,
    ) -> Result<Disposition, DragError<H::Error>>
    where
        H: DragHandler<K, P, D>,
    {
        let Some(dragging) = self.dragging.as_mut() else {
            return Ok(Disposition::Ignored);
        };
        dragging.pointer = pointer;

        let hit = self.registry.hit_test(pointer);
        let changed = hit.as_ref().map(|o| &o.id) != dragging.over.as_ref().map(|o| &o.id);
        dragging.over = hit;
        if changed {
            tracing::debug!(
                id = ?dragging.active.id,
                over = ?dragging.over.as_ref().map(|o| &o.id),
                "drag over changed"
            );
            handler
                .on_drag_over(DragOver {
                    active: &dragging.active,
                    over: dragging.over.as_ref(),
                    pointer,
                })
                .map_err(DragError::Callback)?;
        }
        Ok(Disposition::Consumed)
    }

    /// `Dragging → Idle`: ends the drag at the release point.
    ///
    /// The session is idle and its listeners are detached before any callback
    /// runs. Overlap is recomputed at `pointer` rather than reusing the last
    /// move sample.
    pub fn pointer_up<H>(
        &mut self,
        pointer: Point,
        handler: &mut H,
    ) -> Result<DragOutcome<K, P, D>, DragError<H::Error>>
    where
        H: DragHandler<K, P, D>,
    {
        let Some(Dragging {
            active, listeners, ..
        }) = self.dragging.take()
        else {
            tracing::warn!("pointer up without an active drag");
            return Err(DragError::NotDragging);
        };
        drop(listeners);

        match self.registry.hit_test(pointer) {
            Some(over) => {
                tracing::debug!(id = ?active.id, over = ?over.id, "drag ended");
                handler
                    .on_drag_end(DragEnd {
                        active: &active,
                        over: &over,
                        pointer,
                    })
                    .map_err(DragError::Callback)?;
                Ok(DragOutcome::Dropped {
                    active,
                    over,
                    pointer,
                })
            }
            None => {
                tracing::debug!(id = ?active.id, "drag canceled: released over nothing");
                handler
                    .on_drag_cancel(DragCancel {
                        active: &active,
                        pointer: Some(pointer),
                    })
                    .map_err(DragError::Callback)?;
                Ok(DragOutcome::Canceled { active })
            }
        }
    }

    /// `Dragging → Idle` without a drop: for pointer-cancel, blur, or Escape.
    pub fn cancel<H>(&mut self, handler: &mut H) -> Result<DragOutcome<K, P, D>, DragError<H::Error>>
    where
        H: DragHandler<K, P, D>,
    {
        let Some(Dragging {
            active, listeners, ..
        }) = self.dragging.take()
        else {
            tracing::warn!("cancel without an active drag");
            return Err(DragError::NotDragging);
        };
        drop(listeners);

        tracing::debug!(id = ?active.id, "drag canceled by host");
        handler
            .on_drag_cancel(DragCancel {
                active: &active,
                pointer: None,
            })
            .map_err(DragError::Callback)?;
        Ok(DragOutcome::Canceled { active })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FixedBounds;
    use crate::surface::CountingSurface;
    use alloc::vec::Vec;
    use core::convert::Infallible;

    #[derive(Debug, PartialEq)]
    enum Call {
        Start(u32),
        Over(u32, Option<u32>),
        End(u32, u32),
        Cancel(u32),
    }

    #[derive(Default)]
    struct Log(Vec<Call>);

    impl DragHandler<u32, (), u32> for Log {
        type Error = Infallible;

        fn on_drag_start(&mut self, e: DragStart<'_, u32, ()>) -> Result<(), Infallible> {
            self.0.push(Call::Start(e.active.id));
            Ok(())
        }

        fn on_drag_over(&mut self, e: DragOver<'_, u32, (), u32>) -> Result<(), Infallible> {
            self.0.push(Call::Over(e.active.id, e.over.map(|o| o.id)));
            Ok(())
        }

        fn on_drag_end(&mut self, e: DragEnd<'_, u32, (), u32>) -> Result<(), Infallible> {
            self.0.push(Call::End(e.active.id, e.over.id));
            Ok(())
        }

        fn on_drag_cancel(&mut self, e: DragCancel<'_, u32, ()>) -> Result<(), Infallible> {
            self.0.push(Call::Cancel(e.active.id));
            Ok(())
        }
    }

    fn two_rows() -> RegionRegistry<u32, u32> {
        let registry = RegionRegistry::new();
        registry.register(100, FixedBounds(Rect::new(0.0, 0.0, 100.0, 50.0)), 0);
        registry.register(200, FixedBounds(Rect::new(0.0, 50.0, 100.0, 100.0)), 1);
        registry
    }

    fn grab(session: &mut DragSession<u32, (), u32, CountingSurface>, log: &mut Log) {
        session
            .activate(
                Point::new(10.0, 10.0),
                1,
                Rect::new(0.0, 0.0, 100.0, 50.0),
                (),
                log,
            )
            .unwrap();
    }

    fn counting() -> (DragSession<u32, (), u32, CountingSurface>, CountingSurface) {
        let surface = CountingSurface::new();
        let session =
            DragSession::with_surface(two_rows(), surface.clone(), DragOptions::default());
        (session, surface)
    }

    #[test]
    fn activate_records_delta_and_subscribes() {
        let (mut session, surface) = counting();
        let mut log = Log::default();
        session
            .activate(
                Point::new(30.0, 70.0),
                1,
                Rect::new(20.0, 60.0, 120.0, 110.0),
                (),
                &mut log,
            )
            .unwrap();

        assert_eq!(session.phase(), Phase::Dragging);
        assert_eq!(session.drag_start_delta(), Some(Vec2::new(10.0, 10.0)));
        assert_eq!(session.overlay_origin(), Some(Point::new(20.0, 60.0)));
        assert_eq!(session.overlay_rect(), Some(Rect::new(20.0, 60.0, 120.0, 110.0)));
        assert!(session.over().is_none());
        assert!(surface.is_listening());
        assert_eq!(log.0, [Call::Start(1)]);
    }

    #[test]
    fn second_activate_is_rejected_without_side_effects() {
        let (mut session, surface) = counting();
        let mut log = Log::default();
        grab(&mut session, &mut log);

        let err = session
            .activate(Point::new(0.0, 0.0), 2, Rect::ZERO, (), &mut log)
            .unwrap_err();
        assert_eq!(err, DragError::AlreadyDragging);
        assert_eq!(session.active().map(|a| a.id), Some(1));
        assert_eq!(surface.attached(), 1);
        assert_eq!(log.0, [Call::Start(1)]);
    }

    #[test]
    fn over_fires_only_on_id_change() {
        let (mut session, _) = counting();
        let mut log = Log::default();
        grab(&mut session, &mut log);

        session.pointer_move(Point::new(10.0, 20.0), &mut log).unwrap();
        session.pointer_move(Point::new(12.0, 22.0), &mut log).unwrap();
        session.pointer_move(Point::new(10.0, 70.0), &mut log).unwrap();
        session.pointer_move(Point::new(500.0, 70.0), &mut log).unwrap();
        session.pointer_move(Point::new(501.0, 70.0), &mut log).unwrap();

        assert_eq!(
            log.0,
            [
                Call::Start(1),
                Call::Over(1, Some(100)),
                Call::Over(1, Some(200)),
                Call::Over(1, None),
            ]
        );
        assert_eq!(session.pointer(), Some(Point::new(501.0, 70.0)));
    }

    #[test]
    fn move_is_consumed_only_while_dragging() {
        let (mut session, _) = counting();
        let mut log = Log::default();
        assert_eq!(
            session.pointer_move(Point::ZERO, &mut log),
            Ok(Disposition::Ignored)
        );
        grab(&mut session, &mut log);
        assert_eq!(
            session.pointer_move(Point::ZERO, &mut log),
            Ok(Disposition::Consumed)
        );
    }

    #[test]
    fn release_over_region_ends_and_detaches() {
        let (mut session, surface) = counting();
        let mut log = Log::default();
        grab(&mut session, &mut log);
        session.pointer_move(Point::new(10.0, 20.0), &mut log).unwrap();

        // Release point differs from the last move sample.
        let outcome = session.pointer_up(Point::new(10.0, 60.0), &mut log).unwrap();
        assert_eq!(outcome.over().map(|o| o.id), Some(200));
        assert!(!session.is_dragging());
        assert!(session.over().is_none());
        assert!(!surface.is_listening());
        assert_eq!(log.0.last(), Some(&Call::End(1, 200)));
    }

    #[test]
    fn release_over_nothing_cancels() {
        let (mut session, surface) = counting();
        let mut log = Log::default();
        grab(&mut session, &mut log);
        session.pointer_move(Point::new(10.0, 20.0), &mut log).unwrap();

        let outcome = session.pointer_up(Point::new(300.0, 300.0), &mut log).unwrap();
        assert!(!outcome.is_dropped());
        assert!(!surface.is_listening());
        assert_eq!(log.0.last(), Some(&Call::Cancel(1)));
    }

    #[test]
    fn pointer_up_while_idle_is_an_error() {
        let (mut session, _) = counting();
        let mut log = Log::default();
        assert_eq!(
            session.pointer_up(Point::ZERO, &mut log).unwrap_err(),
            DragError::NotDragging
        );
        assert!(log.0.is_empty());
    }

    #[test]
    fn host_cancel_skips_hit_test() {
        let (mut session, surface) = counting();
        let mut log = Log::default();
        grab(&mut session, &mut log);
        session.pointer_move(Point::new(10.0, 20.0), &mut log).unwrap();

        let outcome = session.cancel(&mut log).unwrap();
        assert_eq!(outcome.active().id, 1);
        assert!(!surface.is_listening());
        assert_eq!(log.0.last(), Some(&Call::Cancel(1)));
        assert_eq!(session.cancel(&mut log).unwrap_err(), DragError::NotDragging);
    }

    #[test]
    fn moves_after_release_are_silent() {
        let (mut session, _) = counting();
        let mut log = Log::default();
        grab(&mut session, &mut log);
        session.pointer_up(Point::new(10.0, 20.0), &mut log).unwrap();
        let calls = log.0.len();

        session.pointer_move(Point::new(10.0, 70.0), &mut log).unwrap();
        assert_eq!(log.0.len(), calls);
    }

    #[test]
    fn drop_side_follows_pointer_within_region() {
        let (mut session, _) = counting();
        let mut log = Log::default();
        grab(&mut session, &mut log);
        assert_eq!(session.drop_side(), None);

        session.pointer_move(Point::new(10.0, 55.0), &mut log).unwrap();
        assert_eq!(session.drop_side(), Some(DropSide::Before));
        session.pointer_move(Point::new(10.0, 95.0), &mut log).unwrap();
        assert_eq!(session.drop_side(), Some(DropSide::After));
        assert_eq!(session.drop_side_on(Axis::Horizontal), Some(DropSide::Before));
    }
}
