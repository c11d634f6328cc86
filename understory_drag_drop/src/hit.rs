// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing a pointer against registered droppable regions.
//!
//! [`hit_test`] walks a registry snapshot in registration order, asks each
//! region for its live bounds, and returns the first region whose bounds contain
//! the pointer (edges inclusive).
//!
//! ## Overlapping regions
//!
//! When regions overlap, the one registered first wins. There is no ranking by
//! intersection area, distance to center, or nesting depth. Hosts that need a
//! different priority should register regions in priority order.
//!
//! ## Detached regions
//!
//! A provider that returns `None` is skipped; its region never overlaps.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::Point;

use crate::registry::{RegionRegistry, Snapshot};
use crate::types::{Over, contains_inclusive};

/// Returns the first region in `snapshot` whose live bounds contain `pointer`.
pub fn hit_test<K, D>(pointer: Point, snapshot: &Snapshot<K, D>) -> Option<Over<K, D>>
where
    K: Clone + Debug,
    D: Clone,
{
    let hit = snapshot.iter().find_map(|region| {
        let bounds = region.current_bounds()?;
        contains_inclusive(bounds, pointer).then(|| Over {
            id: region.id().clone(),
            payload: region.payload().clone(),
            bounds,
        })
    });
    tracing::trace!(
        x = pointer.x,
        y = pointer.y,
        candidates = snapshot.len(),
        over = ?hit.as_ref().map(|o| &o.id),
        "hit test"
    );
    hit
}

impl<K, D> RegionRegistry<K, D>
where
    K: Clone + Eq + Hash + Debug,
    D: Clone,
{
    /// Snapshots the registry and hit tests `pointer` against it.
    ///
    /// No registry borrow is held while bounds providers run.
    pub fn hit_test(&self, pointer: Point) -> Option<Over<K, D>> {
        hit_test(pointer, &self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FixedBounds;
    use alloc::rc::Rc;
    use core::cell::Cell;
    use kurbo::Rect;

    fn column(registry: &RegionRegistry<u32, usize>) {
        for i in 0..3_u32 {
            let y = f64::from(i) * 20.0;
            registry.register(i, FixedBounds(Rect::new(0.0, y, 100.0, y + 20.0)), i as usize);
        }
    }

    #[test]
    fn inside_returns_region() {
        let registry = RegionRegistry::new();
        column(&registry);
        let over = registry.hit_test(Point::new(50.0, 30.0)).unwrap();
        assert_eq!(over.id, 1);
        assert_eq!(over.payload, 1);
        assert_eq!(over.bounds, Rect::new(0.0, 20.0, 100.0, 40.0));
    }

    #[test]
    fn outside_returns_none() {
        let registry = RegionRegistry::new();
        column(&registry);
        assert!(registry.hit_test(Point::new(150.0, 30.0)).is_none());
        assert!(registry.hit_test(Point::new(50.0, -0.5)).is_none());
        assert!(registry.hit_test(Point::new(50.0, 60.5)).is_none());
    }

    #[test]
    fn shared_edge_goes_to_first_registered() {
        let registry = RegionRegistry::new();
        column(&registry);
        // y = 20 is the bottom edge of 0 and the top edge of 1.
        assert_eq!(registry.hit_test(Point::new(0.0, 20.0)).unwrap().id, 0);
    }

    #[test]
    fn overlap_prefers_earlier_registration() {
        let registry = RegionRegistry::new();
        registry.register(10, FixedBounds(Rect::new(0.0, 0.0, 100.0, 100.0)), 0);
        registry.register(20, FixedBounds(Rect::new(25.0, 25.0, 75.0, 75.0)), 1);
        for _ in 0..3 {
            assert_eq!(registry.hit_test(Point::new(50.0, 50.0)).unwrap().id, 10);
        }
    }

    #[test]
    fn detached_region_is_skipped() {
        let registry = RegionRegistry::new();
        registry.register(1, || None, 0);
        registry.register(2, FixedBounds(Rect::new(0.0, 0.0, 10.0, 10.0)), 1);
        assert_eq!(registry.hit_test(Point::new(5.0, 5.0)).unwrap().id, 2);
    }

    #[test]
    fn bounds_are_queried_live() {
        let registry = RegionRegistry::new();
        let offset = Rc::new(Cell::new(0.0));
        let live = Rc::clone(&offset);
        registry.register(
            1_u32,
            move || Some(Rect::new(live.get(), 0.0, live.get() + 10.0, 10.0)),
            (),
        );
        assert!(registry.hit_test(Point::new(5.0, 5.0)).is_some());
        offset.set(100.0);
        assert!(registry.hit_test(Point::new(5.0, 5.0)).is_none());
        assert!(registry.hit_test(Point::new(105.0, 5.0)).is_some());
    }

    #[test]
    fn provider_may_unregister_during_hit_test() {
        let registry = RegionRegistry::<u32, ()>::new();
        let handle = registry.clone();
        registry.register(
            1,
            move || {
                handle.unregister(&2);
                None
            },
            (),
        );
        registry.register(2, FixedBounds(Rect::new(0.0, 0.0, 10.0, 10.0)), ());

        // The snapshot taken before iteration still contains region 2.
        assert_eq!(registry.hit_test(Point::new(5.0, 5.0)).unwrap().id, 2);
        // The next snapshot does not.
        assert!(registry.hit_test(Point::new(5.0, 5.0)).is_none());
    }
}
