//! Outside-pointer dismissal as a scoped subscription.
//!
//! Opening a dropdown registers its screen region on a shared [`DismissBus`];
//! the returned [`DismissGuard`] deregisters on every exit path — explicit
//! close, widget teardown, panic unwind — via `Drop`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Rectangular screen region in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn contains(self, col: u16, row: u16) -> bool {
        col >= self.x
            && col < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

type RegionMap = Arc<Mutex<HashMap<u64, Region>>>;

/// Registry of regions that are currently listening for outside pointers.
#[derive(Clone, Default)]
pub struct DismissBus {
    regions: RegionMap,
    next_id: Arc<AtomicU64>,
}

impl DismissBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region and receive the guard that owns the subscription.
    pub fn register(&self, region: Region) -> DismissGuard {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.regions
            .lock()
            .expect("dismiss registry should not be poisoned")
            .insert(id, region);

        DismissGuard {
            id,
            region,
            regions: Arc::clone(&self.regions),
        }
    }

    /// Number of live subscriptions.
    pub fn active(&self) -> usize {
        self.regions
            .lock()
            .expect("dismiss registry should not be poisoned")
            .len()
    }

    /// Subscriptions whose region does not contain the pointer location.
    pub fn outside_hits(&self, col: u16, row: u16) -> Vec<u64> {
        let mut hits = self
            .regions
            .lock()
            .expect("dismiss registry should not be poisoned")
            .iter()
            .filter(|(_, region)| !region.contains(col, row))
            .map(|(id, _)| *id)
            .collect::<Vec<_>>();
        hits.sort_unstable();
        hits
    }
}

/// RAII handle for one dismissal subscription.
#[derive(Debug)]
pub struct DismissGuard {
    id: u64,
    region: Region,
    regions: RegionMap,
}

impl DismissGuard {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Track the widget's latest rendered bounds.
    pub fn relocate(&mut self, region: Region) {
        self.region = region;
        self.regions
            .lock()
            .expect("dismiss registry should not be poisoned")
            .insert(self.id, region);
    }
}

impl Drop for DismissGuard {
    fn drop(&mut self) {
        if let Ok(mut regions) = self.regions.lock() {
            regions.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_drop_removes_the_subscription() {
        let bus = DismissBus::new();
        let guard = bus.register(Region::new(0, 0, 10, 4));
        assert_eq!(bus.active(), 1);

        drop(guard);
        assert_eq!(bus.active(), 0);
    }

    #[test]
    fn pointer_outside_region_is_reported() {
        let bus = DismissBus::new();
        let guard = bus.register(Region::new(5, 5, 10, 3));

        assert!(bus.outside_hits(6, 6).is_empty());
        assert_eq!(bus.outside_hits(0, 0), vec![guard.id()]);
        // Bounds are half-open on the far edges.
        assert_eq!(bus.outside_hits(15, 5), vec![guard.id()]);
    }

    #[test]
    fn relocate_moves_the_listening_region() {
        let bus = DismissBus::new();
        let mut guard = bus.register(Region::new(0, 0, 2, 2));

        guard.relocate(Region::new(20, 10, 4, 4));

        assert!(bus.outside_hits(21, 11).is_empty());
        assert_eq!(bus.outside_hits(0, 0), vec![guard.id()]);
    }
}
