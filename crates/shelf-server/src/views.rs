//! Open detail views and their lookup slots
//!
//! Each detail view instance is named by the client's `nav` value and owns
//! one [`LatestLookup`]. Views are kept in open order; once the registry is
//! full the oldest view is cancelled and dropped.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use shelf_core::{CatalogRecord, LatestLookup, SourceError};

/// Lookup slot of one detail view
pub type DetailLookup = LatestLookup<Result<CatalogRecord, SourceError>>;

/// Open views kept before the oldest is evicted
pub const MAX_DETAIL_VIEWS: usize = 256;

#[derive(Default)]
struct Views {
    slots: HashMap<String, DetailLookup>,
    order: VecDeque<String>,
}

pub struct DetailViews {
    views: Mutex<Views>,
    capacity: usize,
}

impl Default for DetailViews {
    fn default() -> Self {
        Self::with_capacity(MAX_DETAIL_VIEWS)
    }
}

impl DetailViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            views: Mutex::new(Views::default()),
            capacity: capacity.max(1),
        }
    }

    /// Slot for `view`, opening it if needed
    pub fn slot(&self, view: &str) -> DetailLookup {
        let mut views = self.lock();
        if let Some(slot) = views.slots.get(view) {
            return slot.clone();
        }

        while views.slots.len() >= self.capacity {
            let Some(oldest) = views.order.pop_front() else {
                break;
            };
            if let Some(evicted) = views.slots.remove(&oldest) {
                tracing::debug!(view = %oldest, "Evicting detail view");
                evicted.cancel();
            }
        }

        let slot = DetailLookup::new();
        views.slots.insert(view.to_string(), slot.clone());
        views.order.push_back(view.to_string());
        slot
    }

    /// Cancel the view's lookup and forget it; false if it was not open
    pub fn close(&self, view: &str) -> bool {
        let mut views = self.lock();
        let Some(slot) = views.slots.remove(view) else {
            return false;
        };
        views.order.retain(|v| v != view);
        slot.cancel();
        true
    }

    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Views> {
        self.views.lock().unwrap_or_else(|e| e.into_inner())
    }
}
