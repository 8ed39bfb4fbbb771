//! Navigation-scoped catalog lookups
//!
//! A view that fetches on navigation (the detail view) owns one
//! [`LatestLookup`]. Each fetch is keyed by the identity of the navigation
//! that triggered it:
//!
//! - the same navigation fetches at most once; repeat or concurrent callers
//!   share the single result
//! - a new navigation cancels the previous one, and whatever the old fetch
//!   produces is discarded as [`LookupOutcome::Superseded`]

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

/// What a caller gets back from [`LatestLookup::fetch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<T> {
    Completed(T),
    /// A newer navigation (or `cancel`) took over; the result was dropped
    Superseded,
}

impl<T> LookupOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            LookupOutcome::Completed(value) => Some(value),
            LookupOutcome::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, LookupOutcome::Superseded)
    }
}

struct Slot<T> {
    navigation: String,
    generation: u64,
    token: CancellationToken,
    cell: Arc<OnceCell<T>>,
}

struct SlotState<T> {
    next_generation: u64,
    current: Option<Slot<T>>,
}

/// Latest-navigation-wins lookup slot for one view
pub struct LatestLookup<T> {
    state: Arc<Mutex<SlotState<T>>>,
}

impl<T> Clone for LatestLookup<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for LatestLookup<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(SlotState {
                next_generation: 0,
                current: None,
            })),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> LatestLookup<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch for `navigation`, running `fetch` at most once per navigation
    pub async fn fetch<F, Fut>(&self, navigation: &str, fetch: F) -> LookupOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let (generation, token, cell) = self.admit(navigation);

        let value = tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!(navigation, "Lookup superseded before completion");
                return LookupOutcome::Superseded;
            }
            value = cell.get_or_init(fetch) => value.clone(),
        };

        if self.is_current(generation) {
            LookupOutcome::Completed(value)
        } else {
            tracing::debug!(navigation, "Discarding superseded lookup result");
            LookupOutcome::Superseded
        }
    }

    /// Drop the current navigation, e.g. when its view goes away
    pub fn cancel(&self) {
        let mut state = self.lock();
        if let Some(slot) = state.current.take() {
            slot.token.cancel();
        }
    }

    /// Navigation currently owning the slot
    pub fn current_navigation(&self) -> Option<String> {
        self.lock().current.as_ref().map(|s| s.navigation.clone())
    }

    fn admit(&self, navigation: &str) -> (u64, CancellationToken, Arc<OnceCell<T>>) {
        let mut state = self.lock();

        if let Some(slot) = &state.current {
            if slot.navigation == navigation {
                return (slot.generation, slot.token.clone(), Arc::clone(&slot.cell));
            }
            slot.token.cancel();
        }

        let generation = state.next_generation;
        state.next_generation += 1;
        let slot = Slot {
            navigation: navigation.to_string(),
            generation,
            token: CancellationToken::new(),
            cell: Arc::new(OnceCell::new()),
        };
        let admitted = (generation, slot.token.clone(), Arc::clone(&slot.cell));
        state.current = Some(slot);
        admitted
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock()
            .current
            .as_ref()
            .is_some_and(|slot| slot.generation == generation)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
