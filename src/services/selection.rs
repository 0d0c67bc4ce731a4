//! View slots: latest-request-wins state for views fed by async fetches.
//!
//! DESIGN
//! ======
//! Each `begin` bumps a generation counter and hands out a ticket. A fetch
//! result is applied only if its ticket still matches the current
//! generation, so a slow response for an old selection can never overwrite
//! a newer one. There is no cancellation: the stale fetch runs to completion
//! and its result is discarded.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// Observable state of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready { data: T },
    Failed { message: String },
}

/// Proof of which `begin` call a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

struct SlotInner<T> {
    generation: u64,
    state: ViewState<T>,
}

pub struct ViewSlot<T> {
    inner: Mutex<SlotInner<T>>,
}

impl<T: Clone> ViewSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Mutex::new(SlotInner { generation: 0, state: ViewState::Idle }) }
    }

    fn lock(&self) -> MutexGuard<'_, SlotInner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new request: invalidates all outstanding tickets and marks
    /// the view as loading.
    pub fn begin(&self) -> Ticket {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = ViewState::Loading;
        Ticket(inner.generation)
    }

    /// Apply a result if `ticket` is still current. Returns whether the
    /// result was applied.
    pub fn settle(&self, ticket: Ticket, result: Result<T, String>) -> bool {
        let mut inner = self.lock();
        if inner.generation != ticket.0 {
            return false;
        }
        inner.state = match result {
            Ok(data) => ViewState::Ready { data },
            Err(message) => ViewState::Failed { message },
        };
        true
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewState<T> {
        self.lock().state.clone()
    }
}

impl<T: Clone> Default for ViewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
