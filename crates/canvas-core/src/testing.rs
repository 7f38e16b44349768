//! Test doubles for the platform traits.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::platform::{RenderSurface, SurfaceError, TimerPlatform};
use crate::scheduler::Ticket;

struct ManualEntry {
    id: u64,
    deadline: Duration,
    ticket: Ticket,
}

/// Timer driven by an explicit virtual clock.
#[derive(Default)]
pub struct ManualTimer {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    entries: RefCell<Vec<ManualEntry>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward and return the tickets whose deadline passed,
    /// in firing order. Fired timers are removed.
    pub fn advance(&self, by: Duration) -> Vec<Ticket> {
        let now = self.now.get() + by;
        self.now.set(now);

        let mut entries = self.entries.borrow_mut();
        let mut due: Vec<_> = entries
            .iter()
            .filter(|e| e.deadline <= now)
            .map(|e| (e.deadline, e.id, e.ticket))
            .collect();
        entries.retain(|e| e.deadline > now);
        due.sort();
        due.into_iter().map(|(_, _, ticket)| ticket).collect()
    }

    pub fn live_timers(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl TimerPlatform for ManualTimer {
    type Handle = u64;

    fn start(&self, delay: Duration, ticket: Ticket) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push(ManualEntry {
            id,
            deadline: self.now.get() + delay,
            ticket,
        });
        id
    }

    fn cancel(&self, handle: u64) {
        self.entries.borrow_mut().retain(|e| e.id != handle);
    }
}

/// Surface that records every delivered document.
pub struct RecordingSurface {
    mounted: Cell<bool>,
    documents: RefCell<Vec<String>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            mounted: Cell::new(true),
            documents: RefCell::new(Vec::new()),
        }
    }

    pub fn unmounted() -> Self {
        let surface = Self::new();
        surface.mounted.set(false);
        surface
    }

    pub fn mount(&self) {
        self.mounted.set(true);
    }

    pub fn documents(&self) -> Vec<String> {
        self.documents.borrow().clone()
    }
}

impl RenderSurface for RecordingSurface {
    fn render(&self, document: &str) -> Result<(), SurfaceError> {
        if !self.mounted.get() {
            return Err(SurfaceError::Unavailable);
        }
        self.documents.borrow_mut().push(document.to_string());
        Ok(())
    }
}
