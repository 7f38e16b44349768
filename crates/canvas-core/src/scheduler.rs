//! Trailing-edge debounce between buffer edits and preview renders.
//!
//! Two states: `Idle` and `Pending`. Every mutation cancels the outstanding
//! timer (if any) and starts a fresh one for the quiet interval, so at most
//! one render is pending at any moment. A render only happens when the
//! current timer fires; a burst of edits closer together than the quiet
//! interval yields exactly one render of the final state. There is no
//! maximum wait, so uninterrupted typing defers the render indefinitely.

use std::time::Duration;

use web_time::Instant;

use crate::fragment::Variant;
use crate::platform::{RenderSurface, SurfaceError, TimerPlatform};

/// Identity of one scheduled render callback.
///
/// Tickets are handed to the timer platform and back, so a callback that
/// fires after being superseded can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    /// A ticket not issued by a scheduler, for driving a timer platform directly.
    pub fn from_raw(raw: u64) -> Self {
        Ticket(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Quiet time after the most recent mutation before rendering.
    pub quiet_interval: Duration,
}

impl SchedulerConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            quiet_interval: variant.quiet_interval(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Pending { ticket: Ticket },
}

/// What happened when a timer callback came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The compiled document was delivered to the surface.
    Rendered,
    /// The ticket was superseded or cancelled; nothing was compiled.
    Stale,
    /// The surface could not take the document. Skipped, not retried.
    Skipped(SurfaceError),
}

struct PendingRender<H> {
    ticket: Ticket,
    handle: H,
    since: Instant,
}

/// Debounced render scheduler, generic over the timer primitive.
pub struct RenderScheduler<T: TimerPlatform> {
    timer: T,
    config: SchedulerConfig,
    pending: Option<PendingRender<T::Handle>>,
    next_ticket: u64,
    renders: u64,
}

impl<T: TimerPlatform> RenderScheduler<T> {
    pub fn new(timer: T, config: SchedulerConfig) -> Self {
        Self {
            timer,
            config,
            pending: None,
            next_ticket: 0,
            renders: 0,
        }
    }

    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn state(&self) -> SchedulerState {
        match &self.pending {
            Some(pending) => SchedulerState::Pending {
                ticket: pending.ticket,
            },
            None => SchedulerState::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of renders actually delivered so far.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Record a buffer mutation: cancel any pending render and restart the
    /// quiet interval. Returns immediately.
    pub fn notify_mutation(&mut self) -> Ticket {
        if let Some(previous) = self.pending.take() {
            tracing::trace!(
                target: "canvas::scheduler",
                ticket = previous.ticket.0,
                "cancelling superseded render"
            );
            self.timer.cancel(previous.handle);
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;

        let handle = self.timer.start(self.config.quiet_interval, ticket);
        self.pending = Some(PendingRender {
            ticket,
            handle,
            since: Instant::now(),
        });

        tracing::trace!(
            target: "canvas::scheduler",
            ticket = ticket.0,
            delay_ms = self.config.quiet_interval.as_millis() as u64,
            "render scheduled"
        );
        ticket
    }

    /// Handle a fired timer. Only the current ticket renders.
    ///
    /// `compile` runs after the transition to `Idle`, so it always sees the
    /// buffers as they are at fire time.
    pub fn fire<S, F>(&mut self, ticket: Ticket, compile: F, surface: &S) -> RenderOutcome
    where
        S: RenderSurface + ?Sized,
        F: FnOnce() -> String,
    {
        let is_current = matches!(&self.pending, Some(p) if p.ticket == ticket);
        if !is_current {
            tracing::trace!(target: "canvas::scheduler", ticket = ticket.0, "stale ticket ignored");
            return RenderOutcome::Stale;
        }
        // The timer has fired; its handle is spent.
        let Some(fired) = self.pending.take() else {
            return RenderOutcome::Stale;
        };
        drop(fired.handle);

        let document = compile();
        match surface.render(&document) {
            Ok(()) => {
                self.renders += 1;
                tracing::debug!(
                    target: "canvas::scheduler",
                    ticket = ticket.0,
                    bytes = document.len(),
                    waited_ms = fired.since.elapsed().as_millis() as u64,
                    "preview rendered"
                );
                RenderOutcome::Rendered
            }
            Err(e) => {
                tracing::debug!(
                    target: "canvas::scheduler",
                    ticket = ticket.0,
                    error = %e,
                    "render skipped"
                );
                RenderOutcome::Skipped(e)
            }
        }
    }

    /// Drop any pending render without rendering.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.timer.cancel(pending.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualTimer, RecordingSurface};

    fn scheduler(ms: u64) -> RenderScheduler<ManualTimer> {
        RenderScheduler::new(
            ManualTimer::new(),
            SchedulerConfig {
                quiet_interval: Duration::from_millis(ms),
            },
        )
    }

    /// Advance the manual clock and deliver every ticket that fires.
    fn run_for(
        sched: &mut RenderScheduler<ManualTimer>,
        ms: u64,
        doc: &str,
        surface: &RecordingSurface,
    ) -> Vec<RenderOutcome> {
        let fired = sched.timer().advance(Duration::from_millis(ms));
        fired
            .into_iter()
            .map(|t| sched.fire(t, || doc.to_string(), surface))
            .collect()
    }

    #[test]
    fn test_no_render_on_leading_edge() {
        let mut sched = scheduler(300);
        let surface = RecordingSurface::new();
        sched.notify_mutation();
        assert!(sched.is_pending());
        assert!(run_for(&mut sched, 299, "doc", &surface).is_empty());
        assert!(surface.documents().is_empty());
    }

    #[test]
    fn test_burst_renders_once_with_last_state() {
        let mut sched = scheduler(300);
        let surface = RecordingSurface::new();
        let mut state = String::new();

        for i in 0..10 {
            state = format!("state {i}");
            sched.notify_mutation();
            assert!(run_for(&mut sched, 299, &state, &surface).is_empty());
        }
        let outcomes = run_for(&mut sched, 1, &state, &surface);

        assert_eq!(outcomes, vec![RenderOutcome::Rendered]);
        assert_eq!(surface.documents(), vec!["state 9".to_string()]);
        assert_eq!(sched.state(), SchedulerState::Idle);
        assert_eq!(sched.render_count(), 1);
    }

    #[test]
    fn test_mutation_after_quiet_interval_renders_again() {
        let mut sched = scheduler(300);
        let surface = RecordingSurface::new();

        sched.notify_mutation();
        run_for(&mut sched, 300, "first", &surface);
        sched.notify_mutation();
        run_for(&mut sched, 300, "second", &surface);

        assert_eq!(
            surface.documents(),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn test_cancelled_timers_are_released() {
        let mut sched = scheduler(500);
        sched.notify_mutation();
        sched.notify_mutation();
        sched.notify_mutation();
        assert_eq!(sched.timer().live_timers(), 1);
        sched.cancel();
        assert_eq!(sched.timer().live_timers(), 0);
        assert_eq!(sched.state(), SchedulerState::Idle);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut sched = scheduler(300);
        let surface = RecordingSurface::new();
        let old = sched.notify_mutation();
        let current = sched.notify_mutation();

        // A platform that could not cancel in time still hands back the old one.
        let outcome = sched.fire(old, || panic!("stale ticket must not compile"), &surface);
        assert_eq!(outcome, RenderOutcome::Stale);
        assert_eq!(sched.state(), SchedulerState::Pending { ticket: current });

        assert_eq!(
            sched.fire(current, || "doc".into(), &surface),
            RenderOutcome::Rendered
        );
        // Firing twice is a no-op.
        assert_eq!(
            sched.fire(current, || "doc".into(), &surface),
            RenderOutcome::Stale
        );
    }

    #[test]
    fn test_unavailable_surface_is_skipped_without_retry() {
        let mut sched = scheduler(300);
        let surface = RecordingSurface::unmounted();
        sched.notify_mutation();
        let outcomes = run_for(&mut sched, 300, "doc", &surface);

        assert_eq!(
            outcomes,
            vec![RenderOutcome::Skipped(SurfaceError::Unavailable)]
        );
        assert_eq!(sched.state(), SchedulerState::Idle);
        assert_eq!(sched.timer().live_timers(), 0);
        assert_eq!(sched.render_count(), 0);

        // Self-resolves on the next mutation once mounted.
        surface.mount();
        sched.notify_mutation();
        run_for(&mut sched, 300, "later", &surface);
        assert_eq!(surface.documents(), vec!["later".to_string()]);
    }

    #[test]
    fn test_variant_intervals() {
        assert_eq!(
            SchedulerConfig::for_variant(Variant::Component).quiet_interval,
            Duration::from_millis(500)
        );
        assert_eq!(
            SchedulerConfig::default().quiet_interval,
            Duration::from_millis(300)
        );
    }
}
