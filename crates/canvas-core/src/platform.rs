//! Platform abstraction traits for the preview pipeline.
//!
//! These traits define the interface between the playground logic and
//! platform-specific implementations (browser timers and iframes, test
//! doubles, native hosts). The scheduler and session are generic over them.

use std::time::Duration;

use crate::scheduler::Ticket;

/// Error type for rendering surface operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The surface is not mounted yet (or has been removed).
    #[error("rendering surface is not available")]
    Unavailable,
    /// The platform refused the document.
    #[error("rendering surface rejected the document: {0}")]
    Rejected(String),
}

/// The isolated context that displays a compiled document.
///
/// Each call replaces the whole content; there is no incremental patching.
pub trait RenderSurface {
    fn render(&self, document: &str) -> Result<(), SurfaceError>;
}

impl<R: RenderSurface + ?Sized> RenderSurface for &R {
    fn render(&self, document: &str) -> Result<(), SurfaceError> {
        (**self).render(document)
    }
}

/// A cancellable one-shot timer primitive.
///
/// `start` must return immediately. When the delay elapses the platform
/// hands the ticket back to the session (`Playground::fire`), which decides
/// whether it is still current.
pub trait TimerPlatform {
    /// Keeps a started timer alive until fired or cancelled.
    type Handle;

    fn start(&self, delay: Duration, ticket: Ticket) -> Self::Handle;

    /// Cancel a timer that may not have fired yet.
    fn cancel(&self, handle: Self::Handle);
}
