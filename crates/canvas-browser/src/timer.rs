//! `setTimeout` as a `TimerPlatform`.

use std::rc::Rc;
use std::time::Duration;

use canvas_core::{Ticket, TimerPlatform};
use gloo_timers::callback::Timeout;

/// Timer that hands fired tickets to a callback.
///
/// The callback is deferred to a microtask so it never runs inside the
/// `Timeout` closure the scheduler is about to drop.
#[derive(Clone)]
pub struct GlooTimer {
    on_fire: Rc<dyn Fn(Ticket)>,
}

impl GlooTimer {
    pub fn new(on_fire: impl Fn(Ticket) + 'static) -> Self {
        Self {
            on_fire: Rc::new(on_fire),
        }
    }
}

impl TimerPlatform for GlooTimer {
    type Handle = Timeout;

    fn start(&self, delay: Duration, ticket: Ticket) -> Timeout {
        let on_fire = self.on_fire.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            wasm_bindgen_futures::spawn_local(async move { on_fire(ticket) });
        })
    }

    fn cancel(&self, handle: Timeout) {
        // Dropping a `Timeout` clears it.
        drop(handle);
    }
}
