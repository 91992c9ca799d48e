//! Serial pointer event queue.
//!
//! Platform integrations enqueue events as they arrive and the session
//! drains them in order on its own cadence. Delivery order is the enqueue
//! order; events from different pointers may interleave freely.

use crate::types::{PointerEvent, PointerSample};

#[derive(Default)]
pub struct PointerDispatcher {
    queue: Vec<PointerEvent>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push(event);
    }

    pub fn push_down(&mut self, sample: PointerSample) {
        self.push(PointerEvent::down(sample));
    }

    pub fn push_move(&mut self, sample: PointerSample) {
        self.push(PointerEvent::moved(sample));
    }

    pub fn push_up(&mut self, sample: PointerSample) {
        self.push(PointerEvent::up(sample));
    }

    /// Delivers all queued events to `handler` in enqueue order.
    pub fn drain<F>(&mut self, mut handler: F)
    where
        F: FnMut(PointerEvent),
    {
        for event in self.queue.drain(..) {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
