//! Pointer capture bookkeeping.
//!
//! A gesture subscribes to global pointer events for its whole lifetime.
//! The subscription is a `PointerCapture` guard: dropping it releases the
//! capture, whichever way the gesture ended.

use std::cell::Cell;
use std::rc::Rc;

/// The element that hands out pointer captures.
#[derive(Debug, Clone, Default)]
pub struct InteractionSurface {
    active: Rc<Cell<usize>>,
}

impl InteractionSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start capturing pointer events until the guard is dropped.
    pub fn capture(&self) -> PointerCapture {
        self.active.set(self.active.get() + 1);
        PointerCapture {
            active: Rc::clone(&self.active),
        }
    }

    /// Number of captures currently held.
    pub fn active_captures(&self) -> usize {
        self.active.get()
    }
}

/// Held by a gesture while it is in progress.
#[derive(Debug)]
#[must_use = "the capture is released as soon as the guard is dropped"]
pub struct PointerCapture {
    active: Rc<Cell<usize>>,
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
    }
}
