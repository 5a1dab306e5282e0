/// Pointer events, already translated into arena-local pixels by the caller.
/// Touch input collapses to the first touch point before it gets here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended.
    PointerUp,
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The pointer left the arena. Releases a drag like `PointerUp`.
    PointerLeave,
}

/// A queue of input events.
/// JS writes events into the queue; the runner drains them before each batch of ticks.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event. Consecutive moves are coalesced; only the latest
    /// position matters to a kinematic drag.
    pub fn push(&mut self, event: InputEvent) {
        if let (InputEvent::PointerMove { .. }, Some(InputEvent::PointerMove { .. })) =
            (event, self.events.last())
        {
            self.events.pop();
        }
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
