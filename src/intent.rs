use std::cell::Cell;
use std::rc::Rc;

/// Shared assembled/exploded toggle.
///
/// The host owns the original; UI code gets a clone to write through and the
/// animator, grid and camera read it once per frame. Everything runs on the
/// render thread, so this is `Rc<Cell<_>>` and not `Send`.
#[derive(Debug, Clone, Default)]
pub struct IntentHandle {
    exploded: Rc<Cell<bool>>,
}

impl IntentHandle {
    pub fn new(exploded: bool) -> Self {
        Self {
            exploded: Rc::new(Cell::new(exploded)),
        }
    }

    pub fn get(&self) -> bool {
        self.exploded.get()
    }

    /// Returns true when the value actually changed
    pub fn set(&self, exploded: bool) -> bool {
        self.exploded.replace(exploded) != exploded
    }

    /// Flip the intent and return the new value
    pub fn toggle(&self) -> bool {
        let next = !self.get();
        self.exploded.set(next);
        next
    }

    /// Text for the toggle button: names the action a click will perform
    pub fn button_label(&self) -> &'static str {
        if self.get() { "ASSEMBLE" } else { "DISASSEMBLE" }
    }
}
