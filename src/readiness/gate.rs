use std::cell::Cell;
use std::rc::Rc;

/// One-shot gate: whatever runs through it runs at most once.
///
/// Cloning shares the flag, so every callback site that needs to trigger the
/// guarded work holds a clone of the same gate. Page script execution is
/// single-threaded, so a plain check-then-set on a `Cell` is atomic with
/// respect to every other callback.
#[derive(Debug, Clone, Default)]
pub struct OnceGate {
    fired: Rc<Cell<bool>>,
}

impl OnceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` if the gate has not fired yet. Returns whether `f` ran.
    pub fn run_once<F: FnOnce()>(&self, f: F) -> bool {
        if self.fired.replace(true) {
            return false;
        }
        f();
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}
