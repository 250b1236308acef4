use crate::readiness::{DeviceClass, OnceGate};

/// Compares resize-time classifications against the class the page loaded
/// with. Crossing the boundary asks for one reload; nothing is swapped live.
#[derive(Debug, Clone)]
pub struct ViewportWatcher {
    loaded_as: DeviceClass,
    reload: OnceGate,
}

impl ViewportWatcher {
    pub fn new(loaded_as: DeviceClass) -> Self {
        Self {
            loaded_as,
            reload: OnceGate::new(),
        }
    }

    /// Calls `reload` the first time `current` differs from the load-time
    /// class. Returns whether it was called.
    pub fn observe<F: FnOnce()>(&self, current: DeviceClass, reload: F) -> bool {
        if current == self.loaded_as {
            return false;
        }
        self.reload.run_once(|| {
            tracing::info!(
                from = self.loaded_as.label(),
                to = current.label(),
                "device class changed, reloading"
            );
            reload();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn crossing_boundary_reloads_exactly_once() {
        let watcher = ViewportWatcher::new(DeviceClass::Standard);
        let reloads = Cell::new(0u32);

        for class in [
            DeviceClass::Standard,
            DeviceClass::Compact,
            DeviceClass::Compact,
            DeviceClass::Standard,
            DeviceClass::Compact,
        ] {
            watcher.observe(class, || reloads.set(reloads.get() + 1));
        }

        assert_eq!(reloads.get(), 1);
    }

    #[test]
    fn resizing_within_class_never_reloads() {
        let watcher = ViewportWatcher::new(DeviceClass::Compact);
        let reloads = Cell::new(0u32);

        for _ in 0..10 {
            assert!(!watcher.observe(DeviceClass::Compact, || reloads.set(reloads.get() + 1)));
        }

        assert_eq!(reloads.get(), 0);
    }
}
