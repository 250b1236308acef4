use crate::config::PageConfig;
use crate::diagnostics::{log_perf, PerfMark};
use crate::readiness::{DeviceClass, OnceGate, ViewportWatcher};

/// What asked for the ready sequence to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadySource {
    /// The asset loader finished (or hit its settle timeout).
    AssetsSettled,
    /// Direct fallback timer; covers a loader that never reports back.
    Fallback,
}

/// Per-page-load state: the device class captured at load, the
/// initialization gate and the config. Built once and shared by `Rc`.
#[derive(Debug)]
pub struct PageSession {
    config: PageConfig,
    device_class: DeviceClass,
    initialized: OnceGate,
    viewport: ViewportWatcher,
    started_at: PerfMark,
}

impl PageSession {
    pub fn new(config: PageConfig, device_class: DeviceClass) -> Self {
        Self {
            config,
            device_class,
            initialized: OnceGate::new(),
            viewport: ViewportWatcher::new(device_class),
            started_at: PerfMark::now(),
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    pub fn viewport(&self) -> &ViewportWatcher {
        &self.viewport
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.has_fired()
    }

    /// Every path into the ready sequence goes through here.
    pub fn begin_ready<F: FnOnce()>(&self, source: ReadySource, ready: F) -> bool {
        let ran = self.initialized.run_once(|| {
            log_perf(
                "page ready",
                self.started_at,
                &format!("source={source:?} class={}", self.device_class.label()),
            );
            ready();
        });
        if !ran {
            tracing::debug!(?source, "ready sequence already started");
        }
        ran
    }
}
