#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Start point for a phase timing. `Instant` is unavailable in the browser,
/// so wasm builds read the JS clock instead.
#[derive(Debug, Clone, Copy)]
pub struct PerfMark {
    #[cfg(target_arch = "wasm32")]
    started_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    started_at: Instant,
}

impl PerfMark {
    #[cfg(target_arch = "wasm32")]
    pub fn now() -> Self {
        Self {
            started_ms: js_sys::Date::now(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn now() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn elapsed_ms(&self) -> u64 {
        (js_sys::Date::now() - self.started_ms).max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }
}

#[inline]
pub fn log_perf(scope: &str, started_at: PerfMark, details: &str) {
    let elapsed_ms = started_at.elapsed_ms();
    if details.trim().is_empty() {
        tracing::info!(target: "perf", "{scope} took {elapsed_ms}ms");
    } else {
        tracing::info!(target: "perf", "{scope} took {elapsed_ms}ms | {details}");
    }
}
