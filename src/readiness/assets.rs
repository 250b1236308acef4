//! Asset selection and the bounded "everything settled" join.
//!
//! The browser side hands in one future per resource; this module only cares
//! that each of them eventually reports [`AssetOutcome`] and that the join as
//! a whole never outlives the deadline it is given.

use std::future::Future;

use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::{pin_mut, select, FutureExt};

use crate::config::PageConfig;
use crate::readiness::DeviceClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stylesheet,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadableAsset {
    pub url: String,
    pub kind: AssetKind,
}

impl LoadableAsset {
    pub fn stylesheet(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: AssetKind::Stylesheet,
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: AssetKind::Image,
        }
    }
}

/// Load and error both settle a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOutcome {
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettleReport {
    pub total: usize,
    pub loaded: usize,
    pub failed: usize,
    pub timed_out: bool,
}

impl SettleReport {
    pub fn pending(&self) -> usize {
        self.total - self.loaded - self.failed
    }
}

/// The stylesheet chosen for this device class.
pub fn stylesheet_for(class: DeviceClass, config: &PageConfig) -> LoadableAsset {
    LoadableAsset::stylesheet(config.stylesheets.select(class))
}

/// Toggle images first, then the class background. Blank and repeated
/// sources are dropped.
pub fn prefetch_list<I, S>(toggle_images: I, class: DeviceClass, config: &PageConfig) -> Vec<LoadableAsset>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut urls: Vec<String> = Vec::new();
    let background = config.backgrounds.select(class).to_string();
    for url in toggle_images
        .into_iter()
        .map(Into::into)
        .chain(std::iter::once(background))
    {
        if url.trim().is_empty() || urls.contains(&url) {
            continue;
        }
        urls.push(url);
    }
    urls.into_iter().map(LoadableAsset::image).collect()
}

/// Drives every pending resource until all settle or `deadline` fires,
/// whichever comes first. An empty set returns immediately without polling
/// the deadline.
pub async fn settle_all<F, D>(pending: Vec<F>, deadline: D) -> SettleReport
where
    F: Future<Output = AssetOutcome>,
    D: Future<Output = ()>,
{
    let mut report = SettleReport {
        total: pending.len(),
        ..SettleReport::default()
    };
    if pending.is_empty() {
        return report;
    }

    let mut pending: FuturesUnordered<F> = pending.into_iter().collect();
    let deadline = deadline.fuse();
    pin_mut!(deadline);

    loop {
        select! {
            outcome = pending.next() => match outcome {
                Some(AssetOutcome::Loaded) => report.loaded += 1,
                Some(AssetOutcome::Failed) => report.failed += 1,
                None => break,
            },
            () = deadline => {
                report.timed_out = true;
                break;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::{self, BoxFuture};
    use std::time::{Duration, Instant};

    fn after(ms: u64, outcome: AssetOutcome) -> BoxFuture<'static, AssetOutcome> {
        async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            outcome
        }
        .boxed()
    }

    fn never() -> BoxFuture<'static, AssetOutcome> {
        future::pending().boxed()
    }

    #[test]
    fn prefetch_list_puts_background_last() {
        let config = PageConfig::default();
        let list = prefetch_list(
            ["images/play.png", "images/pause.png"],
            DeviceClass::Compact,
            &config,
        );
        let urls: Vec<&str> = list.iter().map(|asset| asset.url.as_str()).collect();
        assert_eq!(
            urls,
            ["images/play.png", "images/pause.png", "images/ferris-phone.svg"]
        );
        assert!(list.iter().all(|asset| asset.kind == AssetKind::Image));
    }

    #[test]
    fn prefetch_list_skips_blank_and_duplicate_sources() {
        let config = PageConfig::default();
        let list = prefetch_list(
            ["", "images/play.png", "images/play.png", "images/ferris.svg"],
            DeviceClass::Standard,
            &config,
        );
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].url, "images/ferris.svg");
    }

    #[test]
    fn stylesheet_follows_device_class() {
        let config = PageConfig::default();
        assert_eq!(
            stylesheet_for(DeviceClass::Standard, &config),
            LoadableAsset::stylesheet("styles/desktop.css")
        );
    }

    #[tokio::test]
    async fn empty_set_resolves_without_waiting() {
        let report = settle_all(Vec::<BoxFuture<'static, AssetOutcome>>::new(), future::pending()).await;
        assert_eq!(report, SettleReport::default());
    }

    #[tokio::test]
    async fn failures_count_as_settled() {
        let pending = vec![
            after(5, AssetOutcome::Failed),
            after(1, AssetOutcome::Loaded),
            after(3, AssetOutcome::Failed),
        ];
        let report = settle_all(pending, future::pending()).await;
        assert_eq!(report.total, 3);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.failed, 2);
        assert!(!report.timed_out);
        assert_eq!(report.pending(), 0);
    }

    #[tokio::test]
    async fn stalled_resource_is_cut_off_by_deadline() {
        let started = Instant::now();
        let pending = vec![after(1, AssetOutcome::Loaded), never()];
        let report = settle_all(pending, tokio::time::sleep(Duration::from_millis(50))).await;

        assert!(report.timed_out);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.pending(), 1);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn every_resource_failing_still_resolves() {
        let pending = vec![
            after(0, AssetOutcome::Failed),
            after(0, AssetOutcome::Failed),
        ];
        let report = settle_all(pending, tokio::time::sleep(Duration::from_secs(5))).await;
        assert_eq!(report.failed, 2);
        assert!(!report.timed_out);
    }
}
