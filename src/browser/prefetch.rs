// Asset loading: device stylesheet plus the image prefetch set, bounded by
// the settle timeout.
use futures_util::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlImageElement};

use super::stylesheet::load_stylesheet;
use crate::error::js_error_text;
use crate::readiness::{
    prefetch_list, settle_all, stylesheet_for, AssetOutcome, LoadableAsset, PageSession,
    SettleReport,
};

/// Sources of every image currently inside the toggle control.
pub fn toggle_image_sources(document: &Document, toggle_id: &str) -> Vec<String> {
    let Some(toggle) = document.get_element_by_id(toggle_id) else {
        debug!(toggle_id, "no toggle control, prefetching background only");
        return Vec::new();
    };
    let Ok(images) = toggle.query_selector_all("img") else {
        return Vec::new();
    };
    (0..images.length())
        .filter_map(|index| images.item(index))
        .filter_map(|node| node.dyn_into::<HtmlImageElement>().ok())
        .map(|image| image.src())
        .collect()
}

async fn image_settled(asset: LoadableAsset) -> AssetOutcome {
    let LoadableAsset { url, kind } = asset;
    let image = match HtmlImageElement::new() {
        Ok(image) => image,
        Err(err) => {
            warn!(%url, ?kind, error = %js_error_text(&err), "could not create image for prefetch");
            return AssetOutcome::Failed;
        }
    };
    image.set_src(&url);
    // decode() resolves once the image is loaded and rejects on load error.
    match JsFuture::from(image.decode()).await {
        Ok(_) => AssetOutcome::Loaded,
        Err(err) => {
            warn!(%url, ?kind, error = %js_error_text(&err), "asset failed to prefetch");
            AssetOutcome::Failed
        }
    }
}

/// Resolves once the stylesheet and every prefetch image have settled, or
/// when the settle timeout elapses.
pub async fn load_assets(document: &Document, session: &PageSession) -> SettleReport {
    let config = session.config();
    let class = session.device_class();
    let mut pending: Vec<LocalBoxFuture<'static, AssetOutcome>> = Vec::new();

    let stylesheet = stylesheet_for(class, config);
    match load_stylesheet(document, &stylesheet.url, &config.elements.placeholder_stylesheet) {
        Ok(settled) => pending.push(settled),
        Err(err) => warn!(
            href = %stylesheet.url,
            kind = ?stylesheet.kind,
            error = %err,
            "asset not installed"
        ),
    }

    let images = prefetch_list(
        toggle_image_sources(document, &config.elements.toggle),
        class,
        config,
    );
    pending.extend(
        images
            .into_iter()
            .map(|asset| image_settled(asset).boxed_local()),
    );

    let report = settle_all(pending, TimeoutFuture::new(config.timing.settle_timeout_ms)).await;
    if report.timed_out {
        warn!(
            pending = report.pending(),
            total = report.total,
            "asset settle timeout reached, continuing"
        );
    } else {
        info!(
            loaded = report.loaded,
            failed = report.failed,
            class = class.label(),
            "assets settled"
        );
    }
    report
}
