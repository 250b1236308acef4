// Device stylesheet installation; settlement logic lives in the core.
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, HtmlLinkElement};

use crate::error::PageError;
use crate::readiness::{stylesheet_settlement, AssetOutcome, StylesheetLink};

/// `sheet` is set once the browser has parsed and applied the stylesheet. A
/// cached sheet can get there before any listener is attached, in which case
/// no `load` event is ever delivered to us.
impl StylesheetLink for HtmlLinkElement {
    fn is_applied(&self) -> bool {
        self.sheet().is_some()
    }
}

fn find_stylesheet(document: &Document, href: &str) -> Option<HtmlLinkElement> {
    let links = document.query_selector_all("link[rel~='stylesheet']").ok()?;
    (0..links.length())
        .filter_map(|index| links.item(index))
        .filter_map(|node| node.dyn_into::<HtmlLinkElement>().ok())
        .find(|link| link.get_attribute("href").as_deref() == Some(href) || link.href().ends_with(href))
}

fn remove_placeholder(document: &Document, placeholder_id: &str, keep: &HtmlLinkElement) {
    let Some(placeholder) = document.get_element_by_id(placeholder_id) else {
        return;
    };
    let keep: &web_sys::Element = keep.as_ref();
    if &placeholder != keep {
        placeholder.remove();
    }
}

/// Installs (or reuses) the link for `href` and returns a future that
/// settles on load, error, or immediately if the sheet is already applied.
/// Listeners are attached before the link is appended and before the
/// direct check, so no outcome can slip between them.
pub fn load_stylesheet(
    document: &Document,
    href: &str,
    placeholder_id: &str,
) -> Result<LocalBoxFuture<'static, AssetOutcome>, PageError> {
    let (link, is_new) = match find_stylesheet(document, href) {
        Some(existing) => (existing, false),
        None => {
            let link: HtmlLinkElement = document
                .create_element("link")?
                .dyn_into()
                .map_err(|_| PageError::Dom("created element is not a <link>".to_string()))?;
            link.set_rel("stylesheet");
            link.set_href(href);
            (link, true)
        }
    };

    let (reporter, settled) = stylesheet_settlement();

    let on_load = {
        let reporter = reporter.clone();
        Closure::wrap(Box::new(move || {
            reporter.report(AssetOutcome::Loaded);
        }) as Box<dyn FnMut()>)
    };
    let on_error = {
        let reporter = reporter.clone();
        let href = href.to_string();
        Closure::wrap(Box::new(move || {
            warn!(%href, "stylesheet failed to load, continuing without it");
            reporter.report(AssetOutcome::Failed);
        }) as Box<dyn FnMut()>)
    };
    link.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    link.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
    on_load.forget();
    on_error.forget();

    if is_new {
        let head = document
            .head()
            .ok_or_else(|| PageError::MissingElement("head".to_string()))?;
        head.append_child(&link)?;
    } else {
        debug!(href, "reusing stylesheet link already in the document");
    }
    remove_placeholder(document, placeholder_id, &link);

    reporter.check_applied(&link);

    Ok(settled)
}
