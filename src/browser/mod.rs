//! Browser side of the readiness sequence: reads the page, drives the
//! loader, and wires DOM events into the core.
#[cfg(target_arch = "wasm32")]
mod media;
#[cfg(target_arch = "wasm32")]
mod prefetch;
#[cfg(target_arch = "wasm32")]
mod stylesheet;

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use gloo_timers::future::TimeoutFuture;
#[cfg(target_arch = "wasm32")]
use tracing::{debug, info, warn};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Window};

use crate::config::PageConfig;
#[cfg(target_arch = "wasm32")]
use crate::config::{DeviceRules, CONFIG_SCRIPT_ID};
use crate::error::PageError;
#[cfg(target_arch = "wasm32")]
use crate::error::js_error_text;
#[cfg(target_arch = "wasm32")]
use crate::readiness::{classify, DeviceClass, PageSession, ReadySource};

#[cfg(target_arch = "wasm32")]
fn current_device_class(window: &Window, rules: &DeviceRules) -> DeviceClass {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::INFINITY);
    let agent = window.navigator().user_agent().unwrap_or_default();
    classify(width, &agent, rules)
}

/// Page config with any inline JSON overrides applied. The shell renders
/// its elements from the same value the session binds to.
#[cfg(target_arch = "wasm32")]
pub fn page_config() -> PageConfig {
    let inline = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_SCRIPT_ID))
        .and_then(|script| script.text_content());
    PageConfig::from_json_or_default(inline.as_deref())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_config() -> PageConfig {
    PageConfig::default()
}

/// Adds the ready class to the page root. Never removed afterwards.
#[cfg(target_arch = "wasm32")]
fn mark_ready(document: &Document, class: &str) -> Result<(), PageError> {
    let root = match document.body() {
        Some(body) => body.unchecked_into::<web_sys::Element>(),
        None => document
            .document_element()
            .ok_or_else(|| PageError::MissingElement("html".to_string()))?,
    };
    root.class_list().add_1(class)?;
    Ok(())
}

/// Animation delay, ready class, then the playback toggle.
#[cfg(target_arch = "wasm32")]
fn run_ready_sequence(document: Document, session: Rc<PageSession>) {
    spawn_local(async move {
        let config = session.config();
        TimeoutFuture::new(config.timing.animation_delay_ms).await;
        if let Err(err) = mark_ready(&document, &config.classes.ready) {
            warn!(error = %err, "could not apply ready class");
        }
        if let Err(err) = media::setup_playback(&document, config) {
            debug!(error = %err, "music toggle disabled");
        }
    });
}

#[cfg(target_arch = "wasm32")]
fn watch_viewport(window: &Window, session: Rc<PageSession>) -> Result<(), PageError> {
    let win = window.clone();
    let resize_cb = Closure::wrap(Box::new(move || {
        let current = current_device_class(&win, &session.config().device);
        session.viewport().observe(current, || {
            if let Err(err) = win.location().reload() {
                warn!(error = %js_error_text(&err), "reload failed");
            }
        });
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;
    resize_cb.forget();
    Ok(())
}

/// Boots the page session: classify once, start loading, arm the fallback,
/// and watch for class-changing resizes.
#[cfg(target_arch = "wasm32")]
pub fn start_page_session(config: PageConfig) -> Result<(), PageError> {
    let window = web_sys::window().ok_or_else(|| PageError::MissingElement("window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| PageError::MissingElement("document".to_string()))?;

    let class = current_device_class(&window, &config.device);
    let session = Rc::new(PageSession::new(config, class));
    info!(class = class.label(), "page session started");

    {
        let session = session.clone();
        let document = document.clone();
        spawn_local(async move {
            prefetch::load_assets(&document, &session).await;
            session.begin_ready(ReadySource::AssetsSettled, || {
                run_ready_sequence(document.clone(), session.clone())
            });
        });
    }

    {
        let session = session.clone();
        let document = document.clone();
        spawn_local(async move {
            TimeoutFuture::new(session.config().timing.fallback_ms).await;
            if !session.is_initialized() {
                warn!("asset loader never reported, starting ready sequence from fallback");
            }
            session.begin_ready(ReadySource::Fallback, || {
                run_ready_sequence(document.clone(), session.clone())
            });
        });
    }

    watch_viewport(&window, session)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn start_page_session(_config: PageConfig) -> Result<(), PageError> {
    tracing::debug!("page readiness runs in the browser only; skipping");
    Ok(())
}
