// Audio element and toggle bindings for the playback controller.
use std::rc::Rc;

use futures_util::future::{self, FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, HtmlAudioElement};

use crate::config::PageConfig;
use crate::error::{js_error_text, PageError, PlaybackError};
use crate::readiness::{MediaElement, MediaEvent, PlaybackController, PlaybackState, ToggleView};

pub struct WebAudio(HtmlAudioElement);

impl MediaElement for WebAudio {
    fn state(&self) -> PlaybackState {
        if !self.0.paused() && !self.0.ended() {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        }
    }

    fn request_play(&self) -> LocalBoxFuture<'static, Result<(), PlaybackError>> {
        match self.0.play() {
            Ok(promise) => async move {
                JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|err| PlaybackError::Rejected(js_error_text(&err)))
            }
            .boxed_local(),
            Err(err) => future::ready(Err(PlaybackError::Unavailable(js_error_text(&err)))).boxed_local(),
        }
    }

    fn pause(&self) {
        if let Err(err) = self.0.pause() {
            warn!(error = %js_error_text(&err), "pause failed");
        }
    }
}

pub struct WebToggle {
    element: Element,
    active_class: String,
}

impl ToggleView for WebToggle {
    fn set_active(&self, active: bool) {
        if let Err(err) = self
            .element
            .class_list()
            .toggle_with_force(&self.active_class, active)
        {
            warn!(error = %js_error_text(&err), "could not update toggle class");
        }
    }
}

type WebController = PlaybackController<WebAudio, WebToggle>;

fn find_element(document: &Document, id: &str) -> Result<Element, PageError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement(id.to_string()))
}

/// Binds the toggle to the audio element. Missing elements return an error
/// and nothing is wired.
pub fn setup_playback(document: &Document, config: &PageConfig) -> Result<(), PageError> {
    let ids = &config.elements;
    let audio: HtmlAudioElement = find_element(document, &ids.audio)?
        .dyn_into()
        .map_err(|_| PageError::Dom(format!("#{} is not an <audio> element", ids.audio)))?;
    let toggle = find_element(document, &ids.toggle)?;

    let controller: Rc<WebController> = Rc::new(PlaybackController::new(
        WebAudio(audio.clone()),
        WebToggle {
            element: toggle.clone(),
            active_class: config.classes.playing.clone(),
        },
    ));

    for name in ["play", "playing", "pause", "ended"] {
        let Some(event) = MediaEvent::from_dom(name) else {
            continue;
        };
        let controller = controller.clone();
        let callback =
            Closure::wrap(Box::new(move || controller.handle_event(event)) as Box<dyn FnMut()>);
        audio.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())?;
        callback.forget();
    }

    {
        let controller = controller.clone();
        let click_cb = Closure::wrap(Box::new(move || {
            let controller = controller.clone();
            spawn_local(async move { controller.handle_click().await });
        }) as Box<dyn FnMut()>);
        toggle.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())?;
        click_cb.forget();
    }

    {
        let controller = controller.clone();
        let doc = document.clone();
        let visibility_cb = Closure::wrap(Box::new(move || {
            if !doc.hidden() {
                controller.handle_event(MediaEvent::VisibilityRestored);
            }
        }) as Box<dyn FnMut()>);
        document.add_event_listener_with_callback(
            "visibilitychange",
            visibility_cb.as_ref().unchecked_ref(),
        )?;
        visibility_cb.forget();
    }

    controller.render();

    if config.autoplay {
        let delay = config.timing.autoplay_delay_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            controller.attempt_autoplay().await;
        });
    }

    Ok(())
}
