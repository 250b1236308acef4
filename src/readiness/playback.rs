//! Play/pause toggle bound to a media element.
//!
//! The element owns the playback state. The controller never keeps a copy:
//! every media or visibility event re-renders the toggle from the element's
//! live state, and the click handler only issues commands.

use futures_util::future::LocalBoxFuture;
use tracing::{debug, info, warn};

use crate::error::PlaybackError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// The audio element as seen by the controller.
pub trait MediaElement {
    /// Live state, read from the element on every call.
    fn state(&self) -> PlaybackState;
    /// Ask for playback. The returned future settles when the platform
    /// accepts or refuses the request.
    fn request_play(&self) -> LocalBoxFuture<'static, Result<(), PlaybackError>>;
    fn pause(&self);
}

/// The toggle control. `set_active` must be idempotent.
pub trait ToggleView {
    fn set_active(&self, active: bool);
}

/// Events that can change (or reveal a change in) playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Started,
    Paused,
    Ended,
    VisibilityRestored,
}

impl MediaEvent {
    /// DOM event names on the media element.
    pub fn from_dom(name: &str) -> Option<Self> {
        match name {
            "play" | "playing" => Some(MediaEvent::Started),
            "pause" => Some(MediaEvent::Paused),
            "ended" => Some(MediaEvent::Ended),
            _ => None,
        }
    }
}

pub struct PlaybackController<M, V> {
    media: M,
    view: V,
}

impl<M: MediaElement, V: ToggleView> PlaybackController<M, V> {
    pub fn new(media: M, view: V) -> Self {
        Self { media, view }
    }

    pub fn state(&self) -> PlaybackState {
        self.media.state()
    }

    /// Only writer of the toggle visual.
    pub fn render(&self) {
        self.view
            .set_active(self.state() == PlaybackState::Playing);
    }

    pub fn handle_event(&self, event: MediaEvent) {
        debug!(?event, state = ?self.state(), "media event");
        self.render();
    }

    /// Toggle command. Pausing is synchronous; playing waits on the platform
    /// and a refusal leaves the element stopped.
    pub async fn handle_click(&self) {
        match self.state() {
            PlaybackState::Playing => self.media.pause(),
            PlaybackState::Stopped => {
                if let Err(err) = self.media.request_play().await {
                    warn!(error = %err, "play request from toggle did not start playback");
                    self.settle_rejection();
                }
            }
        }
    }

    /// Playback not tied to a user gesture. Browsers commonly refuse this.
    pub async fn attempt_autoplay(&self) {
        if self.state() == PlaybackState::Playing {
            return;
        }
        match self.media.request_play().await {
            Ok(()) => info!("autoplay started"),
            Err(err) => {
                info!(error = %err, "autoplay not permitted; waiting for the toggle");
                self.settle_rejection();
            }
        }
    }

    /// A source failure can reject the play promise after the element has
    /// already left the paused state, with no `pause` event to follow. Pause
    /// it so the element's own event brings the toggle back.
    fn settle_rejection(&self) {
        if self.state() == PlaybackState::Playing {
            debug!("element still reports playing after rejection, pausing");
            self.media.pause();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// In-memory media element. `play`/`pause`/`ended` listeners are
    /// modelled by handing events back to the test, which forwards them.
    #[derive(Clone, Default)]
    struct FakeMedia {
        playing: Rc<Cell<bool>>,
        refuse_play: Rc<Cell<bool>>,
        fail_after_start: Rc<Cell<bool>>,
        events: Rc<RefCell<Vec<MediaEvent>>>,
    }

    impl FakeMedia {
        fn finish_track(&self) {
            self.playing.set(false);
            self.events.borrow_mut().push(MediaEvent::Paused);
            self.events.borrow_mut().push(MediaEvent::Ended);
        }

        fn drain(&self) -> Vec<MediaEvent> {
            self.events.borrow_mut().drain(..).collect()
        }
    }

    impl MediaElement for FakeMedia {
        fn state(&self) -> PlaybackState {
            if self.playing.get() {
                PlaybackState::Playing
            } else {
                PlaybackState::Stopped
            }
        }

        fn request_play(&self) -> LocalBoxFuture<'static, Result<(), PlaybackError>> {
            let playing = self.playing.clone();
            let events = self.events.clone();
            let refuse = self.refuse_play.get();
            let fail_after_start = self.fail_after_start.get();
            async move {
                if refuse {
                    return Err(PlaybackError::Rejected("NotAllowedError".to_string()));
                }
                playing.set(true);
                events.borrow_mut().push(MediaEvent::Started);
                if fail_after_start {
                    return Err(PlaybackError::Rejected("NotSupportedError".to_string()));
                }
                Ok(())
            }
            .boxed_local()
        }

        fn pause(&self) {
            if self.playing.replace(false) {
                self.events.borrow_mut().push(MediaEvent::Paused);
            }
        }
    }

    #[derive(Clone, Default)]
    struct FakeToggle {
        active: Rc<Cell<bool>>,
        transitions: Rc<Cell<u32>>,
    }

    impl ToggleView for FakeToggle {
        fn set_active(&self, active: bool) {
            if self.active.replace(active) != active {
                self.transitions.set(self.transitions.get() + 1);
            }
        }
    }

    fn controller() -> (PlaybackController<FakeMedia, FakeToggle>, FakeMedia, FakeToggle) {
        let media = FakeMedia::default();
        let toggle = FakeToggle::default();
        (
            PlaybackController::new(media.clone(), toggle.clone()),
            media,
            toggle,
        )
    }

    fn deliver(controller: &PlaybackController<FakeMedia, FakeToggle>, media: &FakeMedia) {
        for event in media.drain() {
            controller.handle_event(event);
        }
    }

    fn assert_in_sync(media: &FakeMedia, toggle: &FakeToggle) {
        assert_eq!(toggle.active.get(), media.playing.get());
    }

    #[tokio::test]
    async fn click_plays_then_pauses() {
        let (controller, media, toggle) = controller();

        controller.handle_click().await;
        deliver(&controller, &media);
        assert!(toggle.active.get());
        assert_eq!(controller.state(), PlaybackState::Playing);

        controller.handle_click().await;
        deliver(&controller, &media);
        assert!(!toggle.active.get());
        assert_in_sync(&media, &toggle);
    }

    #[tokio::test]
    async fn click_never_writes_the_visual_itself() {
        let (controller, _media, toggle) = controller();

        controller.handle_click().await;

        // No event delivered yet, so the visual is untouched.
        assert!(!toggle.active.get());
        assert_eq!(toggle.transitions.get(), 0);
    }

    #[tokio::test]
    async fn rejected_play_leaves_toggle_inactive() {
        let (controller, media, toggle) = controller();
        media.refuse_play.set(true);

        controller.handle_click().await;
        deliver(&controller, &media);

        assert!(!toggle.active.get());
        assert_eq!(toggle.transitions.get(), 0);
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[tokio::test]
    async fn source_failure_after_start_returns_to_stopped() {
        let (controller, media, toggle) = controller();
        media.fail_after_start.set(true);

        controller.handle_click().await;
        deliver(&controller, &media);
        controller.handle_event(MediaEvent::VisibilityRestored);

        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert!(!toggle.active.get());
        assert_in_sync(&media, &toggle);
    }

    #[tokio::test]
    async fn autoplay_failure_after_start_returns_to_stopped() {
        let (controller, media, toggle) = controller();
        media.fail_after_start.set(true);

        controller.attempt_autoplay().await;
        deliver(&controller, &media);

        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert!(!toggle.active.get());
    }

    #[tokio::test]
    async fn natural_end_deactivates_once() {
        let (controller, media, toggle) = controller();
        controller.handle_click().await;
        deliver(&controller, &media);
        assert_eq!(toggle.transitions.get(), 1);

        media.finish_track();
        deliver(&controller, &media);

        assert!(!toggle.active.get());
        assert_eq!(toggle.transitions.get(), 2);
    }

    #[tokio::test]
    async fn autoplay_refusal_is_swallowed() {
        let (controller, media, toggle) = controller();
        media.refuse_play.set(true);

        controller.attempt_autoplay().await;
        controller.render();

        assert!(!toggle.active.get());

        media.refuse_play.set(false);
        controller.attempt_autoplay().await;
        deliver(&controller, &media);
        assert!(toggle.active.get());
    }

    #[tokio::test]
    async fn visibility_restore_resyncs_after_missed_event() {
        let (controller, media, toggle) = controller();
        controller.handle_click().await;
        deliver(&controller, &media);

        // Playback stopped while hidden and the pause event was lost.
        media.playing.set(false);
        media.drain();
        assert!(toggle.active.get());

        controller.handle_event(MediaEvent::VisibilityRestored);
        assert_in_sync(&media, &toggle);
    }

    #[tokio::test]
    async fn mixed_sequences_keep_toggle_in_sync() {
        let (controller, media, toggle) = controller();

        for round in 0..6u32 {
            media.refuse_play.set(round % 3 == 1);
            controller.handle_click().await;
            deliver(&controller, &media);
            assert_in_sync(&media, &toggle);

            if round % 2 == 0 && media.playing.get() {
                media.finish_track();
                deliver(&controller, &media);
                assert_in_sync(&media, &toggle);
            }

            controller.handle_event(MediaEvent::VisibilityRestored);
            assert_in_sync(&media, &toggle);
        }
    }

    #[test]
    fn dom_event_names_map_to_media_events() {
        assert_eq!(MediaEvent::from_dom("playing"), Some(MediaEvent::Started));
        assert_eq!(MediaEvent::from_dom("pause"), Some(MediaEvent::Paused));
        assert_eq!(MediaEvent::from_dom("ended"), Some(MediaEvent::Ended));
        assert_eq!(MediaEvent::from_dom("timeupdate"), None);
    }

    #[test]
    fn request_play_future_resolves_immediately_for_fake() {
        let media = FakeMedia::default();
        assert_eq!(media.request_play().now_or_never(), Some(Ok(())));
    }
}
