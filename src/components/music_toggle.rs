use crate::config::ElementIds;
use dioxus::prelude::*;

/// Play/pause control and the audio element it drives. Ids come from the
/// page config so the playback controller finds what was rendered. Visual
/// state is managed by the playback controller, not by this component.
#[component]
pub fn MusicToggle(
    ids: ElementIds,
    #[props(default = "audio/background.wav".to_string())] src: String,
    #[props(default = "images/music-off.svg".to_string())] play_icon: String,
    #[props(default = "images/music-on.svg".to_string())] pause_icon: String,
    #[props(default = true)] looping: bool,
) -> Element {
    rsx! {
        button {
            id: "{ids.toggle}",
            class: "music-toggle",
            r#type: "button",
            title: "Toggle music",
            img { class: "music-icon music-icon-play", src: "{play_icon}", alt: "" }
            img { class: "music-icon music-icon-pause", src: "{pause_icon}", alt: "" }
        }
        audio {
            id: "{ids.audio}",
            src: "{src}",
            preload: "auto",
            r#loop: looping,
        }
    }
}
