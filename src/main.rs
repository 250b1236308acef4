#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
use dioxus::prelude::*;

mod browser;
mod components;
mod config;
mod diagnostics;
mod error;
mod readiness;

use components::LandingPage;

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Meta { name: "theme-color", content: "#a38449" }
        document::Title { "Ferris" }

        // Device stylesheet and ready class are applied by the readiness
        // sequence, not here.
        LandingPage {}
    }
}
