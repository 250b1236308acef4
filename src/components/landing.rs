use crate::components::MusicToggle;
use crate::readiness::OnceGate;
use dioxus::prelude::*;

/// Landing page shell. Once mounted, hands the DOM over to the readiness
/// sequence, which loads the device stylesheet and reveals the page.
#[component]
pub fn LandingPage() -> Element {
    let config = use_hook(crate::browser::page_config);
    let booted = use_hook(OnceGate::new);

    {
        let config = config.clone();
        use_effect(move || {
            booted.run_once(|| {
                if let Err(err) = crate::browser::start_page_session(config.clone()) {
                    tracing::warn!(error = %err, "page readiness could not start");
                }
            });
        });
    }

    rsx! {
        main { class: "hero",
            div { class: "hero-backdrop" }
            section { class: "hero-content",
                h1 { class: "hero-title", "Hello, Rustacean" }
                p { class: "hero-tagline", "Fearless concurrency, one crab at a time." }
            }
            MusicToggle { ids: config.elements.clone() }
        }
    }
}
