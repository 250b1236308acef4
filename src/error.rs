use thiserror::Error;

/// Failures while wiring the page. None of these are fatal to rendering.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("required element `{0}` is not in the document")]
    MissingElement(String),
    #[error("dom call failed: {0}")]
    Dom(String),
    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),
}

/// A play request that did not result in playback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The platform refused the request (autoplay policy, interrupted load).
    #[error("play request rejected: {0}")]
    Rejected(String),
    /// The element could not even issue the request.
    #[error("playback unavailable: {0}")]
    Unavailable(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PageError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PageError::Dom(js_error_text(&value))
    }
}

/// Best-effort text for a thrown JS value.
#[cfg(target_arch = "wasm32")]
pub fn js_error_text(value: &wasm_bindgen::JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &"message".into())
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
