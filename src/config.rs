//! Page configuration: asset manifest, classification rules, timings and the
//! element/class names the orchestrator binds to.

use serde::{Deserialize, Serialize};

use crate::error::PageError;
use crate::readiness::DeviceClass;

/// Id of the optional inline JSON block carrying config overrides.
pub const CONFIG_SCRIPT_ID: &str = "page-readiness-config";

/// One asset path per device class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceAssets {
    pub compact: String,
    pub standard: String,
}

impl DeviceAssets {
    pub fn select(&self, class: DeviceClass) -> &str {
        match class {
            DeviceClass::Compact => &self.compact,
            DeviceClass::Standard => &self.standard,
        }
    }
}

/// Heuristics used by the device classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceRules {
    pub compact_max_width: f64,
    pub mobile_agent_tokens: Vec<String>,
}

impl Default for DeviceRules {
    fn default() -> Self {
        Self {
            compact_max_width: 768.0,
            mobile_agent_tokens: ["Mobi", "Android", "iPhone", "iPad", "iPod"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Delays and bounds, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Upper bound on waiting for the stylesheet and prefetch set to settle.
    pub settle_timeout_ms: u32,
    /// Direct fallback that fires the ready sequence if loading never reports.
    pub fallback_ms: u32,
    pub animation_delay_ms: u32,
    pub autoplay_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_timeout_ms: 4_000,
            fallback_ms: 6_000,
            animation_delay_ms: 100,
            autoplay_delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub placeholder_stylesheet: String,
    /// The toggle control; every `img` inside it is prefetched.
    pub toggle: String,
    pub audio: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            placeholder_stylesheet: "theme-css".to_string(),
            toggle: "music-toggle".to_string(),
            audio: "music-player".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub ready: String,
    pub playing: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            ready: "loaded".to_string(),
            playing: "playing".to_string(),
        }
    }
}

/// Everything the readiness sequence needs to know about the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub stylesheets: DeviceAssets,
    pub backgrounds: DeviceAssets,
    pub device: DeviceRules,
    pub timing: Timing,
    pub elements: ElementIds,
    pub classes: ClassNames,
    pub autoplay: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            stylesheets: DeviceAssets {
                compact: "styles/mobile.css".to_string(),
                standard: "styles/desktop.css".to_string(),
            },
            backgrounds: DeviceAssets {
                compact: "images/ferris-phone.svg".to_string(),
                standard: "images/ferris.svg".to_string(),
            },
            device: DeviceRules::default(),
            timing: Timing::default(),
            elements: ElementIds::default(),
            classes: ClassNames::default(),
            autoplay: true,
        }
    }
}

impl PageConfig {
    /// Parse overrides; anything omitted keeps its default.
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Like [`PageConfig::from_json`], but a malformed block falls back to
    /// the defaults instead of failing the page.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed page config, using defaults");
                Self::default()
            }
        }
    }
}
