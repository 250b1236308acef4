use crate::config::DeviceRules;

/// Coarse layout category; selects which stylesheet and background load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Compact,
    Standard,
}

impl DeviceClass {
    pub fn label(self) -> &'static str {
        match self {
            DeviceClass::Compact => "compact",
            DeviceClass::Standard => "standard",
        }
    }
}

/// Compact when the agent names a handheld device or the viewport is narrow.
pub fn classify(viewport_width: f64, user_agent: &str, rules: &DeviceRules) -> DeviceClass {
    let agent = user_agent.to_ascii_lowercase();
    let handheld = rules
        .mobile_agent_tokens
        .iter()
        .any(|token| agent.contains(&token.to_ascii_lowercase()));

    if handheld || viewport_width <= rules.compact_max_width {
        DeviceClass::Compact
    } else {
        DeviceClass::Standard
    }
}
