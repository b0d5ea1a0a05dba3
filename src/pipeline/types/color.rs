use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageContext {
    Background,
    Text,
    #[serde(rename = "Primary/Accent")]
    PrimaryAccent,
    #[serde(rename = "Border/Divider")]
    BorderDivider,
    #[serde(rename = "UI Element")]
    UiElement,
}

impl UsageContext {
    pub fn label(&self) -> &'static str {
        match self {
            UsageContext::Background => "Background",
            UsageContext::Text => "Text",
            UsageContext::PrimaryAccent => "Primary/Accent",
            UsageContext::BorderDivider => "Border/Divider",
            UsageContext::UiElement => "UI Element",
        }
    }
}

/// One dominant color cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    pub hex_code: String,
    pub rgb: (u8, u8, u8),
    pub usage_context: UsageContext,
    pub element_type: String,
    /// Share of image pixels that belong to this cluster.
    pub confidence: f64,
}

impl ColorSample {
    pub fn new(rgb: (u8, u8, u8), usage_context: UsageContext, confidence: f64) -> Self {
        Self {
            hex_code: hex_code(rgb),
            rgb,
            usage_context,
            element_type: "detected".to_string(),
            confidence,
        }
    }
}

pub fn hex_code((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_code_is_lowercase_and_padded() {
        assert_eq!(hex_code((33, 150, 243)), "#2196f3");
        assert_eq!(hex_code((0, 5, 10)), "#00050a");
    }

    #[test]
    fn usage_context_serializes_with_display_labels() {
        let json = serde_json::to_string(&UsageContext::PrimaryAccent).unwrap();
        assert_eq!(json, "\"Primary/Accent\"");
        assert_eq!(UsageContext::UiElement.label(), "UI Element");
    }
}
