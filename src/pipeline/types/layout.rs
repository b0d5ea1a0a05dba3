use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Flexbox,
    Grid,
    Block,
    Inline,
    Absolute,
    Relative,
}

impl LayoutKind {
    pub fn label(&self) -> &'static str {
        match self {
            LayoutKind::Flexbox => "flexbox",
            LayoutKind::Grid => "grid",
            LayoutKind::Block => "block",
            LayoutKind::Inline => "inline",
            LayoutKind::Absolute => "absolute",
            LayoutKind::Relative => "relative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    pub layout_type: LayoutKind,
    pub grid_structure: Option<String>,
    pub spacing: IndexMap<String, String>,
    pub alignment: String,
    pub responsive_hints: Option<Vec<String>>,
}

impl LayoutDescriptor {
    /// Descriptor used when layout analysis could not run.
    pub fn unknown() -> Self {
        let spacing = ["padding", "margin", "gap"]
            .into_iter()
            .map(|key| (key.to_string(), "unknown".to_string()))
            .collect();

        Self {
            layout_type: LayoutKind::Flexbox,
            grid_structure: None,
            spacing,
            alignment: "unknown".to_string(),
            responsive_hints: None,
        }
    }
}
