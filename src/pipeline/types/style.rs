use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn string_map(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Design-wide tokens. These are fixed defaults, not measured from the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStyleTokens {
    pub borders: IndexMap<String, String>,
    pub shadows: IndexMap<String, String>,
    pub border_radius: IndexMap<String, String>,
    pub breakpoints: Option<IndexMap<String, String>>,
    pub css_variables: Option<IndexMap<String, String>>,
}

impl Default for GlobalStyleTokens {
    fn default() -> Self {
        Self {
            borders: string_map(&[
                ("default", "1px solid #e0e0e0"),
                ("focus", "2px solid #2196f3"),
            ]),
            shadows: string_map(&[
                ("card", "0 2px 4px rgba(0,0,0,0.1)"),
                ("button", "0 1px 2px rgba(0,0,0,0.1)"),
            ]),
            border_radius: string_map(&[("small", "4px"), ("medium", "8px"), ("large", "12px")]),
            breakpoints: Some(string_map(&[
                ("mobile", "768px"),
                ("tablet", "1024px"),
                ("desktop", "1200px"),
            ])),
            css_variables: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleGuide {
    pub primary_colors: Vec<String>,
    pub secondary_colors: Vec<String>,
    pub font_stack: Vec<String>,
    pub spacing_scale: Vec<String>,
    pub design_tokens: IndexMap<String, String>,
}
