use indexmap::{IndexMap, IndexSet};

use crate::pipeline::types::{ColorSample, StyleGuide, TypographyRecord};

const PRIMARY_FALLBACK: &str = "#2196f3";
const SECONDARY_FALLBACK: &str = "#757575";
const SPACING_SCALE: [&str; 8] = ["4px", "8px", "12px", "16px", "24px", "32px", "48px", "64px"];

/// Palette, font stack and tokens derived from the extracted colors and
/// typography. `colors` is expected in descending confidence order.
pub fn synthesize_style_guide(
    colors: &[ColorSample],
    typography: &[TypographyRecord],
    primary_min_confidence: f64,
) -> StyleGuide {
    let primary_colors: Vec<String> = colors
        .iter()
        .take(3)
        .filter(|color| color.confidence > primary_min_confidence)
        .map(|color| color.hex_code.clone())
        .collect();
    let secondary_colors: Vec<String> = colors
        .iter()
        .skip(3)
        .take(3)
        .map(|color| color.hex_code.clone())
        .collect();

    let families: IndexSet<&str> = typography
        .iter()
        .map(|record| record.font_family.as_str())
        .collect();
    let font_stack = families.into_iter().take(3).map(str::to_string).collect();

    let mut design_tokens = IndexMap::new();
    design_tokens.insert(
        "primary".to_string(),
        primary_colors
            .first()
            .cloned()
            .unwrap_or_else(|| PRIMARY_FALLBACK.to_string()),
    );
    design_tokens.insert(
        "secondary".to_string(),
        secondary_colors
            .first()
            .cloned()
            .unwrap_or_else(|| SECONDARY_FALLBACK.to_string()),
    );
    design_tokens.insert("base_font_size".to_string(), "16px".to_string());
    design_tokens.insert("line_height".to_string(), "1.5".to_string());

    StyleGuide {
        primary_colors,
        secondary_colors,
        font_stack,
        spacing_scale: SPACING_SCALE.iter().map(|s| s.to_string()).collect(),
        design_tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::{FontWeight, TextBounds, TextRole, UsageContext};

    fn color(rgb: (u8, u8, u8), confidence: f64) -> ColorSample {
        ColorSample::new(rgb, UsageContext::UiElement, confidence)
    }

    fn text(family: &str) -> TypographyRecord {
        TypographyRecord {
            font_family: family.to_string(),
            font_size: 16,
            font_weight: FontWeight::Normal,
            text_role: TextRole::Body,
            color: "#000000".to_string(),
            text_content: "hello".to_string(),
            alignment: "left".to_string(),
            line_height: 22,
            bounds: TextBounds {
                left: 0,
                top: 0,
                width: 10,
                height: 10,
            },
        }
    }

    #[test]
    fn splits_palette_and_dedupes_fonts() {
        let colors = vec![
            color((255, 255, 255), 0.4),
            color((33, 150, 243), 0.2),
            color((0, 0, 0), 0.08),
            color((1, 1, 1), 0.07),
            color((2, 2, 2), 0.06),
        ];
        let typography = vec![text("Inter"), text("Inter"), text("Roboto"), text("Lato"), text("Mono")];
        let guide = synthesize_style_guide(&colors, &typography, 0.1);

        assert_eq!(guide.primary_colors, vec!["#ffffff", "#2196f3"]);
        assert_eq!(guide.secondary_colors, vec!["#010101", "#020202"]);
        assert_eq!(guide.font_stack, vec!["Inter", "Roboto", "Lato"]);
        assert_eq!(guide.design_tokens["primary"], "#ffffff");
        assert_eq!(guide.design_tokens["secondary"], "#010101");
        assert_eq!(guide.spacing_scale.len(), 8);
    }

    #[test]
    fn empty_inputs_fall_back_to_default_tokens() {
        let guide = synthesize_style_guide(&[], &[], 0.1);
        assert!(guide.primary_colors.is_empty());
        assert!(guide.font_stack.is_empty());
        assert_eq!(guide.design_tokens["primary"], "#2196f3");
        assert_eq!(guide.design_tokens["secondary"], "#757575");
        assert_eq!(guide.design_tokens["base_font_size"], "16px");
    }
}
