use std::fmt::Write;

use crate::pipeline::types::{AnalysisResult, ColorSample, UsageContext};

/// How hard a faithful recreation is likely to be, from the overall confidence.
pub fn recreation_difficulty(confidence: f64) -> &'static str {
    if confidence > 0.8 {
        "high"
    } else if confidence > 0.6 {
        "medium"
    } else {
        "challenging"
    }
}

/// Render an analysis as a markdown recreation brief.
pub fn render_markdown(result: &AnalysisResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, result);
    out
}

fn write_report(out: &mut String, result: &AnalysisResult) -> std::fmt::Result {
    let info = &result.image_info;
    writeln!(out, "# Recreation brief: {}", info.filename)?;
    writeln!(out)?;
    writeln!(out, "- Dimensions: {} x {} px ({}, {} channels)", info.width, info.height, info.format, info.channels)?;
    writeln!(out, "- Layout system: {}", result.layout.layout_type.label())?;
    writeln!(out, "- Colors: {}", result.colors.len())?;
    writeln!(out, "- Text elements: {}", result.typography.len())?;
    writeln!(out, "- Interactive elements: {}", result.interactive_elements.len())?;
    writeln!(out, "- Assets: {}", result.assets.len())?;
    writeln!(
        out,
        "- Confidence: {:.0}% (difficulty: {})",
        result.confidence_score * 100.0,
        recreation_difficulty(result.confidence_score)
    )?;
    writeln!(out, "- Processing time: {:.2}s", result.processing_time)?;

    if !result.warnings.is_empty() {
        writeln!(out, "\n## Warnings\n")?;
        for warning in &result.warnings {
            writeln!(out, "- {warning}")?;
        }
    }

    let layout = &result.layout;
    writeln!(out, "\n## Layout\n")?;
    writeln!(out, "- Type: `{}`", layout.layout_type.label())?;
    writeln!(
        out,
        "- Grid structure: {}",
        layout.grid_structure.as_deref().unwrap_or("Single column detected")
    )?;
    writeln!(out, "- Alignment: {}", layout.alignment)?;
    for (key, value) in &layout.spacing {
        writeln!(out, "- {key}: {value}")?;
    }
    if let Some(hints) = &layout.responsive_hints {
        writeln!(out, "- Responsive: {}", hints.join(", "))?;
    }

    writeln!(out, "\n## Colors\n")?;
    if result.colors.is_empty() {
        writeln!(out, "No color data detected.")?;
    } else {
        for context in [
            UsageContext::Background,
            UsageContext::Text,
            UsageContext::PrimaryAccent,
            UsageContext::BorderDivider,
            UsageContext::UiElement,
        ] {
            let group: Vec<&ColorSample> = result
                .colors
                .iter()
                .filter(|color| color.usage_context == context)
                .collect();
            if group.is_empty() {
                continue;
            }
            writeln!(out, "### {}\n", context.label())?;
            for color in group {
                let (r, g, b) = color.rgb;
                writeln!(
                    out,
                    "- `{}` rgb({r}, {g}, {b}), {:.1}% of pixels",
                    color.hex_code,
                    color.confidence * 100.0
                )?;
            }
            writeln!(out)?;
        }

        writeln!(out, "```css\n:root {{")?;
        for (index, color) in result.colors.iter().enumerate() {
            writeln!(out, "  --color-{}: {};", index + 1, color.hex_code)?;
        }
        writeln!(out, "}}\n```")?;
    }

    writeln!(out, "\n## Typography\n")?;
    if result.typography.is_empty() {
        writeln!(out, "No text detected.")?;
    } else {
        writeln!(out, "| Text | Role | Size | Weight | Color | Position |")?;
        writeln!(out, "|---|---|---|---|---|---|")?;
        for record in &result.typography {
            writeln!(
                out,
                "| {} | {} | {}px / {}px | {} | `{}` | ({}, {}) |",
                record.text_content.replace('|', "\\|"),
                record.text_role.label(),
                record.font_size,
                record.line_height,
                record.font_weight.label(),
                record.color,
                record.bounds.left,
                record.bounds.top
            )?;
        }
    }

    writeln!(out, "\n## Components\n")?;
    if result.interactive_elements.is_empty() {
        writeln!(out, "No interactive elements detected.")?;
    } else {
        for (index, element) in result.interactive_elements.iter().enumerate() {
            let label = result
                .component_labels
                .get(&format!("element_{index}"))
                .map(String::as_str)
                .unwrap_or("Component");
            let background = element
                .styling
                .get("background_color")
                .map(String::as_str)
                .unwrap_or("unknown");
            writeln!(
                out,
                "- {label}: {}x{} at ({}, {}), background `{background}`",
                element.dimensions.width,
                element.dimensions.height,
                element.position.x,
                element.position.y
            )?;
        }
    }

    if !result.assets.is_empty() {
        writeln!(out, "\n## Assets\n")?;
        for asset in &result.assets {
            writeln!(
                out,
                "- {}: {}x{} at ({}, {})",
                asset.alt_text_intent.as_deref().unwrap_or("Asset"),
                asset.dimensions.width,
                asset.dimensions.height,
                asset.position.x,
                asset.position.y
            )?;
        }
    }

    let guide = &result.style_guide;
    writeln!(out, "\n## Style guide\n")?;
    writeln!(out, "- Primary colors: {}", join_or_none(&guide.primary_colors))?;
    writeln!(out, "- Secondary colors: {}", join_or_none(&guide.secondary_colors))?;
    writeln!(out, "- Font stack: {}", join_or_none(&guide.font_stack))?;
    writeln!(out, "- Spacing scale: {}", guide.spacing_scale.join(", "))?;
    for (token, value) in &guide.design_tokens {
        writeln!(out, "- Token `{token}`: {value}")?;
    }

    let styles = &result.global_styles;
    writeln!(out, "\n```css")?;
    for (name, value) in &styles.borders {
        writeln!(out, "--border-{name}: {value};")?;
    }
    for (name, value) in &styles.shadows {
        writeln!(out, "--shadow-{name}: {value};")?;
    }
    for (name, value) in &styles.border_radius {
        writeln!(out, "--radius-{name}: {value};")?;
    }
    writeln!(out, "```")?;

    Ok(())
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::config::AnalysisConfig;
    use crate::pipeline::orchestration::{assemble, StageOutcomes};
    use crate::pipeline::stages::StageOutcome;
    use crate::pipeline::types::{
        AssetKind, AssetRecord, DecodedImage, Dimensions, LayoutDescriptor, Position,
    };
    use image::{Rgb, RgbImage};
    use std::time::Duration;

    fn result() -> AnalysisResult {
        result_with_assets(Vec::new())
    }

    fn result_with_assets(assets: Vec<AssetRecord>) -> AnalysisResult {
        let outcomes = StageOutcomes {
            classifier: StageOutcome::Completed(false),
            layout: StageOutcome::Completed(LayoutDescriptor::unknown()),
            colors: StageOutcome::Completed(vec![
                ColorSample::new((255, 255, 255), UsageContext::Background, 0.6),
                ColorSample::new((33, 150, 243), UsageContext::PrimaryAccent, 0.25),
            ]),
            typography: StageOutcome::degraded("text recognition disabled"),
            elements: StageOutcome::Completed(Vec::new()),
            assets: StageOutcome::Completed(assets),
        };
        let image = DecodedImage::from_rgb(RgbImage::from_pixel(10, 10, Rgb([255, 255, 255])));
        assemble(outcomes, &image, "landing.png", &AnalysisConfig::default(), Duration::ZERO)
    }

    #[test]
    fn renders_sections_and_warnings() {
        let markdown = render_markdown(&result());

        assert!(markdown.starts_with("# Recreation brief: landing.png"));
        assert!(markdown.contains("- Image may not be a website/app screenshot"));
        assert!(markdown.contains("typography extraction degraded: text recognition disabled"));
        assert!(markdown.contains("### Background"));
        assert!(markdown.contains("### Primary/Accent"));
        assert!(markdown.contains("--color-2: #2196f3;"));
        assert!(markdown.contains("No text detected."));
        assert!(!markdown.contains("## Assets"));
    }

    #[test]
    fn lists_assets_with_intent_size_and_position() {
        let asset = |asset_type, intent: Option<&str>, width, height, x, y| AssetRecord {
            asset_type,
            dimensions: Dimensions { width, height },
            position: Position { x, y },
            alt_text_intent: intent.map(str::to_string),
            file_format: None,
        };
        let markdown = render_markdown(&result_with_assets(vec![
            asset(AssetKind::Icon, Some("Circular icon/logo"), 60, 60, 70, 70),
            asset(AssetKind::Image, Some("Content image"), 200, 180, 250, 150),
            asset(AssetKind::Image, None, 80, 80, 0, 0),
        ]));

        assert!(markdown.contains("- Assets: 3"));
        let section = &markdown[markdown.find("## Assets").unwrap()..];
        let lines: Vec<&str> = section.lines().filter(|l| l.starts_with("- ")).take(3).collect();
        assert_eq!(
            lines,
            vec![
                "- Circular icon/logo: 60x60 at (70, 70)",
                "- Content image: 200x180 at (250, 150)",
                "- Asset: 80x80 at (0, 0)",
            ]
        );
    }

    #[test]
    fn difficulty_bands() {
        assert_eq!(recreation_difficulty(0.9), "high");
        assert_eq!(recreation_difficulty(0.7), "medium");
        assert_eq!(recreation_difficulty(0.6), "challenging");
    }
}
