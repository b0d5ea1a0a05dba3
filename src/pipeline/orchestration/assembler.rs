use std::time::Duration;

use crate::pipeline::config::AnalysisConfig;
use crate::pipeline::stages::{labeler, scoring, style_guide, StageKind, StageOutcome};
use crate::pipeline::types::{
    AnalysisResult, AssetRecord, ColorSample, DecodedImage, GlobalStyleTokens, ImageInfo,
    InteractiveElementRecord, LayoutDescriptor, StageReport, StageStatus, TypographyRecord,
};

pub const NOT_A_SCREENSHOT: &str = "Image may not be a website/app screenshot";

/// Outcome of every recoverable stage of one analysis.
#[derive(Debug, Clone)]
pub struct StageOutcomes {
    pub classifier: StageOutcome<bool>,
    pub layout: StageOutcome<LayoutDescriptor>,
    pub colors: StageOutcome<Vec<ColorSample>>,
    pub typography: StageOutcome<Vec<TypographyRecord>>,
    pub elements: StageOutcome<Vec<InteractiveElementRecord>>,
    pub assets: StageOutcome<Vec<AssetRecord>>,
}

#[derive(Default)]
struct Ledger {
    warnings: Vec<String>,
    reports: Vec<StageReport>,
}

impl Ledger {
    fn settle<T>(&mut self, stage: StageKind, outcome: StageOutcome<T>, fallback: impl FnOnce() -> T) -> T {
        let reason = outcome.reason().map(str::to_string);
        if let Some(reason) = &reason {
            self.warnings.push(format!("{stage} degraded: {reason}"));
        }
        self.reports.push(StageReport {
            stage: stage.name().to_string(),
            status: if reason.is_some() {
                StageStatus::Degraded
            } else {
                StageStatus::Completed
            },
            reason,
        });
        outcome.into_value_or_else(fallback)
    }
}

/// Merge the stage outcomes into the final result. Degraded stages fall back
/// to their defaults; derived sections are computed from whatever survived.
pub fn assemble(
    outcomes: StageOutcomes,
    image: &DecodedImage,
    filename: &str,
    config: &AnalysisConfig,
    elapsed: Duration,
) -> AnalysisResult {
    let mut ledger = Ledger::default();

    // A classifier that could not run does not flag the image.
    let screenshot_like = ledger.settle(StageKind::Classifier, outcomes.classifier, || true);
    if !screenshot_like {
        ledger.warnings.insert(0, NOT_A_SCREENSHOT.to_string());
    }

    let layout = ledger.settle(StageKind::Layout, outcomes.layout, LayoutDescriptor::unknown);
    let colors = ledger.settle(StageKind::Colors, outcomes.colors, Vec::new);
    let typography = ledger.settle(StageKind::Typography, outcomes.typography, Vec::new);
    let interactive_elements = ledger.settle(StageKind::Elements, outcomes.elements, Vec::new);
    let assets = ledger.settle(StageKind::Assets, outcomes.assets, Vec::new);

    let style_guide = style_guide::synthesize_style_guide(
        &colors,
        &typography,
        config.scoring.primary_min_confidence,
    );
    let component_labels = labeler::label_components(&interactive_elements);
    let confidence_score = scoring::overall_confidence(
        Some(layout.layout_type),
        &colors,
        &typography,
        &interactive_elements,
        &config.scoring,
    );

    AnalysisResult {
        layout,
        colors,
        typography,
        interactive_elements,
        assets,
        global_styles: GlobalStyleTokens::default(),
        style_guide,
        component_labels,
        image_info: ImageInfo {
            filename: filename.to_string(),
            width: image.width,
            height: image.height,
            channels: image.channels,
            format: image.format_name(),
        },
        processing_time: scoring::round2(elapsed.as_secs_f64()),
        confidence_score,
        warnings: ledger.warnings,
        stage_reports: ledger.reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::{LayoutKind, UsageContext};
    use image::{Rgb, RgbImage};

    fn completed() -> StageOutcomes {
        StageOutcomes {
            classifier: StageOutcome::Completed(true),
            layout: StageOutcome::Completed(LayoutDescriptor {
                layout_type: LayoutKind::Grid,
                ..LayoutDescriptor::unknown()
            }),
            colors: StageOutcome::Completed(vec![ColorSample::new(
                (255, 255, 255),
                UsageContext::Background,
                1.0,
            )]),
            typography: StageOutcome::Completed(Vec::new()),
            elements: StageOutcome::Completed(Vec::new()),
            assets: StageOutcome::Completed(Vec::new()),
        }
    }

    fn image() -> DecodedImage {
        DecodedImage::from_rgb(RgbImage::from_pixel(64, 48, Rgb([255, 255, 255])))
    }

    #[test]
    fn clean_run_has_no_warnings() {
        let result = assemble(
            completed(),
            &image(),
            "page.png",
            &AnalysisConfig::default(),
            Duration::from_millis(1234),
        );

        assert!(result.warnings.is_empty());
        assert_eq!(result.stage_reports.len(), 6);
        assert!(result
            .stage_reports
            .iter()
            .all(|report| report.status == StageStatus::Completed && report.reason.is_none()));
        assert_eq!(result.processing_time, 1.23);
        // (0.8 + 1.0) / 2
        assert_eq!(result.confidence_score, 0.9);
        assert_eq!(result.image_info.filename, "page.png");
        assert_eq!((result.image_info.width, result.image_info.height), (64, 48));
        assert_eq!(result.style_guide.primary_colors, vec!["#ffffff"]);
    }

    #[test]
    fn degraded_stages_fall_back_and_warn() {
        let mut outcomes = completed();
        outcomes.layout = StageOutcome::degraded("boom");
        outcomes.colors = StageOutcome::degraded("no pixels");

        let result = assemble(
            outcomes,
            &image(),
            "page.png",
            &AnalysisConfig::default(),
            Duration::ZERO,
        );

        assert_eq!(result.layout, LayoutDescriptor::unknown());
        assert!(result.colors.is_empty());
        assert_eq!(
            result.warnings,
            vec![
                "layout analysis degraded: boom".to_string(),
                "color extraction degraded: no pixels".to_string(),
            ]
        );
        assert_eq!(result.stage_reports[1].status, StageStatus::Degraded);
        assert_eq!(result.stage_reports[1].reason.as_deref(), Some("boom"));
        // Flexbox default still counts as a layout.
        assert_eq!(result.confidence_score, 0.8);
    }

    #[test]
    fn negative_classification_only_adds_a_warning() {
        let mut outcomes = completed();
        outcomes.classifier = StageOutcome::Completed(false);

        let result = assemble(
            outcomes,
            &image(),
            "banner.png",
            &AnalysisConfig::default(),
            Duration::ZERO,
        );

        assert_eq!(result.warnings, vec![NOT_A_SCREENSHOT.to_string()]);
        assert_eq!(result.layout.layout_type, LayoutKind::Grid);
        assert_eq!(result.colors.len(), 1);
    }

    #[test]
    fn degraded_classifier_fails_open() {
        let mut outcomes = completed();
        outcomes.classifier = StageOutcome::degraded("zero height");

        let result = assemble(
            outcomes,
            &image(),
            "page.png",
            &AnalysisConfig::default(),
            Duration::ZERO,
        );

        assert_eq!(
            result.warnings,
            vec!["screenshot classifier degraded: zero height".to_string()]
        );
    }
}
