use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{
    asset::AssetRecord,
    color::ColorSample,
    element::InteractiveElementRecord,
    layout::LayoutDescriptor,
    style::{GlobalStyleTokens, StyleGuide},
    typography::TypographyRecord,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub format: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Completed,
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: String,
    pub status: StageStatus,
    pub reason: Option<String>,
}

/// Complete structured description of one screenshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub layout: LayoutDescriptor,
    pub colors: Vec<ColorSample>,
    pub typography: Vec<TypographyRecord>,
    pub interactive_elements: Vec<InteractiveElementRecord>,
    pub assets: Vec<AssetRecord>,
    pub global_styles: GlobalStyleTokens,
    pub style_guide: StyleGuide,
    pub component_labels: IndexMap<String, String>,
    pub image_info: ImageInfo,
    /// Wall-clock seconds, rounded to two decimals.
    pub processing_time: f64,
    pub confidence_score: f64,
    pub warnings: Vec<String>,
    pub stage_reports: Vec<StageReport>,
}
