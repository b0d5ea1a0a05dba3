use serde::{Deserialize, Serialize};

/// Line kernels are built as structuring element masks, which stay below 512 px.
pub const MAX_KERNEL_LENGTH: u32 = 512;

/// Every heuristic threshold used by the analysis pipeline, grouped by stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    pub classifier: ClassifierThresholds,
    pub layout: LayoutThresholds,
    pub colors: ColorThresholds,
    pub typography: TypographyThresholds,
    pub elements: ElementThresholds,
    pub assets: AssetThresholds,
    pub scoring: ScoringWeights,
    pub execution: ExecutionLimits,
}

/// Canny hysteresis pair shared by the edge-based stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeThresholds {
    pub low: f32,
    pub high: f32,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    pub edges: EdgeThresholds,
    pub min_aspect_ratio: f64,
    pub max_aspect_ratio: f64,
    /// Polygon approximation tolerance as a fraction of the contour perimeter.
    pub polygon_tolerance: f64,
    /// Minimum quadrilateral area as a fraction of the image area.
    pub min_region_fraction: f64,
    pub min_rectangular_regions: usize,
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            edges: EdgeThresholds::default(),
            min_aspect_ratio: 0.5,
            max_aspect_ratio: 3.0,
            polygon_tolerance: 0.02,
            min_region_fraction: 0.01,
            min_rectangular_regions: 3,
            min_width: 300,
            min_height: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutThresholds {
    pub edges: EdgeThresholds,
    /// Length of the line kernels used for the morphological opening.
    pub kernel_length: u32,
    pub min_line_length: u32,
    pub max_line_gap: u32,
    pub vote_threshold: u32,
    pub min_grid_lines: usize,
    /// Widths above this are reported as desktop layouts.
    pub desktop_min_width: u32,
}

impl Default for LayoutThresholds {
    fn default() -> Self {
        Self {
            edges: EdgeThresholds::default(),
            kernel_length: 40,
            min_line_length: 100,
            max_line_gap: 10,
            vote_threshold: 100,
            min_grid_lines: 2,
            desktop_min_width: 768,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorThresholds {
    pub clusters: usize,
    pub seed: u64,
    pub restarts: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
    /// Distinct colors above this are binned before clustering.
    pub max_distinct_colors: usize,
    pub max_samples: usize,
    pub background_min_share: f64,
    pub text_max_channel: u8,
    pub accent_min_share: f64,
    pub accent_max_share: f64,
    pub accent_min_spread: u8,
    pub border_max_spread: u8,
}

impl Default for ColorThresholds {
    fn default() -> Self {
        Self {
            clusters: 8,
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
            max_distinct_colors: 4096,
            max_samples: 6,
            background_min_share: 0.3,
            text_max_channel: 100,
            accent_min_share: 0.1,
            accent_max_share: 0.3,
            accent_min_spread: 50,
            border_max_spread: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyThresholds {
    pub min_font_size: u32,
    /// Font size is estimated as this fraction of the OCR box height.
    pub box_height_ratio: f64,
    pub heading_min_size: u32,
    pub subheading_min_size: u32,
    pub line_height_ratio: f64,
    pub max_text_chars: usize,
    pub max_records: usize,
}

impl Default for TypographyThresholds {
    fn default() -> Self {
        Self {
            min_font_size: 12,
            box_height_ratio: 0.8,
            heading_min_size: 24,
            subheading_min_size: 18,
            line_height_ratio: 1.4,
            max_text_chars: 100,
            max_records: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementThresholds {
    pub block_size: u32,
    pub offset: f32,
    pub min_area: f64,
    /// Upper area bound as a fraction of the image area.
    pub max_area_fraction: f64,
    pub button_min_aspect: f64,
    pub button_max_aspect: f64,
    pub button_min_height: u32,
    pub button_max_height: u32,
    pub input_min_aspect: f64,
    pub input_max_height: u32,
    pub max_elements: usize,
}

impl Default for ElementThresholds {
    fn default() -> Self {
        Self {
            block_size: 11,
            offset: 2.0,
            min_area: 500.0,
            max_area_fraction: 0.1,
            button_min_aspect: 1.5,
            button_max_aspect: 6.0,
            button_min_height: 20,
            button_max_height: 100,
            input_min_aspect: 3.0,
            input_max_height: 50,
            max_elements: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetThresholds {
    pub circle_edge_high: f32,
    pub circle_votes: u32,
    pub circle_min_distance: f64,
    /// Share of a circle's outline that must be visible for it to count.
    pub circle_min_arc_fraction: f64,
    pub min_radius: u32,
    pub max_radius: u32,
    pub image_edges: EdgeThresholds,
    pub image_min_area: f64,
    pub image_min_aspect: f64,
    pub image_max_aspect: f64,
    pub image_min_side: u32,
    pub max_assets: usize,
}

impl Default for AssetThresholds {
    fn default() -> Self {
        Self {
            circle_edge_high: 50.0,
            circle_votes: 30,
            circle_min_distance: 30.0,
            circle_min_arc_fraction: 0.6,
            min_radius: 10,
            max_radius: 100,
            image_edges: EdgeThresholds::default(),
            image_min_area: 2000.0,
            image_min_aspect: 0.5,
            image_max_aspect: 3.0,
            image_min_side: 50,
            max_assets: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub layout: f64,
    pub typography: f64,
    pub elements: f64,
    /// Returned when no factor applies.
    pub neutral: f64,
    pub primary_min_confidence: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            layout: 0.8,
            typography: 0.7,
            elements: 0.6,
            neutral: 0.5,
            primary_min_confidence: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionLimits {
    /// Number of stages allowed to run on the blocking pool at once.
    pub worker_permits: usize,
    pub stage_timeout_ms: Option<u64>,
    pub ocr_enabled: bool,
    pub tesseract_path: String,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(4);

        Self {
            worker_permits: workers,
            stage_timeout_ms: None,
            ocr_enabled: true,
            tesseract_path: "tesseract".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        let classifier = &self.classifier;
        if classifier.min_aspect_ratio > classifier.max_aspect_ratio {
            return Err("Classifier aspect ratio range is inverted".to_string());
        }
        if !(0.0..=1.0).contains(&classifier.polygon_tolerance)
            || !(0.0..=1.0).contains(&classifier.min_region_fraction)
        {
            return Err("Classifier fractions must be between 0.0 and 1.0".to_string());
        }

        for edges in [
            classifier.edges,
            self.layout.edges,
            self.assets.image_edges,
        ] {
            if edges.low > edges.high {
                return Err("Edge low threshold must not exceed the high threshold".to_string());
            }
        }

        if self.layout.kernel_length == 0 || self.layout.kernel_length >= MAX_KERNEL_LENGTH {
            return Err(format!(
                "Layout kernel length must be between 1 and {}",
                MAX_KERNEL_LENGTH - 1
            ));
        }

        if self.colors.clusters == 0 {
            return Err("Color cluster count must be greater than 0".to_string());
        }
        if self.colors.restarts == 0 || self.colors.max_iterations == 0 {
            return Err("K-means restarts and iterations must be greater than 0".to_string());
        }
        if self.colors.max_distinct_colors < self.colors.clusters {
            return Err("Distinct color cap must be at least the cluster count".to_string());
        }
        if self.colors.accent_min_share > self.colors.accent_max_share {
            return Err("Accent share range is inverted".to_string());
        }

        if self.typography.subheading_min_size > self.typography.heading_min_size {
            return Err("Subheading size must not exceed heading size".to_string());
        }

        let elements = &self.elements;
        if elements.block_size < 3 || elements.block_size % 2 == 0 {
            return Err("Adaptive threshold block size must be odd and at least 3".to_string());
        }
        if elements.button_min_aspect > elements.button_max_aspect
            || elements.button_min_height > elements.button_max_height
        {
            return Err("Button ranges are inverted".to_string());
        }
        if !(0.0..=1.0).contains(&elements.max_area_fraction) {
            return Err("Element area fraction must be between 0.0 and 1.0".to_string());
        }

        let assets = &self.assets;
        if assets.min_radius == 0 || assets.min_radius > assets.max_radius {
            return Err("Circle radius range must be non-empty and start above 0".to_string());
        }
        if !(assets.circle_min_arc_fraction > 0.0 && assets.circle_min_arc_fraction <= 1.0) {
            return Err("Circle arc fraction must be in (0.0, 1.0]".to_string());
        }
        if assets.image_min_aspect > assets.image_max_aspect {
            return Err("Image aspect ratio range is inverted".to_string());
        }

        if self.execution.worker_permits == 0 {
            return Err("At least one worker permit is required".to_string());
        }

        Ok(())
    }

    /// Disable text recognition entirely.
    pub fn without_ocr(mut self) -> Self {
        self.execution.ocr_enabled = false;
        self
    }

    /// Set the per-stage timeout
    pub fn with_stage_timeout(mut self, timeout_ms: u64) -> Self {
        self.execution.stage_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the number of concurrent worker permits
    pub fn with_worker_permits(mut self, permits: usize) -> Self {
        self.execution.worker_permits = permits;
        self
    }
}
