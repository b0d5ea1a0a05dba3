use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::error::StageError;
use crate::pipeline::config::LayoutThresholds;
use crate::pipeline::types::{DecodedImage, LayoutDescriptor, LayoutKind};
use crate::pipeline::vision::{count_segments, edge_map, open_with_line, Orientation, SegmentRules};

/// Line counts that drive the grid/flexbox decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCounts {
    pub horizontal: usize,
    pub vertical: usize,
}

#[instrument(skip_all, fields(width = image.width, height = image.height))]
pub fn analyze_layout(
    image: &DecodedImage,
    thresholds: &LayoutThresholds,
) -> Result<LayoutDescriptor, StageError> {
    if image.width == 0 || image.height == 0 {
        return Err(StageError::Vision("image is empty".to_string()));
    }

    let counts = count_lines(image, thresholds);
    debug!(
        "{} horizontal / {} vertical lines",
        counts.horizontal, counts.vertical
    );
    Ok(describe(counts, image.width, thresholds))
}

pub fn count_lines(image: &DecodedImage, thresholds: &LayoutThresholds) -> LineCounts {
    let edges = edge_map(&image.gray, thresholds.edges);
    let rules = SegmentRules {
        min_length: thresholds.min_line_length,
        max_gap: thresholds.max_line_gap,
        vote_threshold: thresholds.vote_threshold,
    };

    let horizontal_map = open_with_line(&edges, Orientation::Horizontal, thresholds.kernel_length);
    let vertical_map = open_with_line(&edges, Orientation::Vertical, thresholds.kernel_length);

    LineCounts {
        horizontal: count_segments(&horizontal_map, Orientation::Horizontal, rules),
        vertical: count_segments(&vertical_map, Orientation::Vertical, rules),
    }
}

pub fn describe(counts: LineCounts, width: u32, thresholds: &LayoutThresholds) -> LayoutDescriptor {
    let is_grid = counts.horizontal >= thresholds.min_grid_lines
        && counts.vertical >= thresholds.min_grid_lines;

    let (layout_type, grid_structure) = if is_grid {
        (
            LayoutKind::Grid,
            Some(format!(
                "Estimated {} columns, {} rows",
                counts.vertical + 1,
                counts.horizontal + 1
            )),
        )
    } else {
        (LayoutKind::Flexbox, None)
    };

    // Spacing is not measured; these are the documented estimates
    let spacing: IndexMap<String, String> = [
        ("padding", "16px (estimated)"),
        ("margin", "12px (estimated)"),
        ("gap", "8px (estimated)"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect();

    let hint = if width > thresholds.desktop_min_width {
        "Desktop layout detected"
    } else {
        "Mobile layout detected"
    };

    LayoutDescriptor {
        layout_type,
        grid_structure,
        spacing,
        alignment: "left-aligned (estimated)".to_string(),
        responsive_hints: Some(vec![hint.to_string()]),
    }
}
