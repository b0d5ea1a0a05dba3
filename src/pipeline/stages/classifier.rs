use tracing::{debug, instrument};

use crate::error::StageError;
use crate::pipeline::config::ClassifierThresholds;
use crate::pipeline::types::DecodedImage;
use crate::pipeline::vision::{
    approximate_closed_polygon, arc_length, contour_area, edge_map, external_contours,
};

/// Advisory check that the image looks like a UI screenshot: a moderate
/// aspect ratio, a minimum size, and several large rectangular regions.
#[instrument(skip_all, fields(width = image.width, height = image.height))]
pub fn is_screenshot_like(
    image: &DecodedImage,
    thresholds: &ClassifierThresholds,
) -> Result<bool, StageError> {
    if image.height == 0 {
        return Err(StageError::Vision("image has zero height".to_string()));
    }

    let regions = count_rectangular_regions(image, thresholds);
    let verdict = meets_screenshot_rules(image.width, image.height, regions, thresholds);

    debug!(
        "aspect {:.2}, {} rectangular regions -> screenshot-like: {}",
        image.aspect_ratio(),
        regions,
        verdict
    );
    Ok(verdict)
}

pub fn count_rectangular_regions(image: &DecodedImage, thresholds: &ClassifierThresholds) -> usize {
    let edges = edge_map(&image.gray, thresholds.edges);
    let min_area = image.area() * thresholds.min_region_fraction;

    external_contours(&edges)
        .iter()
        .filter(|contour| {
            let epsilon = thresholds.polygon_tolerance * arc_length(contour, true);
            epsilon > 0.0
                && approximate_closed_polygon(contour, epsilon).len() == 4
                && contour_area(contour) >= min_area
        })
        .count()
}

pub fn meets_screenshot_rules(
    width: u32,
    height: u32,
    rectangular_regions: usize,
    thresholds: &ClassifierThresholds,
) -> bool {
    if height == 0 {
        return false;
    }
    let aspect = width as f64 / height as f64;

    (thresholds.min_aspect_ratio..=thresholds.max_aspect_ratio).contains(&aspect)
        && rectangular_regions >= thresholds.min_rectangular_regions
        && width >= thresholds.min_width
        && height >= thresholds.min_height
}
