use tracing::{debug, instrument};

use crate::error::StageError;
use crate::pipeline::config::AssetThresholds;
use crate::pipeline::types::{AssetKind, AssetRecord, DecodedImage, Dimensions, Position};
use crate::pipeline::vision::{
    bounding_rect, contour_area, detect_circles, edge_map, external_contours, CircleRules,
};

/// Circular icons followed by rectangular content images.
#[instrument(skip_all, fields(width = image.width, height = image.height))]
pub fn catalog_assets(
    image: &DecodedImage,
    thresholds: &AssetThresholds,
) -> Result<Vec<AssetRecord>, StageError> {
    let icons = find_icons(image, thresholds);
    let images = find_images(image, thresholds);
    debug!("{} icon and {} image candidates", icons.len(), images.len());

    Ok(icons
        .into_iter()
        .chain(images)
        .take(thresholds.max_assets)
        .collect())
}

fn find_icons(image: &DecodedImage, thresholds: &AssetThresholds) -> Vec<AssetRecord> {
    let rules = CircleRules {
        edge_high: thresholds.circle_edge_high,
        vote_threshold: thresholds.circle_votes,
        min_distance: thresholds.circle_min_distance,
        min_radius: thresholds.min_radius,
        max_radius: thresholds.max_radius,
        min_arc_fraction: thresholds.circle_min_arc_fraction,
    };

    detect_circles(&image.gray, rules)
        .into_iter()
        .map(|circle| AssetRecord {
            asset_type: AssetKind::Icon,
            dimensions: Dimensions {
                width: circle.radius * 2,
                height: circle.radius * 2,
            },
            position: Position {
                x: circle.x - circle.radius as i32,
                y: circle.y - circle.radius as i32,
            },
            alt_text_intent: Some("Circular icon/logo".to_string()),
            file_format: None,
        })
        .collect()
}

fn find_images(image: &DecodedImage, thresholds: &AssetThresholds) -> Vec<AssetRecord> {
    let edges = edge_map(&image.gray, thresholds.image_edges);
    let aspect_range = thresholds.image_min_aspect..=thresholds.image_max_aspect;

    external_contours(&edges)
        .iter()
        .filter(|contour| contour_area(contour) > thresholds.image_min_area)
        .map(|contour| bounding_rect(contour))
        .filter(|rect| {
            aspect_range.contains(&rect.aspect_ratio())
                && rect.width > thresholds.image_min_side
                && rect.height > thresholds.image_min_side
        })
        .map(|rect| AssetRecord {
            asset_type: AssetKind::Image,
            dimensions: Dimensions {
                width: rect.width,
                height: rect.height,
            },
            position: Position {
                x: rect.x,
                y: rect.y,
            },
            alt_text_intent: Some("Content image".to_string()),
            file_format: None,
        })
        .collect()
}
