use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::error::StageError;
use crate::pipeline::config::ElementThresholds;
use crate::pipeline::types::{
    hex_code, DecodedImage, Dimensions, ElementKind, InteractiveElementRecord, Position,
};
use crate::pipeline::vision::{
    adaptive_gaussian_threshold, bounding_rect, contour_area, external_contours, region_mean,
    BoundingRect,
};

/// Button, input and container candidates from the outlines of locally
/// bright regions, in contour discovery order.
#[instrument(skip_all, fields(width = image.width, height = image.height))]
pub fn detect_elements(
    image: &DecodedImage,
    thresholds: &ElementThresholds,
) -> Result<Vec<InteractiveElementRecord>, StageError> {
    let binary = adaptive_gaussian_threshold(&image.gray, thresholds.block_size, thresholds.offset);
    let max_area = image.area() * thresholds.max_area_fraction;

    let contours = external_contours(&binary);
    let elements: Vec<InteractiveElementRecord> = contours
        .iter()
        .filter(|contour| {
            let area = contour_area(contour);
            area > thresholds.min_area && area < max_area
        })
        .map(|contour| {
            let rect = bounding_rect(contour);
            element_for(image, rect, classify_shape(rect, thresholds))
        })
        .take(thresholds.max_elements)
        .collect();

    debug!(
        "{} external contours -> {} elements",
        contours.len(),
        elements.len()
    );
    Ok(elements)
}

pub fn classify_shape(rect: BoundingRect, thresholds: &ElementThresholds) -> ElementKind {
    let aspect = rect.aspect_ratio();

    if (thresholds.button_min_aspect..=thresholds.button_max_aspect).contains(&aspect)
        && (thresholds.button_min_height..=thresholds.button_max_height).contains(&rect.height)
    {
        ElementKind::Button
    } else if aspect > thresholds.input_min_aspect && rect.height <= thresholds.input_max_height {
        ElementKind::Input
    } else {
        ElementKind::Container
    }
}

fn element_for(image: &DecodedImage, rect: BoundingRect, kind: ElementKind) -> InteractiveElementRecord {
    let background = region_mean(
        &image.rgb,
        rect.x as i64,
        rect.y as i64,
        rect.width as i64,
        rect.height as i64,
    )
    .unwrap_or((0, 0, 0));

    let mut styling = IndexMap::new();
    styling.insert("background_color".to_string(), hex_code(background));
    styling.insert("border_radius".to_string(), "4px (estimated)".to_string());
    styling.insert("padding".to_string(), "8px 16px (estimated)".to_string());

    InteractiveElementRecord {
        element_type: kind,
        position: Position {
            x: rect.x,
            y: rect.y,
        },
        dimensions: Dimensions {
            width: rect.width,
            height: rect.height,
        },
        styling,
        states: None,
        text_content: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// One-pixel horizontal stripes break the page background into thin
    /// regions, so a flat dark block stands out as its own top-level region.
    fn striped_page_with_block(x0: u32, y0: u32, w: u32, h: u32) -> DecodedImage {
        let mut rgb = RgbImage::from_fn(600, 400, |_, y| {
            if y % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                rgb.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        DecodedImage::from_rgb(rgb)
    }

    #[test]
    fn wide_block_is_a_button() {
        let image = striped_page_with_block(100, 100, 160, 50);
        let elements = detect_elements(&image, &ElementThresholds::default()).unwrap();

        assert_eq!(elements.len(), 1);
        let button = &elements[0];
        assert_eq!(button.element_type, ElementKind::Button);
        assert!(button.position.x > 100 && button.position.x < 110);
        assert!(button.dimensions.height >= 30 && button.dimensions.height <= 50);
        assert_eq!(button.styling["background_color"], "#000000");
        assert_eq!(button.styling["border_radius"], "4px (estimated)");
    }

    #[test]
    fn left_docked_panel_is_a_container() {
        let mut rgb = RgbImage::from_pixel(800, 600, Rgb([255, 255, 255]));
        for y in 150..450 {
            for x in 0..120 {
                rgb.put_pixel(x, y, Rgb([60, 60, 60]));
            }
        }
        let image = DecodedImage::from_rgb(rgb);
        let elements = detect_elements(&image, &ElementThresholds::default()).unwrap();

        assert_eq!(elements.len(), 1);
        let panel = &elements[0];
        assert_eq!(panel.element_type, ElementKind::Container);
        assert_eq!(panel.position.x, 0);
        assert!(panel.position.y > 150 && panel.position.y < 160);
        assert!(panel.dimensions.width > 100 && panel.dimensions.width < 120);
        assert_eq!(panel.styling["background_color"], "#3c3c3c");
    }

    #[test]
    fn flat_page_has_no_elements() {
        let image = DecodedImage::from_rgb(RgbImage::from_pixel(300, 200, Rgb([240, 240, 240])));
        assert!(detect_elements(&image, &ElementThresholds::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn shape_rules() {
        let t = ElementThresholds::default();
        let rect = |width, height| BoundingRect {
            x: 0,
            y: 0,
            width,
            height,
        };
        assert_eq!(classify_shape(rect(120, 40), &t), ElementKind::Button);
        assert_eq!(classify_shape(rect(300, 30), &t), ElementKind::Input);
        assert_eq!(classify_shape(rect(140, 15), &t), ElementKind::Input);
        assert_eq!(classify_shape(rect(200, 200), &t), ElementKind::Container);
        assert_eq!(classify_shape(rect(700, 100), &t), ElementKind::Container);
    }
}
