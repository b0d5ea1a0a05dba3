use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

pub use imageproc::geometry::{arc_length, contour_area};
use imageproc::geometry::approximate_polygon_dp;

/// Axis-aligned bounding box of a contour, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }
}

/// Outer borders of the top-level foreground regions of a binary image,
/// in raster discovery order.
///
/// The image is traced inside a one-pixel background frame so regions
/// touching the left border still start an outer border.
pub fn external_contours(binary: &GrayImage) -> Vec<Vec<Point<i32>>> {
    let (width, height) = binary.dimensions();
    let framed = GrayImage::from_fn(width + 2, height + 2, |x, y| {
        if x == 0 || y == 0 || x > width || y > height {
            Luma([0])
        } else {
            *binary.get_pixel(x - 1, y - 1)
        }
    });

    find_contours::<i32>(&framed)
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .map(|contour| {
            contour
                .points
                .into_iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect()
        })
        .collect()
}

pub fn bounding_rect(points: &[Point<i32>]) -> BoundingRect {
    let Some(first) = points.first() else {
        return BoundingRect {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        };
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    BoundingRect {
        x: min_x,
        y: min_y,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    }
}

/// Douglas-Peucker approximation of a closed contour. Degenerate input
/// (fewer than three points, or a non-positive tolerance) is returned as is.
pub fn approximate_closed_polygon(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() < 3 || epsilon <= 0.0 {
        return points.to_vec();
    }
    approximate_polygon_dp(points, epsilon, true)
}
