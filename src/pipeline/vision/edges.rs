use image::{GrayImage, RgbImage};
use imageproc::edges::canny;

use crate::pipeline::config::EdgeThresholds;

/// Binary edge map (0 / 255) of an intensity image.
pub fn edge_map(gray: &GrayImage, thresholds: EdgeThresholds) -> GrayImage {
    let (width, height) = gray.dimensions();
    // Canny needs a 3x3 neighbourhood around every pixel it keeps
    if width < 3 || height < 3 {
        return GrayImage::new(width, height);
    }
    canny(gray, thresholds.low, thresholds.high)
}

/// Mean RGB inside a rectangle, channels truncated toward zero.
/// Returns `None` when the rectangle is empty or leaves the image.
pub fn region_mean(rgb: &RgbImage, x: i64, y: i64, width: i64, height: i64) -> Option<(u8, u8, u8)> {
    let (img_w, img_h) = rgb.dimensions();
    if x < 0 || y < 0 || width <= 0 || height <= 0 {
        return None;
    }
    if x + width > img_w as i64 || y + height > img_h as i64 {
        return None;
    }

    let mut sums = [0u64; 3];
    for py in y..y + height {
        for px in x..x + width {
            let pixel = rgb.get_pixel(px as u32, py as u32);
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += channel as u64;
            }
        }
    }

    let count = (width * height) as u64;
    Some((
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ))
}
