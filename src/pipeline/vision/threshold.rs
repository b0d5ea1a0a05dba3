use image::{GrayImage, Luma};
use imageproc::filter::separable_filter_equal;

/// Binary adaptive threshold against a Gaussian-weighted local mean.
///
/// A pixel becomes foreground (255) when it is brighter than the weighted
/// mean of its `block_size` x `block_size` neighbourhood minus `offset`.
/// Borders are replicated.
pub fn adaptive_gaussian_threshold(gray: &GrayImage, block_size: u32, offset: f32) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return GrayImage::new(width, height);
    }

    let kernel = gaussian_kernel(block_size);
    let mean = separable_filter_equal(gray, &kernel);

    GrayImage::from_fn(width, height, |x, y| {
        let value = gray.get_pixel(x, y)[0] as f32;
        if value > mean.get_pixel(x, y)[0] as f32 - offset {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Normalised 1-D Gaussian of `size` taps, sigma derived from the size the
/// same way common vision libraries do for adaptive thresholding.
fn gaussian_kernel(size: u32) -> Vec<f32> {
    let size = size.max(1) | 1;
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f32;
    let raw: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f32 = raw.iter().sum();
    raw.into_iter().map(|v| v / total).collect()
}
