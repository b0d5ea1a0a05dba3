use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};

/// Decoded screenshot shared read-only by every stage of one analysis.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub rgb: RgbImage,
    pub gray: GrayImage,
    pub width: u32,
    pub height: u32,
    /// Channel count of the source encoding (1 for grayscale, 4 for RGBA, ...).
    pub channels: u8,
    pub format: Option<ImageFormat>,
}

impl DecodedImage {
    pub fn new(image: DynamicImage, format: Option<ImageFormat>) -> Self {
        let channels = image.color().channel_count();
        let rgb = image.to_rgb8();
        let gray = image.to_luma8();
        let (width, height) = rgb.dimensions();

        Self {
            rgb,
            gray,
            width,
            height,
            channels,
            format,
        }
    }

    pub fn from_rgb(rgb: RgbImage) -> Self {
        Self::new(DynamicImage::ImageRgb8(rgb), None)
    }

    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    pub fn format_name(&self) -> String {
        self.format
            .map(|format| format!("{format:?}").to_lowercase())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
