use image::ImageFormat;
use tracing::debug;

use crate::error::AppError;
use crate::pipeline::types::DecodedImage;

/// Decode encoded raster bytes (PNG, JPEG, ...) into the pipeline's RGB/luma
/// buffers. This is the only fatal step of an analysis.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, AppError> {
    let format: Option<ImageFormat> = image::guess_format(bytes).ok();
    let image = image::load_from_memory(bytes)?;
    let decoded = DecodedImage::new(image, format);

    debug!(
        "Decoded {}x{} image ({} channels, format {})",
        decoded.width,
        decoded.height,
        decoded.channels,
        decoded.format_name()
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(image: RgbImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn decodes_png_with_metadata() {
        let bytes = png_bytes(RgbImage::from_pixel(40, 20, Rgb([1, 2, 3])));
        let decoded = decode(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (40, 20));
        assert_eq!(decoded.channels, 3);
        assert_eq!(decoded.format_name(), "png");
        assert_eq!(decoded.rgb.get_pixel(5, 5), &Rgb([1, 2, 3]));
    }

    #[test]
    fn corrupt_bytes_fail_to_decode() {
        let mut bytes = png_bytes(RgbImage::new(8, 8));
        bytes.truncate(20);
        assert!(matches!(decode(&bytes), Err(AppError::Decode(_))));
        assert!(matches!(decode(b"not an image"), Err(AppError::Decode(_))));
        assert!(matches!(decode(&[]), Err(AppError::Decode(_))));
    }
}
