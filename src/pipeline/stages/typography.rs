use tracing::{debug, instrument};

use crate::error::StageError;
use crate::pipeline::config::TypographyThresholds;
use crate::pipeline::ocr::{OcrToken, TextRecognizer};
use crate::pipeline::types::{
    hex_code, DecodedImage, FontWeight, TextBounds, TextRole, TypographyRecord,
};
use crate::pipeline::vision::region_mean;

const FONT_FAMILY: &str = "System font (estimated)";

/// Text styling estimated from OCR word boxes, in scan order.
#[instrument(skip_all, fields(recognizer = recognizer.name()))]
pub async fn extract_typography(
    image: &DecodedImage,
    recognizer: &dyn TextRecognizer,
    thresholds: &TypographyThresholds,
) -> Result<Vec<TypographyRecord>, StageError> {
    let tokens = recognizer.recognize(&image.rgb).await?;
    let records = records_from_tokens(image, &tokens, thresholds);
    debug!("{} OCR tokens -> {} typography records", tokens.len(), records.len());
    Ok(records)
}

pub fn records_from_tokens(
    image: &DecodedImage,
    tokens: &[OcrToken],
    thresholds: &TypographyThresholds,
) -> Vec<TypographyRecord> {
    tokens
        .iter()
        .filter(|token| !token.text.trim().is_empty())
        .take(thresholds.max_records)
        .map(|token| record_for(image, token, thresholds))
        .collect()
}

fn record_for(image: &DecodedImage, token: &OcrToken, thresholds: &TypographyThresholds) -> TypographyRecord {
    let estimated = (token.height.max(0) as f64 * thresholds.box_height_ratio) as u32;
    let font_size = estimated.max(thresholds.min_font_size);
    let (text_role, font_weight) = classify_size(font_size, thresholds);

    let color = region_mean(
        &image.rgb,
        token.left as i64,
        token.top as i64,
        token.width as i64,
        token.height as i64,
    )
    .unwrap_or((0, 0, 0));

    TypographyRecord {
        font_family: FONT_FAMILY.to_string(),
        font_size,
        font_weight,
        text_role,
        color: hex_code(color),
        text_content: token.text.trim().chars().take(thresholds.max_text_chars).collect(),
        alignment: "left".to_string(),
        line_height: (font_size as f64 * thresholds.line_height_ratio) as u32,
        bounds: TextBounds {
            left: token.left,
            top: token.top,
            width: token.width,
            height: token.height,
        },
    }
}

pub fn classify_size(font_size: u32, thresholds: &TypographyThresholds) -> (TextRole, FontWeight) {
    if font_size > thresholds.heading_min_size {
        (TextRole::Heading, FontWeight::Bold)
    } else if font_size > thresholds.subheading_min_size {
        (TextRole::Subheading, FontWeight::SemiBold)
    } else {
        (TextRole::Body, FontWeight::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::{Rgb, RgbImage};

    struct FixedRecognizer(Vec<OcrToken>);

    #[async_trait]
    impl TextRecognizer for FixedRecognizer {
        async fn recognize(&self, _image: &RgbImage) -> Result<Vec<OcrToken>, StageError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    fn token(text: &str, left: i32, top: i32, width: i32, height: i32) -> OcrToken {
        OcrToken {
            text: text.to_string(),
            left,
            top,
            width,
            height,
            confidence: 90.0,
        }
    }

    fn page() -> DecodedImage {
        let mut rgb = RgbImage::from_pixel(400, 300, Rgb([255, 255, 255]));
        for y in 10..50 {
            for x in 10..110 {
                rgb.put_pixel(x, y, Rgb([20, 40, 60]));
            }
        }
        DecodedImage::from_rgb(rgb)
    }

    #[tokio::test]
    async fn sizes_roles_and_colors() {
        let recognizer = FixedRecognizer(vec![
            token("Pricing", 10, 10, 100, 40),
            token("Plans", 120, 60, 60, 25),
            token("details", 10, 100, 50, 10),
        ]);
        let records = extract_typography(&page(), &recognizer, &TypographyThresholds::default())
            .await
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].font_size, 32);
        assert_eq!(records[0].text_role, TextRole::Heading);
        assert_eq!(records[0].font_weight, FontWeight::Bold);
        assert_eq!(records[0].color, "#14283c");
        assert_eq!(records[0].line_height, 44);

        assert_eq!(records[1].font_size, 20);
        assert_eq!(records[1].text_role, TextRole::Subheading);

        assert_eq!(records[2].font_size, 12);
        assert_eq!(records[2].text_role, TextRole::Body);
        assert_eq!(records[2].color, "#ffffff");
    }

    #[test]
    fn blank_tokens_are_dropped_and_list_is_capped() {
        let mut tokens = vec![token("   ", 0, 0, 10, 10), token("", 0, 0, 10, 10)];
        tokens.extend((0..15).map(|i| token(&format!("w{i}"), i * 20, 0, 15, 12)));
        let records = records_from_tokens(&page(), &tokens, &TypographyThresholds::default());
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].text_content, "w0");
        assert_eq!(records[9].text_content, "w9");
    }

    #[test]
    fn out_of_bounds_box_defaults_to_black_and_text_is_truncated() {
        let long = "x".repeat(150);
        let tokens = vec![token(&long, 390, 290, 40, 30), token("neg", -5, 10, 20, 20)];
        let records = records_from_tokens(&page(), &tokens, &TypographyThresholds::default());
        assert_eq!(records[0].color, "#000000");
        assert_eq!(records[0].text_content.chars().count(), 100);
        assert_eq!(records[1].color, "#000000");
    }

    #[test]
    fn size_bands_are_exclusive_at_boundaries() {
        let t = TypographyThresholds::default();
        assert_eq!(classify_size(24, &t).0, TextRole::Subheading);
        assert_eq!(classify_size(25, &t).0, TextRole::Heading);
        assert_eq!(classify_size(18, &t).0, TextRole::Body);
        assert_eq!(classify_size(19, &t).0, TextRole::Subheading);
    }
}
