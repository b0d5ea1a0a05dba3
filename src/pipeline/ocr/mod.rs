pub mod tesseract;

use async_trait::async_trait;
use image::RgbImage;

use crate::error::StageError;

pub use tesseract::TesseractRecognizer;

/// One recognized word with its bounding box in image pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrToken {
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f32,
}

/// Optical character recognition backend.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Tokens in reading (scan) order.
    async fn recognize(&self, image: &RgbImage) -> Result<Vec<OcrToken>, StageError>;
    fn name(&self) -> &'static str;
}

/// Recognizer used when text recognition is switched off.
pub struct DisabledRecognizer;

#[async_trait]
impl TextRecognizer for DisabledRecognizer {
    async fn recognize(&self, _image: &RgbImage) -> Result<Vec<OcrToken>, StageError> {
        Err(StageError::Disabled)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
