pub mod config;
pub mod ocr;
pub mod orchestration;
pub mod stages;
pub mod types;
pub mod vision;

pub use config::AnalysisConfig;
pub use ocr::{DisabledRecognizer, OcrToken, TesseractRecognizer, TextRecognizer};
pub use orchestration::{build_service, AnalysisRequest, AnalyzerService, ScreenshotAnalyzer};
pub use stages::{StageKind, StageOutcome};
pub use types::AnalysisResult;
