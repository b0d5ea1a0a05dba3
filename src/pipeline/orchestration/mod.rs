pub mod analyzer;
pub mod assembler;
pub mod service;

pub use analyzer::ScreenshotAnalyzer;
pub use assembler::{assemble, StageOutcomes, NOT_A_SCREENSHOT};
pub use service::{build_service, AnalysisRequest, AnalyzerService, BoxError};
