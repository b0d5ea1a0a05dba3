pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::{Configuration, OutputFormat, OutputOptions};
pub use error::{AppError, StageError};

pub use pipeline::{
    build_service, AnalysisConfig, AnalysisRequest, AnalysisResult, AnalyzerService,
    ScreenshotAnalyzer, TextRecognizer,
};
pub use report::render_markdown;
