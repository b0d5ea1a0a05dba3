use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Decode task failed: {0}")]
    DecodeTask(String),
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize analysis: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Stage Error Type. Never escapes the pipeline: the orchestrator turns
// it into a degraded stage outcome.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("vision routine failed: {0}")]
    Vision(String),
    #[error("text recognizer failed: {0}")]
    Recognizer(#[from] std::io::Error),
    #[error("text recognizer produced unreadable output: {0}")]
    RecognizerOutput(String),
    #[error("text recognition disabled")]
    Disabled,
    #[error("stage task aborted: {0}")]
    Aborted(String),
}
