pub mod assets;
pub mod classifier;
pub mod colors;
pub mod elements;
pub mod labeler;
pub mod layout;
pub mod loader;
pub mod scoring;
pub mod style_guide;
pub mod typography;

use std::fmt;

/// The pipeline stages whose failures are absorbed rather than propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Classifier,
    Layout,
    Colors,
    Typography,
    Elements,
    Assets,
}

impl StageKind {
    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Classifier => "screenshot classifier",
            StageKind::Layout => "layout analysis",
            StageKind::Colors => "color extraction",
            StageKind::Typography => "typography extraction",
            StageKind::Elements => "interactive element detection",
            StageKind::Assets => "asset cataloging",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one recoverable stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    Completed(T),
    Degraded { reason: String },
}

impl<T> StageOutcome<T> {
    pub fn degraded(reason: impl Into<String>) -> Self {
        StageOutcome::Degraded {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            StageOutcome::Completed(_) => None,
            StageOutcome::Degraded { reason } => Some(reason),
        }
    }

    pub fn into_value_or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            StageOutcome::Completed(value) => value,
            StageOutcome::Degraded { .. } => fallback(),
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for StageOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => StageOutcome::Completed(value),
            Err(e) => StageOutcome::degraded(e.to_string()),
        }
    }
}
