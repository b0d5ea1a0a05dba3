use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;
use crate::pipeline::AnalysisConfig;

const ENV_PREFIX: &str = "DESIGN_LENS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
}

/// Everything the command line tool reads before analyzing: the pipeline
/// thresholds and how to print the result.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub analysis: AnalysisConfig,
    pub output: OutputOptions,
}

impl Configuration {
    /// Defaults, then the optional file, then `DESIGN_LENS__*` environment
    /// variables (`DESIGN_LENS__ANALYSIS__COLORS__CLUSTERS=6`).
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self, AppError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let configuration: Configuration = builder.build()?.try_deserialize()?;
        configuration
            .analysis
            .validate()
            .map_err(AppError::InvalidConfig)?;
        Ok(configuration)
    }
}
