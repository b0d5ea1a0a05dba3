use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tracing::{info, instrument, warn};

use crate::error::{AppError, StageError};
use crate::pipeline::config::AnalysisConfig;
use crate::pipeline::ocr::{DisabledRecognizer, TesseractRecognizer, TextRecognizer};
use crate::pipeline::orchestration::assembler::{assemble, StageOutcomes};
use crate::pipeline::stages::{
    assets, classifier, colors, elements, layout, loader, typography, StageKind, StageOutcome,
};
use crate::pipeline::types::{AnalysisResult, DecodedImage, TypographyRecord};

/// Runs the full screenshot analysis: decode, fan the stages out over a
/// bounded worker pool, then fold their outcomes into one result.
///
/// Cheap to clone; clones share the configuration, recognizer and permits.
#[derive(Clone)]
pub struct ScreenshotAnalyzer {
    config: Arc<AnalysisConfig>,
    recognizer: Arc<dyn TextRecognizer>,
    workers: Arc<Semaphore>,
}

impl ScreenshotAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::InvalidConfig)?;

        let recognizer: Arc<dyn TextRecognizer> = if config.execution.ocr_enabled {
            Arc::new(TesseractRecognizer::new(
                config.execution.tesseract_path.clone(),
            ))
        } else {
            Arc::new(DisabledRecognizer)
        };
        let workers = Arc::new(Semaphore::new(config.execution.worker_permits));

        Ok(Self {
            config: Arc::new(config),
            recognizer,
            workers,
        })
    }

    /// Replace the text recognition backend.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one encoded image. Only a decode failure is an error; every
    /// other stage failure shows up as a warning in the result.
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub async fn analyze(&self, bytes: &[u8], filename: &str) -> Result<AnalysisResult, AppError> {
        let started = Instant::now();
        let bytes = bytes.to_vec();
        let image = tokio::task::spawn_blocking(move || loader::decode(&bytes))
            .await
            .map_err(|e| AppError::DecodeTask(e.to_string()))??;
        let image = Arc::new(image);

        let (classifier, layout, colors, typography, elements, assets) = tokio::join!(
            self.run_stage(
                StageKind::Classifier,
                self.blocking(&image, |image, config| {
                    classifier::is_screenshot_like(image, &config.classifier)
                }),
            ),
            self.run_stage(
                StageKind::Layout,
                self.blocking(&image, |image, config| {
                    layout::analyze_layout(image, &config.layout)
                }),
            ),
            self.run_stage(
                StageKind::Colors,
                self.blocking(&image, |image, config| {
                    colors::extract_colors(image, &config.colors)
                }),
            ),
            self.run_stage(StageKind::Typography, self.recognize_text(&image)),
            self.run_stage(
                StageKind::Elements,
                self.blocking(&image, |image, config| {
                    elements::detect_elements(image, &config.elements)
                }),
            ),
            self.run_stage(
                StageKind::Assets,
                self.blocking(&image, |image, config| {
                    assets::catalog_assets(image, &config.assets)
                }),
            ),
        );

        let outcomes = StageOutcomes {
            classifier,
            layout,
            colors,
            typography,
            elements,
            assets,
        };
        let result = assemble(outcomes, &image, filename, &self.config, started.elapsed());

        info!(
            "Analyzed {} ({}x{}) in {:.2}s, confidence {:.2}, {} warnings",
            filename,
            image.width,
            image.height,
            result.processing_time,
            result.confidence_score,
            result.warnings.len()
        );
        Ok(result)
    }

    /// Wrap a CPU-bound stage so it runs on the blocking pool. The worker
    /// permit moves into the blocking job and is released when the job
    /// returns, even if the stage has already timed out.
    fn blocking<T, F>(
        &self,
        image: &Arc<DecodedImage>,
        job: F,
    ) -> impl Future<Output = Result<T, StageError>> + Send + 'static
    where
        T: Send + 'static,
        F: FnOnce(&DecodedImage, &AnalysisConfig) -> Result<T, StageError> + Send + 'static,
    {
        let image = image.clone();
        let config = self.config.clone();
        let workers = self.workers.clone();

        async move {
            let permit = workers
                .acquire_owned()
                .await
                .map_err(|e| StageError::Aborted(e.to_string()))?;
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                job(image.as_ref(), config.as_ref())
            })
            .await
            .map_err(|e| StageError::Aborted(e.to_string()))?
        }
    }

    fn recognize_text(
        &self,
        image: &Arc<DecodedImage>,
    ) -> impl Future<Output = Result<Vec<TypographyRecord>, StageError>> + Send + 'static {
        let image = image.clone();
        let config = self.config.clone();
        let recognizer = self.recognizer.clone();
        let workers = self.workers.clone();

        async move {
            let _permit = workers
                .acquire_owned()
                .await
                .map_err(|e| StageError::Aborted(e.to_string()))?;
            typography::extract_typography(&image, recognizer.as_ref(), &config.typography).await
        }
    }

    /// Run one stage as its own task under the optional timeout. Any failure,
    /// panic or timeout becomes a degraded outcome.
    async fn run_stage<T, Fut>(&self, stage: StageKind, work: Fut) -> StageOutcome<T>
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T, StageError>> + Send + 'static,
    {
        let mut task = tokio::spawn(work);

        let joined = match self.config.execution.stage_timeout_ms {
            Some(timeout_ms) => {
                match tokio::time::timeout(Duration::from_millis(timeout_ms), &mut task).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        task.abort();
                        let reason = format!("timed out after {timeout_ms} ms");
                        warn!("{} degraded: {}", stage, reason);
                        return StageOutcome::degraded(reason);
                    }
                }
            }
            None => task.await,
        };

        let outcome = match joined {
            Ok(result) => StageOutcome::from(result),
            Err(e) => StageOutcome::degraded(StageError::Aborted(e.to_string()).to_string()),
        };
        if let Some(reason) = outcome.reason() {
            warn!("{} degraded: {}", stage, reason);
        }
        outcome
    }
}
