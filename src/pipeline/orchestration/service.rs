use std::pin::Pin;
use std::time::Duration;

use futures::task::{Context, Poll};
use futures::Future;
use tower::timeout::TimeoutLayer;
use tower::util::BoxService;
use tower::{Service, ServiceBuilder, ServiceExt};

use crate::error::AppError;
use crate::pipeline::orchestration::analyzer::ScreenshotAnalyzer;
use crate::pipeline::types::AnalysisResult;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// One image submitted for analysis.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl AnalysisRequest {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
        }
    }
}

#[derive(Clone)]
pub struct AnalyzerService {
    analyzer: ScreenshotAnalyzer,
}

impl AnalyzerService {
    pub fn new(analyzer: ScreenshotAnalyzer) -> Self {
        Self { analyzer }
    }
}

impl Service<AnalysisRequest> for AnalyzerService {
    type Response = AnalysisResult;
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: AnalysisRequest) -> Self::Future {
        let analyzer = self.analyzer.clone();

        Box::pin(async move { analyzer.analyze(&req.bytes, &req.filename).await })
    }
}

/// Analyzer behind a whole-request timeout and an in-flight limit.
pub fn build_service(
    analyzer: ScreenshotAnalyzer,
    max_in_flight: usize,
    request_timeout: Option<Duration>,
) -> BoxService<AnalysisRequest, AnalysisResult, BoxError> {
    ServiceBuilder::new()
        .option_layer(request_timeout.map(TimeoutLayer::new))
        .concurrency_limit(max_in_flight)
        .map_err(|e: AppError| -> BoxError { Box::new(e) })
        .service(AnalyzerService::new(analyzer))
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::config::AnalysisConfig;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn analyzer() -> ScreenshotAnalyzer {
        ScreenshotAnalyzer::new(AnalysisConfig::default().without_ocr().with_worker_permits(1)).unwrap()
    }

    fn png_bytes() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([250, 250, 250])))
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[tokio::test]
    async fn test_analyzer_service() {
        let mut service = AnalyzerService::new(analyzer());
        let response = service
            .call(AnalysisRequest::new(png_bytes(), "blank.png"))
            .await
            .unwrap();
        assert_eq!(response.image_info.filename, "blank.png");
        assert_eq!(response.colors[0].hex_code, "#fafafa");
    }

    #[tokio::test]
    async fn stacked_service_reports_decode_errors() {
        let service = build_service(analyzer(), 2, Some(Duration::from_secs(30)));
        let error = service
            .oneshot(AnalysisRequest::new(b"nope".to_vec(), "nope.png"))
            .await
            .unwrap_err();
        assert!(error.downcast_ref::<AppError>().is_some());
    }

    #[tokio::test]
    async fn stacked_service_without_timeout() {
        let service = build_service(analyzer(), 1, None);
        let response = service
            .oneshot(AnalysisRequest::new(png_bytes(), "blank.png"))
            .await
            .unwrap();
        assert_eq!((response.image_info.width, response.image_info.height), (64, 64));
    }
}
