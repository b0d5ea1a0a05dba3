use std::io::Cursor;
use std::process::Stdio;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbImage};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::{OcrToken, TextRecognizer};
use crate::error::StageError;

// Word rows of Tesseract's TSV output carry level 5
const WORD_LEVEL: &str = "5";
const TSV_COLUMNS: usize = 12;
// Assume a single uniform block of text
const PAGE_SEGMENTATION_MODE: &str = "6";

/// Runs the `tesseract` command-line tool and parses its TSV output.
pub struct TesseractRecognizer {
    binary: String,
}

impl TesseractRecognizer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn encode_png(image: &RgbImage) -> Result<Vec<u8>, StageError> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image.clone())
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| StageError::RecognizerOutput(format!("PNG encoding failed: {e}")))?;
        Ok(buffer.into_inner())
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &RgbImage) -> Result<Vec<OcrToken>, StageError> {
        let png = Self::encode_png(image)?;

        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "--oem", "3", "--psm", PAGE_SEGMENTATION_MODE, "tsv"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&png).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(StageError::RecognizerOutput(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        let tokens = parse_tsv(&tsv)?;
        debug!("tesseract returned {} word tokens", tokens.len());
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

/// Parses Tesseract TSV output into word tokens, in output order.
pub fn parse_tsv(tsv: &str) -> Result<Vec<OcrToken>, StageError> {
    let mut tokens = Vec::new();

    for (line_no, line) in tsv.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.splitn(TSV_COLUMNS, '\t').collect();
        if fields.len() < TSV_COLUMNS - 1 {
            return Err(StageError::RecognizerOutput(format!(
                "line {} has {} columns",
                line_no + 1,
                fields.len()
            )));
        }
        if fields[0] != WORD_LEVEL {
            continue;
        }

        let number = |index: usize| -> Result<i32, StageError> {
            fields[index].trim().parse::<i32>().map_err(|_| {
                StageError::RecognizerOutput(format!(
                    "line {}: column {} is not a number",
                    line_no + 1,
                    index + 1
                ))
            })
        };

        tokens.push(OcrToken {
            left: number(6)?,
            top: number(7)?,
            width: number(8)?,
            height: number(9)?,
            confidence: fields[10].trim().parse::<f32>().unwrap_or(-1.0),
            text: fields.get(11).map(|t| t.to_string()).unwrap_or_default(),
        });
    }

    Ok(tokens)
}
