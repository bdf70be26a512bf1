use std::io::Cursor;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::TextExtractor;
use crate::processing::sanitize::sanitize_extracted_text;
use crate::processing::types::{ExtractedText, ExtractionFailure, TextSource};

/// Widest image handed to the OCR engine; larger inputs are scaled down, smaller ones kept.
pub const OCR_MAX_WIDTH: u32 = 800;
const OCR_JPEG_QUALITY: u8 = 90;
const OCR_LANGUAGE: &str = "eng";
/// Tesseract page segmentation mode 6: a single uniform block of text.
const OCR_PAGE_SEGMENTATION_MODE: &str = "6";

/// Errors raised by OCR backends.
#[derive(Debug, Error)]
pub enum OcrEngineError {
    /// The engine could not be started or lacks its language data.
    #[error("{0}")]
    Unavailable(String),
    /// The engine started but failed on this input.
    #[error("{0}")]
    Failed(String),
}

/// Optical character recognition backend.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize English text in an encoded image, treating it as one uniform text block.
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrEngineError>;
}

/// Runs the system `tesseract` binary over stdin/stdout.
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    binary: Option<PathBuf>,
}

impl TesseractEngine {
    /// Create an engine. Without an explicit path the binary is looked up on `PATH` per call.
    pub fn new(binary: Option<PathBuf>) -> Self {
        Self { binary }
    }

    fn resolve_binary(&self) -> Result<PathBuf, OcrEngineError> {
        match &self.binary {
            Some(path) => Ok(path.clone()),
            None => which::which("tesseract").map_err(|error| {
                OcrEngineError::Unavailable(format!("tesseract binary not found on PATH: {error}"))
            }),
        }
    }
}

/// Classify a failed tesseract run from its stderr output.
fn classify_failure(status: &str, stderr: &str) -> OcrEngineError {
    let detail = stderr.trim();
    let lowered = detail.to_ascii_lowercase();
    if lowered.contains("error opening data file")
        || lowered.contains("failed loading language")
        || lowered.contains("could not initialize tesseract")
    {
        OcrEngineError::Unavailable(detail.to_string())
    } else {
        OcrEngineError::Failed(format!("tesseract exited with {status}: {detail}"))
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize(&self, image: &[u8]) -> Result<String, OcrEngineError> {
        let binary = self.resolve_binary()?;
        let mut child = Command::new(&binary)
            .args(["stdin", "stdout", "-l", OCR_LANGUAGE, "--psm", OCR_PAGE_SEGMENTATION_MODE])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| {
                OcrEngineError::Unavailable(format!(
                    "failed to start {}: {error}",
                    binary.display()
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| OcrEngineError::Failed("tesseract stdin unavailable".into()))?;
        let input = image.to_vec();
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&input).await;
            drop(stdin);
            result
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|error| OcrEngineError::Failed(format!("tesseract did not complete: {error}")))?;

        if let Ok(Err(error)) = writer.await {
            tracing::debug!(error = %error, "tesseract closed stdin early");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&output.status.to_string(), &stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Extracts text from raster images: normalize, then OCR.
#[derive(Clone)]
pub struct ImageOcrExtractor {
    engine: Arc<dyn OcrEngine>,
}

impl ImageOcrExtractor {
    /// Create an extractor backed by `engine`.
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    /// Decode, bound the width to [`OCR_MAX_WIDTH`] without upscaling, and re-encode as JPEG.
    pub fn normalize(bytes: &[u8]) -> Result<Vec<u8>, ExtractionFailure> {
        let decoded = image::load_from_memory(bytes).map_err(|error| {
            ExtractionFailure::Decode(format!("Failed to process image with OCR: {error}"))
        })?;

        let (width, height) = decoded.dimensions();
        let bounded = if width > OCR_MAX_WIDTH {
            decoded.resize(OCR_MAX_WIDTH, height, FilterType::Triangle)
        } else {
            decoded
        };

        let rgb = DynamicImage::ImageRgb8(bounded.to_rgb8());
        let mut encoded = Cursor::new(Vec::new());
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut encoded, OCR_JPEG_QUALITY))
            .map_err(|error| {
                ExtractionFailure::Decode(format!("Failed to re-encode image for OCR: {error}"))
            })?;
        Ok(encoded.into_inner())
    }
}

#[async_trait]
impl TextExtractor for ImageOcrExtractor {
    #[tracing::instrument(skip_all, fields(bytes = bytes.len()))]
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionFailure> {
        let owned = bytes.to_vec();
        let normalized = tokio::task::spawn_blocking(move || Self::normalize(&owned))
            .await
            .map_err(|error| {
                ExtractionFailure::Decode(format!("Failed to process image with OCR: {error}"))
            })??;
        tracing::debug!(normalized_bytes = normalized.len(), "Image normalized for OCR");

        let raw = self
            .engine
            .recognize(&normalized)
            .await
            .map_err(|error| match error {
                OcrEngineError::Unavailable(detail) => ExtractionFailure::EngineInit(detail),
                OcrEngineError::Failed(detail) => ExtractionFailure::Decode(format!(
                    "Failed to process image with OCR: {detail}"
                )),
            })?;

        let text = sanitize_extracted_text(&raw);
        tracing::debug!(chars = text.chars().count(), "OCR completed");
        ExtractedText::new(text, TextSource::Ocr)
    }
}
