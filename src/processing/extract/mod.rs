//! Format-specific text extraction.

mod ocr;
mod pdf;

use async_trait::async_trait;

use super::types::{ExtractedText, ExtractionFailure};

pub use ocr::{ImageOcrExtractor, OcrEngine, OcrEngineError, TesseractEngine};
pub use pdf::PdfExtractor;

/// Contract shared by every extractor: raw bytes in, non-empty text out.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text from `bytes`, failing loudly rather than returning blank output.
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionFailure>;
}
