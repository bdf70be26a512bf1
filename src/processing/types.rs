//! Core data types and error definitions for the summarization pipeline.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::sanitize::normalize_extension;

/// Largest document accepted by the pipeline (10 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Extensions accepted at the upload boundary, lower-cased and without the leading dot.
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["pdf", "png", "jpg", "jpeg", "tiff", "bmp", "gif"];

/// Origin of a piece of extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    /// Embedded text decoded from a PDF.
    Pdf,
    /// Text recognised from a raster image.
    Ocr,
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("pdf"),
            Self::Ocr => f.write_str("ocr"),
        }
    }
}

/// Reasons a document yielded no usable text.
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    /// Decoding succeeded but produced no text. Image-only PDFs land here and are not retried through OCR.
    #[error("{}", empty_message(.0))]
    Empty(TextSource),
    /// The OCR engine could not be started; retrying later may succeed.
    #[error("OCR engine failed to initialize: {0}")]
    EngineInit(String),
    /// The input could not be decoded.
    #[error("{0}")]
    Decode(String),
}

fn empty_message(source: &TextSource) -> &'static str {
    match source {
        TextSource::Pdf => {
            "No text could be extracted from the PDF; scanned image-only PDFs are not processed with OCR"
        }
        TextSource::Ocr => "No text could be recognized in the image",
    }
}

impl ExtractionFailure {
    /// Short machine-readable reason code (`empty`, `engine-init`, `decode`).
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Empty(_) => "empty",
            Self::EngineInit(_) => "engine-init",
            Self::Decode(_) => "decode",
        }
    }
}

/// Errors surfaced to callers of the pipeline. Generation failures never appear here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Extension is outside the allow-list.
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    /// Document exceeds [`MAX_DOCUMENT_BYTES`].
    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge {
        /// Size of the rejected document.
        size: usize,
        /// Configured upper bound.
        limit: usize,
    },
    /// Extraction produced no usable text or could not decode the input.
    #[error("Failed to extract text: {0}")]
    ExtractionFailed(#[from] ExtractionFailure),
    /// Anything uncategorized.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// An uploaded document, validated at construction.
#[derive(Debug, Clone)]
pub struct Document {
    original_name: String,
    extension: String,
    bytes: Vec<u8>,
}

impl Document {
    /// Validate and wrap an uploaded file. The extension is derived from `original_name`.
    pub fn new(original_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, PipelineError> {
        let original_name = original_name.into();
        let extension = normalize_extension(&original_name).unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(PipelineError::UnsupportedFileType(if extension.is_empty() {
                original_name
            } else {
                format!(".{extension}")
            }));
        }
        if bytes.len() > MAX_DOCUMENT_BYTES {
            return Err(PipelineError::FileTooLarge {
                size: bytes.len(),
                limit: MAX_DOCUMENT_BYTES,
            });
        }
        Ok(Self {
            original_name,
            extension,
            bytes,
        })
    }

    /// File name as supplied by the uploader.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Lower-cased extension without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Raw document content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Requested summary length. Unrecognized input normalizes to [`LengthTier::Medium`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthTier {
    /// Two or three sentences.
    Short,
    /// Bullet sections of roughly 150–200 words.
    #[default]
    Medium,
    /// Multi-section summary of roughly 300 words.
    Long,
}

impl LengthTier {
    /// Parse caller input leniently.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
            Some("short") => Self::Short,
            Some("long") => Self::Long,
            _ => Self::Medium,
        }
    }

    /// Lower-case name as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Maximum number of sentences the extractive fallback selects.
    pub fn fallback_sentence_budget(self) -> usize {
        match self {
            Self::Short => 2,
            Self::Medium => 5,
            Self::Long => 8,
        }
    }
}

impl fmt::Display for LengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text extracted from a document. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    source: TextSource,
}

impl ExtractedText {
    /// Wrap extracted text, rejecting blank output as [`ExtractionFailure::Empty`].
    pub fn new(text: impl Into<String>, source: TextSource) -> Result<Self, ExtractionFailure> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ExtractionFailure::Empty(source));
        }
        Ok(Self { text, source })
    }

    /// Extracted text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Extractor family that produced the text.
    pub fn source(&self) -> TextSource {
        self.source
    }

    /// Character count of the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Consume the wrapper, returning the text.
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Prompt sent to the remote generative provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    pub(crate) prompt: String,
    pub(crate) embedded_chars: usize,
    pub(crate) truncated: bool,
    pub(crate) tier: LengthTier,
}

impl SummaryPrompt {
    /// Full prompt text.
    pub fn as_str(&self) -> &str {
        &self.prompt
    }

    /// Number of characters of document text embedded in the prompt.
    pub fn embedded_chars(&self) -> usize {
        self.embedded_chars
    }

    /// Whether the document text was cut to fit the prompt cap.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Tier the prompt was built for.
    pub fn tier(&self) -> LengthTier {
        self.tier
    }
}

/// Which path produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Remote generative provider.
    Generative,
    /// Local extractive fallback.
    Fallback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generative => f.write_str("generative"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Final summary with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Summary text.
    pub text: String,
    /// Path that produced the text.
    pub provenance: Provenance,
}

/// Everything a transport needs to answer an upload.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Name of the uploaded file.
    pub original_name: String,
    /// Text extracted from the document.
    pub extracted: ExtractedText,
    /// Summary produced from the extracted text.
    pub summary: Summary,
    /// Tier the summary was produced for.
    pub tier: LengthTier,
}
