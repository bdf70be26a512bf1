//! Document summarization pipeline: format dispatch, extraction, prompting, and fallback.

pub mod dispatch;
pub mod extract;
pub mod sanitize;
mod service;
pub mod summarize;
pub mod types;

pub use dispatch::ExtractorKind;
pub use service::{SummaryApi, SummaryPipeline};
pub use types::{
    Document, ExtractedText, ExtractionFailure, LengthTier, MAX_DOCUMENT_BYTES, PipelineError,
    Provenance, SUPPORTED_EXTENSIONS, Summary, SummaryPrompt, SummaryReport, TextSource,
};
