//! Maps a document's declared extension to the extractor that must process it.

use super::types::{PipelineError, SUPPORTED_EXTENSIONS};

/// Extractor family selected for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    /// Embedded PDF text.
    Pdf,
    /// Raster image routed through OCR.
    Image,
}

/// Select the extractor for a lower-cased extension, with or without the leading dot.
///
/// Re-validates the allow-list even though uploads are checked at the boundary.
pub fn select(extension: &str) -> Result<ExtractorKind, PipelineError> {
    let bare = extension.strip_prefix('.').unwrap_or(extension);
    match bare {
        "pdf" => Ok(ExtractorKind::Pdf),
        other if SUPPORTED_EXTENSIONS.contains(&other) => Ok(ExtractorKind::Image),
        _ => Err(PipelineError::UnsupportedFileType(format!(".{bare}"))),
    }
}
