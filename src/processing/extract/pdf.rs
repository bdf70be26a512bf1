use async_trait::async_trait;

use super::TextExtractor;
use crate::processing::sanitize::sanitize_extracted_text;
use crate::processing::types::{ExtractedText, ExtractionFailure, TextSource};

/// Extracts embedded text from PDF documents, page by page in document order.
///
/// Scanned PDFs without a text layer fail with [`ExtractionFailure::Empty`]; they are not
/// rasterized and sent through OCR.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a PDF extractor.
    pub const fn new() -> Self {
        Self
    }

    fn decode(bytes: &[u8]) -> Result<String, ExtractionFailure> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|error| ExtractionFailure::Decode(format!("Failed to parse PDF: {error}")))
    }
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    #[tracing::instrument(skip_all, fields(bytes = bytes.len()))]
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionFailure> {
        let owned = bytes.to_vec();
        // The decoder can panic on malformed input; the join error carries that out.
        let raw = tokio::task::spawn_blocking(move || Self::decode(&owned))
            .await
            .map_err(|error| {
                ExtractionFailure::Decode(format!("Failed to parse PDF: decoder aborted ({error})"))
            })??;

        let text = sanitize_extracted_text(&raw);
        tracing::debug!(chars = text.chars().count(), "PDF text decoded");
        ExtractedText::new(text, TextSource::Pdf)
    }
}

#[cfg(test)]
mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    /// Build a single-page PDF. Each entry of `lines` is drawn on its own text line.
    pub(super) fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
        ];
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                operations.push(Operation::new("Td", vec![0.into(), (-16).into()]));
            }
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        }
        operations.push(Operation::new("ET", vec![]));
        build(Content { operations })
    }

    /// Build a single-page PDF whose content stream draws nothing, like a scan without a text layer.
    pub(super) fn pdf_without_text() -> Vec<u8> {
        build(Content { operations: vec![] })
    }

    fn build(content: Content) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialize pdf");
        bytes
    }
}
