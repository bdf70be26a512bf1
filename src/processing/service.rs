//! Pipeline orchestration: dispatch, extraction, then generative or fallback summarization.

use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::{
    config::Config,
    metrics::{MetricsSnapshot, PipelineMetrics},
    processing::{
        dispatch::{self, ExtractorKind},
        extract::{ImageOcrExtractor, PdfExtractor, TesseractEngine, TextExtractor},
        summarize::{GenerativeSummarizer, summarize_with_fallback},
        types::{Document, LengthTier, PipelineError, Summary, SummaryReport},
    },
    summarization::{SummarizationClient, build_summarization_client},
};

/// Coordinates one document through extraction and summarization.
///
/// The pipeline holds only immutable handles (extractors, provider client, metrics), so one
/// instance is shared through an `Arc` and invocations run concurrently without coordination.
pub struct SummaryPipeline {
    pdf_extractor: Arc<dyn TextExtractor>,
    image_extractor: Arc<dyn TextExtractor>,
    generator: Option<GenerativeSummarizer>,
    metrics: Arc<PipelineMetrics>,
}

/// Abstraction over the pipeline used by external surfaces (HTTP, CLI).
#[async_trait]
pub trait SummaryApi: Send + Sync {
    /// Extract and summarize a document.
    async fn summarize_document(
        &self,
        document: Document,
        tier: LengthTier,
    ) -> Result<SummaryReport, PipelineError>;

    /// Count an upload rejected before it reached the pipeline.
    fn record_rejected_upload(&self);

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl SummaryPipeline {
    /// Assemble a pipeline from explicit collaborators.
    pub fn new(
        pdf_extractor: Arc<dyn TextExtractor>,
        image_extractor: Arc<dyn TextExtractor>,
        client: Option<Arc<dyn SummarizationClient>>,
    ) -> Self {
        Self {
            pdf_extractor,
            image_extractor,
            generator: client.map(GenerativeSummarizer::new),
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Build the production pipeline: pdf-extract, tesseract OCR, and the configured provider.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let client = build_summarization_client(config)
            .map_err(|error| PipelineError::Internal(error.to_string()))?;
        let engine = Arc::new(TesseractEngine::new(config.tesseract_path.clone()));
        Ok(Self::new(
            Arc::new(PdfExtractor::new()),
            Arc::new(ImageOcrExtractor::new(engine)),
            client,
        ))
    }

    /// Same pipeline with the generative path removed.
    pub fn without_generation(mut self) -> Self {
        self.generator = None;
        self
    }

    /// Run the pipeline and return only the summary.
    pub async fn run(&self, document: Document, tier: LengthTier) -> Result<Summary, PipelineError> {
        self.process(document, tier).await.map(|report| report.summary)
    }

    /// Run the pipeline, returning the extracted text alongside the summary.
    ///
    /// Unsupported types and extraction failures propagate unchanged; generation failures are
    /// absorbed by the extractive fallback.
    #[tracing::instrument(
        skip_all,
        fields(
            file = %document.original_name(),
            size = document.size(),
            digest = %fingerprint(document.bytes()),
            tier = %tier,
        )
    )]
    pub async fn process(
        &self,
        document: Document,
        tier: LengthTier,
    ) -> Result<SummaryReport, PipelineError> {
        let kind = dispatch::select(document.extension()).inspect_err(|_| {
            self.metrics.record_rejected_upload();
        })?;
        tracing::debug!(?kind, "Selected extractor");

        let extractor = match kind {
            ExtractorKind::Pdf => &self.pdf_extractor,
            ExtractorKind::Image => &self.image_extractor,
        };
        let extracted = match extractor.extract(document.bytes()).await {
            Ok(text) => text,
            Err(failure) => {
                self.metrics.record_extraction_failure();
                tracing::warn!(reason = failure.reason(), error = %failure, "Extraction failed");
                return Err(failure.into());
            }
        };
        tracing::info!(
            source = %extracted.source(),
            chars = extracted.char_count(),
            "Text extracted"
        );

        let summary = summarize_with_fallback(self.generator.as_ref(), &extracted, tier).await;
        self.metrics.record_summary(summary.provenance);
        tracing::info!(provenance = %summary.provenance, "Summary ready");

        Ok(SummaryReport {
            original_name: document.original_name().to_string(),
            extracted,
            summary,
            tier,
        })
    }
}

#[async_trait]
impl SummaryApi for SummaryPipeline {
    async fn summarize_document(
        &self,
        document: Document,
        tier: LengthTier,
    ) -> Result<SummaryReport, PipelineError> {
        self.process(document, tier).await
    }

    fn record_rejected_upload(&self) {
        self.metrics.record_rejected_upload();
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Short content digest used to correlate log lines for one document.
fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..6])
}
