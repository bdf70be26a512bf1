use std::sync::atomic::{AtomicU64, Ordering};

use crate::processing::Provenance;

/// Thread-safe counters describing summarization activity.
///
/// Counters only observe outcomes; no pipeline decision reads them.
#[derive(Default)]
pub struct PipelineMetrics {
    documents_processed: AtomicU64,
    generative_summaries: AtomicU64,
    fallback_summaries: AtomicU64,
    extraction_failures: AtomicU64,
    rejected_uploads: AtomicU64,
}

impl PipelineMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed summary and which path produced it.
    pub fn record_summary(&self, provenance: Provenance) {
        self.documents_processed.fetch_add(1, Ordering::Relaxed);
        let counter = match provenance {
            Provenance::Generative => &self.generative_summaries,
            Provenance::Fallback => &self.fallback_summaries,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a document whose text could not be extracted.
    pub fn record_extraction_failure(&self) {
        self.extraction_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an upload rejected before extraction (type or size).
    pub fn record_rejected_upload(&self) {
        self.rejected_uploads.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_processed: self.documents_processed.load(Ordering::Relaxed),
            generative_summaries: self.generative_summaries.load(Ordering::Relaxed),
            fallback_summaries: self.fallback_summaries.load(Ordering::Relaxed),
            extraction_failures: self.extraction_failures.load(Ordering::Relaxed),
            rejected_uploads: self.rejected_uploads.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of pipeline counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Documents that produced a summary since startup.
    pub documents_processed: u64,
    /// Summaries produced by the remote generative provider.
    pub generative_summaries: u64,
    /// Summaries produced by the local extractive fallback.
    pub fallback_summaries: u64,
    /// Documents rejected because no usable text could be extracted.
    pub extraction_failures: u64,
    /// Uploads rejected for unsupported type or size.
    pub rejected_uploads: u64,
}
