//! Remote generative summarization providers.
//!
//! The pipeline depends only on [`SummarizationClient`]; the Gemini and Ollama adapters below
//! speak each vendor's REST protocol directly through `reqwest`. When no provider is configured
//! the pipeline produces deterministic extractive summaries instead.

mod gemini;
mod ollama;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::{Config, SummarizationProvider};

pub use gemini::GeminiSummarizationClient;
pub use ollama::OllamaSummarizationClient;

/// Errors surfaced while attempting generative summarization.
///
/// The pipeline treats every variant the same way; the distinction exists for logs.
#[derive(Debug, Clone, Error)]
pub enum SummarizationClientError {
    /// Provider could not be reached or timed out.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider rejected the credential.
    #[error("Summarization provider rejected credentials: {0}")]
    Authentication(String),
    /// Provider refused the request due to rate limits or quota.
    #[error("Summarization provider quota exceeded: {0}")]
    QuotaExceeded(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed or carried no text.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

impl SummarizationClientError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable(_) => "unavailable",
            Self::Authentication(_) => "authentication",
            Self::QuotaExceeded(_) => "quota",
            Self::GenerationFailed(_) => "provider-error",
            Self::InvalidResponse(_) => "malformed-response",
        }
    }

    pub(crate) fn from_transport(provider: &str, base_url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::ProviderUnavailable(format!("{provider} at {base_url} timed out: {error}"))
        } else {
            Self::ProviderUnavailable(format!("failed to reach {provider} at {base_url}: {error}"))
        }
    }
}

/// Interface implemented by generative summarization providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Generate a summary for a fully built prompt.
    async fn generate_summary(&self, prompt: &str) -> Result<String, SummarizationClientError>;

    /// Provider name for logs.
    fn provider(&self) -> &str;
}

/// Build the configured provider client, or `None` when the generative path is disabled.
pub fn build_summarization_client(
    config: &Config,
) -> Result<Option<Arc<dyn SummarizationClient>>, SummarizationClientError> {
    match config.summarization_provider {
        SummarizationProvider::None => {
            tracing::info!("Generative summarization disabled; using extractive summaries");
            Ok(None)
        }
        SummarizationProvider::Gemini => {
            let Some(api_key) = config.gemini_api_key.clone() else {
                tracing::warn!(
                    "GEMINI_API_KEY is not set; every summary will use the extractive fallback"
                );
                return Ok(None);
            };
            let http = http_client(config.summarization_timeout)?;
            tracing::info!(model = %config.summarization_model, "Using Gemini summarization");
            Ok(Some(Arc::new(GeminiSummarizationClient::new(
                http,
                config.gemini_base_url.clone(),
                config.summarization_model.clone(),
                api_key,
            ))))
        }
        SummarizationProvider::Ollama => {
            let http = http_client(config.summarization_timeout)?;
            tracing::info!(
                model = %config.summarization_model,
                url = %config.ollama_url,
                "Using Ollama summarization"
            );
            Ok(Some(Arc::new(OllamaSummarizationClient::new(
                http,
                config.ollama_url.clone(),
                config.summarization_model.clone(),
            ))))
        }
    }
}

fn http_client(timeout: Duration) -> Result<Client, SummarizationClientError> {
    Client::builder()
        .user_agent(concat!("docbrief/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|error| {
            SummarizationClientError::ProviderUnavailable(format!(
                "failed to construct HTTP client: {error}"
            ))
        })
}
