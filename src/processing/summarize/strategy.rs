use std::sync::Arc;

use crate::processing::types::{ExtractedText, LengthTier, Provenance, Summary, SummaryPrompt};
use crate::summarization::{SummarizationClient, SummarizationClientError};

use super::{build_extractive_summary, build_prompt};

/// Sends built prompts to the remote provider.
#[derive(Clone)]
pub struct GenerativeSummarizer {
    client: Arc<dyn SummarizationClient>,
}

impl GenerativeSummarizer {
    /// Wrap a provider client.
    pub fn new(client: Arc<dyn SummarizationClient>) -> Self {
        Self { client }
    }

    /// Provider name used in logs.
    pub fn provider(&self) -> &str {
        self.client.provider()
    }

    /// Issue a single generation call. Blank replies count as malformed responses.
    pub async fn summarize(&self, prompt: &SummaryPrompt) -> Result<String, SummarizationClientError> {
        let text = self.client.generate_summary(prompt.as_str()).await?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SummarizationClientError::InvalidResponse(
                "provider returned an empty summary".into(),
            ));
        }
        Ok(trimmed.to_string())
    }
}

/// Produce a summary, preferring the generative path and falling back locally on any failure.
///
/// The fallback always works from the full extracted text, never the truncated prompt.
pub async fn summarize_with_fallback(
    generator: Option<&GenerativeSummarizer>,
    extracted: &ExtractedText,
    tier: LengthTier,
) -> Summary {
    if let Some(generator) = generator {
        let prompt = build_prompt(extracted.as_str(), tier);
        tracing::debug!(
            provider = generator.provider(),
            tier = %tier,
            embedded_chars = prompt.embedded_chars(),
            truncated = prompt.is_truncated(),
            "Requesting generative summary"
        );
        match generator.summarize(&prompt).await {
            Ok(text) => {
                return Summary {
                    text,
                    provenance: Provenance::Generative,
                };
            }
            Err(error) => {
                tracing::warn!(
                    provider = generator.provider(),
                    kind = error.kind(),
                    error = %error,
                    "Generative summarization failed; falling back to extractive"
                );
            }
        }
    } else {
        tracing::debug!("No generative provider configured; using extractive summary");
    }

    let text = build_extractive_summary(extracted.as_str(), tier);
    tracing::info!(tier = %tier, chars = text.chars().count(), "Extractive summary produced");
    Summary {
        text,
        provenance: Provenance::Fallback,
    }
}
