use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::{SummarizationClient, SummarizationClientError};

/// Google Gemini `generateContent` client.
pub struct GeminiSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiSummarizationClient {
    /// Create a client for `model` at `base_url`, authenticating with `api_key`.
    pub fn new(http: Client, base_url: String, model: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            model,
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[async_trait]
impl SummarizationClient for GeminiSummarizationClient {
    async fn generate_summary(&self, prompt: &str) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.2,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::from_transport("Gemini", &self.base_url, error)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = format!("Gemini returned {status}: {body}");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    SummarizationClientError::Authentication(detail)
                }
                StatusCode::TOO_MANY_REQUESTS => SummarizationClientError::QuotaExceeded(detail),
                _ => SummarizationClientError::GenerationFailed(detail),
            });
        }

        let body: GenerateContentResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode Gemini response: {error}"
            ))
        })?;

        let Some(candidate) = body.candidates.into_iter().next() else {
            return Err(SummarizationClientError::InvalidResponse(
                "Gemini response contained no candidates".into(),
            ));
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(SummarizationClientError::InvalidResponse(format!(
                "Gemini candidate carried no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text.trim().to_string())
    }

    fn provider(&self) -> &str {
        "gemini"
    }
}
