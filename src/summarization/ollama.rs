use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::{SummarizationClient, SummarizationClientError};

/// Client for a local Ollama runtime.
pub struct OllamaSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizationClient {
    /// Create a client for `model` served at `base_url`.
    pub fn new(http: Client, base_url: String, model: String) -> Self {
        Self {
            http,
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl SummarizationClient for OllamaSummarizationClient {
    async fn generate_summary(&self, prompt: &str) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                // Lower temperature for steadier summaries.
                "temperature": 0.2,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::from_transport("Ollama", &self.base_url, error)
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "Ollama endpoint {} returned 404 (is model '{}' pulled?)",
                self.endpoint(),
                self.model
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode Ollama response: {error}"
            ))
        })?;

        if !body.done {
            return Err(SummarizationClientError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        Ok(body.response.trim().to_string())
    }

    fn provider(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn client_for(server: &MockServer) -> OllamaSummarizationClient {
        OllamaSummarizationClient::new(
            Client::builder()
                .user_agent("docbrief-test")
                .build()
                .expect("client"),
            server.base_url(),
            "llama3.2".into(),
        )
    }

    #[tokio::test]
    async fn ollama_client_handles_successful_response() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/generate")
                    .json_body_partial(r#"{ "model": "llama3.2", "stream": false }"#);
                then.status(200).json_body(json!({
                    "response": " Summary text \n",
                    "done": true
                }));
            })
            .await;

        let summary = client_for(&server)
            .generate_summary("Summarize")
            .await
            .expect("summary");

        mock.assert_async().await;
        assert_eq!(summary, "Summary text");
    }

    #[tokio::test]
    async fn ollama_client_handles_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(500).body("boom");
            })
            .await;

        let error = client_for(&server)
            .generate_summary("Summarize")
            .await
            .expect_err("error response");

        assert!(
            matches!(&error, SummarizationClientError::GenerationFailed(message) if message.contains("500"))
        );
    }

    #[tokio::test]
    async fn missing_model_is_reported_as_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(404);
            })
            .await;

        let error = client_for(&server)
            .generate_summary("Summarize")
            .await
            .expect_err("404");
        assert_eq!(error.kind(), "unavailable");
    }

    #[tokio::test]
    async fn incomplete_response_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200)
                    .json_body(json!({ "response": "partial", "done": false }));
            })
            .await;

        let error = client_for(&server)
            .generate_summary("Summarize")
            .await
            .expect_err("incomplete");
        assert_eq!(error.kind(), "malformed-response");
    }
}
