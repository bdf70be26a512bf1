//! Substitutable provider doubles for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{SummarizationClient, SummarizationClientError};

/// Replies with a fixed text and records every prompt it receives.
pub(crate) struct RecordingClient {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingClient {
    pub(crate) fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log").clone()
    }
}

#[async_trait]
impl SummarizationClient for RecordingClient {
    async fn generate_summary(&self, prompt: &str) -> Result<String, SummarizationClientError> {
        self.prompts
            .lock()
            .expect("prompt log")
            .push(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn provider(&self) -> &str {
        "recording"
    }
}

/// Fails every call with the configured error and counts the attempts.
pub(crate) struct FailingClient {
    error: SummarizationClientError,
    calls: AtomicUsize,
}

impl FailingClient {
    pub(crate) fn new(error: SummarizationClientError) -> Arc<Self> {
        Arc::new(Self {
            error,
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SummarizationClient for FailingClient {
    async fn generate_summary(&self, _prompt: &str) -> Result<String, SummarizationClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    fn provider(&self) -> &str {
        "failing"
    }
}
