use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
const DEFAULT_SUMMARIZATION_TIMEOUT_SECS: u64 = 60;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the docbrief server and CLI.
///
/// Built once near process start and handed by reference to the constructors that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Remote provider used for generative summaries.
    pub summarization_provider: SummarizationProvider,
    /// Model identifier passed to the provider.
    pub summarization_model: String,
    /// Credential for the Gemini provider.
    pub gemini_api_key: Option<String>,
    /// Base URL of the Gemini REST API.
    pub gemini_base_url: String,
    /// Base URL of the Ollama runtime.
    pub ollama_url: String,
    /// Upper bound on a single remote summarization round-trip.
    pub summarization_timeout: Duration,
    /// Explicit location of the tesseract binary; resolved from `PATH` when absent.
    pub tesseract_path: Option<PathBuf>,
}

/// Supported generative summarization backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummarizationProvider {
    /// Generative path disabled; every summary is extractive.
    None,
    /// Hosted Google Gemini API.
    Gemini,
    /// Local Ollama runtime.
    Ollama,
}

impl SummarizationProvider {
    fn default_model(self) -> &'static str {
        match self {
            Self::Ollama => DEFAULT_OLLAMA_MODEL,
            Self::Gemini | Self::None => DEFAULT_GEMINI_MODEL,
        }
    }
}

impl std::str::FromStr for SummarizationProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

impl Config {
    /// Load configuration from the process environment, honouring a `.env` file when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let summarization_provider = match optional("SUMMARIZATION_PROVIDER") {
            Some(value) => value
                .parse()
                .map_err(|()| ConfigError::InvalidValue("SUMMARIZATION_PROVIDER".into()))?,
            None => SummarizationProvider::Gemini,
        };

        let summarization_timeout = optional("SUMMARIZATION_TIMEOUT_SECS")
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| ConfigError::InvalidValue("SUMMARIZATION_TIMEOUT_SECS".into()))
            })
            .transpose()?
            .unwrap_or(DEFAULT_SUMMARIZATION_TIMEOUT_SECS);

        Ok(Self {
            server_port: optional("SERVER_PORT")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
            summarization_provider,
            summarization_model: optional("SUMMARIZATION_MODEL")
                .unwrap_or_else(|| summarization_provider.default_model().to_string()),
            gemini_api_key: optional("GEMINI_API_KEY"),
            gemini_base_url: optional("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string()),
            ollama_url: optional("OLLAMA_URL").unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            summarization_timeout: Duration::from_secs(summarization_timeout),
            tesseract_path: optional("TESSERACT_PATH").map(PathBuf::from),
        })
    }

    /// Load configuration and log the effective settings without leaking credentials.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_env()?;
        tracing::debug!(
            server_port = ?config.server_port,
            provider = ?config.summarization_provider,
            model = %config.summarization_model,
            gemini_key_present = config.gemini_api_key.is_some(),
            timeout_secs = config.summarization_timeout.as_secs(),
            tesseract_path = ?config.tesseract_path,
            "Loaded configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = load(&[]).expect("config");
        assert_eq!(config.server_port, None);
        assert_eq!(config.summarization_provider, SummarizationProvider::Gemini);
        assert_eq!(config.summarization_model, "gemini-1.5-flash");
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.summarization_timeout, Duration::from_secs(60));
        assert!(config.tesseract_path.is_none());
    }

    #[test]
    fn ollama_provider_selects_its_default_model() {
        let config = load(&[
            ("SUMMARIZATION_PROVIDER", "Ollama"),
            ("OLLAMA_URL", "http://ollama:11434"),
        ])
        .expect("config");
        assert_eq!(config.summarization_provider, SummarizationProvider::Ollama);
        assert_eq!(config.summarization_model, "llama3.2");
        assert_eq!(config.ollama_url, "http://ollama:11434");
    }

    #[test]
    fn blank_values_are_treated_as_unset() {
        let config = load(&[("GEMINI_API_KEY", "   "), ("SERVER_PORT", "")]).expect("config");
        assert!(config.gemini_api_key.is_none());
        assert!(config.server_port.is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("SERVER_PORT", "eighty")]),
            Err(ConfigError::InvalidValue(key)) if key == "SERVER_PORT"
        ));
        assert!(matches!(
            load(&[("SUMMARIZATION_PROVIDER", "openai")]),
            Err(ConfigError::InvalidValue(key)) if key == "SUMMARIZATION_PROVIDER"
        ));
        assert!(matches!(
            load(&[("SUMMARIZATION_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
