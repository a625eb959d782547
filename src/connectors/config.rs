use serde::{Deserialize, Serialize};

/// Configuration for external service connectors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorConfig {
    #[serde(default)]
    pub llm_service: LlmServiceConfig,
}

/// LLM provider connector configuration.
///
/// The API key is not part of the configuration: every request carries the
/// caller's own key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmServiceConfig {
    /// Base URL of an OpenAI-compatible API (e.g., https://api.groq.com/openai/v1)
    #[serde(default = "LlmServiceConfig::default_base_url")]
    pub base_url: String,
    /// Model identifier sent with every completion request
    #[serde(default = "LlmServiceConfig::default_model")]
    pub model: String,
    /// HTTP request timeout in seconds
    #[serde(default = "LlmServiceConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl LlmServiceConfig {
    fn default_base_url() -> String {
        "https://api.groq.com/openai/v1".to_string()
    }

    fn default_model() -> String {
        "mixtral-8x7b-32768".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        60
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for LlmServiceConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_ignores_trailing_slash() {
        let mut config = LlmServiceConfig::default();
        assert_eq!(
            config.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );

        config.base_url = "http://127.0.0.1:9000/".to_string();
        assert_eq!(
            config.completions_url(),
            "http://127.0.0.1:9000/chat/completions"
        );
    }
}
