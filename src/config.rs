/// Runtime configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Fixed delay between provider calls, in milliseconds
    pub request_delay_ms: u64,
    /// Sampling temperature for providers that accept one
    pub temperature: f32,
    /// Completion token cap for providers that accept one
    pub max_tokens: u32,
    /// Base URL of a local Ollama server
    pub ollama_base_url: String,
    /// Log search/answer details per question
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_delay_ms: 500,
            temperature: 0.3,
            max_tokens: 1000,
            ollama_base_url: "http://localhost:11434".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            request_delay_ms: std::env::var("REQUEST_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_delay_ms),
            temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.temperature),
            max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_tokens),
            ollama_base_url: std::env::var("OLLAMA_BASE_URL").unwrap_or(default.ollama_base_url),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.request_delay_ms, 500);
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.ollama_base_url, "http://localhost:11434");
        assert!(!config.verbose_logging);
    }
}
