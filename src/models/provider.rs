/// LLM provider enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI (GPT models)
    OpenAi,
    /// Google Gemini
    Gemini,
    /// Groq
    Groq,
    /// Anthropic Claude
    Anthropic,
    /// Ollama (local server)
    Ollama,
}

/// All providers, in menu order
pub const ALL_PROVIDERS: [Provider; 5] = [
    Provider::Gemini,
    Provider::Groq,
    Provider::Ollama,
    Provider::OpenAi,
    Provider::Anthropic,
];

impl Provider {
    /// Canonical key, used in ids, filenames and output metadata
    pub fn key(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Groq => "groq",
            Provider::Anthropic => "anthropic",
            Provider::Ollama => "ollama",
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Google Gemini",
            Provider::Groq => "Groq",
            Provider::Anthropic => "Anthropic Claude",
            Provider::Ollama => "Ollama (Local)",
        }
    }

    /// Model used when none is requested
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Gemini => "gemini-2.0-flash",
            Provider::Groq => "llama-3.1-70b-versatile",
            Provider::Anthropic => "claude-3-5-sonnet-20241022",
            Provider::Ollama => "llama3.2",
        }
    }

    /// Known models, first is the recommended one
    pub fn models(self) -> &'static [&'static str] {
        match self {
            Provider::OpenAi => &["gpt-4o", "gpt-4o-mini", "gpt-3.5-turbo"],
            Provider::Gemini => &["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-pro"],
            Provider::Groq => &["llama-3.1-70b-versatile", "mixtral-8x7b-32768"],
            Provider::Anthropic => &["claude-3-5-sonnet-20241022", "claude-3-haiku-20240307"],
            Provider::Ollama => &["llama3.2", "llama3.1", "mistral", "gemma2"],
        }
    }

    /// Whether a usable free tier exists
    pub fn is_free(self) -> bool {
        matches!(self, Provider::Gemini | Provider::Groq | Provider::Ollama)
    }

    /// Where to obtain an API key, `None` for providers that need none
    pub fn api_key_url(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("https://platform.openai.com/api-keys"),
            Provider::Gemini => Some("https://makersuite.google.com/app/apikey"),
            Provider::Groq => Some("https://console.groq.com/keys"),
            Provider::Anthropic => Some("https://console.anthropic.com/"),
            Provider::Ollama => None,
        }
    }

    /// One-line note shown in the provider listing
    pub fn notes(self) -> &'static str {
        match self {
            Provider::OpenAi => "Most reliable, moderate cost",
            Provider::Gemini => "FREE tier available! Fast and good quality",
            Provider::Groq => "FREE! Very fast, good for testing",
            Provider::Anthropic => "High quality, moderate cost",
            Provider::Ollama => "100% FREE! Runs on your computer. Install from https://ollama.com",
        }
    }

    /// Environment variable holding the API key, `None` for Ollama
    pub fn env_key(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("OPENAI_API_KEY"),
            Provider::Gemini => Some("GEMINI_API_KEY"),
            Provider::Groq => Some("GROQ_API_KEY"),
            Provider::Anthropic => Some("ANTHROPIC_API_KEY"),
            Provider::Ollama => None,
        }
    }

    pub fn requires_api_key(self) -> bool {
        self.env_key().is_some()
    }

    /// Parse the canonical key (exact match)
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "openai" => Some(Provider::OpenAi),
            "gemini" => Some(Provider::Gemini),
            "groq" => Some(Provider::Groq),
            "anthropic" => Some(Provider::Anthropic),
            "ollama" => Some(Provider::Ollama),
            _ => None,
        }
    }

    /// Forgiving lookup (case-insensitive, accepts common spellings)
    pub fn find(s: &str) -> Option<Self> {
        let s_lower = s.trim().to_lowercase();

        if let Some(provider) = Self::from_key(&s_lower) {
            return Some(provider);
        }

        if s_lower.contains("openai") || s_lower.contains("gpt") {
            return Some(Provider::OpenAi);
        }
        if s_lower.contains("gemini") || s_lower.contains("google") {
            return Some(Provider::Gemini);
        }
        if s_lower.contains("groq") {
            return Some(Provider::Groq);
        }
        if s_lower.contains("anthropic") || s_lower.contains("claude") {
            return Some(Provider::Anthropic);
        }
        if s_lower.contains("ollama") || s_lower.contains("local") {
            return Some(Provider::Ollama);
        }

        None
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_exact() {
        assert_eq!(Provider::from_key("gemini"), Some(Provider::Gemini));
        assert_eq!(Provider::from_key("ollama"), Some(Provider::Ollama));
        assert_eq!(Provider::from_key("Gemini"), None);
        assert_eq!(Provider::from_key("mistral"), None);
    }

    #[test]
    fn test_find_is_forgiving() {
        assert_eq!(Provider::find("  GEMINI "), Some(Provider::Gemini));
        assert_eq!(Provider::find("Google Gemini"), Some(Provider::Gemini));
        assert_eq!(Provider::find("claude"), Some(Provider::Anthropic));
        assert_eq!(Provider::find("gpt-4o"), Some(Provider::OpenAi));
        assert_eq!(Provider::find("llama"), None);
    }

    #[test]
    fn test_key_round_trips() {
        for provider in ALL_PROVIDERS {
            assert_eq!(Provider::from_key(provider.key()), Some(provider));
        }
    }

    #[test]
    fn test_only_ollama_skips_api_key() {
        for provider in ALL_PROVIDERS {
            assert_eq!(
                provider.requires_api_key(),
                provider != Provider::Ollama,
                "{}",
                provider.key()
            );
        }
    }

    #[test]
    fn test_env_key_naming() {
        assert_eq!(Provider::Gemini.env_key(), Some("GEMINI_API_KEY"));
        assert_eq!(Provider::Anthropic.env_key(), Some("ANTHROPIC_API_KEY"));
        assert_eq!(Provider::Ollama.env_key(), None);
    }

    #[test]
    fn test_default_model_is_listed() {
        for provider in ALL_PROVIDERS {
            assert!(
                provider.models().contains(&provider.default_model()),
                "{} default model missing from its model list",
                provider.key()
            );
        }
    }
}
