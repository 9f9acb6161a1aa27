//! LLM provider clients
//!
//! ## Wire formats
//! - OpenAI and Groq speak the OpenAI chat-completions protocol, called
//!   through the `async-openai` crate with a per-provider base URL
//! - Gemini, Anthropic and Ollama each have their own JSON shape, called
//!   through `reqwest` directly

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, Result};
use crate::models::Provider;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Instruction sent with every question: answer with the letter only
const SYSTEM_PROMPT: &str = "Você responde questões do vestibular da UFRGS.\n\
IMPORTANTE: Responda APENAS com a letra da alternativa correta (A, B, C, D ou E).\n\
NÃO forneça explicações, justificativas ou texto adicional.\n\
Responda somente: A, B, C, D ou E.";

/// Client for a single provider/model pair
pub struct LlmClient {
    provider: Provider,
    model: String,
    api_key: Option<String>,
    ollama_base_url: String,
    temperature: f32,
    max_tokens: u32,
    http: reqwest::Client,
    /// Present for the OpenAI-compatible providers only
    openai: Option<Client<OpenAIConfig>>,
}

impl LlmClient {
    /// Build a client, failing fast when the provider needs a key and none
    /// was resolved.
    pub fn new(
        provider: Provider,
        model: impl Into<String>,
        api_key: Option<String>,
        config: &Config,
    ) -> Result<Self> {
        let api_key = api_key.filter(|key| !key.trim().is_empty());

        if provider.requires_api_key() && api_key.is_none() {
            return Err(AppError::Api(ApiError::MissingApiKey {
                provider: provider.key(),
                env_var: provider.env_key().unwrap_or_default(),
            }));
        }

        let openai = match provider {
            Provider::OpenAi | Provider::Groq => {
                let api_base = match provider {
                    Provider::Groq => GROQ_API_BASE,
                    _ => OPENAI_API_BASE,
                };
                let openai_config = OpenAIConfig::new()
                    .with_api_key(api_key.as_deref().unwrap_or_default())
                    .with_api_base(api_base);
                Some(Client::with_config(openai_config))
            }
            _ => None,
        };

        Ok(Self {
            provider,
            model: model.into(),
            api_key,
            ollama_base_url: config.ollama_base_url.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            http: reqwest::Client::new(),
            openai,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Submit one question and return the trimmed answer.
    pub async fn answer_question(&self, question_text: &str) -> Result<String> {
        debug!(
            "calling {} (model {}), question is {} chars",
            self.provider.key(),
            self.model,
            question_text.len()
        );

        let answer = match self.provider {
            Provider::OpenAi | Provider::Groq => self.chat_openai_compatible(question_text).await,
            Provider::Gemini => self.chat_gemini(question_text).await,
            Provider::Anthropic => self.chat_anthropic(question_text).await,
            Provider::Ollama => self.chat_ollama(question_text).await,
        }?;

        let answer = answer.trim().to_string();
        if answer.is_empty() {
            return Err(self.empty_response());
        }

        debug!("{} answered: {}", self.provider.key(), truncate(&answer, 40));
        Ok(answer)
    }

    // ========== OpenAI-compatible (OpenAI, Groq) ==========

    async fn chat_openai_compatible(&self, question: &str) -> Result<String> {
        let client = self
            .openai
            .as_ref()
            .ok_or_else(|| AppError::Other("OpenAI client not configured".to_string()))?;

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()
            .map_err(|e| AppError::api_request_failed(self.provider.key(), e))?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(question)
            .build()
            .map_err(|e| AppError::api_request_failed(self.provider.key(), e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| AppError::api_request_failed(self.provider.key(), e))?;

        let response = client.chat().create(request).await.map_err(|e| {
            warn!("{} call failed: {}", self.provider.key(), e);
            AppError::api_request_failed(self.provider.key(), e)
        })?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| self.empty_response())
    }

    // ========== Gemini ==========

    async fn chat_gemini(&self, question: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            GEMINI_API_BASE,
            self.model,
            self.api_key.as_deref().unwrap_or_default()
        );

        // Gemini takes the instruction inline with the question
        let prompt = format!("{}\n\n{}", SYSTEM_PROMPT, question);
        let payload = serde_json::json!({
            "contents": [ { "parts": [ { "text": prompt } ] } ]
        });

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(self.provider.key(), e))?;
        let response = check_status(self.provider.key(), response).await?;

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::api_request_failed(self.provider.key(), e))?;

        gemini_answer(body).ok_or_else(|| self.empty_response())
    }

    // ========== Anthropic ==========

    async fn chat_anthropic(&self, question: &str) -> Result<String> {
        let url = format!("{}/v1/messages", ANTHROPIC_API_BASE);
        let payload = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": SYSTEM_PROMPT,
            "messages": [ { "role": "user", "content": question } ],
        });

        let response = self
            .http
            .post(&url)
            .header("x-api-key", self.api_key.as_deref().unwrap_or_default())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(self.provider.key(), e))?;
        let response = check_status(self.provider.key(), response).await?;

        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AppError::api_request_failed(self.provider.key(), e))?;

        anthropic_answer(body).ok_or_else(|| self.empty_response())
    }

    // ========== Ollama ==========

    async fn chat_ollama(&self, question: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.ollama_base_url);
        let payload = serde_json::json!({
            "model": self.model,
            "prompt": format!("{}\n\n{}", SYSTEM_PROMPT, question),
            "stream": false,
        });

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(self.provider.key(), e))?;
        let response = check_status(self.provider.key(), response).await?;

        let body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| AppError::api_request_failed(self.provider.key(), e))?;

        if body.response.is_empty() {
            return Err(self.empty_response());
        }
        Ok(body.response)
    }

    fn empty_response(&self) -> AppError {
        AppError::Api(ApiError::EmptyResponse {
            provider: self.provider.key(),
        })
    }
}

// ========== Response bodies ==========

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

// ========== Helpers ==========

fn gemini_answer(response: GeminiResponse) -> Option<String> {
    let part = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?;
    if part.text.is_empty() {
        None
    } else {
        Some(part.text)
    }
}

fn anthropic_answer(response: AnthropicResponse) -> Option<String> {
    let block = response.content.into_iter().next()?;
    if block.text.is_empty() {
        None
    } else {
        Some(block.text)
    }
}

async fn check_status(provider: &'static str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::Api(ApiError::BadStatus {
        provider,
        status: status.as_u16(),
        body: truncate(&body, 200),
    }))
}

fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
