use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::catalog::WordRecord;
use crate::services::word_content::{build_prompt, parse_response, ParsedContent};

pub const SYSTEM_INSTRUCTION: &str = "You are an expert GRE vocabulary tutor. Generate educational content for word learning in JSON format.";

const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
const OPENAI_MAX_TOKENS: u32 = 1500;

pub const ZHIPU_ENDPOINT: &str =
    "https://open.bigmodel.cn/api/paas/v3/model-api/chatglm_turbo/invoke";
const ZHIPU_MAX_TOKENS: u32 = 1000;
const ZHIPU_TIMEOUT: Duration = Duration::from_secs(10);

const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Zhipu,
    None,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Zhipu => "zhipu",
            Self::None => "none",
        }
    }

    /// Unknown or missing selectors mean no provider.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("openai") => Self::OpenAi,
            Some("zhipu") => Self::Zhipu,
            _ => Self::None,
        }
    }
}

/// Provider selection and credentials, resolved once at startup.
#[derive(Clone)]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    pub model_name: String,
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model_name", &self.model_name)
            .field("api_key_set", &self.api_key.is_some())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = ProviderKind::parse(get("AI_PROVIDER").as_deref());
        let model_name = get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

        let (api_key, endpoint) = match provider {
            ProviderKind::OpenAi => (
                get("OPENAI_API_KEY"),
                normalize_endpoint(
                    get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string()),
                ),
            ),
            ProviderKind::Zhipu => (
                get("ZHIPU_API_KEY"),
                get("ZHIPU_API_ENDPOINT").unwrap_or_else(|| ZHIPU_ENDPOINT.to_string()),
            ),
            ProviderKind::None => (None, String::new()),
        };

        Self {
            provider,
            model_name,
            api_key,
            endpoint,
        }
    }

    pub fn disabled() -> Self {
        Self {
            provider: ProviderKind::None,
            model_name: DEFAULT_OPENAI_MODEL.to_string(),
            api_key: None,
            endpoint: String::new(),
        }
    }

    fn usable_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no AI provider configured")]
    Disabled,
    #[error("provider not configured: {0}")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response body decode failed: {0}")]
    Decode(serde_json::Error),
    #[error("empty response")]
    EmptyChoices,
    #[error("generated content is not valid JSON: {0}")]
    Malformed(serde_json::Error),
}

impl GenerationError {
    /// The provider answered but its content could not be normalized.
    pub fn is_malformed_content(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

/// One attempt at generating content for a word through a single provider.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(
        &self,
        word: &str,
        record: &WordRecord,
    ) -> Result<ParsedContent, GenerationError>;
}

pub fn provider_for(config: &ProviderConfig) -> Arc<dyn ContentProvider> {
    match config.provider {
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(config)),
        ProviderKind::Zhipu => Arc::new(ZhipuProvider::new(config)),
        ProviderKind::None => Arc::new(DisabledProvider),
    }
}

pub struct DisabledProvider;

#[async_trait]
impl ContentProvider for DisabledProvider {
    fn name(&self) -> &'static str {
        ProviderKind::None.as_str()
    }

    async fn attempt(
        &self,
        _word: &str,
        _record: &WordRecord,
    ) -> Result<ParsedContent, GenerationError> {
        Err(GenerationError::Disabled)
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completions. No explicit timeout: the client
/// default applies.
pub struct OpenAiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            config: config.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ContentProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        ProviderKind::OpenAi.as_str()
    }

    async fn attempt(
        &self,
        word: &str,
        record: &WordRecord,
    ) -> Result<ParsedContent, GenerationError> {
        let api_key = self
            .config
            .usable_key()
            .ok_or(GenerationError::NotConfigured("OPENAI_API_KEY"))?;

        let prompt = build_prompt(word, record);
        let payload = ChatRequest {
            model: &self.config.model_name,
            messages: [
                ChatMessage { role: "system", content: SYSTEM_INSTRUCTION },
                ChatMessage { role: "user", content: &prompt },
            ],
            max_tokens: OPENAI_MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::HttpStatus { status, body });
        }

        let bytes = resp.bytes().await?;
        let response: ChatResponse =
            serde_json::from_slice(&bytes).map_err(GenerationError::Decode)?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyChoices)?;
        let content = choice.message.content.unwrap_or_default();

        parse_response(&content).map_err(GenerationError::Malformed)
    }
}

/// Zhipu ChatGLM invoke API. Requires `ZHIPU_API_KEY`; bounded by a
/// 10 second timeout.
pub struct ZhipuProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl ZhipuProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(ZHIPU_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            config: config.clone(),
            client,
        }
    }
}

#[async_trait]
impl ContentProvider for ZhipuProvider {
    fn name(&self) -> &'static str {
        ProviderKind::Zhipu.as_str()
    }

    async fn attempt(
        &self,
        word: &str,
        record: &WordRecord,
    ) -> Result<ParsedContent, GenerationError> {
        let api_key = self
            .config
            .usable_key()
            .ok_or(GenerationError::NotConfigured("ZHIPU_API_KEY"))?;

        let payload = serde_json::json!({
            "prompt": build_prompt(word, record),
            "temperature": TEMPERATURE,
            "max_tokens": ZHIPU_MAX_TOKENS,
        });

        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::HttpStatus { status, body });
        }

        let bytes = resp.bytes().await?;
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(GenerationError::Decode)?;
        let content = zhipu_content(&body)?;

        parse_response(content).map_err(GenerationError::Malformed)
    }
}

/// `data.choices[0].content`; absent keys read as empty content, an empty
/// `choices` list is an error.
fn zhipu_content(body: &serde_json::Value) -> Result<&str, GenerationError> {
    let Some(choices) = body.get("data").and_then(|data| data.get("choices")) else {
        return Ok("");
    };
    let first = choices
        .as_array()
        .and_then(|items| items.first())
        .ok_or(GenerationError::EmptyChoices)?;

    Ok(first
        .get("content")
        .and_then(|value| value.as_str())
        .unwrap_or(""))
}

fn normalize_endpoint(endpoint: String) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.ends_with("/v1") || trimmed.contains("/v1/") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/v1")
    }
}
