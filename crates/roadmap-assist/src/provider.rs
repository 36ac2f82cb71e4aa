//! LLM provider abstraction for the learning assistant.
//!
//! Supports OpenAI-compatible chat completions (GPT-4o-mini by default) and
//! the Anthropic Messages API. Uses blocking HTTP via `ureq`; nothing here
//! needs an async runtime.

use roadmap_core::config::AssistantConfig;
use serde_json::Value;
use std::time::Duration;

/// Errors from LLM provider calls.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("response parse error: {0}")]
    Parse(String),
    #[error("empty response from LLM")]
    EmptyResponse,
    #[error("failed to read audio: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown provider: '{name}'. Available: {available}")]
    UnknownProvider { name: String, available: String },
    #[error("{provider} needs an API key: set {var}")]
    MissingApiKey { provider: String, var: &'static str },
}

impl ProviderError {
    /// Whether the same request might succeed later. Client errors other
    /// than rate limiting never will.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Api { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Http(_) | ProviderError::Parse(_) | ProviderError::EmptyResponse => true,
            ProviderError::Io(_)
            | ProviderError::UnknownProvider { .. }
            | ProviderError::MissingApiKey { .. } => false,
        }
    }
}

impl From<ureq::Error> for ProviderError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => ProviderError::Api {
                status,
                message: format!("HTTP status {}", status),
            },
            other => ProviderError::Http(other.to_string()),
        }
    }
}

/// One chat completion: a system prompt, a user message, and sampling limits.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A completed LLM response.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The text content of the response.
    pub text: String,
    /// Input tokens used (from API response, if reported).
    pub input_tokens: Option<u64>,
    /// Output tokens used (from API response, if reported).
    pub output_tokens: Option<u64>,
}

/// Abstraction over LLM API providers.
pub trait LlmProvider: Send + Sync {
    /// Send one completion request.
    fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse, ProviderError>;

    /// The model name (for display/logging).
    fn model_name(&self) -> &str;
}

pub(crate) fn http_agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::new_with_config(
        ureq::config::Config::builder()
            .timeout_global(Some(timeout))
            // Error statuses are read like any other so their body reaches the caller.
            .http_status_as_error(false)
            .build(),
    )
}

/// Read the whole response body. A non-2xx status becomes
/// [`ProviderError::Api`] carrying the API's own message.
pub(crate) fn read_body(
    response: &mut ureq::http::Response<ureq::Body>,
) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ProviderError::Parse(e.to_string()))?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(status_error(status.as_u16(), &body))
    }
}

fn status_error(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| error_message(&json))
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .unwrap_or_else(|| format!("HTTP status {}", status));
    ProviderError::Api { status, message }
}

/// `error.message`, or `error` itself when it is a bare string.
fn error_message(json: &Value) -> Option<String> {
    let err = json.get("error")?;
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| err.as_str())
        .unwrap_or("unknown error");
    Some(message.to_string())
}

/// An error object inside a 2xx body.
fn api_error(json: &Value) -> Option<ProviderError> {
    Some(ProviderError::Api {
        status: 400,
        message: error_message(json)?,
    })
}

fn parse_json(body: &str) -> Result<Value, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))
}

fn usage(json: &Value, key: &str) -> Option<u64> {
    json.get("usage")
        .and_then(|u| u.get(key))
        .and_then(Value::as_u64)
}

// ---------------------------------------------------------------------------
// Anthropic Messages API
// ---------------------------------------------------------------------------

/// Anthropic provider using the Messages API.
#[cfg(feature = "anthropic")]
pub struct AnthropicProvider {
    api_key: String,
    model: String,
    agent: ureq::Agent,
}

#[cfg(feature = "anthropic")]
impl AnthropicProvider {
    pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";
    const API_URL: &str = "https://api.anthropic.com/v1/messages";

    pub fn new(api_key: String, model: Option<String>, timeout: Duration) -> Self {
        Self {
            api_key,
            model: model.unwrap_or_else(|| Self::DEFAULT_MODEL.to_string()),
            agent: http_agent(timeout),
        }
    }

    fn request_body(&self, request: &CompletionRequest) -> Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "system": request.system,
            "messages": [
                {"role": "user", "content": request.user}
            ]
        })
    }
}

#[cfg(feature = "anthropic")]
impl LlmProvider for AnthropicProvider {
    fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse, ProviderError> {
        let mut response = self
            .agent
            .post(Self::API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .send_json(self.request_body(request))?;

        let json = parse_json(&read_body(&mut response)?)?;
        parse_anthropic(&json)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Extract the first text block from a Messages API response.
#[cfg(feature = "anthropic")]
fn parse_anthropic(json: &Value) -> Result<LlmResponse, ProviderError> {
    if let Some(err) = api_error(json) {
        return Err(err);
    }

    let text = json
        .get("content")
        .and_then(|c| c.as_array())
        .and_then(|arr| {
            arr.iter()
                .find_map(|block| block.get("text").and_then(|t| t.as_str()))
        })
        .filter(|t| !t.trim().is_empty())
        .ok_or(ProviderError::EmptyResponse)?
        .to_string();

    Ok(LlmResponse {
        text,
        input_tokens: usage(json, "input_tokens"),
        output_tokens: usage(json, "output_tokens"),
    })
}

// ---------------------------------------------------------------------------
// OpenAI Chat Completions API
// ---------------------------------------------------------------------------

/// OpenAI-compatible provider (works with OpenAI, Azure, local proxies).
#[cfg(feature = "openai")]
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    agent: ureq::Agent,
}

#[cfg(feature = "openai")]
impl OpenAiProvider {
    /// Default model: GPT-4o-mini.
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key,
            model: model.unwrap_or_else(|| Self::DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            agent: http_agent(timeout),
        }
    }

    fn request_body(&self, request: &CompletionRequest) -> Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.user}
            ]
        })
    }
}

#[cfg(feature = "openai")]
impl LlmProvider for OpenAiProvider {
    fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse, ProviderError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        let mut response = self
            .agent
            .post(&url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .send_json(self.request_body(request))?;

        let json = parse_json(&read_body(&mut response)?)?;
        parse_openai(&json)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Extract `choices[0].message.content` from a chat completion response.
#[cfg(feature = "openai")]
fn parse_openai(json: &Value) -> Result<LlmResponse, ProviderError> {
    if let Some(err) = api_error(json) {
        return Err(err);
    }

    let text = json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
        .and_then(|c| c.as_str())
        .filter(|t| !t.trim().is_empty())
        .ok_or(ProviderError::EmptyResponse)?
        .to_string();

    Ok(LlmResponse {
        text,
        input_tokens: usage(json, "prompt_tokens"),
        output_tokens: usage(json, "completion_tokens"),
    })
}

/// Create a provider by name.
pub fn create_provider(
    provider_name: &str,
    api_key: &str,
    model: Option<&str>,
    base_url: Option<&str>,
    timeout: Duration,
) -> Result<Box<dyn LlmProvider>, ProviderError> {
    match provider_name {
        #[cfg(feature = "anthropic")]
        "anthropic" => Ok(Box::new(AnthropicProvider::new(
            api_key.to_string(),
            model.map(String::from),
            timeout,
        ))),
        #[cfg(feature = "openai")]
        "openai" => Ok(Box::new(OpenAiProvider::new(
            api_key.to_string(),
            model.map(String::from),
            base_url.map(String::from),
            timeout,
        ))),
        other => Err(ProviderError::UnknownProvider {
            name: other.to_string(),
            available: available_providers().join(", "),
        }),
    }
}

/// Create the configured provider, reading its API key from the environment.
pub fn provider_from_config(config: &AssistantConfig) -> Result<Box<dyn LlmProvider>, ProviderError> {
    let name = config.provider.as_str();
    let var = api_key_env(name).ok_or_else(|| ProviderError::UnknownProvider {
        name: name.to_string(),
        available: available_providers().join(", "),
    })?;
    let api_key = read_api_key(name, var)?;
    create_provider(
        name,
        &api_key,
        config.model.as_deref(),
        config.base_url.as_deref(),
        Duration::from_secs(config.timeout_secs),
    )
}

pub(crate) fn read_api_key(provider: &str, var: &'static str) -> Result<String, ProviderError> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ProviderError::MissingApiKey {
            provider: provider.to_string(),
            var,
        }),
    }
}

/// Environment variable holding the API key for a provider.
pub fn api_key_env(provider_name: &str) -> Option<&'static str> {
    match provider_name {
        "openai" => Some("OPENAI_API_KEY"),
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        _ => None,
    }
}

/// List compiled-in provider names.
pub fn available_providers() -> Vec<&'static str> {
    vec![
        #[cfg(feature = "anthropic")]
        "anthropic",
        #[cfg(feature = "openai")]
        "openai",
    ]
}
