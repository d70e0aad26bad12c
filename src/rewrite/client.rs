//! Chat-completions client for paragraph rewrites
//!
//! Speaks the OpenAI-compatible chat API (Groq by default). Requires the `ai`
//! feature to be enabled:
//! ```toml
//! pagegrade = { version = "0.3", features = ["ai"] }
//! ```

use super::{ContentRewriter, Rewrite, RewriteError, RewriteRequest};

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

const API_KEY_VAR: &str = "PAGEGRADE_AI_API_KEY";
const MODEL_VAR: &str = "PAGEGRADE_AI_MODEL";
const URL_VAR: &str = "PAGEGRADE_AI_URL";

/// Rewriter backed by a chat-completions endpoint
#[cfg_attr(not(feature = "ai"), allow(dead_code))]
pub struct ChatRewriter {
    api_key: String,
    model: String,
    base_url: String,
}

impl ChatRewriter {
    /// Create a client from `PAGEGRADE_AI_API_KEY`, with optional
    /// `PAGEGRADE_AI_MODEL` and `PAGEGRADE_AI_URL` overrides
    pub fn from_env() -> Result<Self, RewriteError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(RewriteError::NoApiKey)?;

        let mut client = Self::with_key(api_key);
        if let Ok(model) = std::env::var(MODEL_VAR) {
            client = client.model(&model);
        }
        if let Ok(url) = std::env::var(URL_VAR) {
            client = client.base_url(&url);
        }
        Ok(client)
    }

    /// Create a client with a specific API key
    pub fn with_key(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_URL.to_string(),
        }
    }

    /// Set the model to use
    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Send a prompt and return the raw message text
    #[cfg(feature = "ai")]
    pub fn send_request(&self, prompt: &str) -> Result<String, RewriteError> {
        use serde_json::json;

        let client = reqwest::blocking::Client::new();

        let body = json!({
            "model": self.model,
            "temperature": 0.3,
            "max_tokens": 400,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response = client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| RewriteError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RewriteError::RateLimited);
        }

        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(RewriteError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| RewriteError::InvalidResponse(e.to_string()))?;

        json["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .map(str::to_string)
            .ok_or_else(|| RewriteError::InvalidResponse("No content in response".to_string()))
    }

    /// Stub implementation when ai feature is disabled
    #[cfg(not(feature = "ai"))]
    pub fn send_request(&self, _prompt: &str) -> Result<String, RewriteError> {
        Err(RewriteError::FeatureDisabled)
    }
}

impl ContentRewriter for ChatRewriter {
    fn rewrite(&self, request: &RewriteRequest) -> Result<Rewrite, RewriteError> {
        let prompt = super::build_prompt(request);
        let content = self.send_request(&prompt)?;
        super::parse_response(&content)
    }
}

/// Check if the AI feature is available
pub fn is_ai_available() -> bool {
    cfg!(feature = "ai")
}
