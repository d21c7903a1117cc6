//! Shared chat-completions codec for OpenAI-compatible vendors.
//!
//! xAI, Together AI, and Mistral all speak the `/v1/chat/completions` dialect
//! with bearer auth; only the base URL differs. Response content may be a
//! plain string or a list of content blocks, so parsing flattens both forms.

use crate::error::{Error, Result};
use crate::llm::options::ResponseOptions;
use crate::llm::registry::Model;

use super::{Provider, ProviderRequest, RequestAdapter, bearer_headers};

pub(crate) struct ChatCompletionsAdapter {
    provider: Provider,
}

pub(crate) static XAI: ChatCompletionsAdapter = ChatCompletionsAdapter {
    provider: Provider::Xai,
};
pub(crate) static TOGETHER: ChatCompletionsAdapter = ChatCompletionsAdapter {
    provider: Provider::Together,
};
pub(crate) static MISTRAL: ChatCompletionsAdapter = ChatCompletionsAdapter {
    provider: Provider::Mistral,
};

/// Flatten string-or-block-array message content into plain text.
fn flatten_content(content: &serde_json::Value) -> String {
    match content {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items.iter().map(flatten_content).collect(),
        // Block shapes vary across vendors; text lives under one of these.
        serde_json::Value::Object(map) => ["text", "content", "message", "output"]
            .iter()
            .find_map(|key| map.get(*key))
            .map(flatten_content)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

impl RequestAdapter for ChatCompletionsAdapter {
    fn build_request(
        &self,
        model: &Model,
        prompt: &str,
        options: &ResponseOptions,
        api_key: &str,
        base_url: &str,
    ) -> Result<ProviderRequest> {
        let mut body = serde_json::json!({
            "model": model.full_name,
            "messages": [{"role": "user", "content": prompt}],
        });
        if let Some(temperature) = options.temperature() {
            body["temperature"] = temperature;
        }
        if let Some(max_tokens) = options.max_tokens() {
            body["max_tokens"] = serde_json::Value::from(max_tokens);
        }
        if let Some(top_p) = options.get("top_p") {
            body["top_p"] = top_p.to_json();
        }

        Ok(ProviderRequest {
            url: format!("{base_url}/v1/chat/completions"),
            headers: bearer_headers(api_key, self.provider)?,
            body,
        })
    }

    fn parse_response(&self, raw: &serde_json::Value) -> Result<String> {
        if let Some(message) = raw
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return Err(Error::provider(self.provider, message));
        }

        let content = raw
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .ok_or_else(|| {
                Error::provider(self.provider, "response contains no message content")
            })?;

        if content.is_null() {
            return Err(Error::provider(
                self.provider,
                "API returned null message content",
            ));
        }

        let text = flatten_content(content).trim().to_string();
        if text.is_empty() {
            return Err(Error::provider(self.provider, "API returned empty response"));
        }
        Ok(text)
    }
}
