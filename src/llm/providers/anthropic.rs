//! Anthropic Messages API adapter.

use reqwest::header::HeaderMap;

use crate::error::{Error, Result};
use crate::llm::options::ResponseOptions;
use crate::llm::registry::Model;

use super::{Provider, ProviderRequest, RequestAdapter};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub(crate) struct AnthropicAdapter;

impl RequestAdapter for AnthropicAdapter {
    fn build_request(
        &self,
        model: &Model,
        prompt: &str,
        options: &ResponseOptions,
        api_key: &str,
        base_url: &str,
    ) -> Result<ProviderRequest> {
        // The Messages API has no server-side default for max_tokens.
        let max_tokens = options.max_tokens().ok_or_else(|| {
            Error::Configuration("max_tokens is required for Anthropic models".to_string())
        })?;

        let mut body = serde_json::json!({
            "model": model.full_name,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_tokens,
        });
        if let Some(temperature) = options.temperature() {
            body["temperature"] = temperature;
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            api_key.parse().map_err(|e| {
                Error::provider(Provider::Anthropic, format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            ANTHROPIC_VERSION.parse().map_err(|e| {
                Error::provider(Provider::Anthropic, format!("invalid version header: {e}"))
            })?,
        );

        Ok(ProviderRequest {
            url: format!("{base_url}/v1/messages"),
            headers,
            body,
        })
    }

    fn parse_response(&self, raw: &serde_json::Value) -> Result<String> {
        if raw.get("type").and_then(|t| t.as_str()) == Some("error") {
            let message = raw
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("unspecified error");
            return Err(Error::provider(Provider::Anthropic, message));
        }

        let blocks = raw
            .get("content")
            .and_then(|c| c.as_array())
            .ok_or_else(|| {
                Error::provider(
                    Provider::Anthropic,
                    "response payload has no `content` array",
                )
            })?;

        blocks
            .iter()
            .find(|b| b.get("type").and_then(|t| t.as_str()) == Some("text"))
            .and_then(|b| b.get("text").and_then(|t| t.as_str()))
            .map(|t| t.trim().to_string())
            .ok_or_else(|| {
                Error::provider(Provider::Anthropic, "response contains no text block")
            })
    }
}
