//! Google Gemini generateContent adapter.

use reqwest::header::HeaderMap;

use crate::error::{Error, Result};
use crate::llm::options::ResponseOptions;
use crate::llm::registry::Model;

use super::{Provider, ProviderRequest, RequestAdapter};

const DEFAULT_TEMPERATURE: f64 = 0.8;

pub(crate) struct GeminiAdapter;

impl RequestAdapter for GeminiAdapter {
    fn build_request(
        &self,
        model: &Model,
        prompt: &str,
        options: &ResponseOptions,
        api_key: &str,
        base_url: &str,
    ) -> Result<ProviderRequest> {
        let mut generation_config = serde_json::json!({
            "candidateCount": 1,
            "temperature": options
                .temperature()
                .unwrap_or_else(|| serde_json::Value::from(DEFAULT_TEMPERATURE)),
        });
        if let Some(max_tokens) = options.max_tokens() {
            generation_config["maxOutputTokens"] = serde_json::Value::from(max_tokens);
        }

        let body = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": generation_config,
        });

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            api_key.parse().map_err(|e| {
                Error::provider(Provider::Google, format!("invalid API key header: {e}"))
            })?,
        );

        // Catalog names may already carry the "models/" prefix.
        let wire_name = model.full_name.trim_start_matches("models/");

        Ok(ProviderRequest {
            url: format!("{base_url}/v1beta/models/{wire_name}:generateContent"),
            headers,
            body,
        })
    }

    fn parse_response(&self, raw: &serde_json::Value) -> Result<String> {
        if let Some(message) = raw
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return Err(Error::provider(Provider::Google, message));
        }

        let parts = raw
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| {
                Error::provider(Provider::Google, "response contains no candidate parts")
            })?;

        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
            .collect();
        Ok(text.trim().to_string())
    }
}
