//! OpenAI Responses API adapter.

use crate::error::{Error, Result};
use crate::llm::options::ResponseOptions;
use crate::llm::registry::Model;

use super::{Provider, ProviderRequest, RequestAdapter, bearer_headers};

/// Temperature applied when the caller does not set one.
const DEFAULT_TEMPERATURE: f64 = 0.8;

pub(crate) struct OpenAiAdapter;

impl RequestAdapter for OpenAiAdapter {
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
            "input": prompt,
        });

        // Reasoning models reject the temperature parameter.
        if !model.reasoning {
            body["temperature"] = options
                .temperature()
                .unwrap_or_else(|| serde_json::Value::from(DEFAULT_TEMPERATURE));
        }
        if let Some(max_tokens) = options.max_tokens() {
            body["max_output_tokens"] = serde_json::Value::from(max_tokens);
        }

        Ok(ProviderRequest {
            url: format!("{base_url}/v1/responses"),
            headers: bearer_headers(api_key, Provider::OpenAi)?,
            body,
        })
    }

    fn parse_response(&self, raw: &serde_json::Value) -> Result<String> {
        if let Some(message) = raw
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return Err(Error::provider(Provider::OpenAi, message));
        }

        let status = raw.get("status").and_then(|s| s.as_str());
        if status != Some("completed") {
            let mut message = format!(
                "response incomplete (status={})",
                status.unwrap_or("unknown")
            );
            if let Some(reason) = raw.get("incomplete_details") {
                if !reason.is_null() {
                    message.push_str(&format!(", reason={reason}"));
                }
            }
            return Err(Error::provider(Provider::OpenAi, message));
        }

        // Concatenate the output_text parts of every output message.
        let mut text = String::new();
        let outputs = raw
            .get("output")
            .and_then(|o| o.as_array())
            .ok_or_else(|| {
                Error::provider(Provider::OpenAi, "response payload has no `output` array")
            })?;
        for item in outputs {
            if item.get("type").and_then(|t| t.as_str()) != Some("message") {
                continue;
            }
            let Some(parts) = item.get("content").and_then(|c| c.as_array()) else {
                continue;
            };
            for part in parts {
                if part.get("type").and_then(|t| t.as_str()) == Some("output_text") {
                    if let Some(chunk) = part.get("text").and_then(|t| t.as_str()) {
                        text.push_str(chunk);
                    }
                }
            }
        }

        Ok(text.trim().to_string())
    }
}
