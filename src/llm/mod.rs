//! Unified LLM invocation.
//!
//! [`LlmClient`] owns the configured credentials and the blocking HTTP
//! transport. Callers look a model up in the [`registry`] (or pass its id
//! directly) and get back the provider's generated text, normalized to a
//! plain trimmed string. Failures are never retried here.

pub mod labs;
pub mod options;
pub mod providers;
pub mod registry;
pub mod structured;

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::keys::ProviderKeys;

use options::ResponseOptions;
use providers::{Provider, ProviderRequest};
use registry::Model;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Synchronous client over all registered providers.
pub struct LlmClient {
    keys: ProviderKeys,
    http: reqwest::blocking::Client,
    timeout: Duration,
    base_urls: BTreeMap<Provider, String>,
}

impl LlmClient {
    /// Build a client around an explicit credential set.
    pub fn new(keys: ProviderKeys) -> Self {
        Self {
            keys,
            http: reqwest::blocking::Client::new(),
            timeout: DEFAULT_TIMEOUT,
            base_urls: BTreeMap::new(),
        }
    }

    /// Per-request timeout; elapsed time past this fails with
    /// `Error::Timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override one provider's API base URL (stub servers in tests,
    /// self-hosted gateways in production).
    pub fn with_base_url(mut self, provider: Provider, base_url: impl Into<String>) -> Self {
        self.base_urls.insert(provider, base_url.into());
        self
    }

    fn base_url(&self, provider: Provider) -> &str {
        self.base_urls
            .get(&provider)
            .map(String::as_str)
            .unwrap_or_else(|| provider.default_base_url())
    }

    /// Look up a model by id and request a response for the prompt.
    pub fn get_response(
        &self,
        model_id: &str,
        prompt: &str,
        options: &ResponseOptions,
    ) -> Result<String> {
        let model = registry::find(model_id)?;
        self.get_response_for(model, prompt, options)
    }

    /// Request a response from an already-resolved model.
    pub fn get_response_for(
        &self,
        model: &Model,
        prompt: &str,
        options: &ResponseOptions,
    ) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(Error::Configuration("prompt must not be empty".to_string()));
        }

        let provider = model.provider;
        // Credential check happens before any request is assembled or sent.
        let api_key = self
            .keys
            .key_for(provider)
            .ok_or(Error::Authentication { provider })?;
        options.validate_for(provider)?;

        let adapter = provider.adapter();
        let request =
            adapter.build_request(model, prompt, options, api_key, self.base_url(provider))?;
        let raw = self.execute(provider, request)?;
        adapter.parse_response(&raw)
    }

    /// Look up a model by id and request a response validated against a
    /// JSON schema.
    pub fn get_structured_response(
        &self,
        model_id: &str,
        prompt: &str,
        schema: &serde_json::Value,
        options: &ResponseOptions,
    ) -> Result<serde_json::Value> {
        let model = registry::find(model_id)?;
        self.get_structured_response_for(model, prompt, schema, options)
    }

    /// Request a schema-validated response from an already-resolved model.
    ///
    /// The schema is serialized into the prompt as an instruction; the reply
    /// is parsed and validated before being returned. See
    /// [`structured`] for the extraction rules.
    pub fn get_structured_response_for(
        &self,
        model: &Model,
        prompt: &str,
        schema: &serde_json::Value,
        options: &ResponseOptions,
    ) -> Result<serde_json::Value> {
        if prompt.trim().is_empty() {
            return Err(Error::Configuration("prompt must not be empty".to_string()));
        }
        let enhanced = structured::json_prompt(prompt, schema);
        let reply = self.get_response_for(model, &enhanced, options)?;
        structured::parse_validated(model.provider, &reply, schema)
    }

    fn execute(&self, provider: Provider, request: ProviderRequest) -> Result<serde_json::Value> {
        debug!(provider = %provider, url = %request.url, "sending provider request");

        let response = self
            .http
            .post(&request.url)
            .headers(request.headers)
            .json(&request.body)
            .timeout(self.timeout)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout {
                        provider,
                        seconds: self.timeout.as_secs(),
                    }
                } else {
                    Error::provider(provider, format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        let text = response.text().map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    provider,
                    seconds: self.timeout.as_secs(),
                }
            } else {
                Error::provider(provider, format!("failed to read response body: {e}"))
            }
        })?;

        if !status.is_success() {
            return Err(Error::provider_status(
                provider,
                status.as_u16(),
                remote_error_message(&text),
            ));
        }

        serde_json::from_str(&text)
            .map_err(|e| Error::provider(provider, format!("invalid JSON response: {e}")))
    }
}

/// Pull a human-readable message out of an error body, falling back to the
/// raw text.
fn remote_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
        if let Some(message) = json.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }
    body.chars().take(500).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_fails_before_any_network_io() {
        // The default base URL is unreachable from tests; an Authentication
        // error here proves no request was attempted.
        let client = LlmClient::new(ProviderKeys::default());
        let err = client
            .get_response("gpt-4.1-mini", "hello", &ResponseOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Authentication {
                provider: Provider::OpenAi
            }
        ));
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let keys = ProviderKeys::builder().openai("sk-test").build().unwrap();
        let client = LlmClient::new(keys);
        let err = client
            .get_response("gpt-4.1-mini", "   ", &ResponseOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn structured_call_rejects_empty_prompt_before_enhancement() {
        let keys = ProviderKeys::builder().openai("sk-test").build().unwrap();
        let client = LlmClient::new(keys);
        let err = client
            .get_structured_response(
                "gpt-4.1-mini",
                "  ",
                &serde_json::json!({"type": "object"}),
                &ResponseOptions::new(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn unknown_model_is_a_lookup_error() {
        let client = LlmClient::new(ProviderKeys::default());
        let err = client
            .get_response("made-up", "hello", &ResponseOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::ModelNotFound(_)));
    }

    #[test]
    fn remote_error_message_prefers_structured_payloads() {
        assert_eq!(
            remote_error_message(r#"{"error":{"message":"bad key"}}"#),
            "bad key"
        );
        assert_eq!(remote_error_message("plain text"), "plain text");
    }
}
