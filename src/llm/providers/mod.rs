//! Provider adapters.
//!
//! Each vendor implements [`RequestAdapter`]: translate the uniform
//! prompt+options call into that vendor's wire format, and pull the generated
//! text back out of its response payload. Adapters never talk to the network
//! themselves; the client executes the [`ProviderRequest`] they build.

pub mod anthropic;
pub mod google;
pub mod openai;
pub mod openai_compat;

use reqwest::header::HeaderMap;

use crate::error::Result;
use crate::llm::options::ResponseOptions;
use crate::llm::registry::Model;

/// Supported LLM vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
    Xai,
    Together,
    Mistral,
}

impl Provider {
    /// All provider tags, in configuration order.
    pub const ALL: [Provider; 6] = [
        Provider::OpenAi,
        Provider::Anthropic,
        Provider::Google,
        Provider::Xai,
        Provider::Together,
        Provider::Mistral,
    ];

    /// Stable lowercase tag used in configuration and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
            Provider::Xai => "xai",
            Provider::Together => "together",
            Provider::Mistral => "mistral",
        }
    }

    /// Secret Manager entry holding this provider's API key.
    pub fn secret_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "API_KEY_OPENAI",
            Provider::Anthropic => "API_KEY_ANTHROPIC",
            Provider::Google => "API_KEY_GEMINI",
            Provider::Xai => "API_KEY_XAI",
            Provider::Together => "API_KEY_TOGETHERAI",
            Provider::Mistral => "API_KEY_MISTRAL",
        }
    }

    /// Default API base URL.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com",
            Provider::Anthropic => "https://api.anthropic.com",
            Provider::Google => "https://generativelanguage.googleapis.com",
            Provider::Xai => "https://api.x.ai",
            Provider::Together => "https://api.together.xyz",
            Provider::Mistral => "https://api.mistral.ai",
        }
    }

    /// Option names this provider's adapter accepts. Anything outside the
    /// list is rejected with `Error::UnsupportedOption` before the request
    /// is built.
    pub fn allowed_options(&self) -> &'static [&'static str] {
        match self {
            Provider::OpenAi => &["temperature", "max_tokens"],
            Provider::Anthropic => &["temperature", "max_tokens"],
            Provider::Google => &["temperature", "max_tokens"],
            Provider::Xai | Provider::Together | Provider::Mistral => {
                &["temperature", "max_tokens", "top_p"]
            }
        }
    }

    /// Static dispatch table: the adapter implementing this provider's wire
    /// format.
    pub(crate) fn adapter(&self) -> &'static dyn RequestAdapter {
        match self {
            Provider::OpenAi => &openai::OpenAiAdapter,
            Provider::Anthropic => &anthropic::AnthropicAdapter,
            Provider::Google => &google::GeminiAdapter,
            Provider::Xai => &openai_compat::XAI,
            Provider::Together => &openai_compat::TOGETHER,
            Provider::Mistral => &openai_compat::MISTRAL,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully assembled HTTP request, ready for the blocking transport.
#[derive(Debug)]
pub(crate) struct ProviderRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Per-vendor translation between the uniform call and the wire format.
pub(crate) trait RequestAdapter: Send + Sync {
    /// Map prompt and validated options into the vendor request.
    fn build_request(
        &self,
        model: &Model,
        prompt: &str,
        options: &ResponseOptions,
        api_key: &str,
        base_url: &str,
    ) -> Result<ProviderRequest>;

    /// Extract the generated text from a success payload. Error-flagged or
    /// malformed payloads surface as `Error::Provider`.
    fn parse_response(&self, raw: &serde_json::Value) -> Result<String>;
}

pub(crate) fn bearer_headers(api_key: &str, provider: Provider) -> Result<HeaderMap> {
    use crate::error::Error;

    let mut headers = HeaderMap::new();
    let value = format!("Bearer {api_key}")
        .parse()
        .map_err(|e| Error::provider(provider, format!("invalid API key header: {e}")))?;
    headers.insert(reqwest::header::AUTHORIZATION, value);
    Ok(headers)
}
