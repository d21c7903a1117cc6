//! Static model catalog.
//!
//! Models are registered at compile time and immutable for the process
//! lifetime. Lookup is a pure function of the catalog; an unknown identifier
//! is always an error, never a silent `None`.

use crate::error::{Error, Result};
use crate::llm::labs::{self, Lab};
use crate::llm::providers::Provider;

/// Registered LLM model metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Model {
    /// Unique catalog identifier.
    pub id: &'static str,
    /// Name sent on the wire (may differ from `id`, e.g. org-prefixed).
    pub full_name: &'static str,
    /// Context window in tokens.
    pub token_limit: u32,
    /// Owning provider tag.
    pub provider: Provider,
    /// Lab that published the model.
    pub lab: Lab,
    /// Reasoning models reject sampling parameters like temperature.
    pub reasoning: bool,
}

const fn model(
    id: &'static str,
    full_name: &'static str,
    token_limit: u32,
    provider: Provider,
    lab: Lab,
    reasoning: bool,
) -> Model {
    Model {
        id,
        full_name,
        token_limit,
        provider,
        lab,
        reasoning,
    }
}

/// The full catalog, grouped by provider.
pub static MODELS: &[Model] = &[
    // OpenAI
    model("gpt-4.1-mini", "gpt-4.1-mini", 128_000, Provider::OpenAi, labs::OPENAI, false),
    model("gpt-4.1-2025-04-14", "gpt-4.1-2025-04-14", 128_000, Provider::OpenAi, labs::OPENAI, false),
    model("gpt-5-2025-08-07", "gpt-5-2025-08-07", 128_000, Provider::OpenAi, labs::OPENAI, true),
    model("gpt-5-mini-2025-08-07", "gpt-5-mini-2025-08-07", 128_000, Provider::OpenAi, labs::OPENAI, true),
    model("gpt-5-nano-2025-08-07", "gpt-5-nano-2025-08-07", 128_000, Provider::OpenAi, labs::OPENAI, true),
    model("gpt-5.1-2025-11-13", "gpt-5.1-2025-11-13", 128_000, Provider::OpenAi, labs::OPENAI, true),
    model("o3-2025-04-16", "o3-2025-04-16", 200_000, Provider::OpenAi, labs::OPENAI, true),
    // Together AI
    model("DeepSeek-V3.1", "deepseek-ai/DeepSeek-V3.1", 128_000, Provider::Together, labs::DEEPSEEK, false),
    model("Qwen3-235B-A22B-fp8-tput", "Qwen/Qwen3-235B-A22B-fp8-tput", 40_960, Provider::Together, labs::QWEN, false),
    model("Qwen3-235B-A22B-Thinking-2507", "Qwen/Qwen3-235B-A22B-Thinking-2507", 262_144, Provider::Together, labs::QWEN, false),
    model("Kimi-K2-Instruct", "moonshotai/Kimi-K2-Instruct", 128_000, Provider::Together, labs::MOONSHOT, false),
    model("Kimi-K2-Instruct-0905", "moonshotai/Kimi-K2-Instruct-0905", 262_144, Provider::Together, labs::MOONSHOT, false),
    model("Kimi-K2-Thinking", "moonshotai/Kimi-K2-Thinking", 262_144, Provider::Together, labs::MOONSHOT, false),
    model("GLM-4.5-Air-FP8", "zai-org/GLM-4.5-Air-FP8", 131_072, Provider::Together, labs::ZAI, false),
    model("GLM-4.6", "zai-org/GLM-4.6", 202_752, Provider::Together, labs::ZAI, false),
    // Anthropic
    model("claude-sonnet-4-5-20250929", "claude-sonnet-4-5-20250929", 200_000, Provider::Anthropic, labs::ANTHROPIC, false),
    model("claude-haiku-4-5-20251001", "claude-haiku-4-5-20251001", 200_000, Provider::Anthropic, labs::ANTHROPIC, false),
    model("claude-opus-4-1-20250805", "claude-opus-4-1-20250805", 200_000, Provider::Anthropic, labs::ANTHROPIC, false),
    model("claude-sonnet-4-20250514", "claude-sonnet-4-20250514", 200_000, Provider::Anthropic, labs::ANTHROPIC, false),
    model("claude-3-7-sonnet-20250219", "claude-3-7-sonnet-20250219", 200_000, Provider::Anthropic, labs::ANTHROPIC, false),
    // xAI
    model("grok-4-fast-reasoning", "grok-4-fast-reasoning", 2_000_000, Provider::Xai, labs::XAI, false),
    model("grok-4-fast-non-reasoning", "grok-4-fast-non-reasoning", 2_000_000, Provider::Xai, labs::XAI, false),
    model("grok-4-0709", "grok-4-0709", 256_000, Provider::Xai, labs::XAI, false),
    model("grok-4-1-fast-reasoning", "grok-4-1-fast-reasoning", 2_000_000, Provider::Xai, labs::XAI, true),
    model("grok-4-1-fast-non-reasoning", "grok-4-1-fast-non-reasoning", 2_000_000, Provider::Xai, labs::XAI, false),
    // Google
    model("gemini-2.5-pro", "gemini-2.5-pro", 1_048_576, Provider::Google, labs::GOOGLE, false),
    model("gemini-2.5-flash", "models/gemini-2.5-flash", 1_048_576, Provider::Google, labs::GOOGLE, false),
    model("gemini-3-pro-preview", "gemini-3-pro-preview", 1_048_576, Provider::Google, labs::GOOGLE, false),
    // Mistral
    model("mistral-large-2411", "mistral-large-2411", 128_000, Provider::Mistral, labs::MISTRAL, false),
    model("magistral-medium-2506", "magistral-medium-2506", 40_000, Provider::Mistral, labs::MISTRAL, false),
];

/// The whole catalog; callers filter and search themselves.
pub fn models() -> &'static [Model] {
    MODELS
}

/// Look up a model by its catalog identifier.
pub fn find(id: &str) -> Result<&'static Model> {
    MODELS
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| Error::ModelNotFound(id.to_string()))
}
