//! Research labs responsible for published models.

/// Metadata describing an LLM research lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lab {
    pub name: &'static str,
}

pub const ANTHROPIC: Lab = Lab { name: "Anthropic" };
pub const DEEPSEEK: Lab = Lab { name: "DeepSeek" };
pub const GOOGLE: Lab = Lab { name: "Google" };
pub const MISTRAL: Lab = Lab { name: "Mistral" };
pub const MOONSHOT: Lab = Lab { name: "Moonshot" };
pub const OPENAI: Lab = Lab { name: "OpenAI" };
pub const QWEN: Lab = Lab { name: "Qwen" };
pub const XAI: Lab = Lab { name: "xAI" };
pub const ZAI: Lab = Lab { name: "Z.ai" };
