//! modelbox
//!
//! Unified synchronous interface for calling multiple LLM providers, with
//! helpers for Google Cloud Storage objects and tar.gz archiving.
//!
//! # Example
//!
//! ```rust,ignore
//! use modelbox::{LlmClient, ProviderKeys, ResponseOptions};
//!
//! let keys = ProviderKeys::builder()
//!     .openai("sk-...")
//!     .anthropic("sk-ant-...")
//!     .build()?;
//! let client = LlmClient::new(keys);
//!
//! let text = client.get_response(
//!     "claude-sonnet-4-5-20250929",
//!     "Name a dim sum dish.",
//!     &ResponseOptions::new().set("max_tokens", 256),
//! )?;
//! ```
#![deny(unsafe_code)]

pub mod archive;
pub mod error;
pub mod gcp;
pub mod keys;
pub mod llm;

pub use error::{Error, Result};
pub use gcp::{SecretManagerClient, SecretStore, StorageClient};
pub use keys::{KeysBuilder, ProviderKeys};
pub use llm::LlmClient;
pub use llm::options::{OptionValue, ResponseOptions};
pub use llm::providers::Provider;
pub use llm::registry::{self, Model};
