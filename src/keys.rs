//! Provider credential configuration.
//!
//! Credentials live in an explicit [`ProviderKeys`] value injected into
//! [`crate::llm::LlmClient`], not in process-global state. Keys come either
//! from explicit per-provider values or, exclusively, from Google Secret
//! Manager; combining the two in one build is ambiguous and rejected.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};
use crate::gcp::secret_manager::{SecretManagerClient, SecretStore};
use crate::llm::providers::Provider;

/// One credential per provider tag. A later [`set`](ProviderKeys::set)
/// overwrites the earlier value for that tag.
#[derive(Debug, Clone, Default)]
pub struct ProviderKeys {
    keys: BTreeMap<Provider, SecretString>,
}

impl ProviderKeys {
    pub fn builder() -> KeysBuilder {
        KeysBuilder::default()
    }

    /// Configure or replace the credential for one provider.
    pub fn set(&mut self, provider: Provider, key: impl Into<String>) {
        self.keys.insert(provider, SecretString::from(key.into()));
    }

    /// The configured credential for a provider, if any.
    pub fn key_for(&self, provider: Provider) -> Option<&str> {
        self.keys.get(&provider).map(|k| k.expose_secret())
    }

    /// Providers with a configured credential.
    pub fn configured(&self) -> impl Iterator<Item = Provider> + '_ {
        self.keys.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Builder accepting explicit per-provider values or the secret-manager flag.
#[derive(Debug, Default)]
pub struct KeysBuilder {
    explicit: BTreeMap<Provider, String>,
    from_secret_manager: bool,
}

macro_rules! key_setter {
    ($name:ident, $provider:expr) => {
        #[doc = concat!("Set the ", stringify!($name), " API key explicitly.")]
        pub fn $name(mut self, key: impl Into<String>) -> Self {
            self.explicit.insert($provider, key.into());
            self
        }
    };
}

impl KeysBuilder {
    key_setter!(openai, Provider::OpenAi);
    key_setter!(anthropic, Provider::Anthropic);
    key_setter!(google, Provider::Google);
    key_setter!(xai, Provider::Xai);
    key_setter!(together, Provider::Together);
    key_setter!(mistral, Provider::Mistral);

    /// Fetch all provider keys from Google Secret Manager instead of taking
    /// explicit values. Mutually exclusive with the per-provider setters.
    pub fn from_secret_manager(mut self) -> Self {
        self.from_secret_manager = true;
        self
    }

    /// Build the key set. The secret-manager path constructs a client from
    /// the environment (`GOOGLE_CLOUD_PROJECT` plus ambient credentials).
    pub fn build(self) -> Result<ProviderKeys> {
        if self.from_secret_manager {
            self.check_exclusive()?;
            let client = SecretManagerClient::from_env()?;
            return load_all(&client);
        }
        self.into_explicit()
    }

    /// Build against a caller-supplied secret store. Intended for tests and
    /// for callers that manage their own GCP client.
    pub fn build_with(self, store: &dyn SecretStore) -> Result<ProviderKeys> {
        if self.from_secret_manager {
            self.check_exclusive()?;
            return load_all(store);
        }
        self.into_explicit()
    }

    fn check_exclusive(&self) -> Result<()> {
        if !self.explicit.is_empty() {
            let named: Vec<&str> = self.explicit.keys().map(|p| p.name()).collect();
            return Err(Error::Configuration(format!(
                "explicit keys ({}) cannot be combined with from_secret_manager",
                named.join(", ")
            )));
        }
        Ok(())
    }

    fn into_explicit(self) -> Result<ProviderKeys> {
        let mut keys = ProviderKeys::default();
        for (provider, value) in self.explicit {
            keys.set(provider, value);
        }
        Ok(keys)
    }
}

/// Fetch the fixed secret name for every provider. A missing secret or an
/// unreachable store fails the whole configuration.
fn load_all(store: &dyn SecretStore) -> Result<ProviderKeys> {
    let mut keys = ProviderKeys::default();
    for provider in Provider::ALL {
        let name = provider.secret_name();
        let value = store.secret(name).map_err(|e| {
            Error::Configuration(format!("could not load secret `{name}`: {e}"))
        })?;
        keys.set(provider, value);
    }
    Ok(keys)
}
