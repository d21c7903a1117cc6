//! Request options forwarded to provider APIs.
//!
//! Options are an open name→value mapping, but unlike a duck-typed kwargs
//! dict they are validated against the provider's allow-list before the
//! request is built, so a typo'd or unsupported option fails as
//! `Error::UnsupportedOption` instead of a confusing remote rejection.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::llm::providers::Provider;

/// A single option value, tagged by type.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl OptionValue {
    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            OptionValue::Bool(b) => serde_json::Value::Bool(*b),
            OptionValue::Int(i) => serde_json::Value::from(*i),
            OptionValue::Float(f) => serde_json::Value::from(*f),
            OptionValue::Text(s) => serde_json::Value::from(s.clone()),
        }
    }

    pub(crate) fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Float(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Text(v)
    }
}

/// Ordered mapping of option name to value.
#[derive(Debug, Clone, Default)]
pub struct ResponseOptions {
    values: BTreeMap<String, OptionValue>,
}

impl ResponseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reject any option outside the provider's allow-list.
    pub(crate) fn validate_for(&self, provider: Provider) -> Result<()> {
        let allowed = provider.allowed_options();
        for name in self.values.keys() {
            if !allowed.contains(&name.as_str()) {
                return Err(Error::UnsupportedOption {
                    provider,
                    option: name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Temperature as JSON, if set.
    pub(crate) fn temperature(&self) -> Option<serde_json::Value> {
        self.get("temperature").map(OptionValue::to_json)
    }

    /// Integer max_tokens, if set.
    pub(crate) fn max_tokens(&self) -> Option<i64> {
        self.get("max_tokens").and_then(OptionValue::as_int)
    }
}
