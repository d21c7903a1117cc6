//! Google Secret Manager access.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

use super::auth::AccessTokenProvider;

const SECRET_MANAGER_BASE_URL: &str = "https://secretmanager.googleapis.com/v1";
const PROJECT_ENV_VAR: &str = "GOOGLE_CLOUD_PROJECT";

/// Anything that can resolve a named secret. Implemented by
/// [`SecretManagerClient`]; tests substitute stubs.
pub trait SecretStore {
    fn secret(&self, name: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct AccessResponse {
    payload: SecretPayload,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    data: String,
}

/// Blocking Secret Manager client for one project.
pub struct SecretManagerClient {
    project_id: String,
    base_url: String,
    http: reqwest::blocking::Client,
    tokens: AccessTokenProvider,
}

impl SecretManagerClient {
    /// Build a client for an explicit project id.
    pub fn new(project_id: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::new();
        Self {
            project_id: project_id.into(),
            base_url: SECRET_MANAGER_BASE_URL.to_string(),
            http: http.clone(),
            tokens: AccessTokenProvider::new(http),
        }
    }

    /// Build a client from `GOOGLE_CLOUD_PROJECT`.
    pub fn from_env() -> Result<Self> {
        let project_id = std::env::var(PROJECT_ENV_VAR).map_err(|_| {
            Error::Configuration(format!(
                "{PROJECT_ENV_VAR} environment variable must be set to read secrets"
            ))
        })?;
        Ok(Self::new(project_id))
    }

    /// Point the client at a different API endpoint (stub servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a pre-acquired OAuth access token instead of ambient credentials.
    pub fn with_access_token(self, token: impl Into<String>) -> Self {
        self.tokens.preset(token.into());
        self
    }

    fn access(&self, name: &str, version: &str) -> Result<reqwest::blocking::Response> {
        let url = format!(
            "{}/projects/{}/secrets/{}/versions/{}:access",
            self.base_url, self.project_id, name, version
        );
        debug!(secret = name, "accessing secret version");
        let token = self.tokens.token()?;
        self.http
            .get(url)
            .bearer_auth(token)
            .send()
            .map_err(|e| Error::storage(format!("secret manager request failed: {e}")))
    }

    fn decode(response: reqwest::blocking::Response) -> Result<String> {
        let body: AccessResponse = response
            .json()
            .map_err(|e| Error::storage(format!("invalid secret manager response: {e}")))?;
        let bytes = BASE64
            .decode(body.payload.data.as_bytes())
            .map_err(|e| Error::storage(format!("secret payload is not valid base64: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| Error::storage(format!("secret payload is not valid UTF-8: {e}")))
    }

    /// Fetch the latest version of a secret. Missing secrets are an error.
    pub fn get_secret(&self, name: &str) -> Result<String> {
        let response = self.access(name, "latest")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::storage_status(
                status.as_u16(),
                format!("could not access secret `{name}`: {body}"),
            ));
        }
        Self::decode(response)
    }

    /// Fetch a secret that may legitimately be absent: `Ok(None)` on 404.
    pub fn secret_if_exists(&self, name: &str) -> Result<Option<String>> {
        let response = self.access(name, "latest")?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::storage_status(
                status.as_u16(),
                format!("could not access secret `{name}`: {body}"),
            ));
        }
        Self::decode(response).map(Some)
    }
}

impl SecretStore for SecretManagerClient {
    fn secret(&self, name: &str) -> Result<String> {
        self.get_secret(name)
    }
}
