//! Google Cloud Storage object helpers.
//!
//! Thin blocking wrappers over the JSON API for one bucket: list, upload,
//! download, and object metadata. No retry, no multipart assembly; every
//! failure surfaces as `Error::Storage` (local I/O as `Error::FileSystem`).

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::auth::AccessTokenProvider;

const STORAGE_BASE_URL: &str = "https://storage.googleapis.com/storage/v1";
const UPLOAD_BASE_URL: &str = "https://storage.googleapis.com/upload/storage/v1";

#[derive(Debug, Deserialize)]
struct ObjectList {
    #[serde(default)]
    items: Vec<ObjectMetadata>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectMetadata {
    name: String,
    updated: Option<DateTime<Utc>>,
}

/// Blocking client for a single bucket.
pub struct StorageClient {
    bucket: String,
    base_url: String,
    upload_base_url: String,
    http: reqwest::blocking::Client,
    tokens: AccessTokenProvider,
}

impl StorageClient {
    pub fn new(bucket: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::new();
        Self {
            bucket: bucket.into(),
            base_url: STORAGE_BASE_URL.to_string(),
            upload_base_url: UPLOAD_BASE_URL.to_string(),
            http: http.clone(),
            tokens: AccessTokenProvider::new(http),
        }
    }

    /// Point the client at a different API endpoint (stub servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        self.upload_base_url = base.clone();
        self.base_url = base;
        self
    }

    /// Use a pre-acquired OAuth access token instead of ambient credentials.
    pub fn with_access_token(self, token: impl Into<String>) -> Self {
        self.tokens.preset(token.into());
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/b/{}/o/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(key)
        )
    }

    /// List object names under a prefix, following result pages to the end.
    /// An empty prefix lists the whole bucket.
    pub fn list_files(&self, prefix: &str) -> Result<Vec<String>> {
        let token = self.tokens.token()?;
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(format!("{}/b/{}/o", self.base_url, self.bucket))
                .bearer_auth(&token);
            if !prefix.is_empty() {
                request = request.query(&[("prefix", prefix)]);
            }
            if let Some(ref t) = page_token {
                request = request.query(&[("pageToken", t.as_str())]);
            }

            let response = request
                .send()
                .map_err(|e| Error::storage(format!("list request failed: {e}")))?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(Error::storage_status(
                    status.as_u16(),
                    format!("could not list bucket `{}`: {body}", self.bucket),
                ));
            }

            let page: ObjectList = response
                .json()
                .map_err(|e| Error::storage(format!("invalid list response: {e}")))?;
            names.extend(page.items.into_iter().map(|o| o.name));

            match page.next_page_token {
                Some(t) => page_token = Some(t),
                None => break,
            }
        }

        debug!(bucket = %self.bucket, prefix, count = names.len(), "listed objects");
        Ok(names)
    }

    /// Upload a local file under the given object key.
    pub fn upload_file(&self, local_path: impl AsRef<Path>, remote_key: &str) -> Result<()> {
        let local_path = local_path.as_ref();
        let bytes =
            fs::read(local_path).map_err(|e| Error::filesystem(local_path, e))?;
        let token = self.tokens.token()?;

        let url = format!("{}/b/{}/o", self.upload_base_url, self.bucket);
        let response = self
            .http
            .post(url)
            .query(&[("uploadType", "media"), ("name", remote_key)])
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .map_err(|e| Error::storage(format!("upload request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::storage_status(
                status.as_u16(),
                format!("could not upload `{remote_key}`: {body}"),
            ));
        }
        debug!(bucket = %self.bucket, key = remote_key, "uploaded object");
        Ok(())
    }

    /// Download an object to a local path, creating parent directories.
    pub fn download_file(&self, remote_key: &str, local_path: impl AsRef<Path>) -> Result<()> {
        let local_path = local_path.as_ref();
        let token = self.tokens.token()?;

        let response = self
            .http
            .get(self.object_url(remote_key))
            .query(&[("alt", "media")])
            .bearer_auth(token)
            .send()
            .map_err(|e| Error::storage(format!("download request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::storage_status(
                status.as_u16(),
                format!("could not download `{remote_key}`: {body}"),
            ));
        }
        let bytes = response
            .bytes()
            .map_err(|e| Error::storage(format!("download body read failed: {e}")))?;

        if let Some(parent) = local_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::filesystem(parent, e))?;
            }
        }
        fs::write(local_path, &bytes).map_err(|e| Error::filesystem(local_path, e))?;
        debug!(bucket = %self.bucket, key = remote_key, bytes = bytes.len(), "downloaded object");
        Ok(())
    }

    /// Last-modified time of an object, or `None` if it does not exist.
    pub fn last_modified(&self, remote_key: &str) -> Result<Option<DateTime<Utc>>> {
        let token = self.tokens.token()?;
        let response = self
            .http
            .get(self.object_url(remote_key))
            .bearer_auth(token)
            .send()
            .map_err(|e| Error::storage(format!("metadata request failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            warn!(bucket = %self.bucket, key = remote_key, "object not found");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::storage_status(
                status.as_u16(),
                format!("could not stat `{remote_key}`: {body}"),
            ));
        }
        let meta: ObjectMetadata = response
            .json()
            .map_err(|e| Error::storage(format!("invalid object metadata: {e}")))?;
        Ok(meta.updated)
    }
}
