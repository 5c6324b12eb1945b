use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::selection::FileHandle;

/// Turns a remote image URL into an uploadable file.
///
/// `Ok(None)` means the image is not available. The compiler treats that and
/// `Err` the same way: the attachment is dropped.
#[async_trait]
pub trait FileResolver: Send + Sync {
    async fn fetch_as_file(&self, url: &str, filename: &str) -> Result<Option<FileHandle>>;
}

pub struct HttpResolver {
    client: Client,
    timeout: Duration,
}

impl HttpResolver {
    pub fn new(timeout_secs: u64) -> Self {
        Self { client: Client::new(), timeout: Duration::from_secs(timeout_secs) }
    }
}

#[async_trait]
impl FileResolver for HttpResolver {
    async fn fetch_as_file(&self, url: &str, filename: &str) -> Result<Option<FileHandle>> {
        debug!(url, filename, "fetching template image");
        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(anyhow!("template fetch failed ({status}): {url}"));
        }

        let mime = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = resp.bytes().await.with_context(|| format!("reading body of {url}"))?;

        Ok(Some(FileHandle::new(filename, mime, bytes)))
    }
}

/// Serves files from a fixed url → file table. Unknown urls resolve to `None`.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    files: HashMap<String, FileHandle>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, file: FileHandle) -> Self {
        self.files.insert(url.into(), file);
        self
    }
}

#[async_trait]
impl FileResolver for StaticResolver {
    async fn fetch_as_file(&self, url: &str, filename: &str) -> Result<Option<FileHandle>> {
        Ok(self.files.get(url).map(|f| FileHandle { name: filename.to_string(), ..f.clone() }))
    }
}
