//! Transport seam for the swing table.
//!
//! The loader only needs "give me the raw bytes of the table"; putting that
//! behind a trait keeps the TTL cache testable and lets a local snapshot file
//! stand in for the remote host.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::SwingError;
use crate::fetch::{BasicClient, fetch_bytes};

#[async_trait]
pub trait SwingSource: Send + Sync {
    /// Fetches the full table wholesale. No pagination, no partial reads.
    async fn fetch(&self) -> Result<Vec<u8>, SwingError>;
}

/// Fetches the table over HTTP(S).
pub struct HttpSource {
    client: BasicClient,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: BasicClient::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl SwingSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>, SwingError> {
        fetch_bytes(&self.client, &self.url)
            .await
            .map_err(|e| SwingError::SourceUnavailable(e.to_string()))
    }
}

/// Reads the table from a local file, e.g. a downloaded snapshot.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SwingSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>, SwingError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| SwingError::SourceUnavailable(format!("{}: {e}", self.path.display())))
    }
}

/// Picks the source implementation for a CLI `--source` value: URLs go over
/// HTTP, anything else is treated as a local path.
pub fn source_for(source: &str) -> Box<dyn SwingSource> {
    if source.starts_with("http") {
        Box::new(HttpSource::new(source))
    } else {
        Box::new(FileSource::new(source))
    }
}
