//! Page fetching from URLs, files, and stdin.
//!
//! Pages are returned as raw bytes; decoding is left to the HTML parser.

use std::fs;
use std::path::Path;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use tracing::debug;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{OfflineError, Result};

/// HTTP client configuration for fetching wiki pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: concat!("wiki-offline/", env!("CARGO_PKG_VERSION")).to_string() }
    }
}

/// Fetches a page with an HTTP GET request.
///
/// Redirects are followed; a non-success status is an error.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<Vec<u8>> {
    let parsed_url = Url::parse(url).map_err(|e| OfflineError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(OfflineError::InvalidUrl(format!(
            "unsupported scheme `{}` (expected http or https)",
            parsed_url.scheme()
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(OfflineError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| {
            if e.is_timeout() { OfflineError::Timeout { timeout: config.timeout } } else { OfflineError::HttpError(e) }
        })?;

    let content = response.bytes().await?;
    debug!(url, bytes = content.len(), "fetched page");

    Ok(content.to_vec())
}

/// Reads a page from a local file.
pub fn fetch_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() { Err(OfflineError::FileNotFound(path.to_path_buf())) } else { Ok(fs::read(path)?) }
}

/// Reads a page from standard input until EOF.
pub fn fetch_stdin() -> Result<Vec<u8>> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    Ok(buffer)
}

/// Fetches a page from `source`: `-` for stdin, an `http(s)://` URL, or a
/// local file path.
#[cfg(feature = "fetch")]
pub async fn fetch_source(source: &str, config: &FetchConfig) -> Result<Vec<u8>> {
    if source == "-" {
        fetch_stdin()
    } else if is_url(source) {
        fetch_url(source, config).await
    } else {
        fetch_file(Path::new(source))
    }
}

/// Whether `source` names a remote page rather than a local file.
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
