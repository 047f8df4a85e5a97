//! Error types for offline conversion.
//!
//! This module defines the main error type [`OfflineError`] which represents
//! every way a single page conversion can fail: fetching the source, parsing
//! it, finding the template anchors the passes rely on, computing relative
//! paths, and writing the result.
//!
//! # Example
//!
//! ```rust
//! use wiki_offline_core::{OfflineError, Result};
//!
//! fn require_body(html: &str) -> Result<()> {
//!     if !html.contains("<body") {
//!         return Err(OfflineError::HtmlParseError("no body".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for page conversion.
///
/// All variants are fatal for the page being converted; there is no partial
/// success mode.
///
/// # Example
///
/// ```rust
/// use wiki_offline_core::{OfflineError, Optimizer};
///
/// match Optimizer::new("relative/dir") {
///     Ok(_) => unreachable!(),
///     Err(OfflineError::InvalidPath { path, reason }) => {
///         println!("{}: {}", path.display(), reason);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum OfflineError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and non-success status codes.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided as a page source.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The parser could not produce a usable document.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// A template anchor that a pass depends on is missing.
    ///
    /// This means the wiki skin changed; continuing would silently produce a
    /// broken offline page.
    #[error("{pass}: required element `{selector}` not found")]
    MissingElement { pass: &'static str, selector: String },

    /// The template anchors exist but sit in an arrangement a pass cannot
    /// work with.
    #[error("{pass}: {reason}")]
    InvalidStructure { pass: &'static str, reason: String },

    /// A path handed to the path resolver or the optimizer is unusable.
    ///
    /// Raised before any network or file I/O happens.
    #[error("Invalid path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: &'static str },

    /// Local source file not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Directory creation, file read or file write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// Report serialization errors.
    #[error("Failed to serialize report: {0}")]
    ReportError(#[from] serde_json::Error),
}

/// Result type alias for OfflineError.
pub type Result<T> = std::result::Result<T, OfflineError>;
