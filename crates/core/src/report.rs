use std::path::PathBuf;

use serde::Serialize;

use crate::Result;

/// Summary of what one page conversion changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptimizeReport {
    /// File the page was (or would be) written to.
    pub output: PathBuf,
    /// Relative path from the page back to the output root.
    pub prefix: String,
    /// Text of the page's `<title>`, if it has one.
    pub title: Option<String>,
    pub stripped_elements: usize,
    pub stripped_comments: usize,
    /// Stylesheet links dropped in favour of the local stylesheet.
    pub removed_stylesheets: usize,
    pub rewritten_links: usize,
    pub rewritten_images: usize,
}

impl OptimizeReport {
    /// Gets the report as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
