//! The page conversion pipeline.
//!
//! [`Optimizer`] runs the passes in a fixed order on one document:
//!
//! 1. [`strip_page`]: navigation chrome and comments
//! 2. [`fix_layout`]: inline styles for the remaining containers
//! 3. [`replace_stylesheets`]: one local stylesheet
//! 4. [`update_links`]: article links and images relative to the output file
//! 5. [`fix_footer`]: print footer into the footer list
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wiki_offline_core::Optimizer;
//!
//! let optimizer = Optimizer::new("/srv/wiki")?;
//! let html = std::fs::read("Systemd.html")?;
//! let report = optimizer.optimize(&html, Path::new("/srv/wiki/Systemd.html"))?;
//! println!("rewrote {} links", report.rewritten_links);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::assets::{replace_stylesheets, update_links};
use crate::footer::fix_footer;
use crate::layout::fix_layout;
use crate::parse::Document;
use crate::paths::OutputContext;
use crate::report::OptimizeReport;
use crate::strip::strip_page;
use crate::write::write_document;
use crate::{OfflineError, Result};

/// Converts wiki pages into files under one output root.
///
/// Holds only the base output directory, so one instance can convert any
/// number of pages, in any order.
#[derive(Debug, Clone)]
pub struct Optimizer {
    base_dir: PathBuf,
}

impl Optimizer {
    /// Creates an optimizer writing under `base_dir`, which must be absolute.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        if !base_dir.is_absolute() {
            return Err(OfflineError::InvalidPath { path: base_dir, reason: "base directory must be absolute" });
        }
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Computes the relative prefix for `output_file`.
    ///
    /// Callers that fetch pages themselves can use this to reject a bad
    /// destination before doing any network I/O.
    pub fn output_context(&self, output_file: &Path) -> Result<OutputContext> {
        OutputContext::new(&self.base_dir, output_file)
    }

    /// Runs every pass on an already parsed document. Does no I/O.
    pub fn optimize_document(&self, doc: &mut Document, output_file: &Path) -> Result<OptimizeReport> {
        let ctx = self.output_context(output_file)?;
        debug!(output = %output_file.display(), prefix = ctx.prefix(), "optimizing page");

        let stripped = strip_page(doc);
        fix_layout(doc)?;
        let removed_stylesheets = replace_stylesheets(doc, &ctx)?;
        let links = update_links(doc, &ctx);
        fix_footer(doc)?;

        Ok(OptimizeReport {
            output: output_file.to_path_buf(),
            prefix: ctx.prefix().to_string(),
            title: doc.title(),
            stripped_elements: stripped.elements,
            stripped_comments: stripped.comments,
            removed_stylesheets,
            rewritten_links: links.links,
            rewritten_images: links.images,
        })
    }

    /// Parses `html`, runs every pass and writes the result to `output_file`.
    ///
    /// The output path is validated before parsing; nothing is written unless
    /// every pass succeeds.
    pub fn optimize(&self, html: &[u8], output_file: &Path) -> Result<OptimizeReport> {
        self.output_context(output_file)?;

        let mut doc = Document::parse_bytes(html)?;
        let report = self.optimize_document(&mut doc, output_file)?;
        write_document(&doc, output_file)?;

        info!(output = %output_file.display(), links = report.rewritten_links, "page written");
        Ok(report)
    }
}
