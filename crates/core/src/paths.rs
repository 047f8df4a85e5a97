//! Relative path computation between an output file and the mirror root.
//!
//! Every local reference written into a page (stylesheet, article links,
//! images) is prefixed with the path from the page's directory back to the
//! base output directory. Subpages live in subdirectories, so the prefix is
//! computed per output file.

use std::path::{Component, Path, PathBuf};

use crate::{OfflineError, Result};

/// Base output directory plus the relative prefix for one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputContext {
    base_dir: PathBuf,
    prefix: String,
}

impl OutputContext {
    /// Computes the context for writing `output_file` under `base_dir`.
    pub fn new(base_dir: &Path, output_file: &Path) -> Result<Self> {
        let prefix = relative_prefix(base_dir, output_file)?;
        Ok(Self { base_dir: base_dir.to_path_buf(), prefix })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Relative path from the output file's directory to the base directory.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Joins `name` onto the prefix, e.g. `../ArchWikiOffline.css`.
    pub fn local_path(&self, name: &str) -> String {
        format!("{}/{}", self.prefix, name)
    }
}

/// Computes the relative path from the directory containing `output_file` to
/// `base_dir`.
///
/// Both paths must be absolute. They are normalized lexically, so neither has
/// to exist yet. The result uses `/` separators and is `"."` when the file
/// sits directly in `base_dir`.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use wiki_offline_core::relative_prefix;
///
/// # #[cfg(unix)] {
/// let prefix = relative_prefix(Path::new("/out"), Path::new("/out/Foo/Bar/Baz.html")).unwrap();
/// assert_eq!(prefix, "../..");
/// # }
/// ```
pub fn relative_prefix(base_dir: &Path, output_file: &Path) -> Result<String> {
    let base = normalize(base_dir)?;
    let target = normalize(output_file)?;

    let target_dir = match target.split_last() {
        Some((Component::Normal(_), dir)) => dir,
        _ => return Err(invalid(output_file, "output path has no file name")),
    };

    let common = base.iter().zip(target_dir).take_while(|(a, b)| a == b).count();
    if common == 0 {
        return Err(invalid(output_file, "output path and base directory have different roots"));
    }

    let mut parts = vec![".."; target_dir.len() - common];
    for component in &base[common..] {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| invalid(base_dir, "base directory is not valid UTF-8"))?;
        parts.push(part);
    }

    if parts.is_empty() { Ok(".".to_string()) } else { Ok(parts.join("/")) }
}

/// Resolves `.` and `..` without touching the filesystem. `..` at the root
/// stays at the root.
fn normalize(path: &Path) -> Result<Vec<Component<'_>>> {
    if !path.is_absolute() {
        return Err(invalid(path, "path must be absolute"));
    }

    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            other => components.push(other),
        }
    }

    Ok(components)
}

fn invalid(path: &Path, reason: &'static str) -> OfflineError {
    OfflineError::InvalidPath { path: path.to_path_buf(), reason }
}
