//! Persisting a converted page.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::Result;
use crate::parse::Document;

/// Prologue written ahead of the serialized `<html>` element.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Writes `doc` to `output_file` as UTF-8 HTML, creating missing parent
/// directories first. Existing directories and files are reused.
pub fn write_document(doc: &Document, output_file: &Path) -> Result<()> {
    if let Some(parent) = output_file.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let html = doc.to_html()?;
    fs::write(output_file, format!("{DOCTYPE}\n{html}\n"))?;

    debug!(path = %output_file.display(), bytes = html.len(), "wrote document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_document_creates_directories() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("Foo").join("Bar").join("Baz.html");
        let doc = Document::parse("<html><body><p>Hi</p></body></html>").unwrap();

        write_document(&doc, &output).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>\n<html>"));
        assert!(written.contains("<p>Hi</p>"));
    }

    #[test]
    fn test_write_document_existing_directory() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("Page.html");
        std::fs::write(&output, "stale").unwrap();
        let doc = Document::parse("<html><body></body></html>").unwrap();

        write_document(&doc, &output).unwrap();
        write_document(&doc, &output).unwrap();

        assert!(!std::fs::read_to_string(&output).unwrap().contains("stale"));
    }

    #[test]
    fn test_write_document_parent_is_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("Foo");
        std::fs::write(&blocker, "not a directory").unwrap();
        let doc = Document::parse("<html></html>").unwrap();

        let result = write_document(&doc, &blocker.join("Bar.html"));
        assert!(matches!(result, Err(crate::OfflineError::WriteError(_))));
    }
}
