//! Inline layout overrides compensating for the removed sidebar and navbar.

use tracing::debug;

use crate::dom;
use crate::parse::Document;
use crate::selector::Selector;
use crate::{OfflineError, Result};

const PASS: &str = "fix_layout";

/// Layout containers and the inline style each one gets.
pub const LAYOUT_FIXES: [(Selector<'static>, &str); 3] = [
    (Selector::Id("globalWrapper"), "width: 100%"),
    (Selector::Id("content"), "margin: 2em; margin-bottom: 0"),
    (Selector::Id("f-list"), "margin: 0 2em"),
];

/// Sets the inline style of every container in [`LAYOUT_FIXES`].
///
/// All three containers must exist; the first match wins when an id is
/// duplicated. Nothing is modified unless all of them are found.
pub fn fix_layout(doc: &mut Document) -> Result<()> {
    let mut targets = Vec::with_capacity(LAYOUT_FIXES.len());
    for (selector, style) in &LAYOUT_FIXES {
        let node = doc
            .select_first(selector)
            .ok_or_else(|| OfflineError::MissingElement { pass: PASS, selector: selector.to_string() })?;
        targets.push((node, *style));
    }

    for (node, style) in &targets {
        dom::set_attr(node, "style", style);
    }

    debug!(containers = targets.len(), "fixed layout");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_of(doc: &Document, id: &str) -> Option<String> {
        doc.select_first(&Selector::Id(id)).and_then(|n| dom::get_attr(&n, "style"))
    }

    #[test]
    fn test_fix_layout_sets_styles() {
        let mut doc = Document::parse(
            r#"<html><body><div id="globalWrapper" style="width: 80%"><div id="content"></div>
               <ul id="f-list"></ul></div></body></html>"#,
        )
        .unwrap();

        fix_layout(&mut doc).unwrap();

        assert_eq!(style_of(&doc, "globalWrapper").as_deref(), Some("width: 100%"));
        assert_eq!(style_of(&doc, "content").as_deref(), Some("margin: 2em; margin-bottom: 0"));
        assert_eq!(style_of(&doc, "f-list").as_deref(), Some("margin: 0 2em"));
    }

    #[test]
    fn test_fix_layout_missing_container() {
        let mut doc =
            Document::parse(r#"<html><body><div id="globalWrapper"><div id="content"></div></div></body></html>"#)
                .unwrap();

        let err = fix_layout(&mut doc).unwrap_err();
        match err {
            OfflineError::MissingElement { pass, selector } => {
                assert_eq!(pass, "fix_layout");
                assert_eq!(selector, "#f-list");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(style_of(&doc, "globalWrapper"), None);
    }

    #[test]
    fn test_fix_layout_first_match_wins() {
        let mut doc = Document::parse(
            r#"<html><body><div id="globalWrapper"><div id="content" title="a"></div>
               <div id="content" title="b"></div><ul id="f-list"></ul></div></body></html>"#,
        )
        .unwrap();

        fix_layout(&mut doc).unwrap();

        let styled: Vec<_> = doc
            .select_all(&Selector::Id("content"))
            .iter()
            .map(|n| (dom::get_attr(n, "title"), dom::get_attr(n, "style")))
            .collect();
        assert_eq!(styled[0], (Some("a".to_string()), Some("margin: 2em; margin-bottom: 0".to_string())));
        assert_eq!(styled[1], (Some("b".to_string()), None));
    }
}
