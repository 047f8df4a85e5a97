//! Removal of server-only page chrome.

use tracing::{debug, trace};

use crate::dom;
use crate::parse::Document;
use crate::selector::Selector;

/// Elements that are useless without the live wiki: the site navbar, the
/// sidebar column, section edit links and accessibility jump links.
pub const STRIP_SELECTORS: [Selector<'static>; 5] = [
    Selector::Id("archnavbar"),
    Selector::Id("column-one"),
    Selector::Class("mw-editsection"),
    Selector::Id("jump-to-nav"),
    Selector::Id("siteSub"),
];

/// What [`strip_page`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripStats {
    pub elements: usize,
    pub comments: usize,
}

/// Removes every element matching [`STRIP_SELECTORS`], then every comment
/// node (including IE conditional comments).
///
/// Missing elements are fine; some pages have no edit sections at all.
pub fn strip_page(doc: &mut Document) -> StripStats {
    let mut stats = StripStats::default();

    for selector in &STRIP_SELECTORS {
        let matches = doc.select_all(selector);
        trace!(%selector, count = matches.len(), "stripping elements");
        for node in &matches {
            dom::detach(node);
        }
        stats.elements += matches.len();
    }

    let comments = doc.comments();
    for comment in &comments {
        dom::detach(comment);
    }
    stats.comments = comments.len();

    debug!(elements = stats.elements, comments = stats.comments, "stripped page");
    stats
}
