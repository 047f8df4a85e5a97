//! Stylesheet and link rewriting.
//!
//! The offline mirror keeps one local stylesheet at the root of the output
//! tree and writes every article as `<page name>.html`. File description pages
//! and raw images are both stored as `File:<file name>`, so links into the
//! `File:` namespace keep their name as-is.

use tracing::{debug, trace};

use crate::dom;
use crate::parse::Document;
use crate::paths::OutputContext;
use crate::selector::{AttrPattern, Selector};
use crate::{OfflineError, Result};

/// File name of the local stylesheet, relative to the output root.
pub const LOCAL_STYLESHEET: &str = "ArchWikiOffline.css";

/// Path prefix of article links on the live wiki.
pub const WIKI_LINK_PREFIX: &str = "/index.php/";

/// Path prefix of uploaded images on the live wiki.
pub const WIKI_IMAGE_PREFIX: &str = "/images/";

/// Namespace whose pages map directly to local file names.
pub const FILE_NAMESPACE: &str = "File:";

pub const STYLESHEET_LINKS: Selector<'static> =
    Selector::TagAttr { tag: "link", attr: "rel", pattern: AttrPattern::Equals("stylesheet") };

pub const WIKI_LINKS: Selector<'static> =
    Selector::TagAttr { tag: "a", attr: "href", pattern: AttrPattern::Prefix(WIKI_LINK_PREFIX) };

pub const WIKI_IMAGES: Selector<'static> =
    Selector::TagAttr { tag: "img", attr: "src", pattern: AttrPattern::Prefix(WIKI_IMAGE_PREFIX) };

const PASS: &str = "replace_stylesheets";

/// What [`update_links`] rewrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub links: usize,
    pub images: usize,
}

/// Points the first stylesheet link at the local stylesheet and removes all
/// other stylesheet links. Returns how many links were removed.
pub fn replace_stylesheets(doc: &mut Document, ctx: &OutputContext) -> Result<usize> {
    let links = doc.select_all(&STYLESHEET_LINKS);
    let (first, rest) = links
        .split_first()
        .ok_or_else(|| OfflineError::MissingElement { pass: PASS, selector: STYLESHEET_LINKS.to_string() })?;

    dom::set_attr(first, "href", &ctx.local_path(LOCAL_STYLESHEET));
    for link in rest {
        dom::detach(link);
    }

    debug!(removed = rest.len(), "replaced stylesheets");
    Ok(rest.len())
}

/// Rewrites internal wiki links and image sources relative to the output
/// file. Everything else is left alone.
pub fn update_links(doc: &mut Document, ctx: &OutputContext) -> LinkStats {
    let mut stats = LinkStats::default();

    for anchor in doc.select_all(&WIKI_LINKS) {
        if let Some(href) = dom::get_attr(&anchor, "href")
            && let Some(rewritten) = rewrite_link(&href, ctx.prefix())
        {
            trace!(from = %href, to = %rewritten, "rewrote link");
            dom::set_attr(&anchor, "href", &rewritten);
            stats.links += 1;
        }
    }

    for image in doc.select_all(&WIKI_IMAGES) {
        if let Some(src) = dom::get_attr(&image, "src")
            && let Some(rewritten) = rewrite_image_source(&src, ctx.prefix())
        {
            trace!(from = %src, to = %rewritten, "rewrote image");
            dom::set_attr(&image, "src", &rewritten);
            stats.images += 1;
        }
    }

    debug!(links = stats.links, images = stats.images, "updated links");
    stats
}

/// Maps an internal wiki link to its local counterpart.
///
/// Returns `None` for anything that does not start with
/// [`WIKI_LINK_PREFIX`].
///
/// # Example
///
/// ```rust
/// use wiki_offline_core::rewrite_link;
///
/// assert_eq!(rewrite_link("/index.php/Foo#Bar", "..").as_deref(), Some("../Foo.html#Bar"));
/// assert_eq!(rewrite_link("/index.php/File:Logo.png", "..").as_deref(), Some("../File:Logo.png"));
/// assert_eq!(rewrite_link("https://example.com/", ".."), None);
/// ```
pub fn rewrite_link(href: &str, prefix: &str) -> Option<String> {
    let page = href.strip_prefix(WIKI_LINK_PREFIX)?;

    if page.starts_with(FILE_NAMESPACE) {
        return Some(format!("{prefix}/{page}"));
    }

    let (path, fragment) = match page.find('#') {
        Some(i) => page.split_at(i),
        None => (page, ""),
    };
    Some(format!("{prefix}/{path}.html{fragment}"))
}

/// Maps an uploaded image path to its local `File:` name.
///
/// # Example
///
/// ```rust
/// use wiki_offline_core::rewrite_image_source;
///
/// assert_eq!(rewrite_image_source("/images/3/3a/Logo.png", ".").as_deref(), Some("./File:Logo.png"));
/// ```
pub fn rewrite_image_source(src: &str, prefix: &str) -> Option<String> {
    let path = src.strip_prefix(WIKI_IMAGE_PREFIX)?;
    let file_name = path.rsplit('/').next().unwrap_or(path);
    Some(format!("{prefix}/{FILE_NAMESPACE}{file_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/index.php/Foo#Bar", "..", Some("../Foo.html#Bar"))]
    #[case("/index.php/File:Something.png", "..", Some("../File:Something.png"))]
    #[case("/index.php/File:Something.png", ".", Some("./File:Something.png"))]
    #[case("/index.php/Systemd", ".", Some("./Systemd.html"))]
    #[case("/index.php/Systemd/Timers", "../..", Some("../../Systemd/Timers.html"))]
    #[case("/index.php/Foo#Bar#Baz", ".", Some("./Foo.html#Bar#Baz"))]
    #[case("/index.php/Help:Reading#", ".", Some("./Help:Reading.html#"))]
    #[case("/index.php?title=Foo&action=edit", ".", None)]
    #[case("https://wiki.archlinux.org/index.php/Foo", ".", None)]
    #[case("mailto:someone@example.com", ".", None)]
    #[case("#section", ".", None)]
    fn test_rewrite_link(#[case] href: &str, #[case] prefix: &str, #[case] expected: Option<&str>) {
        assert_eq!(rewrite_link(href, prefix).as_deref(), expected);
    }

    #[rstest]
    #[case("/images/3/3a/Logo.png", ".", Some("./File:Logo.png"))]
    #[case("/images/thumb/a/ab/Shot.png/300px-Shot.png", "..", Some("../File:300px-Shot.png"))]
    #[case("/images/Flat.svg", "..", Some("../File:Flat.svg"))]
    #[case("/skins/archlinux/logo.png", ".", None)]
    #[case("https://example.com/images/x.png", ".", None)]
    fn test_rewrite_image_source(#[case] src: &str, #[case] prefix: &str, #[case] expected: Option<&str>) {
        assert_eq!(rewrite_image_source(src, prefix).as_deref(), expected);
    }

    #[cfg(unix)]
    fn context(output: &str) -> OutputContext {
        OutputContext::new(std::path::Path::new("/out"), std::path::Path::new(output)).unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn test_replace_stylesheets_keeps_one() {
        let mut doc = Document::parse(
            r#"<html><head>
                <link rel="stylesheet" href="/load.php?modules=site">
                <link rel="icon" href="/favicon.ico">
                <link rel="stylesheet" href="/load.php?modules=skins">
                </head><body><link rel="stylesheet" href="/late.css"></body></html>"#,
        )
        .unwrap();

        let removed = replace_stylesheets(&mut doc, &context("/out/Foo/Bar.html")).unwrap();

        assert_eq!(removed, 2);
        let remaining = doc.select_all(&STYLESHEET_LINKS);
        assert_eq!(remaining.len(), 1);
        assert_eq!(dom::get_attr(&remaining[0], "href").as_deref(), Some("../ArchWikiOffline.css"));
        assert_eq!(doc.select_all(&Selector::TagAttr { tag: "link", attr: "rel", pattern: AttrPattern::Equals("icon") }).len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_replace_stylesheets_requires_one() {
        let mut doc = Document::parse("<html><head></head><body></body></html>").unwrap();
        let err = replace_stylesheets(&mut doc, &context("/out/Page.html")).unwrap_err();
        assert!(matches!(err, OfflineError::MissingElement { pass: "replace_stylesheets", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_update_links_rewrites_internal_only() {
        let mut doc = Document::parse(
            r##"<html><body>
                <a id="a1" href="/index.php/Installation_guide#Pre-installation">guide</a>
                <a id="a2" href="/index.php/File:Tux.png">tux</a>
                <a id="a3" href="https://archlinux.org/">home</a>
                <a id="a4" href="#top">top</a>
                <a id="a5">no href</a>
                <img id="i1" src="/images/a/ab/Tux.png">
                <img id="i2" src="data:image/png;base64,AAAA">
                </body></html>"##,
        )
        .unwrap();

        let stats = update_links(&mut doc, &context("/out/Page.html"));
        assert_eq!(stats, LinkStats { links: 2, images: 1 });

        let attr = |id: &str, name: &str| {
            doc.select_first(&Selector::Id(id)).and_then(|n| dom::get_attr(&n, name))
        };
        assert_eq!(attr("a1", "href").as_deref(), Some("./Installation_guide.html#Pre-installation"));
        assert_eq!(attr("a2", "href").as_deref(), Some("./File:Tux.png"));
        assert_eq!(attr("a3", "href").as_deref(), Some("https://archlinux.org/"));
        assert_eq!(attr("a4", "href").as_deref(), Some("#top"));
        assert_eq!(attr("a5", "href"), None);
        assert_eq!(attr("i1", "src").as_deref(), Some("./File:Tux.png"));
        assert_eq!(attr("i2", "src").as_deref(), Some("data:image/png;base64,AAAA"));
    }
}
