//! HTML parsing and the mutable document tree.
//!
//! This module provides the [`Document`] type: an `html5ever`-parsed
//! `markup5ever_rcdom` tree that the rewriting passes mutate in place, plus
//! selector queries and serialization back to HTML.
//!
//! # Example
//!
//! ```rust
//! use wiki_offline_core::{Document, Selector};
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div id="content"><p>Paragraph</p></div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! assert!(doc.select_first(&Selector::Id("content")).is_some());
//! ```

use std::cell::RefCell;

use html5ever::interface::{Attribute, QualName};
use html5ever::parse_document;
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::create_element;
use html5ever::{LocalName, namespace_url, ns};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

use crate::dom;
use crate::selector::Selector;
use crate::{OfflineError, Result};

/// A parsed HTML page, exclusively owned by one conversion.
///
/// Nodes are reference-counted handles into the tree; mutations through
/// [`crate::dom`] helpers are visible to every later query.
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wiki_offline_core::Document;
    ///
    /// let doc = Document::parse("<html><head><title>Systemd</title></head></html>").unwrap();
    /// assert_eq!(doc.title(), Some("Systemd".to_string()));
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        Self::parse_bytes(html.as_bytes())
    }

    /// Parses HTML from raw bytes. Invalid UTF-8 sequences are replaced.
    pub fn parse_bytes(mut bytes: &[u8]) -> Result<Self> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut bytes)
            .map_err(|e| OfflineError::HtmlParseError(e.to_string()))?;

        let doc = Self { dom };
        if doc.html_element().is_none() {
            return Err(OfflineError::HtmlParseError("document has no <html> element".to_string()));
        }

        Ok(doc)
    }

    /// The document node at the top of the tree.
    pub fn root(&self) -> &Handle {
        &self.dom.document
    }

    /// The root `<html>` element.
    pub fn html_element(&self) -> Option<Handle> {
        self.dom
            .document
            .children
            .borrow()
            .iter()
            .find(|child| dom::element_name(child) == Some("html"))
            .cloned()
    }

    /// Gets the document title text.
    pub fn title(&self) -> Option<String> {
        dom::descendants(self.root())
            .iter()
            .find(|node| dom::element_name(node) == Some("title"))
            .map(|node| dom::text_content(node).trim().to_string())
            .filter(|title| !title.is_empty())
    }

    /// First element matching `selector` in document order.
    pub fn select_first(&self, selector: &Selector) -> Option<Handle> {
        dom::descendants(self.root()).into_iter().find(|node| selector.matches(node))
    }

    /// All elements matching `selector`, in document order.
    pub fn select_all(&self, selector: &Selector) -> Vec<Handle> {
        dom::descendants(self.root())
            .into_iter()
            .filter(|node| selector.matches(node))
            .collect()
    }

    /// All comment nodes, wherever they are.
    pub fn comments(&self) -> Vec<Handle> {
        dom::descendants(self.root()).into_iter().filter(dom::is_comment).collect()
    }

    /// Creates a detached HTML element.
    pub fn create_element(&self, tag: &str, attrs: &[(&str, &str)]) -> Handle {
        let attrs = attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: QualName::new(None, ns!(), LocalName::from(*name)),
                value: StrTendril::from_slice(value),
            })
            .collect();
        self.create_element_with_attrs(tag, attrs)
    }

    /// Creates a detached text node.
    pub fn create_text(&self, text: &str) -> Handle {
        Node::new(NodeData::Text { contents: RefCell::new(StrTendril::from_slice(text)) })
    }

    fn create_element_with_attrs(&self, tag: &str, attrs: Vec<Attribute>) -> Handle {
        create_element(&self.dom, QualName::new(None, ns!(html), LocalName::from(tag)), attrs)
    }

    /// Changes the tag of an element, keeping its attributes, children and
    /// position in the tree.
    ///
    /// rcdom element names are immutable, so the element is replaced by a new
    /// node; the returned handle is the one now in the tree.
    pub fn retag(&self, element: &Handle, tag: &str) -> Handle {
        let attrs = match &element.data {
            NodeData::Element { attrs, .. } => attrs.borrow().clone(),
            _ => return element.clone(),
        };

        let renamed = self.create_element_with_attrs(tag, attrs);
        dom::move_children(element, &renamed);
        dom::replace(element, &renamed);
        renamed
    }

    /// Serializes the `<html>` element and everything below it.
    ///
    /// No doctype is emitted; see [`crate::write_document`].
    pub fn to_html(&self) -> Result<String> {
        let html = self
            .html_element()
            .ok_or_else(|| OfflineError::HtmlParseError("document has no <html> element".to_string()))?;

        let mut buf = Vec::new();
        let serializable: SerializableHandle = html.into();
        let opts = SerializeOpts { traversal_scope: TraversalScope::IncludeNode, ..Default::default() };
        serialize(&mut buf, &serializable, opts)?;

        String::from_utf8(buf).map_err(|e| OfflineError::HtmlParseError(e.to_string()))
    }
}
