//! Element selectors used by the rewriting passes.
//!
//! Every node a pass cares about is located through one of a small, closed
//! set of predicates. Selectors print themselves in CSS syntax so log lines
//! and [`OfflineError::MissingElement`](crate::OfflineError::MissingElement)
//! name exactly what was looked for.

use std::fmt;

use markup5ever_rcdom::{Handle, NodeData};

use crate::dom::attr_value;

/// How an attribute value is compared in [`Selector::TagAttr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrPattern<'a> {
    /// Value equals the string exactly.
    Equals(&'a str),
    /// Value starts with the string.
    Prefix(&'a str),
}

impl AttrPattern<'_> {
    fn matches(&self, value: &str) -> bool {
        match self {
            AttrPattern::Equals(expected) => value == *expected,
            AttrPattern::Prefix(prefix) => value.starts_with(prefix),
        }
    }
}

/// A predicate over element nodes.
///
/// # Example
///
/// ```rust
/// use wiki_offline_core::{AttrPattern, Selector};
///
/// let links = Selector::TagAttr { tag: "a", attr: "href", pattern: AttrPattern::Prefix("/index.php/") };
/// assert_eq!(links.to_string(), r#"a[href^="/index.php/"]"#);
/// assert_eq!(Selector::Id("content").to_string(), "#content");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// `#id`
    Id(&'a str),
    /// `.class`, matching one entry of the whitespace-separated class list.
    Class(&'a str),
    /// `tag.class`
    TagClass { tag: &'a str, class: &'a str },
    /// `tag[attr=value]` or `tag[attr^=prefix]`
    TagAttr { tag: &'a str, attr: &'a str, pattern: AttrPattern<'a> },
}

impl Selector<'_> {
    /// Returns whether `node` is an element matching this selector.
    pub fn matches(&self, node: &Handle) -> bool {
        let NodeData::Element { name, attrs, .. } = &node.data else {
            return false;
        };
        let attrs = attrs.borrow();
        let has_class = |class: &str| {
            attr_value(&attrs, "class").is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
        };

        match self {
            Selector::Id(id) => attr_value(&attrs, "id") == Some(*id),
            Selector::Class(class) => has_class(*class),
            Selector::TagClass { tag, class } => &*name.local == *tag && has_class(*class),
            Selector::TagAttr { tag, attr, pattern } => {
                &*name.local == *tag && attr_value(&attrs, attr).is_some_and(|value| pattern.matches(value))
            }
        }
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::TagClass { tag, class } => write!(f, "{tag}.{class}"),
            Selector::TagAttr { tag, attr, pattern: AttrPattern::Equals(value) } => {
                write!(f, "{tag}[{attr}=\"{value}\"]")
            }
            Selector::TagAttr { tag, attr, pattern: AttrPattern::Prefix(prefix) } => {
                write!(f, "{tag}[{attr}^=\"{prefix}\"]")
            }
        }
    }
}
