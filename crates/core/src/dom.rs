//! Node-level helpers over the `markup5ever_rcdom` tree.
//!
//! The rcdom node type exposes its parent as a `Cell<Option<Weak<Node>>>` and
//! its children as a `RefCell<Vec<Rc<Node>>>`; these helpers keep both sides of
//! that relationship consistent whenever a node is moved or removed.

use std::rc::Rc;

use html5ever::interface::{Attribute, QualName};
use html5ever::tendril::StrTendril;
use html5ever::{LocalName, namespace_url, ns};
use markup5ever_rcdom::{Handle, NodeData};

/// Returns the local tag name of an element node.
pub fn element_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

pub fn is_comment(node: &Handle) -> bool {
    matches!(node.data, NodeData::Comment { .. })
}

/// Looks up an attribute by local name in an attribute list.
pub fn attr_value<'a>(attrs: &'a [Attribute], attr_name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|attr| &*attr.name.local == attr_name)
        .map(|attr| &*attr.value)
}

/// Gets an attribute value of an element node.
pub fn get_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attr_value(&attrs.borrow(), attr_name).map(str::to_string),
        _ => None,
    }
}

/// Sets an attribute on an element node, adding it when absent.
pub fn set_attr(node: &Handle, attr_name: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|attr| &*attr.name.local == attr_name) {
            Some(attr) => attr.value = StrTendril::from_slice(value),
            None => attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                value: StrTendril::from_slice(value),
            }),
        }
    }
}

/// Removes an attribute from an element node. Returns whether it was present.
pub fn remove_attr(node: &Handle, attr_name: &str) -> bool {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        let before = attrs.len();
        attrs.retain(|attr| &*attr.name.local != attr_name);
        return attrs.len() != before;
    }
    false
}

/// Returns the parent of a node, if it is still attached.
pub fn parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

/// Detaches a node (and its subtree) from its parent.
pub fn detach(node: &Handle) {
    if let Some(weak) = node.parent.take()
        && let Some(parent) = weak.upgrade()
    {
        parent.children.borrow_mut().retain(|child| !Rc::ptr_eq(child, node));
    }
}

/// Inserts `node` into `parent` at child position `index` (clamped to the
/// number of children), detaching it from any previous parent first.
pub fn insert_child(parent: &Handle, index: usize, node: &Handle) {
    detach(node);
    node.parent.set(Some(Rc::downgrade(parent)));
    let mut children = parent.children.borrow_mut();
    let index = index.min(children.len());
    children.insert(index, node.clone());
}

/// Inserts `node` directly after `reference` under the same parent. Does
/// nothing when `reference` is detached.
pub fn insert_after(reference: &Handle, node: &Handle) {
    let Some(parent) = parent(reference) else {
        return;
    };
    let position = parent.children.borrow().iter().position(|child| Rc::ptr_eq(child, reference));
    if let Some(pos) = position {
        insert_child(&parent, pos + 1, node);
    }
}

/// Whether `ancestor` is `node` itself or one of its ancestors.
pub fn contains(ancestor: &Handle, node: &Handle) -> bool {
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if Rc::ptr_eq(&n, ancestor) {
            return true;
        }
        current = parent(&n);
    }
    false
}

/// Inserts `node` before the element child at `element_index`, counting
/// element children only. Appends when `parent` has fewer element children.
pub fn insert_at_element_index(parent: &Handle, element_index: usize, node: &Handle) {
    let position = {
        let children = parent.children.borrow();
        children
            .iter()
            .enumerate()
            .filter(|(_, child)| is_element(child))
            .nth(element_index)
            .map_or(children.len(), |(i, _)| i)
    };
    insert_child(parent, position, node);
}

/// Replaces `old` with `new` at the same position under `old`'s parent.
pub fn replace(old: &Handle, new: &Handle) {
    let Some(parent) = parent(old) else {
        return;
    };

    let mut siblings = parent.children.borrow_mut();
    if let Some(pos) = siblings.iter().position(|child| Rc::ptr_eq(child, old)) {
        new.parent.set(Some(Rc::downgrade(&parent)));
        siblings[pos] = new.clone();
        old.parent.set(None);
    }
}

/// Moves every child of `from` to the end of `to`.
pub fn move_children(from: &Handle, to: &Handle) {
    let children: Vec<Handle> = from.children.borrow_mut().drain(..).collect();
    for child in children {
        child.parent.set(Some(Rc::downgrade(to)));
        to.children.borrow_mut().push(child);
    }
}

/// Collects `node` and all its descendants in document (pre-)order.
pub fn descendants(node: &Handle) -> Vec<Handle> {
    let mut found = Vec::new();
    let mut stack = vec![node.clone()];

    while let Some(current) = stack.pop() {
        for child in current.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
        found.push(current);
    }

    found
}

/// Concatenated text content of a subtree.
pub fn text_content(node: &Handle) -> String {
    descendants(node)
        .iter()
        .filter_map(|n| match &n.data {
            NodeData::Text { contents } => Some(contents.borrow().to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use crate::selector::Selector;

    fn list_doc() -> Document {
        Document::parse(r#"<html><body><ul id="l"><li>a</li> <li>b</li> <li>c</li></ul></body></html>"#).unwrap()
    }

    fn tags(node: &Handle) -> Vec<String> {
        node.children
            .borrow()
            .iter()
            .filter_map(|c| element_name(c).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_set_and_remove_attr() {
        let doc = list_doc();
        let list = doc.select_first(&Selector::Id("l")).unwrap();

        set_attr(&list, "style", "margin: 0");
        assert_eq!(get_attr(&list, "style").as_deref(), Some("margin: 0"));

        set_attr(&list, "style", "width: 100%");
        assert_eq!(get_attr(&list, "style").as_deref(), Some("width: 100%"));

        assert!(remove_attr(&list, "style"));
        assert!(!remove_attr(&list, "style"));
        assert_eq!(get_attr(&list, "style"), None);
    }

    #[test]
    fn test_detach_clears_parent() {
        let doc = list_doc();
        let list = doc.select_first(&Selector::Id("l")).unwrap();
        let first = list.children.borrow()[0].clone();

        detach(&first);
        assert!(parent(&first).is_none());
        assert_eq!(tags(&list), vec!["li", "li"]);
    }

    #[test]
    fn test_parent_is_not_consumed() {
        let doc = list_doc();
        let list = doc.select_first(&Selector::Id("l")).unwrap();
        let first = list.children.borrow()[0].clone();

        assert!(parent(&first).is_some());
        assert!(parent(&first).is_some());
    }

    #[test]
    fn test_insert_at_element_index_skips_text() {
        let doc = list_doc();
        let list = doc.select_first(&Selector::Id("l")).unwrap();
        let br = doc.create_element("br", &[]);

        insert_at_element_index(&list, 2, &br);
        assert_eq!(tags(&list), vec!["li", "li", "br", "li"]);
    }

    #[test]
    fn test_insert_at_element_index_appends_when_short() {
        let doc = list_doc();
        let list = doc.select_first(&Selector::Id("l")).unwrap();
        let br = doc.create_element("br", &[]);

        insert_at_element_index(&list, 10, &br);
        assert_eq!(tags(&list), vec!["li", "li", "li", "br"]);
    }

    #[test]
    fn test_descendants_document_order() {
        let doc = list_doc();
        let list = doc.select_first(&Selector::Id("l")).unwrap();
        let text: Vec<String> = descendants(&list)
            .iter()
            .filter(|n| element_name(n) == Some("li"))
            .map(text_content)
            .collect();
        assert_eq!(text, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insert_after_places_node_next_to_reference() {
        let doc = list_doc();
        let list = doc.select_first(&Selector::Id("l")).unwrap();
        let first = list.children.borrow()[0].clone();
        let br = doc.create_element("br", &[]);

        insert_after(&first, &br);
        assert_eq!(tags(&list), vec!["li", "br", "li", "li"]);
        assert!(Rc::ptr_eq(&list.children.borrow()[1], &br));
    }

    #[test]
    fn test_contains_walks_ancestors() {
        let doc = list_doc();
        let list = doc.select_first(&Selector::Id("l")).unwrap();
        let first = list.children.borrow()[0].clone();

        assert!(contains(&list, &first));
        assert!(contains(&list, &list));
        assert!(!contains(&first, &list));
    }
}
