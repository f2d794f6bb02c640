//! Thin layer over [`roxmltree`] for namespace-aware inspection of parsed
//! documents.
//!
//! The helpers here never allocate a tree of their own; they hand out
//! borrowed [`Node`]s and slices of the original input so that callers can
//! re-feed an element's exact source text to another deserializer.

pub use roxmltree::*;

use crate::XmlError;

/// Parses `xml` into a read-only document.
///
/// DTDs are rejected by roxmltree's default options, so entity expansion
/// attacks never reach the caller.
pub fn parse(xml: &str) -> Result<Document<'_>, roxmltree::Error> {
    roxmltree::Document::parse(xml)
}

/// Returns `true` when `node` is an element with the given namespace and
/// local name.
pub fn is_element(node: Node<'_, '_>, namespace: &str, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(namespace)
}

/// Checks that `node` is the element `{namespace}name`.
pub fn expect_element(node: Node<'_, '_>, namespace: &str, name: &str) -> Result<(), XmlError> {
    if !node.is_element() {
        return Err(XmlError::InvalidNodeType {
            expected: NodeType::Element,
            found: node.node_type(),
        });
    }

    let tag = node.tag_name();
    if tag.name() != name {
        return Err(XmlError::XmlInvalidTag {
            expected: name.to_owned(),
            found: tag.name().to_owned(),
        });
    }

    if tag.namespace() != Some(namespace) {
        return Err(XmlError::XmlInvalidNamespace {
            tag: name.to_owned(),
            expected: namespace.to_owned(),
            found: tag.namespace().map(str::to_owned),
        });
    }

    Ok(())
}

/// Iterates over the element children of `node`, skipping text, comments
/// and processing instructions.
pub fn element_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// Finds the first element child with the given local name, whatever its
/// namespace.
pub fn find_child<'a, 'input: 'a>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    element_children(node).find(|child| child.tag_name().name() == name)
}

/// Concatenated text content of `node` and its descendants, `None` when the
/// element carries no text at all.
pub fn text_content(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect();

    if text.is_empty() { None } else { Some(text) }
}

/// The exact source text of `node`, start tag to end tag inclusive.
pub fn outer_xml<'input>(node: Node<'_, 'input>) -> &'input str {
    &node.document().input_text()[node.range()]
}

/// The exact source text between the start and end tag of `node`, empty for
/// a self-closing element.
pub fn inner_xml<'input>(node: Node<'_, 'input>) -> &'input str {
    match (node.first_child(), node.last_child()) {
        (Some(first), Some(last)) => {
            &node.document().input_text()[first.range().start..last.range().end]
        }
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "urn:test";

    const DOC: &str = r#"<?xml version="1.0"?>
<t:root xmlns:t="urn:test" xmlns:o="urn:other">
  <!-- comment -->
  <t:first>one &amp; two</t:first>
  <o:second><inner a="1">x</inner><inner/></o:second>
  <t:empty/>
</t:root>"#;

    #[test]
    fn element_children_skip_text_and_comments() {
        let doc = parse(DOC).unwrap();
        let names: Vec<_> = element_children(doc.root_element())
            .map(|n| n.tag_name().name())
            .collect();
        assert_eq!(names, ["first", "second", "empty"]);
    }

    #[test]
    fn is_element_checks_namespace_and_name() {
        let doc = parse(DOC).unwrap();
        let root = doc.root_element();
        assert!(is_element(root, NS, "root"));
        assert!(!is_element(root, "urn:other", "root"));
        assert!(!is_element(root, NS, "Root"));
    }

    #[test]
    fn expect_element_reports_mismatch() {
        let doc = parse(DOC).unwrap();
        let second = find_child(doc.root_element(), "second").unwrap();

        let err = expect_element(second, NS, "second").unwrap_err();
        match err {
            XmlError::XmlInvalidNamespace { tag, expected, found } => {
                assert_eq!(tag, "second");
                assert_eq!(expected, NS);
                assert_eq!(found.as_deref(), Some("urn:other"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = expect_element(second, "urn:other", "first").unwrap_err();
        assert!(matches!(err, XmlError::XmlInvalidTag { .. }));
    }

    #[test]
    fn text_content_unescapes_entities() {
        let doc = parse(DOC).unwrap();
        let first = find_child(doc.root_element(), "first").unwrap();
        assert_eq!(text_content(first).as_deref(), Some("one & two"));

        let empty = find_child(doc.root_element(), "empty").unwrap();
        assert_eq!(text_content(empty), None);
    }

    #[test]
    fn outer_and_inner_xml_slice_the_source() {
        let doc = parse(DOC).unwrap();
        let second = find_child(doc.root_element(), "second").unwrap();

        assert_eq!(
            outer_xml(second),
            r#"<o:second><inner a="1">x</inner><inner/></o:second>"#
        );
        assert_eq!(inner_xml(second), r#"<inner a="1">x</inner><inner/>"#);

        let empty = find_child(doc.root_element(), "empty").unwrap();
        assert_eq!(inner_xml(empty), "");
    }

    #[test]
    fn doctype_is_rejected() {
        let xml = r#"<!DOCTYPE r [<!ENTITY e "boom">]><r>&e;</r>"#;
        assert!(parse(xml).is_err());
    }
}
