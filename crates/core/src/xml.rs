use crate::error::ParseError;

fn find_element<'a, 'input: 'a>(
    node: roxmltree::Node<'a, 'input>,
    path: &[&str],
) -> Option<roxmltree::Node<'a, 'input>> {
    if path.is_empty() {
        return Some(node);
    }
    for child in node.children() {
        if child.is_element() && child.tag_name().name() == path[0] {
            if path.len() == 1 {
                return Some(child);
            }
            if let Some(found) = find_element(child, &path[1..]) {
                return Some(found);
            }
        }
    }
    None
}

fn collect_elements<'a, 'input: 'a>(
    node: roxmltree::Node<'a, 'input>,
    path: &[&str],
    out: &mut Vec<roxmltree::Node<'a, 'input>>,
) {
    if path.is_empty() {
        out.push(node);
        return;
    }
    for child in node.children() {
        if child.is_element() && child.tag_name().name() == path[0] {
            collect_elements(child, &path[1..], out);
        }
    }
}

fn inner_text(node: roxmltree::Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Parse `xml` and check that the document element is `root`.
pub(crate) fn parse_document<'input>(
    xml: &'input str,
    root: &'static str,
) -> Result<roxmltree::Document<'input>, ParseError> {
    let doc = roxmltree::Document::parse(xml)?;
    let found = doc.root_element().tag_name().name();
    if found != root {
        return Err(ParseError::UnexpectedRoot {
            expected: root,
            found: found.to_string(),
        });
    }
    Ok(doc)
}

/// Text of the element at `path` below the root, exactly as written, or
/// `None` when absent. An element that is present but empty yields `Some("")`.
pub(crate) fn optional_text(doc: &roxmltree::Document, path: &[&str]) -> Option<String> {
    find_element(doc.root_element(), path).map(inner_text)
}

pub(crate) fn required_text(doc: &roxmltree::Document, path: &[&str]) -> Result<String, ParseError> {
    optional_text(doc, path).ok_or_else(|| ParseError::MissingElement(path.join("/")))
}

pub(crate) fn required_integer(doc: &roxmltree::Document, path: &[&str]) -> Result<i64, ParseError> {
    let value = required_text(doc, path)?;
    value.trim().parse().map_err(|_| ParseError::InvalidInteger {
        element: path.join("/"),
        value,
    })
}

/// Text of every element matching `path`, in document order.
pub(crate) fn all_text(doc: &roxmltree::Document, path: &[&str]) -> Vec<String> {
    let mut nodes = Vec::new();
    collect_elements(doc.root_element(), path, &mut nodes);
    nodes.into_iter().map(inner_text).collect()
}
