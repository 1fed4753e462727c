use crate::dom::{Document, Node};

/// Structural cleanup scheduled after node changes: inline formatting
/// wrappers with no remaining text are dropped, stray empty text leaves are
/// removed, and adjacent text siblings merge. Returns the edit count so
/// callers can observe that a repeated pass is a no-op.
pub fn cleanup(doc: &mut Document) -> usize {
    cleanup_children(&mut doc.children)
}

fn cleanup_children(children: &mut Vec<Node>) -> usize {
    let mut edits = 0;
    for node in children.iter_mut() {
        if let Node::Element(el) = node {
            edits += cleanup_children(&mut el.children);
        }
    }

    let old = std::mem::take(children);
    let had_siblings = old.len() > 1;

    for node in old {
        match node {
            Node::Element(el)
                if el.is_inline_format()
                    && el
                        .children
                        .iter()
                        .all(|c| matches!(c, Node::Text(t) if t.text.is_empty())) =>
            {
                edits += 1;
            }
            Node::Text(t) if t.text.is_empty() && had_siblings => {
                edits += 1;
            }
            Node::Text(t) => {
                if let Some(Node::Text(prev)) = children.last_mut() {
                    prev.text.push_str(&t.text);
                    edits += 1;
                } else {
                    children.push(Node::Text(t));
                }
            }
            other => children.push(other),
        }
    }
    edits
}
